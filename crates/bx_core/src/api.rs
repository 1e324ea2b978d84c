//! # Public API
//!
//! The single entry point composing classification, possession
//! segmentation and box-score aggregation, plus a JSON string façade for
//! embedding callers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate, PossessionCounts};
use crate::classify::{ClassifierConfig, EventClassifier};
use crate::error::{BoxScoreError, Result};
use crate::models::{
    Diagnostics, EventKind, GameBoxScore, ParsedEvent, PlayerId, RawEventRecord, TeamId,
};
use crate::segment::segment;
use crate::SCHEMA_VERSION;

/// Derive the complete box score for one game.
///
/// `records` must be pre-sorted by `sequence_number`; the core never
/// reorders. The only hard failure is an empty stream — every other
/// malformed-input condition degrades locally and is counted in the
/// returned diagnostics.
pub fn compute_game_box_score(
    game_id: &str,
    home_team_id: TeamId,
    away_team_id: TeamId,
    records: &[RawEventRecord],
    player_team_map: &HashMap<PlayerId, TeamId>,
) -> Result<GameBoxScore> {
    compute_with_classifier(
        game_id,
        home_team_id,
        away_team_id,
        records,
        player_team_map,
        &EventClassifier::new(),
    )
}

/// Same pipeline over a caller-supplied code table.
pub fn compute_with_config(
    game_id: &str,
    home_team_id: TeamId,
    away_team_id: TeamId,
    records: &[RawEventRecord],
    player_team_map: &HashMap<PlayerId, TeamId>,
    config: ClassifierConfig,
) -> Result<GameBoxScore> {
    compute_with_classifier(
        game_id,
        home_team_id,
        away_team_id,
        records,
        player_team_map,
        &EventClassifier::with_config(config),
    )
}

fn compute_with_classifier(
    game_id: &str,
    home_team_id: TeamId,
    away_team_id: TeamId,
    records: &[RawEventRecord],
    player_team_map: &HashMap<PlayerId, TeamId>,
    classifier: &EventClassifier,
) -> Result<GameBoxScore> {
    if records.is_empty() {
        return Err(BoxScoreError::NoEvents { game_id: game_id.to_string() });
    }

    let parsed: Vec<ParsedEvent> = records.iter().map(|r| classifier.classify(r)).collect();
    let mut diagnostics = stream_diagnostics(&parsed);

    let segmentation = segment(home_team_id, away_team_id, &parsed);
    diagnostics.dropped_open_possessions = segmentation.dropped_open_possessions;
    let counts = PossessionCounts {
        home: segmentation.possessions_for(home_team_id),
        away: segmentation.possessions_for(away_team_id),
    };

    let deltas: Vec<_> = parsed.iter().flat_map(|e| e.deltas.iter().copied()).collect();

    // Unwrap is safe: the stream was checked non-empty above.
    let last = parsed.last().expect("non-empty event stream");
    let final_score = (last.home_score, last.away_score);

    Ok(aggregate(
        game_id,
        home_team_id,
        away_team_id,
        player_team_map,
        &deltas,
        counts,
        final_score,
        diagnostics,
    ))
}

fn stream_diagnostics(parsed: &[ParsedEvent]) -> Diagnostics {
    let mut diagnostics = Diagnostics::default();
    for event in parsed {
        match event.kind {
            EventKind::Unrecognized => diagnostics.unrecognized_events += 1,
            EventKind::Rebound if event.deltas.is_empty() => diagnostics.team_rebounds += 1,
            EventKind::Turnover if !event.deltas.iter().any(|d| d.tov > 0) => {
                diagnostics.team_turnovers += 1
            }
            _ => {}
        }
    }
    diagnostics
}

/// Request envelope for the JSON façade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRequest {
    #[serde(default = "current_schema_version")]
    pub schema_version: u8,
    pub game_id: String,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub events: Vec<RawEventRecord>,
    pub player_team_map: HashMap<PlayerId, TeamId>,
}

fn current_schema_version() -> u8 {
    SCHEMA_VERSION
}

/// JSON-in/JSON-out wrapper around [`compute_game_box_score`].
pub fn compute_game_box_score_json(request_json: &str) -> Result<String> {
    let request: GameRequest = serde_json::from_str(request_json)
        .map_err(|e| BoxScoreError::InvalidRequest(e.to_string()))?;

    if request.schema_version != SCHEMA_VERSION {
        return Err(BoxScoreError::SchemaVersionMismatch {
            found: request.schema_version,
            expected: SCHEMA_VERSION,
        });
    }

    let game = compute_game_box_score(
        &request.game_id,
        request.home_team_id,
        request.away_team_id,
        &request.events,
        &request.player_team_map,
    )?;

    serde_json::to_string(&game).map_err(|e| BoxScoreError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot(seq: u64, team: TeamId, player: PlayerId, text: &str) -> RawEventRecord {
        RawEventRecord {
            sequence_number: seq,
            type_id: 92,
            type_text: "Jump Shot".to_string(),
            text: text.to_string(),
            period_number: 1,
            clock_display_value: "08:00".to_string(),
            home_score: 0,
            away_score: 0,
            athlete_id_1: Some(player),
            athlete_id_2: None,
            team_id: Some(team),
            home_team_id: Some(1),
            coordinate_x: None,
            coordinate_y: None,
        }
    }

    #[test]
    fn empty_stream_is_a_hard_failure() {
        let result = compute_game_box_score("g1", 1, 2, &[], &HashMap::new());
        assert!(matches!(result, Err(BoxScoreError::NoEvents { .. })));
    }

    #[test]
    fn json_facade_round_trip() {
        let request = GameRequest {
            schema_version: SCHEMA_VERSION,
            game_id: "g1".to_string(),
            home_team_id: 1,
            away_team_id: 2,
            events: vec![shot(1, 1, 100, "Smith makes 18-foot jumper")],
            player_team_map: [(100, 1)].into_iter().collect(),
        };

        let out = compute_game_box_score_json(&serde_json::to_string(&request).unwrap()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["game_id"], "g1");
        assert_eq!(value["home_team"]["pts"], 2);
    }

    #[test]
    fn json_facade_rejects_garbage() {
        assert!(matches!(
            compute_game_box_score_json("{"),
            Err(BoxScoreError::InvalidRequest(_))
        ));
    }

    #[test]
    fn json_facade_rejects_wrong_schema_version() {
        let request = GameRequest {
            schema_version: 99,
            game_id: "g1".to_string(),
            home_team_id: 1,
            away_team_id: 2,
            events: vec![shot(1, 1, 100, "Smith makes jumper")],
            player_team_map: HashMap::new(),
        };

        assert!(matches!(
            compute_game_box_score_json(&serde_json::to_string(&request).unwrap()),
            Err(BoxScoreError::SchemaVersionMismatch { found: 99, expected: _ })
        ));
    }

    #[test]
    fn custom_config_is_honored() {
        // A config whose shot table does not know type 92 classifies the
        // event as unrecognized.
        let mut config = ClassifierConfig::default();
        config.shot_types.remove(&92);

        let records = vec![shot(1, 1, 100, "Smith makes 18-foot jumper")];
        let map = [(100, 1)].into_iter().collect();
        let game = compute_with_config("g1", 1, 2, &records, &map, config).unwrap();

        assert_eq!(game.home_team.pts, 0);
        assert_eq!(game.diagnostics.unrecognized_events, 1);
    }

    #[test]
    fn diagnostics_count_team_rebounds_and_turnovers() {
        let mut rebound = shot(2, 1, 100, "Hawks offensive team rebound");
        rebound.type_id = 0;
        rebound.type_text = "Offensive Rebound".to_string();
        rebound.athlete_id_1 = None;

        let mut turnover = shot(3, 1, 100, "Hawks shot clock turnover");
        turnover.type_id = 60;
        turnover.type_text = "Shot Clock Turnover".to_string();
        turnover.athlete_id_1 = None;

        let records = vec![shot(1, 1, 100, "Smith misses jumper"), rebound, turnover];
        let map = [(100, 1)].into_iter().collect();
        let game = compute_game_box_score("g1", 1, 2, &records, &map).unwrap();

        assert_eq!(game.diagnostics.team_rebounds, 1);
        assert_eq!(game.diagnostics.team_turnovers, 1);
    }
}
