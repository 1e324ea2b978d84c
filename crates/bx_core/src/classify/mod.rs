//! # Event Classification
//!
//! Maps one raw play-by-play record to a [`ParsedEvent`] carrying zero or
//! more [`StatDelta`] contributions and a possession-ending signal.
//!
//! ## Submodules
//!
//! - `codes` - Provider code tables as versioned, loadable data
//! - `three_point` - Priority-ordered three-point predicates
//!
//! Classification is total: an unrecognized type code yields an empty
//! delta list and `ends_possession = false`, never an error.

pub mod codes;
pub mod three_point;

use tracing::debug;

use crate::models::{EventKind, ParsedEvent, RawEventRecord, StatDelta};

pub use codes::{ClassifierConfig, FreeThrowSlot, CODE_TABLE_VERSION};
pub use three_point::is_three_point_attempt;

/// Stateless per-event classifier over a code table.
#[derive(Debug, Clone, Default)]
pub struct EventClassifier {
    config: ClassifierConfig,
}

impl EventClassifier {
    /// Classifier over the built-in code table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifier over a caller-supplied code table.
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify one record. Pure and infallible; imperfect input degrades
    /// to fewer deltas, never to an error.
    pub fn classify(&self, record: &RawEventRecord) -> ParsedEvent {
        let mut event = self.base_event(record);

        if record.type_id == codes::OFFENSIVE_FOUL_TURNOVER {
            // Stat-wise a duplicate of the paired type-42 foul's turnover.
            event.kind = EventKind::OffensiveFoulTurnover;
            event.ends_possession = true;
        } else if self.config.is_shot(record.type_id) {
            self.classify_shot(record, &mut event);
        } else if let Some(slot) = self.config.free_throw_slot(record.type_id) {
            classify_free_throw(record, slot, &mut event);
        } else if self.config.is_rebound(&record.type_text) {
            classify_rebound(record, &mut event);
        } else if self.config.is_turnover(record.type_id, &record.type_text) {
            classify_turnover(record, &mut event);
        } else if self.config.is_foul(record.type_id, &record.type_text) {
            classify_foul(record, &mut event);
        } else if is_administrative(&record.type_text) {
            event.kind = EventKind::Administrative;
        } else if is_end_of_period(&record.type_text) {
            event.kind = EventKind::EndOfPeriod;
        } else {
            debug!(
                type_id = record.type_id,
                type_text = %record.type_text,
                "unrecognized event type"
            );
            event.kind = EventKind::Unrecognized;
        }

        event
    }

    fn base_event(&self, record: &RawEventRecord) -> ParsedEvent {
        ParsedEvent {
            sequence_number: record.sequence_number,
            type_id: record.type_id,
            type_text: record.type_text.clone(),
            text: record.text.clone(),
            period: record.period_number,
            clock: record.clock_display_value.clone(),
            home_score: record.home_score,
            away_score: record.away_score,
            kind: EventKind::Unrecognized,
            deltas: Vec::new(),
            ends_possession: false,
            is_offensive_rebound: false,
            offensive_team_id: record.team_id,
            defensive_team_id: None,
        }
    }

    fn classify_shot(&self, record: &RawEventRecord, event: &mut ParsedEvent) {
        event.kind = EventKind::ShotAttempt;

        let lower = record.text.to_lowercase();
        let three = is_three_point_attempt(record).unwrap_or(false);
        let made = is_made(&lower);

        if let Some(shooter) = record.athlete_id_1 {
            let mut delta = StatDelta::for_player(shooter);
            delta.fga = 1;
            if three {
                delta.fg3a = 1;
            }
            if made {
                delta.fgm = 1;
                if three {
                    delta.fg3m = 1;
                    delta.pts = 3;
                } else {
                    delta.pts = 2;
                }
            }
            event.deltas.push(delta);
        }

        if made {
            if lower.contains("assist") {
                if let Some(assister) = record.athlete_id_2 {
                    let mut delta = StatDelta::for_player(assister);
                    delta.ast = 1;
                    event.deltas.push(delta);
                }
            }
        } else if lower.contains("block") {
            if let Some(blocker) = record.athlete_id_2 {
                let mut delta = StatDelta::for_player(blocker);
                delta.blk = 1;
                event.deltas.push(delta);
            }
        }

        // Misses stay live for the rebound.
        event.ends_possession = made;
    }
}

fn classify_free_throw(record: &RawEventRecord, slot: FreeThrowSlot, event: &mut ParsedEvent) {
    event.kind = EventKind::FreeThrow;

    let made = is_made(&record.text.to_lowercase());
    if let Some(shooter) = record.athlete_id_1 {
        let mut delta = StatDelta::for_player(shooter);
        delta.fta = 1;
        if made {
            delta.ftm = 1;
            delta.pts = 1;
        }
        event.deltas.push(delta);
    }

    // Intermediate attempts of a multi-shot sequence keep the ball dead
    // with the same team; only the final attempt (or a technical) can
    // hand it over.
    event.ends_possession = slot.is_final();
}

fn classify_rebound(record: &RawEventRecord, event: &mut ParsedEvent) {
    event.kind = EventKind::Rebound;

    let offensive = record.type_text.contains("Offensive");
    event.is_offensive_rebound = offensive;

    match record.athlete_id_1 {
        Some(rebounder) => {
            let mut delta = StatDelta::for_player(rebounder);
            if offensive {
                delta.oreb = 1;
            } else {
                delta.dreb = 1;
            }
            event.deltas.push(delta);
            event.ends_possession = !offensive;
        }
        // Team rebound: no player line, and possession state is left to
        // the segmenter's team-flip rules.
        None => {
            event.ends_possession = false;
        }
    }
}

fn classify_turnover(record: &RawEventRecord, event: &mut ParsedEvent) {
    event.kind = EventKind::Turnover;

    if let Some(player) = record.athlete_id_1 {
        let mut delta = StatDelta::for_player(player);
        delta.tov = 1;
        event.deltas.push(delta);
    }

    if record.text.to_lowercase().contains("steal") {
        if let Some(stealer) = record.athlete_id_2 {
            let mut delta = StatDelta::for_player(stealer);
            delta.stl = 1;
            event.deltas.push(delta);
        }
    }

    event.ends_possession = true;
}

fn classify_foul(record: &RawEventRecord, event: &mut ParsedEvent) {
    event.kind = EventKind::Foul;

    let offensive = record.type_id == codes::OFFENSIVE_FOUL
        || record.type_text.contains("Offensive")
        || record.type_text.contains("Charge");

    if let Some(fouler) = record.athlete_id_1 {
        let mut delta = StatDelta::for_player(fouler);
        delta.pf = 1;
        if offensive {
            delta.tov = 1;
        }
        event.deltas.push(delta);
    }

    // Defensive fouls leave the ball with the offense; free throws follow
    // as separate events.
    event.ends_possession = offensive;
}

/// Made/missed outcome from the description. Blocks are always misses.
fn is_made(lower: &str) -> bool {
    (lower.contains("makes") || lower.contains("made"))
        && !lower.contains("misses")
        && !lower.contains("missed")
        && !lower.contains("block")
}

fn is_administrative(type_text: &str) -> bool {
    type_text.contains("Substitution")
        || type_text.contains("Timeout")
        || type_text.contains("Jump Ball")
}

fn is_end_of_period(type_text: &str) -> bool {
    type_text.contains("End Period") || type_text.contains("End Game")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(type_id: u16, type_text: &str, text: &str) -> RawEventRecord {
        RawEventRecord {
            sequence_number: 1,
            type_id,
            type_text: type_text.to_string(),
            text: text.to_string(),
            period_number: 1,
            clock_display_value: "09:41".to_string(),
            home_score: 0,
            away_score: 0,
            athlete_id_1: Some(100),
            athlete_id_2: None,
            team_id: Some(1),
            home_team_id: Some(1),
            coordinate_x: None,
            coordinate_y: None,
        }
    }

    #[test]
    fn made_midrange_jumper() {
        // Scenario A: made 18-foot two, no assist.
        let classifier = EventClassifier::new();
        let event = classifier.classify(&record(92, "Jump Shot", "Smith makes 18-foot jumper"));

        assert_eq!(event.kind, EventKind::ShotAttempt);
        assert_eq!(event.deltas.len(), 1);
        let shooter = &event.deltas[0];
        assert_eq!(shooter.fga, 1);
        assert_eq!(shooter.fgm, 1);
        assert_eq!(shooter.fg3a, 0);
        assert_eq!(shooter.pts, 2);
        assert!(event.ends_possession);
    }

    #[test]
    fn missed_shot_stays_live() {
        let classifier = EventClassifier::new();
        let event = classifier.classify(&record(92, "Jump Shot", "Smith misses 18-foot jumper"));

        assert_eq!(event.deltas.len(), 1);
        assert_eq!(event.deltas[0].fga, 1);
        assert_eq!(event.deltas[0].fgm, 0);
        assert!(!event.ends_possession);
    }

    #[test]
    fn made_three_with_assist() {
        let classifier = EventClassifier::new();
        let mut raw = record(92, "Jump Shot", "Smith makes 26-foot three point jumper (Jones assists)");
        raw.athlete_id_2 = Some(200);
        let event = classifier.classify(&raw);

        assert_eq!(event.deltas.len(), 2);
        let shooter = &event.deltas[0];
        assert_eq!(shooter.fg3a, 1);
        assert_eq!(shooter.fg3m, 1);
        assert_eq!(shooter.pts, 3);
        let assister = &event.deltas[1];
        assert_eq!(assister.player_id, 200);
        assert_eq!(assister.ast, 1);
        assert!(event.ends_possession);
    }

    #[test]
    fn blocked_shot_is_a_miss_and_credits_blocker() {
        let classifier = EventClassifier::new();
        let mut raw = record(108, "Driving Layup Shot", "Smith's layup blocked by Jones");
        raw.athlete_id_2 = Some(200);
        let event = classifier.classify(&raw);

        assert_eq!(event.deltas.len(), 2);
        assert_eq!(event.deltas[0].fga, 1);
        assert_eq!(event.deltas[0].fgm, 0);
        assert_eq!(event.deltas[1].blk, 1);
        assert!(!event.ends_possession);
    }

    #[test]
    fn shot_without_shooter_contributes_nothing() {
        let classifier = EventClassifier::new();
        let mut raw = record(92, "Jump Shot", "makes 18-foot jumper");
        raw.athlete_id_1 = None;
        let event = classifier.classify(&raw);

        assert!(event.deltas.is_empty());
        assert!(event.ends_possession, "possession semantics survive a missing actor");
    }

    #[test]
    fn free_throw_sequence_possession_flags() {
        // Scenario C: "1 of 2" miss then "2 of 2" make.
        let classifier = EventClassifier::new();

        let first =
            classifier.classify(&record(71, "Free Throw - 1 of 2", "Smith misses free throw 1 of 2"));
        assert_eq!(first.kind, EventKind::FreeThrow);
        assert_eq!(first.deltas[0].fta, 1);
        assert_eq!(first.deltas[0].ftm, 0);
        assert!(!first.ends_possession);

        let second =
            classifier.classify(&record(72, "Free Throw - 2 of 2", "Smith makes free throw 2 of 2"));
        assert_eq!(second.deltas[0].fta, 1);
        assert_eq!(second.deltas[0].ftm, 1);
        assert_eq!(second.deltas[0].pts, 1);
        assert!(second.ends_possession);
    }

    #[test]
    fn technical_free_throw_ends_possession() {
        let classifier = EventClassifier::new();
        let event = classifier
            .classify(&record(76, "Free Throw - Technical", "Smith makes technical free throw"));
        assert!(event.ends_possession);
    }

    #[test]
    fn player_defensive_rebound_ends_possession() {
        let classifier = EventClassifier::new();
        let event =
            classifier.classify(&record(155, "Defensive Rebound", "Smith defensive rebound"));

        assert_eq!(event.kind, EventKind::Rebound);
        assert_eq!(event.deltas[0].dreb, 1);
        assert!(!event.is_offensive_rebound);
        assert!(event.ends_possession);
    }

    #[test]
    fn offensive_rebound_extends_possession() {
        let classifier = EventClassifier::new();
        let event =
            classifier.classify(&record(156, "Offensive Rebound", "Smith offensive rebound"));

        assert_eq!(event.deltas[0].oreb, 1);
        assert!(event.is_offensive_rebound);
        assert!(!event.ends_possession);
    }

    #[test]
    fn team_rebound_has_no_delta_but_keeps_signal() {
        let classifier = EventClassifier::new();
        let mut raw = record(156, "Offensive Rebound", "Hawks offensive team rebound");
        raw.athlete_id_1 = None;
        let event = classifier.classify(&raw);

        assert!(event.deltas.is_empty());
        assert!(event.is_offensive_rebound);
        assert!(!event.ends_possession);
    }

    #[test]
    fn turnover_with_steal() {
        let classifier = EventClassifier::new();
        let mut raw = record(62, "Lost Ball Turnover", "Smith turnover (Jones steals)");
        raw.athlete_id_2 = Some(200);
        let event = classifier.classify(&raw);

        assert_eq!(event.kind, EventKind::Turnover);
        assert_eq!(event.deltas.len(), 2);
        assert_eq!(event.deltas[0].tov, 1);
        assert_eq!(event.deltas[1].stl, 1);
        assert!(event.ends_possession);
    }

    #[test]
    fn team_turnover_has_no_player_delta() {
        let classifier = EventClassifier::new();
        let mut raw = record(60, "Shot Clock Turnover", "Hawks shot clock turnover");
        raw.athlete_id_1 = None;
        let event = classifier.classify(&raw);

        assert!(event.deltas.is_empty());
        assert!(event.ends_possession);
    }

    #[test]
    fn turnover_matched_by_text_only() {
        let classifier = EventClassifier::new();
        let event = classifier
            .classify(&record(999, "Out of Bounds Turnover", "Smith out of bounds turnover"));
        assert_eq!(event.kind, EventKind::Turnover);
        assert!(event.ends_possession);
    }

    #[test]
    fn defensive_foul_does_not_end_possession() {
        let classifier = EventClassifier::new();
        let event = classifier.classify(&record(44, "Shooting Foul", "Jones shooting foul"));

        assert_eq!(event.kind, EventKind::Foul);
        assert_eq!(event.deltas[0].pf, 1);
        assert_eq!(event.deltas[0].tov, 0);
        assert!(!event.ends_possession);
    }

    #[test]
    fn offensive_foul_adds_turnover_and_ends_possession() {
        // Scenario E, first half: the type-42 foul carries pf + tov.
        let classifier = EventClassifier::new();
        let event =
            classifier.classify(&record(42, "Offensive Foul", "Smith offensive foul"));

        assert_eq!(event.deltas[0].pf, 1);
        assert_eq!(event.deltas[0].tov, 1);
        assert!(event.ends_possession);
    }

    #[test]
    fn offensive_foul_turnover_is_stat_silent() {
        // Scenario E, second half: code 84 is dropped from stat counting.
        let classifier = EventClassifier::new();
        let event = classifier
            .classify(&record(84, "Offensive Foul Turnover", "Smith turnover"));

        assert_eq!(event.kind, EventKind::OffensiveFoulTurnover);
        assert!(event.deltas.is_empty());
        assert!(event.ends_possession);
    }

    #[test]
    fn technical_foul_is_not_a_personal_foul() {
        let classifier = EventClassifier::new();
        let event = classifier.classify(&record(999, "Technical Foul", "Jones technical foul"));
        assert_eq!(event.kind, EventKind::Unrecognized);
        assert!(event.deltas.is_empty());
    }

    #[test]
    fn administrative_events_are_tagged() {
        let classifier = EventClassifier::new();
        for type_text in ["Substitution", "Full Timeout", "Jump Ball"] {
            let event = classifier.classify(&record(999, type_text, ""));
            assert_eq!(event.kind, EventKind::Administrative, "{type_text}");
            assert!(!event.ends_possession);
        }
    }

    #[test]
    fn unrecognized_code_degrades_silently() {
        let classifier = EventClassifier::new();
        let event = classifier.classify(&record(7777, "Instant Replay", "replay review"));

        assert_eq!(event.kind, EventKind::Unrecognized);
        assert!(event.deltas.is_empty());
        assert!(!event.ends_possession);
    }
}
