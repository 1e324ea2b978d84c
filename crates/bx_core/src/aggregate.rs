//! # Box Score Aggregation
//!
//! Folds every [`StatDelta`] of a game into player, team and game box
//! scores and derives the advanced team metrics (estimated possessions,
//! offensive/defensive rating, pace).

use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use crate::models::{
    Diagnostics, GameBoxScore, PlayerBoxScore, PlayerId, StatDelta, TeamBoxScore, TeamId,
};

/// True possession counts per side, from the segmenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PossessionCounts {
    pub home: u32,
    pub away: u32,
}

impl PossessionCounts {
    pub fn total(&self) -> u32 {
        self.home + self.away
    }
}

/// Aggregate all deltas into a complete [`GameBoxScore`].
///
/// Players absent from `player_team_map` are dropped with a warning and
/// counted in diagnostics; roster gaps must not poison the rest of the
/// box score.
#[allow(clippy::too_many_arguments)]
pub fn aggregate(
    game_id: &str,
    home_team_id: TeamId,
    away_team_id: TeamId,
    player_team_map: &HashMap<PlayerId, TeamId>,
    deltas: &[StatDelta],
    counts: PossessionCounts,
    final_score: (u16, u16),
    mut diagnostics: Diagnostics,
) -> GameBoxScore {
    // BTreeMap keeps player order deterministic run to run.
    let mut players: BTreeMap<PlayerId, PlayerBoxScore> = BTreeMap::new();
    for delta in deltas {
        let line = players
            .entry(delta.player_id)
            .or_insert_with(|| PlayerBoxScore::empty(delta.player_id, 0));
        apply_delta(line, delta);
    }

    let mut home_players: Vec<PlayerBoxScore> = Vec::new();
    let mut away_players: Vec<PlayerBoxScore> = Vec::new();
    for (player_id, mut line) in players {
        match player_team_map.get(&player_id) {
            Some(&team_id) if team_id == home_team_id => {
                line.team_id = team_id;
                finish_player(&mut line);
                home_players.push(line);
            }
            Some(&team_id) if team_id == away_team_id => {
                line.team_id = team_id;
                finish_player(&mut line);
                away_players.push(line);
            }
            _ => {
                warn!(player_id, "dropping player absent from team mapping");
                diagnostics.unmapped_players += 1;
            }
        }
    }

    let mut home_team = team_totals(home_team_id, home_players, counts.home);
    let mut away_team = team_totals(away_team_id, away_players, counts.away);

    // Defensive rating needs the opponent's points, so it is filled in
    // after both sides exist.
    home_team.defensive_rating = rating(away_team.pts, home_team.true_possessions);
    away_team.defensive_rating = rating(home_team.pts, away_team.true_possessions);

    GameBoxScore {
        game_id: game_id.to_string(),
        home_team_id,
        away_team_id,
        home_score: final_score.0,
        away_score: final_score.1,
        home_team,
        away_team,
        total_possessions: counts.total(),
        home_possessions: counts.home,
        away_possessions: counts.away,
        diagnostics,
    }
}

fn apply_delta(line: &mut PlayerBoxScore, delta: &StatDelta) {
    line.fga += delta.fga as u32;
    line.fgm += delta.fgm as u32;
    line.fg3a += delta.fg3a as u32;
    line.fg3m += delta.fg3m as u32;
    line.fta += delta.fta as u32;
    line.ftm += delta.ftm as u32;
    line.oreb += delta.oreb as u32;
    line.dreb += delta.dreb as u32;
    line.ast += delta.ast as u32;
    line.stl += delta.stl as u32;
    line.blk += delta.blk as u32;
    line.tov += delta.tov as u32;
    line.pf += delta.pf as u32;
    line.pts += delta.pts as u32;
}

fn finish_player(line: &mut PlayerBoxScore) {
    line.reb = line.oreb + line.dreb;
    line.fg_pct = percentage(line.fgm, line.fga);
    line.fg3_pct = percentage(line.fg3m, line.fg3a);
    line.ft_pct = percentage(line.ftm, line.fta);
}

fn team_totals(team_id: TeamId, players: Vec<PlayerBoxScore>, true_possessions: u32) -> TeamBoxScore {
    let mut team = TeamBoxScore::empty(team_id);

    for player in &players {
        team.fga += player.fga;
        team.fgm += player.fgm;
        team.fg3a += player.fg3a;
        team.fg3m += player.fg3m;
        team.fta += player.fta;
        team.ftm += player.ftm;
        team.oreb += player.oreb;
        team.dreb += player.dreb;
        team.ast += player.ast;
        team.stl += player.stl;
        team.blk += player.blk;
        team.tov += player.tov;
        team.pf += player.pf;
        team.pts += player.pts;
    }

    team.reb = team.oreb + team.dreb;
    team.fg_pct = percentage(team.fgm, team.fga);
    team.fg3_pct = percentage(team.fg3m, team.fg3a);
    team.ft_pct = percentage(team.ftm, team.fta);

    // The source stream credits essentially every turnover to a player,
    // so the unattributed bucket stays zero unless a caller fills it.
    team.total_turnovers = team.tov + team.team_turnovers;

    team.true_possessions = true_possessions;
    team.estimated_possessions = team.fga as f32 + 0.44 * team.fta as f32 - team.oreb as f32
        + team.total_turnovers as f32;
    team.offensive_rating = rating(team.pts, true_possessions);
    // Reduces to true_possessions; kept until the intended normalization
    // for overtime/partial games is decided upstream.
    team.pace = true_possessions as f32 / 48.0 * 48.0;

    team.players = players;
    team
}

/// Points per 100 possessions, 0 when no possessions were recorded.
fn rating(points: u32, possessions: u32) -> f32 {
    if possessions > 0 {
        points as f32 / possessions as f32 * 100.0
    } else {
        0.0
    }
}

/// made/attempted with the 0.0-on-zero-attempts convention; never a
/// division fault.
fn percentage(made: u32, attempted: u32) -> f32 {
    if attempted > 0 {
        made as f32 / attempted as f32
    } else {
        0.0
    }
}
