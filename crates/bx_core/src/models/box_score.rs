use serde::{Deserialize, Serialize};

use super::event::{PlayerId, TeamId};

/// Aggregated box score line for one player.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerBoxScore {
    pub player_id: PlayerId,
    pub team_id: TeamId,
    /// Minutes played. Substitution-derived minutes are not computed by
    /// this core; the field stays a zero placeholder.
    pub minutes: f32,
    pub fga: u32,
    pub fgm: u32,
    pub fg3a: u32,
    pub fg3m: u32,
    pub fta: u32,
    pub ftm: u32,
    pub oreb: u32,
    pub dreb: u32,
    pub reb: u32,
    pub ast: u32,
    pub stl: u32,
    pub blk: u32,
    pub tov: u32,
    pub pf: u32,
    pub pts: u32,
    pub fg_pct: f32,
    pub fg3_pct: f32,
    pub ft_pct: f32,
}

/// Aggregated box score for one team, including derived advanced metrics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TeamBoxScore {
    pub team_id: TeamId,
    pub players: Vec<PlayerBoxScore>,
    pub fga: u32,
    pub fgm: u32,
    pub fg3a: u32,
    pub fg3m: u32,
    pub fta: u32,
    pub ftm: u32,
    pub oreb: u32,
    pub dreb: u32,
    pub reb: u32,
    pub ast: u32,
    pub stl: u32,
    pub blk: u32,
    pub tov: u32,
    pub pf: u32,
    pub pts: u32,
    pub fg_pct: f32,
    pub fg3_pct: f32,
    pub ft_pct: f32,
    /// Unattributed rebounds (no player credited). Not part of `reb`.
    pub team_rebounds: u32,
    /// Unattributed turnovers. The source stream credits essentially every
    /// turnover to a player, so this defaults to 0.
    pub team_turnovers: u32,
    /// Player turnovers plus team turnovers.
    pub total_turnovers: u32,
    /// Possession count from event-stream segmentation (authoritative).
    pub true_possessions: u32,
    /// `fga + 0.44 * fta - oreb + total_turnovers`, the statistical
    /// estimator used when play-by-play is unavailable.
    pub estimated_possessions: f32,
    /// Points scored per 100 true possessions.
    pub offensive_rating: f32,
    /// Opponent points per 100 of this team's true possessions.
    pub defensive_rating: f32,
    /// `true_possessions / 48 * 48`. Numerically a no-op today; the
    /// normalization for overtime/partial games is unresolved upstream.
    pub pace: f32,
}

/// Counters for malformed-input conditions the core degrades over
/// instead of raising.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Events whose type code matched no table and no text rule.
    pub unrecognized_events: u32,
    /// Rebounds with no player credited.
    pub team_rebounds: u32,
    /// Turnovers with no player credited.
    pub team_turnovers: u32,
    /// Distinct players dropped because the team mapping lacked them.
    pub unmapped_players: u32,
    /// Open possessions dropped at stream end with no determined team.
    pub dropped_open_possessions: u32,
}

/// Complete derived output for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameBoxScore {
    pub game_id: String,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    /// Final scores, copied from the last event's running score.
    pub home_score: u16,
    pub away_score: u16,
    pub home_team: TeamBoxScore,
    pub away_team: TeamBoxScore,
    /// True possession counts from the segmenter, not the estimator.
    pub total_possessions: u32,
    pub home_possessions: u32,
    pub away_possessions: u32,
    pub diagnostics: Diagnostics,
}

impl PlayerBoxScore {
    /// An empty line for the given player/team pairing.
    pub fn empty(player_id: PlayerId, team_id: TeamId) -> Self {
        Self { player_id, team_id, ..Default::default() }
    }
}

impl TeamBoxScore {
    /// An empty team aggregate for the given team.
    pub fn empty(team_id: TeamId) -> Self {
        Self { team_id, ..Default::default() }
    }
}
