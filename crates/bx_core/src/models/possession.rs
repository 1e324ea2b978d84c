use serde::{Deserialize, Serialize};

use super::event::{ParsedEvent, TeamId};

/// How a possession came to an end, derived from its last event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PossessionEndReason {
    MadeShot,
    DefensiveRebound,
    Turnover,
    EndPeriod,
    Unknown,
}

/// One uninterrupted span of offensive control by a team.
///
/// Finalized exactly once by the segmenter and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Possession {
    /// Sequential, zero-based per game.
    pub possession_number: u32,
    pub offensive_team_id: TeamId,
    pub defensive_team_id: TeamId,
    pub start_sequence_number: u64,
    pub end_sequence_number: u64,
    pub start_clock: String,
    pub end_clock: String,
    pub period: u8,
    /// The ordered events attached to this possession.
    pub events: Vec<ParsedEvent>,
    pub points_scored: u32,
    pub ended_by: PossessionEndReason,
    pub shot_attempts: u32,
    pub offensive_rebounds: u32,
    pub turnovers: u32,
}
