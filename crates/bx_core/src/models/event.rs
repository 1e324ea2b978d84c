use serde::{Deserialize, Serialize};

/// Provider athlete identifier.
pub type PlayerId = u64;
/// Provider team identifier.
pub type TeamId = u64;

/// One raw play-by-play record as supplied by the upstream provider.
///
/// Field names are the interop contract with upstream ingestion; consumers
/// must supply records pre-sorted by `sequence_number` — the core never
/// reorders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEventRecord {
    /// Total order within a game.
    pub sequence_number: u64,
    /// Provider event-type code.
    pub type_id: u16,
    /// Provider category label (e.g., "Jump Shot", "Defensive Rebound").
    #[serde(default)]
    pub type_text: String,
    /// Free-form description (e.g., "Smith makes 25-foot three point jumper").
    #[serde(default)]
    pub text: String,
    pub period_number: u8,
    /// Game-clock display, e.g. "11:32".
    #[serde(default)]
    pub clock_display_value: String,
    /// Running home score after this event.
    pub home_score: u16,
    /// Running away score after this event.
    pub away_score: u16,
    /// Primary actor (shooter, rebounder, fouler, ...).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub athlete_id_1: Option<PlayerId>,
    /// Secondary actor (assister, blocker, stealer).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub athlete_id_2: Option<PlayerId>,
    /// Acting/offensive team for the event.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub team_id: Option<TeamId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub home_team_id: Option<TeamId>,
    /// Feet from court center. Home basket sits at x = +41.75, away at -41.75.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub coordinate_x: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub coordinate_y: Option<f32>,
}

/// The atomic statistical contribution of one event to one player's line.
///
/// All fields are small non-negative counts; `pts` is 0-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatDelta {
    pub player_id: PlayerId,
    pub fga: u8,
    pub fgm: u8,
    pub fg3a: u8,
    pub fg3m: u8,
    pub fta: u8,
    pub ftm: u8,
    pub oreb: u8,
    pub dreb: u8,
    pub ast: u8,
    pub stl: u8,
    pub blk: u8,
    pub tov: u8,
    pub pf: u8,
    pub pts: u8,
}

impl StatDelta {
    /// An all-zero delta for the given player.
    pub fn for_player(player_id: PlayerId) -> Self {
        Self { player_id, ..Default::default() }
    }
}

/// Classifier-derived category of a parsed event. Drives possession
/// segmentation and diagnostics counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ShotAttempt,
    FreeThrow,
    Rebound,
    Turnover,
    Foul,
    /// Code 84: duplicates the turnover from the paired offensive foul,
    /// so it carries no deltas but still ends the possession.
    OffensiveFoulTurnover,
    /// Substitutions, timeouts, jump balls. Never attached to a possession.
    Administrative,
    EndOfPeriod,
    Unrecognized,
}

/// One classified play-by-play event. Derived once per [`RawEventRecord`]
/// and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedEvent {
    pub sequence_number: u64,
    pub type_id: u16,
    pub type_text: String,
    pub text: String,
    pub period: u8,
    pub clock: String,
    pub home_score: u16,
    pub away_score: u16,
    pub kind: EventKind,
    /// 0, 1 or 2 entries (e.g., a made three yields shooter + assister).
    pub deltas: Vec<StatDelta>,
    pub ends_possession: bool,
    /// Set for player and team offensive rebounds alike; team rebounds
    /// carry no delta but the segmenter still needs the signal.
    pub is_offensive_rebound: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub offensive_team_id: Option<TeamId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub defensive_team_id: Option<TeamId>,
}

impl ParsedEvent {
    pub fn is_rebound(&self) -> bool {
        self.kind == EventKind::Rebound
    }

    pub fn is_defensive_rebound(&self) -> bool {
        self.kind == EventKind::Rebound && !self.is_offensive_rebound
    }

    /// Turnover for possession purposes, including the code-84 duplicate.
    pub fn is_turnover(&self) -> bool {
        matches!(self.kind, EventKind::Turnover | EventKind::OffensiveFoulTurnover)
            || self.type_text.contains("Turnover")
    }

    /// Whether any delta records a made field goal.
    pub fn is_made_shot(&self) -> bool {
        self.deltas.iter().any(|d| d.fgm > 0)
    }

    pub fn is_administrative(&self) -> bool {
        self.kind == EventKind::Administrative
    }

    pub fn is_end_of_period(&self) -> bool {
        self.kind == EventKind::EndOfPeriod
    }

    /// Sum of points over all deltas of this event.
    pub fn points(&self) -> u32 {
        self.deltas.iter().map(|d| d.pts as u32).sum()
    }
}
