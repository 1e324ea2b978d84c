//! # Models Module
//!
//! Plain data carried between the pipeline stages.
//!
//! ## Submodules
//!
//! - `event` - Raw provider records, per-event stat contributions, parsed events
//! - `possession` - Discrete offensive possessions and their end reasons
//! - `box_score` - Player/team/game aggregates and derived metrics

pub mod box_score;
pub mod event;
pub mod possession;

pub use box_score::{Diagnostics, GameBoxScore, PlayerBoxScore, TeamBoxScore};
pub use event::{EventKind, ParsedEvent, PlayerId, RawEventRecord, StatDelta, TeamId};
pub use possession::{Possession, PossessionEndReason};
