//! # bx_core - Basketball Play-by-Play Box Score Core
//!
//! Ingests a time-ordered stream of play-by-play event records for one
//! game and derives per-event statistical contributions, a partition of
//! the stream into offensive possessions, and complete player/team/game
//! box scores with advanced metrics (pace, ratings, estimated
//! possessions).
//!
//! ## Features
//! - Pure, single-threaded batch transform: no I/O, no persistence
//! - Closed event-type taxonomy as versioned, loadable table data
//! - Explicit possession state machine with team-flip semantics
//! - Aggregation invariants held exactly (team totals reconcile to
//!   player totals, final score matches the last event)
//!
//! Processing is embarrassingly parallel across games: callers run one
//! independent task per game id; nothing in here is shared.

pub mod aggregate;
pub mod api;
pub mod classify;
pub mod error;
pub mod models;
pub mod segment;

// Re-export the main API surface
pub use api::{
    compute_game_box_score, compute_game_box_score_json, compute_with_config, GameRequest,
};
pub use classify::{ClassifierConfig, EventClassifier};
pub use error::{BoxScoreError, Result};
pub use models::{
    Diagnostics, EventKind, GameBoxScore, ParsedEvent, PlayerBoxScore, PlayerId, Possession,
    PossessionEndReason, RawEventRecord, StatDelta, TeamBoxScore, TeamId,
};
pub use segment::{segment, OffensiveControl, Segmentation};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
