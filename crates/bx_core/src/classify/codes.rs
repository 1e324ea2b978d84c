//! Provider event-code tables, modeled as data rather than branches.
//!
//! The shot/free-throw/turnover/foul code sets churn with the provider
//! schema, so they live in a versioned [`ClassifierConfig`] that callers
//! can replace wholesale via [`ClassifierConfig::from_json_str`]. The
//! built-in table reproduces the reference event schema.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{BoxScoreError, Result};

/// Version of the built-in code table.
pub const CODE_TABLE_VERSION: u8 = 1;

/// Type code for "Offensive Foul Turnover". Dropped from stat counting
/// because it duplicates the turnover emitted by the paired type-42 foul,
/// but it still ends the possession.
pub const OFFENSIVE_FOUL_TURNOVER: u16 = 84;

/// Type code for "Offensive Foul".
pub const OFFENSIVE_FOUL: u16 = 42;

/// Position of a free throw within its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeThrowSlot {
    /// 1-based attempt index ("N" in "N of M").
    pub attempt: u8,
    /// Sequence length ("M" in "N of M").
    pub of_total: u8,
    /// Technical free throws always stand alone.
    pub technical: bool,
}

impl FreeThrowSlot {
    const fn of(attempt: u8, of_total: u8) -> Self {
        Self { attempt, of_total, technical: false }
    }

    const fn technical() -> Self {
        Self { attempt: 1, of_total: 1, technical: true }
    }

    /// Whether this is the final attempt of its sequence. Only the final
    /// attempt (or a technical) can end a possession.
    pub fn is_final(&self) -> bool {
        self.technical || self.attempt == self.of_total
    }
}

/// Shot-attempt type codes: jump/hook/layup/dunk variants with
/// running/driving/turnaround/cutting/alley-oop/reverse/fadeaway/putback/
/// bank/finger-roll subtypes.
const SHOT_TYPES: &[(u16, &str)] = &[
    (92, "Jump Shot"),
    (93, "Running Jump Shot"),
    (94, "Turnaround Jump Shot"),
    (95, "Fade Away Jump Shot"),
    (96, "Step Back Jump Shot"),
    (97, "Pullup Jump Shot"),
    (98, "Floating Jump Shot"),
    (99, "Driving Floating Jump Shot"),
    (100, "Driving Floating Bank Jump Shot"),
    (101, "Jump Bank Shot"),
    (102, "Running Pullup Jump Shot"),
    (103, "Turnaround Fade Away Jump Shot"),
    (104, "Turnaround Bank Jump Shot"),
    (105, "Fade Away Bank Jump Shot"),
    (106, "Turnaround Fade Away Bank Jump Shot"),
    (107, "Layup Shot"),
    (108, "Driving Layup Shot"),
    (109, "Running Layup Shot"),
    (110, "Reverse Layup Shot"),
    (111, "Alley Oop Layup Shot"),
    (112, "Driving Reverse Layup Shot"),
    (113, "Running Reverse Layup Shot"),
    (114, "Cutting Layup Shot"),
    (115, "Finger Roll Layup Shot"),
    (116, "Driving Finger Roll Layup Shot"),
    (117, "Running Finger Roll Layup Shot"),
    (118, "Cutting Finger Roll Layup Shot"),
    (119, "Putback Layup Shot"),
    (120, "Running Alley Oop Layup Shot"),
    (121, "Layup Shot Bank"),
    (122, "Dunk Shot"),
    (123, "Driving Dunk Shot"),
    (124, "Running Dunk Shot"),
    (125, "Alley Oop Dunk Shot"),
    (126, "Reverse Dunk Shot"),
    (127, "Putback Dunk Shot"),
    (128, "Cutting Dunk Shot"),
    (129, "Running Alley Oop Dunk Shot"),
    (130, "Cutting Alley Oop Dunk Shot"),
    (131, "Driving Reverse Dunk Shot"),
    (132, "Tip Dunk Shot"),
    (133, "Tip Shot"),
    (134, "Hook Shot"),
    (135, "Driving Hook Shot"),
    (136, "Running Hook Shot"),
    (137, "Turnaround Hook Shot"),
    (138, "Hook Bank Shot"),
    (139, "Driving Bank Hook Shot"),
    (140, "Turnaround Bank Hook Shot"),
    (141, "Bank Shot"),
    (142, "Driving Bank Shot"),
    (143, "Running Bank Shot"),
    (144, "Turnaround Bank Shot"),
    (145, "Step Back Bank Jump Shot"),
];

const FREE_THROW_TYPES: &[(u16, FreeThrowSlot)] = &[
    (70, FreeThrowSlot::of(1, 1)),
    (71, FreeThrowSlot::of(1, 2)),
    (72, FreeThrowSlot::of(2, 2)),
    (73, FreeThrowSlot::of(1, 3)),
    (74, FreeThrowSlot::of(2, 3)),
    (75, FreeThrowSlot::of(3, 3)),
    (76, FreeThrowSlot::technical()),
];

const TURNOVER_TYPES: &[u16] = &[57, 58, 59, 60, 61, 62, 63, 64];

const FOUL_TYPES: &[u16] = &[OFFENSIVE_FOUL, 43, 44, 45, 46];

/// Rebounds are matched by `type_text` equality, not by code; rebound
/// codes are unstable across sources.
const REBOUND_TYPE_TEXTS: &[&str] = &["Offensive Rebound", "Defensive Rebound"];

/// The complete code table used by the classifier. Serializable so a
/// caller can swap in the exact table for their provider feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub schema_version: u8,
    /// type_id -> shot label.
    pub shot_types: HashMap<u16, String>,
    /// type_id -> position within the free-throw sequence.
    pub free_throws: HashMap<u16, FreeThrowSlot>,
    pub turnover_types: HashSet<u16>,
    pub foul_types: HashSet<u16>,
    /// Exact `type_text` values identifying rebounds.
    pub rebound_texts: HashSet<String>,
}

impl ClassifierConfig {
    /// Load a replacement table from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BoxScoreError::InvalidConfig(e.to_string()))
    }

    pub fn is_shot(&self, type_id: u16) -> bool {
        self.shot_types.contains_key(&type_id)
    }

    pub fn free_throw_slot(&self, type_id: u16) -> Option<FreeThrowSlot> {
        self.free_throws.get(&type_id).copied()
    }

    pub fn is_turnover(&self, type_id: u16, type_text: &str) -> bool {
        self.turnover_types.contains(&type_id) || type_text.contains("Turnover")
    }

    pub fn is_foul(&self, type_id: u16, type_text: &str) -> bool {
        self.foul_types.contains(&type_id)
            || (type_text.contains("Foul") && !type_text.contains("Technical"))
    }

    pub fn is_rebound(&self, type_text: &str) -> bool {
        self.rebound_texts.contains(type_text)
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.clone()
    }
}

static DEFAULT_CONFIG: Lazy<ClassifierConfig> = Lazy::new(|| ClassifierConfig {
    schema_version: CODE_TABLE_VERSION,
    shot_types: SHOT_TYPES.iter().map(|&(id, label)| (id, label.to_string())).collect(),
    free_throws: FREE_THROW_TYPES.iter().copied().collect(),
    turnover_types: TURNOVER_TYPES.iter().copied().collect(),
    foul_types: FOUL_TYPES.iter().copied().collect(),
    rebound_texts: REBOUND_TYPE_TEXTS.iter().map(|s| s.to_string()).collect(),
});

/// The built-in table.
pub fn default_config() -> &'static ClassifierConfig {
    &DEFAULT_CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shot_table_has_54_entries() {
        assert_eq!(SHOT_TYPES.len(), 54);
        assert_eq!(default_config().shot_types.len(), 54);
    }

    #[test]
    fn free_throw_finality() {
        let cfg = default_config();
        assert!(cfg.free_throw_slot(70).unwrap().is_final(), "1 of 1");
        assert!(!cfg.free_throw_slot(71).unwrap().is_final(), "1 of 2");
        assert!(cfg.free_throw_slot(72).unwrap().is_final(), "2 of 2");
        assert!(!cfg.free_throw_slot(74).unwrap().is_final(), "2 of 3");
        assert!(cfg.free_throw_slot(75).unwrap().is_final(), "3 of 3");
        assert!(cfg.free_throw_slot(76).unwrap().is_final(), "technical");
    }

    #[test]
    fn turnover_matches_by_code_or_text() {
        let cfg = default_config();
        assert!(cfg.is_turnover(57, "Traveling"));
        assert!(cfg.is_turnover(999, "Out of Bounds Turnover"));
        assert!(!cfg.is_turnover(999, "Jump Ball"));
    }

    #[test]
    fn foul_text_excludes_technical() {
        let cfg = default_config();
        assert!(cfg.is_foul(43, "Personal Foul"));
        assert!(cfg.is_foul(999, "Flagrant Foul"));
        assert!(!cfg.is_foul(999, "Technical Foul"));
    }

    #[test]
    fn rebounds_match_by_exact_text() {
        let cfg = default_config();
        assert!(cfg.is_rebound("Offensive Rebound"));
        assert!(cfg.is_rebound("Defensive Rebound"));
        assert!(!cfg.is_rebound("Rebound"));
    }

    #[test]
    fn config_round_trips_through_json() {
        let cfg = default_config();
        let json = serde_json::to_string(cfg).unwrap();
        let loaded = ClassifierConfig::from_json_str(&json).unwrap();
        assert_eq!(*cfg, loaded);
    }

    #[test]
    fn invalid_config_json_is_an_error() {
        assert!(ClassifierConfig::from_json_str("{not json").is_err());
    }
}
