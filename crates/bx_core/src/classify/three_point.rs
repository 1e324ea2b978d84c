//! Three-point detection as an ordered list of independent predicates.
//!
//! Each rule returns `Some(true)` / `Some(false)` for a definite answer or
//! `None` when it cannot tell; the first definite answer wins. The order
//! (coordinates, then text, then distance phrase) is the tie-break
//! contract.

use crate::models::RawEventRecord;

/// Basket x-offset from court center, in feet. Home basket at +41.75,
/// away basket at -41.75.
pub const BASKET_X_FT: f32 = 41.75;

/// Three-point line radius on the arc, in feet.
pub const ARC_RADIUS_FT: f32 = 23.75;

/// Three-point line radius in the corners, in feet.
pub const CORNER_RADIUS_FT: f32 = 22.0;

/// Coordinates beyond this magnitude are sentinel/overflow markers and
/// must be treated as missing.
const COORDINATE_LIMIT: f32 = 100.0;

/// Distance-phrase threshold: "<N>-foot" with N >= 23 reads as a three.
/// Deliberately excludes ambiguous 22-foot shots.
const DISTANCE_PHRASE_THRESHOLD_FT: u32 = 23;

/// Whether a shot attempt is a three-pointer. `None` when no rule can
/// decide (callers treat that as a two).
pub fn is_three_point_attempt(record: &RawEventRecord) -> Option<bool> {
    by_coordinates(record)
        .or_else(|| by_description(&record.text))
        .or_else(|| by_distance_phrase(&record.text))
}

/// Rule 1: Euclidean distance from the basket the shooting team attacks.
///
/// The home team attacks the away basket at x = -41.75 and vice versa; a
/// heave released near the team's own basket must still be measured from
/// the basket it attacks.
fn by_coordinates(record: &RawEventRecord) -> Option<bool> {
    let x = record.coordinate_x?;
    let y = record.coordinate_y?;
    let team_id = record.team_id?;
    let home_team_id = record.home_team_id?;

    if x.abs() > COORDINATE_LIMIT || y.abs() > COORDINATE_LIMIT {
        return None;
    }

    let basket_x = if team_id == home_team_id { -BASKET_X_FT } else { BASKET_X_FT };
    let basket_y = 0.0_f32;

    let dx = x - basket_x;
    let dy = y - basket_y;
    let distance = (dx * dx + dy * dy).sqrt();

    let radius =
        if (y - basket_y).abs() > CORNER_RADIUS_FT { CORNER_RADIUS_FT } else { ARC_RADIUS_FT };

    Some(distance >= radius)
}

/// Rule 2: explicit three-point wording in the description.
fn by_description(text: &str) -> Option<bool> {
    let lower = text.to_lowercase();
    if lower.contains("three point") || lower.contains("3-point") {
        Some(true)
    } else {
        None
    }
}

/// Rule 3: a "<N>-foot" phrase in the description.
fn by_distance_phrase(text: &str) -> Option<bool> {
    let feet = parse_foot_phrase(text)?;
    Some(feet >= DISTANCE_PHRASE_THRESHOLD_FT)
}

/// Extract N from the first "<N>-foot" phrase, if any.
fn parse_foot_phrase(text: &str) -> Option<u32> {
    let lower = text.to_lowercase();
    let idx = lower.find("-foot")?;
    let digits: String = lower[..idx]
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().ok()
}
