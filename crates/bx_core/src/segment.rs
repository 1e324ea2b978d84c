//! # Possession Segmentation
//!
//! Partitions the ordered event stream of one game into discrete
//! offensive possessions.
//!
//! ## Algorithm
//! 1. Skip administrative events (substitutions, timeouts, jump balls)
//! 2. Resolve the acting offensive team for every remaining event
//!    (rebound keep/flip, turnover flip, made shot keep, else infer)
//! 3. Open a new possession whenever the acting team changes
//! 4. Finalize immediately on a possession-ending event and reset the
//!    offensive-control state to unknown
//! 5. Flush any open possession at stream end; drop it if its team was
//!    never determined

use tracing::warn;

use crate::models::{ParsedEvent, Possession, PossessionEndReason, TeamId};

/// Which team currently has the ball, as far as the stream has told us.
///
/// Reset to `Unknown` after every possession-ending event; the next event
/// re-establishes it, which is the correct hand-over semantics for a
/// defensive rebound or made shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffensiveControl {
    Unknown,
    Team(TeamId),
}

impl OffensiveControl {
    pub fn team(&self) -> Option<TeamId> {
        match self {
            OffensiveControl::Unknown => None,
            OffensiveControl::Team(id) => Some(*id),
        }
    }
}

/// Output of [`segment`]: the finalized possessions plus the count of
/// open possessions dropped for lack of a determined team.
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    pub possessions: Vec<Possession>,
    pub dropped_open_possessions: u32,
}

impl Segmentation {
    /// Number of possessions credited to the given team.
    pub fn possessions_for(&self, team_id: TeamId) -> u32 {
        self.possessions.iter().filter(|p| p.offensive_team_id == team_id).count() as u32
    }
}

/// Accumulates events for the possession currently being built.
struct PossessionBuilder {
    /// `None` until the stream determines who is on offense.
    offensive_team_id: Option<TeamId>,
    events: Vec<ParsedEvent>,
}

impl PossessionBuilder {
    fn new(offensive_team_id: Option<TeamId>) -> Self {
        Self { offensive_team_id, events: Vec::new() }
    }

    fn push(&mut self, event: &ParsedEvent) {
        self.events.push(event.clone());
    }

    /// Finalize into a [`Possession`], or `None` when no offensive team
    /// was ever determined (the segment contained no possession-defining
    /// play and is dropped).
    fn finalize(
        self,
        possession_number: u32,
        home_team_id: TeamId,
        away_team_id: TeamId,
    ) -> Option<Possession> {
        let offensive_team_id = self.offensive_team_id?;
        let first = self.events.first()?;
        let last = self.events.last()?;

        let defensive_team_id =
            if offensive_team_id == home_team_id { away_team_id } else { home_team_id };

        let points_scored = self.events.iter().map(|e| e.points()).sum();
        let shot_attempts = self
            .events
            .iter()
            .flat_map(|e| e.deltas.iter())
            .map(|d| d.fga as u32)
            .sum();
        let offensive_rebounds =
            self.events.iter().filter(|e| e.is_offensive_rebound).count() as u32;
        let turnovers = self
            .events
            .iter()
            .flat_map(|e| e.deltas.iter())
            .map(|d| d.tov as u32)
            .sum();
        let ended_by = end_reason(last);

        Some(Possession {
            possession_number,
            offensive_team_id,
            defensive_team_id,
            start_sequence_number: first.sequence_number,
            end_sequence_number: last.sequence_number,
            start_clock: first.clock.clone(),
            end_clock: last.clock.clone(),
            period: first.period,
            points_scored,
            ended_by,
            shot_attempts,
            offensive_rebounds,
            turnovers,
            events: self.events,
        })
    }
}

/// How the possession ended, judged from its last event.
fn end_reason(last: &ParsedEvent) -> PossessionEndReason {
    if last.is_defensive_rebound() {
        PossessionEndReason::DefensiveRebound
    } else if last.type_text.contains("Turnover") {
        PossessionEndReason::Turnover
    } else if last.is_made_shot() {
        PossessionEndReason::MadeShot
    } else if last.type_text.contains("End Period") || last.type_text.contains("End Game") {
        PossessionEndReason::EndPeriod
    } else {
        PossessionEndReason::Unknown
    }
}

/// Acting offensive team for one event, in priority order: rebound
/// keep/flip, turnover flip, made shot keep, then keep-or-infer. `None`
/// when control is unknown and the event kind forbids inference beyond
/// its own team field.
fn resolve_acting_team(
    event: &ParsedEvent,
    control: OffensiveControl,
    home_team_id: TeamId,
    away_team_id: TeamId,
) -> Option<TeamId> {
    let flip =
        |team: TeamId| if team == home_team_id { away_team_id } else { home_team_id };

    if event.is_rebound() {
        return match (control.team(), event.is_offensive_rebound) {
            (Some(current), true) => Some(current),
            (Some(current), false) => Some(flip(current)),
            (None, _) => event.offensive_team_id,
        };
    }
    if event.is_turnover() {
        return match control.team() {
            Some(current) => Some(flip(current)),
            None => event.offensive_team_id,
        };
    }
    if event.is_made_shot() {
        // The flip happens when the possession is closed, not here.
        return match control.team() {
            Some(current) => Some(current),
            None => event.offensive_team_id,
        };
    }
    match control.team() {
        Some(current) => Some(current),
        // Documented fallback: with no team information at all, credit
        // the home team rather than guessing provider intent.
        None => Some(event.offensive_team_id.unwrap_or(home_team_id)),
    }
}

/// Partition `events` (pre-sorted by sequence number) into possessions.
pub fn segment(
    home_team_id: TeamId,
    away_team_id: TeamId,
    events: &[ParsedEvent],
) -> Segmentation {
    let mut control = OffensiveControl::Unknown;
    let mut current: Option<PossessionBuilder> = None;
    let mut possessions: Vec<Possession> = Vec::new();
    let mut dropped: u32 = 0;

    let close = |builder: PossessionBuilder,
                     possessions: &mut Vec<Possession>,
                     dropped: &mut u32| {
        match builder.finalize(possessions.len() as u32, home_team_id, away_team_id) {
            Some(possession) => possessions.push(possession),
            None => {
                warn!("dropping open possession with no determined offensive team");
                *dropped += 1;
            }
        }
    };

    for event in events {
        if event.is_administrative() {
            continue;
        }

        let acting = resolve_acting_team(event, control, home_team_id, away_team_id);

        let start_new = match (&current, acting) {
            (Some(builder), Some(team)) => builder.offensive_team_id != Some(team),
            (Some(_), None) => false,
            (None, _) => true,
        };

        if start_new {
            if let Some(builder) = current.take() {
                close(builder, &mut possessions, &mut dropped);
            }
            current = Some(PossessionBuilder::new(acting));
            control = match acting {
                Some(team) => OffensiveControl::Team(team),
                None => OffensiveControl::Unknown,
            };
        }

        if let Some(builder) = current.as_mut() {
            builder.push(event);
        }

        if event.ends_possession {
            if let Some(builder) = current.take() {
                close(builder, &mut possessions, &mut dropped);
            }
            control = OffensiveControl::Unknown;
        }
    }

    if let Some(builder) = current.take() {
        close(builder, &mut possessions, &mut dropped);
    }

    Segmentation { possessions, dropped_open_possessions: dropped }
}
