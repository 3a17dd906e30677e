//! Client-side break execution tracking.
//!
//! The backend recommends breaks but assigns them no identity, so the
//! tracker synthesizes a stable key per fetched schedule and runs a small
//! state machine per key: upcoming -> active -> completed, with skipped as
//! a terminal side exit. At most one break is active at a time; starting a
//! second one is rejected rather than implicitly cancelling the first.
//!
//! State only changes through `start`/`complete`/`skip`. Reads take a
//! snapshot and never hold the lock across I/O.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::types::BreakRecommendation;

/// Client-derived identity for one recommended break.
///
/// Deterministic over `(break_type, time_slot, position)`, so it is stable
/// for the lifetime of one fetched schedule and recomputed on every
/// re-fetch. Execution state keyed on it does not survive a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BreakId(String);

impl BreakId {
    pub fn synthesize(break_type: &str, time_slot: &str, index: usize) -> Self {
        BreakId(format!("{}-{}-{}", break_type, time_slot, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BreakId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Execution phase of one tracked break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakPhase {
    Upcoming,
    Active,
    Completed,
    Skipped,
}

#[derive(Debug, Default)]
struct TrackerState {
    /// Ids in schedule order. Absence from `phases` means upcoming.
    ids: Vec<BreakId>,
    phases: HashMap<BreakId, BreakPhase>,
    active: Option<BreakId>,
}

impl TrackerState {
    fn phase(&self, id: &BreakId) -> Option<BreakPhase> {
        if !self.ids.contains(id) {
            return None;
        }
        Some(*self.phases.get(id).unwrap_or(&BreakPhase::Upcoming))
    }
}

/// Tracks which break is upcoming/active/completed for the current
/// schedule, independent of backend persistence.
#[derive(Debug, Default)]
pub struct BreakTracker {
    state: RwLock<TrackerState>,
}

impl BreakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a freshly fetched schedule, discarding all prior state.
    ///
    /// Old ids are not carried over: even a recommendation identical to a
    /// previous one starts back at upcoming.
    pub fn load_schedule(&self, breaks: &[BreakRecommendation]) -> Vec<BreakId> {
        let ids: Vec<BreakId> = breaks
            .iter()
            .enumerate()
            .map(|(index, rec)| BreakId::synthesize(&rec.break_type, &rec.time_slot, index))
            .collect();

        let mut state = self.state.write();
        state.ids = ids.clone();
        state.phases.clear();
        state.active = None;

        log::debug!("break tracker reset: {} tracked breaks", ids.len());
        ids
    }

    /// Phase of one break. `None` means the id is not part of the current
    /// schedule (stale id from before a refresh, or never issued).
    pub fn phase(&self, id: &BreakId) -> Option<BreakPhase> {
        self.state.read().phase(id)
    }

    /// The currently active break, if any.
    pub fn active(&self) -> Option<BreakId> {
        self.state.read().active.clone()
    }

    /// Consistent snapshot of all tracked breaks in schedule order.
    pub fn snapshot(&self) -> Vec<(BreakId, BreakPhase)> {
        let state = self.state.read();
        state
            .ids
            .iter()
            .map(|id| {
                (
                    id.clone(),
                    *state.phases.get(id).unwrap_or(&BreakPhase::Upcoming),
                )
            })
            .collect()
    }

    /// Check whether `start` would be accepted, without transitioning.
    pub fn can_start(&self, id: &BreakId) -> Result<()> {
        let state = self.state.read();
        Self::validate_start(&state, id)
    }

    /// Transition `id` from upcoming to active.
    ///
    /// Rejected (never silently restarted) when the break is already
    /// active or finished, and rejected while any other break is active.
    pub fn start(&self, id: &BreakId) -> Result<()> {
        let mut state = self.state.write();
        Self::validate_start(&state, id)?;
        state.phases.insert(id.clone(), BreakPhase::Active);
        state.active = Some(id.clone());
        Ok(())
    }

    /// Check whether `complete` would be accepted, without transitioning.
    pub fn can_complete(&self, id: &BreakId) -> Result<()> {
        let state = self.state.read();
        Self::validate_complete(&state, id)
    }

    /// Transition `id` from active to completed (terminal).
    pub fn complete(&self, id: &BreakId) -> Result<()> {
        let mut state = self.state.write();
        Self::validate_complete(&state, id)?;
        state.phases.insert(id.clone(), BreakPhase::Completed);
        state.active = None;
        Ok(())
    }

    /// Check whether `skip` would be accepted, without transitioning.
    pub fn can_skip(&self, id: &BreakId) -> Result<()> {
        let state = self.state.read();
        Self::validate_skip(&state, id)
    }

    /// Mark `id` skipped (terminal). Allowed from upcoming or active.
    pub fn skip(&self, id: &BreakId) -> Result<()> {
        let mut state = self.state.write();
        Self::validate_skip(&state, id)?;
        if state.active.as_ref() == Some(id) {
            state.active = None;
        }
        state.phases.insert(id.clone(), BreakPhase::Skipped);
        Ok(())
    }

    fn validate_start(state: &TrackerState, id: &BreakId) -> Result<()> {
        match state.phase(id) {
            None => {
                return Err(ClientError::state(format!(
                    "break {} is not in the current schedule",
                    id
                )))
            }
            Some(BreakPhase::Upcoming) => {}
            Some(phase) => {
                return Err(ClientError::state(format!(
                    "break {} is already {:?}",
                    id, phase
                )))
            }
        }
        if let Some(active) = &state.active {
            return Err(ClientError::state(format!(
                "break {} is still active; complete or skip it first",
                active
            )));
        }
        Ok(())
    }

    fn validate_complete(state: &TrackerState, id: &BreakId) -> Result<()> {
        match state.phase(id) {
            None => Err(ClientError::state(format!(
                "cannot complete unknown break {}",
                id
            ))),
            Some(BreakPhase::Active) => Ok(()),
            Some(BreakPhase::Upcoming) => Err(ClientError::state(format!(
                "cannot complete break {} before it was started",
                id
            ))),
            Some(phase) => Err(ClientError::state(format!(
                "break {} is already {:?}",
                id, phase
            ))),
        }
    }

    fn validate_skip(state: &TrackerState, id: &BreakId) -> Result<()> {
        match state.phase(id) {
            None => Err(ClientError::state(format!(
                "cannot skip unknown break {}",
                id
            ))),
            Some(BreakPhase::Upcoming) | Some(BreakPhase::Active) => Ok(()),
            Some(phase) => Err(ClientError::state(format!(
                "break {} is already {:?}",
                id, phase
            ))),
        }
    }
}
