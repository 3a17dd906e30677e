//! Dashboard aggregation.
//!
//! Three independent fetches run concurrently and merge into one view
//! model. Their failures are not equal: the stress analysis is
//! load-critical and fails the whole aggregation, the task fetch degrades
//! to a zero count, and a failed check-in status just leaves the prompt
//! out. Data that did arrive is always kept.

use serde::Serialize;

use crate::cadence::{self, CheckinKind};
use crate::error::Result;
use crate::services::checkins::CheckinService;
use crate::services::wellness::WellnessService;
use crate::types::{CheckinStatus, StressAnalysis, StressIntelligence, TaskList};

/// One dashboard load cycle, assembled per fetch. Not a stored entity.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardViewModel {
    pub stress: StressIntelligence,
    pub timestamp: Option<String>,
    pub calendar_event_count: u32,
    pub task_count: u32,
    /// True when the task fetch failed and the count degraded to zero.
    pub task_fetch_degraded: bool,
    /// Authoritative prompt signal from the backend, absent when the
    /// status fetch failed or nothing is due.
    pub next_checkin: Option<CheckinKind>,
    pub checkin_status: Option<CheckinStatus>,
    /// Locally resolved cadence, a display hint only.
    pub cadence_hint: CheckinKind,
}

/// Fetch everything concurrently and merge.
pub async fn load_dashboard(
    wellness: &WellnessService,
    checkins: &CheckinService,
) -> Result<DashboardViewModel> {
    let (stress, tasks, status) = tokio::join!(
        wellness.stress_analysis(),
        wellness.tasks(),
        checkins.status(),
    );

    resolve(stress, tasks, status, cadence::current_checkin_kind())
}

/// Merge the three fetch outcomes under the asymmetric failure policy.
///
/// Split out from `load_dashboard` so the policy is testable without a
/// backend.
pub fn resolve(
    stress: Result<StressAnalysis>,
    tasks: Result<TaskList>,
    status: Result<CheckinStatus>,
    cadence_hint: CheckinKind,
) -> Result<DashboardViewModel> {
    // Load-critical: without the stress snapshot there is no dashboard.
    let stress = stress?;

    let (task_count, task_fetch_degraded) = match tasks {
        Ok(list) => (list.total, false),
        Err(e) => {
            log::warn!("task fetch failed, degrading count to zero: {}", e);
            (0, true)
        }
    };

    let checkin_status = match status {
        Ok(s) => Some(s),
        Err(e) => {
            log::warn!("check-in status fetch failed, prompt suppressed: {}", e);
            None
        }
    };
    let next_checkin = cadence::prompt_for(checkin_status.as_ref());

    Ok(DashboardViewModel {
        calendar_event_count: stress.data_sources.calendar_events,
        timestamp: stress.timestamp,
        stress: stress.stress_intelligence,
        task_count,
        task_fetch_degraded,
        next_checkin,
        checkin_status,
        cadence_hint,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::types::DataSources;

    fn stress_ok() -> Result<StressAnalysis> {
        Ok(StressAnalysis {
            success: true,
            timestamp: Some("2026-08-05T09:30:00".to_string()),
            data_sources: DataSources {
                calendar_events: 4,
                notion_tasks_total: 9,
                notion_tasks_relevant: 3,
            },
            ..Default::default()
        })
    }

    fn tasks_ok(total: u32) -> Result<TaskList> {
        Ok(TaskList {
            success: true,
            total,
            tasks: Vec::new(),
        })
    }

    fn status_ok(next: Option<CheckinKind>) -> Result<CheckinStatus> {
        Ok(CheckinStatus {
            success: true,
            next_checkin: next,
            ..Default::default()
        })
    }

    fn transport_err<T>() -> Result<T> {
        Err(ClientError::Transport("connection refused".into()))
    }

    #[test]
    fn test_all_fetches_succeed() {
        let vm = resolve(
            stress_ok(),
            tasks_ok(7),
            status_ok(Some(CheckinKind::Morning)),
            CheckinKind::Morning,
        )
        .unwrap();
        assert_eq!(vm.task_count, 7);
        assert!(!vm.task_fetch_degraded);
        assert_eq!(vm.calendar_event_count, 4);
        assert_eq!(vm.next_checkin, Some(CheckinKind::Morning));
    }

    #[test]
    fn test_task_failure_degrades_without_error() {
        let vm = resolve(
            stress_ok(),
            transport_err(),
            status_ok(None),
            CheckinKind::Afternoon,
        )
        .unwrap();
        assert_eq!(vm.task_count, 0);
        assert!(vm.task_fetch_degraded);
        // The rest of the view model is intact.
        assert_eq!(vm.calendar_event_count, 4);
    }

    #[test]
    fn test_status_failure_suppresses_prompt() {
        let vm = resolve(
            stress_ok(),
            tasks_ok(2),
            transport_err(),
            CheckinKind::Evening,
        )
        .unwrap();
        assert_eq!(vm.next_checkin, None);
        assert!(vm.checkin_status.is_none());
        assert_eq!(vm.task_count, 2);
    }

    #[test]
    fn test_stress_failure_is_blocking() {
        let err = resolve(
            transport_err(),
            tasks_ok(2),
            status_ok(Some(CheckinKind::Morning)),
            CheckinKind::Morning,
        )
        .unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_stress_failure_blocks_even_when_others_fail_too() {
        let err = resolve(
            Err(ClientError::Api {
                status: 500,
                message: "analysis engine down".into(),
            }),
            transport_err(),
            transport_err(),
            CheckinKind::Morning,
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 500, .. }));
    }

    #[test]
    fn test_server_none_prompt_respected_over_local_cadence() {
        // Local clock says morning, server says nothing is due: no prompt.
        let vm = resolve(
            stress_ok(),
            tasks_ok(0),
            status_ok(None),
            CheckinKind::Morning,
        )
        .unwrap();
        assert_eq!(vm.next_checkin, None);
        assert_eq!(vm.cadence_hint, CheckinKind::Morning);
    }
}
