//! Break execution orchestration.
//!
//! Owns the glue between the local tracker, the backend write-through, the
//! countdown timer, and the notifier. Ordering rule: validate locally,
//! write through to the backend, and only then commit the local
//! transition. A failed write-through leaves local state untouched so the
//! user can retry; the client never pretends a break started or finished.
//!
//! While a break is active its countdown runs locally. Hitting zero
//! triggers completion automatically, without waiting on the backend.

use std::sync::{Arc, Weak};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

use crate::error::{ClientError, Result};
use crate::notification::{
    notify_break_completed, notify_break_skipped, notify_break_started, Notifier,
};
use crate::services::breaks::BreakService;
use crate::timer::Countdown;
use crate::tracker::{BreakId, BreakPhase, BreakTracker};
use crate::types::{
    BreakRecommendation, BreakScheduleResponse, CompleteBreakAck, SkipBreakAck, StartBreakAck,
};

/// Locally recorded break session (one per started break).
#[derive(Debug, Clone, Serialize)]
pub struct BreakSessionRecord {
    pub id: String,
    pub break_id: BreakId,
    pub break_type: String,
    pub duration_minutes: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub outcome: BreakPhase,
}

pub struct BreakExecutor {
    service: BreakService,
    tracker: BreakTracker,
    notifier: Arc<dyn Notifier>,
    /// Current schedule in fetch order, keyed by synthesized id.
    schedule: Mutex<Vec<(BreakId, BreakRecommendation)>>,
    /// Countdown for the active break, if one is running.
    countdown: Mutex<Option<Countdown>>,
    records: Mutex<Vec<BreakSessionRecord>>,
    /// Handle for the auto-completion task; never keeps `self` alive.
    weak_self: Weak<BreakExecutor>,
}

impl BreakExecutor {
    pub fn new(service: BreakService, notifier: Arc<dyn Notifier>) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            service,
            tracker: BreakTracker::new(),
            notifier,
            schedule: Mutex::new(Vec::new()),
            countdown: Mutex::new(None),
            records: Mutex::new(Vec::new()),
            weak_self: weak.clone(),
        })
    }

    pub fn tracker(&self) -> &BreakTracker {
        &self.tracker
    }

    /// Fetch a fresh schedule and reset all execution state.
    ///
    /// Any running countdown is cancelled: its break id no longer refers
    /// to anything after the refresh.
    pub async fn load_schedule(&self, auto_insert: bool) -> Result<BreakScheduleResponse> {
        let response = self.service.schedule(auto_insert).await?;

        if let Some(mut countdown) = self.countdown.lock().take() {
            countdown.cancel();
        }

        let breaks = &response.break_schedule.recommended_breaks;
        let ids = self.tracker.load_schedule(breaks);
        *self.schedule.lock() = ids.into_iter().zip(breaks.iter().cloned()).collect();

        Ok(response)
    }

    /// Breaks of the current schedule with their synthesized ids.
    pub fn schedule(&self) -> Vec<(BreakId, BreakRecommendation)> {
        self.schedule.lock().clone()
    }

    /// Seconds left on the active break's countdown, if one is running.
    pub fn remaining_secs(&self) -> Option<u64> {
        self.countdown.lock().as_ref().map(|c| c.remaining_secs())
    }

    /// Locally recorded sessions, oldest first.
    pub fn session_records(&self) -> Vec<BreakSessionRecord> {
        self.records.lock().clone()
    }

    /// Start a break: local validation, backend write-through, local
    /// commit, notification, countdown.
    pub async fn start(&self, id: &BreakId) -> Result<StartBreakAck> {
        self.tracker.can_start(id)?;
        let rec = self
            .schedule
            .lock()
            .iter()
            .find(|(sid, _)| sid == id)
            .map(|(_, rec)| rec.clone())
            .ok_or_else(|| {
                ClientError::state(format!("break {} is not in the current schedule", id))
            })?;

        let ack = self
            .service
            .start(id.as_str(), &rec.break_type, rec.duration_minutes, &rec.reasoning)
            .await?;

        self.tracker.start(id)?;
        self.records.lock().push(BreakSessionRecord {
            id: uuid::Uuid::new_v4().to_string(),
            break_id: id.clone(),
            break_type: rec.break_type.clone(),
            duration_minutes: rec.duration_minutes,
            started_at: Utc::now(),
            finished_at: None,
            outcome: BreakPhase::Active,
        });
        notify_break_started(self.notifier.as_ref(), &rec.break_type, rec.duration_minutes);

        self.spawn_countdown(id.clone(), u64::from(rec.duration_minutes) * 60);

        Ok(ack)
    }

    /// Complete the active break.
    pub async fn complete(&self, id: &BreakId, feedback: Option<&str>) -> Result<CompleteBreakAck> {
        self.tracker.can_complete(id)?;

        let ack = self.service.complete(id.as_str(), feedback).await?;

        self.tracker.complete(id)?;
        if let Some(mut countdown) = self.countdown.lock().take() {
            countdown.cancel();
        }
        let break_type = self.close_record(id, BreakPhase::Completed);
        notify_break_completed(self.notifier.as_ref(), &break_type);

        Ok(ack)
    }

    /// Skip a break (from upcoming or active).
    pub async fn skip(&self, id: &BreakId, reason: Option<&str>) -> Result<SkipBreakAck> {
        self.tracker.can_skip(id)?;
        let was_active = self.tracker.active().as_ref() == Some(id);

        let ack = self.service.skip(id.as_str(), reason).await?;

        self.tracker.skip(id)?;
        if was_active {
            if let Some(mut countdown) = self.countdown.lock().take() {
                countdown.cancel();
            }
            self.close_record(id, BreakPhase::Skipped);
        }
        let break_type = self.break_type_of(id);
        notify_break_skipped(self.notifier.as_ref(), &break_type);

        Ok(ack)
    }

    fn spawn_countdown(&self, id: BreakId, total_secs: u64) {
        let mut countdown = Countdown::start(total_secs);
        let Some(finished) = countdown.take_finished() else {
            // Cannot happen for a fresh countdown; run without auto-complete.
            *self.countdown.lock() = Some(countdown);
            return;
        };
        *self.countdown.lock() = Some(countdown);

        // Weak reference: the timer must not keep the executor alive, and
        // dropping the executor aborts the countdown, which resolves
        // `finished` as cancelled.
        let weak = self.weak_self.clone();
        tokio::spawn(async move {
            if finished.await.is_err() {
                return; // cancelled
            }
            let Some(executor) = weak.upgrade() else {
                return;
            };
            log::info!("break {} countdown reached zero, completing", id);
            if let Err(e) = executor.complete(&id, None).await {
                // Local state stays active so the user can retry manually.
                log::warn!("auto-completion of break {} failed: {}", id, e);
            }
        });
    }

    /// Mark the session record for `id` finished and return its type.
    fn close_record(&self, id: &BreakId, outcome: BreakPhase) -> String {
        let mut records = self.records.lock();
        if let Some(record) = records
            .iter_mut()
            .rev()
            .find(|r| &r.break_id == id && r.outcome == BreakPhase::Active)
        {
            record.outcome = outcome;
            record.finished_at = Some(Utc::now());
            return record.break_type.clone();
        }
        self.break_type_of(id)
    }

    fn break_type_of(&self, id: &BreakId) -> String {
        self.schedule
            .lock()
            .iter()
            .find(|(sid, _)| sid == id)
            .map(|(_, rec)| rec.break_type.clone())
            .unwrap_or_else(|| "wellness".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::http::ApiClient;
    use crate::notification::LogNotifier;

    // These tests cover the validation that runs before any request is
    // issued; the client below never actually connects.
    fn offline_executor() -> Arc<BreakExecutor> {
        let api = Arc::new(ApiClient::new(&Config::default()).unwrap());
        let service = BreakService::new(api, "default_user".to_string());
        BreakExecutor::new(service, Arc::new(LogNotifier))
    }

    #[tokio::test]
    async fn test_start_unknown_break_fails_before_network() {
        let executor = offline_executor();
        let id = BreakId::synthesize("walk", "15:00 - 15:15", 0);
        let err = executor.start(&id).await.unwrap_err();
        assert!(matches!(err, ClientError::State(_)));
    }

    #[tokio::test]
    async fn test_complete_before_start_fails_before_network() {
        let executor = offline_executor();
        let id = BreakId::synthesize("walk", "15:00 - 15:15", 0);
        let err = executor.complete(&id, None).await.unwrap_err();
        assert!(matches!(err, ClientError::State(_)));
    }

    #[tokio::test]
    async fn test_skip_unknown_break_fails_before_network() {
        let executor = offline_executor();
        let id = BreakId::synthesize("walk", "15:00 - 15:15", 0);
        let err = executor.skip(&id, None).await.unwrap_err();
        assert!(matches!(err, ClientError::State(_)));
    }

    #[tokio::test]
    async fn test_no_countdown_without_active_break() {
        let executor = offline_executor();
        assert_eq!(executor.remaining_secs(), None);
        assert!(executor.session_records().is_empty());
        assert!(executor.schedule().is_empty());
    }
}
