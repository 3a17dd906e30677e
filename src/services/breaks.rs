//! Break schedule fetch and lifecycle write-through.
//!
//! The schedule read returns recommendations without identity; identity is
//! synthesized by the tracker. Lifecycle posts (`start`/`complete`/`skip`)
//! are write-throughs for state the executor owns locally.

use std::sync::Arc;

use serde::Serialize;

use crate::error::{ClientError, Result};
use crate::http::ApiClient;
use crate::types::{
    BreakContent, BreakHistory, BreakScheduleResponse, CompleteBreakAck, CurrentBreak,
    SkipBreakAck, StartBreakAck,
};

pub const DEFAULT_SKIP_REASON: &str = "user_skip";

#[derive(Serialize)]
struct StartBody<'a> {
    break_id: &'a str,
    #[serde(rename = "type")]
    break_type: &'a str,
    duration: u32,
    ai_reason: &'a str,
}

#[derive(Serialize)]
struct CompleteBody<'a> {
    break_id: &'a str,
    completed: bool,
    feedback: &'a str,
}

#[derive(Serialize)]
struct SkipBody<'a> {
    break_id: &'a str,
    reason: &'a str,
}

#[derive(Clone)]
pub struct BreakService {
    api: Arc<ApiClient>,
    user_id: String,
}

impl BreakService {
    pub fn new(api: Arc<ApiClient>, user_id: String) -> Self {
        Self { api, user_id }
    }

    /// Fetch today's recommended break schedule. With `auto_insert`, the
    /// backend also writes the breaks into the user's calendar and reports
    /// what it inserted.
    pub async fn schedule(&self, auto_insert: bool) -> Result<BreakScheduleResponse> {
        let response: BreakScheduleResponse = self
            .api
            .get(
                "/schedule-breaks",
                &[
                    ("auto_insert", auto_insert.to_string()),
                    ("user_id", self.user_id.clone()),
                ],
            )
            .await?;
        log::debug!(
            "break schedule: {} recommendations, auto_inserted={}",
            response.break_schedule.recommended_breaks.len(),
            response.auto_inserted
        );
        Ok(response)
    }

    pub async fn start(
        &self,
        break_id: &str,
        break_type: &str,
        duration_minutes: u32,
        ai_reason: &str,
    ) -> Result<StartBreakAck> {
        let body = StartBody {
            break_id,
            break_type,
            duration: duration_minutes,
            ai_reason,
        };
        self.api.post("/breaks/start", &body).await
    }

    pub async fn complete(&self, break_id: &str, feedback: Option<&str>) -> Result<CompleteBreakAck> {
        let body = CompleteBody {
            break_id,
            completed: true,
            feedback: feedback.unwrap_or(""),
        };
        self.api.post("/breaks/complete", &body).await
    }

    pub async fn skip(&self, break_id: &str, reason: Option<&str>) -> Result<SkipBreakAck> {
        let body = SkipBody {
            break_id,
            reason: reason.unwrap_or(DEFAULT_SKIP_REASON),
        };
        self.api.post("/breaks/skip", &body).await
    }

    /// The break the backend currently considers active, if any.
    pub async fn current(&self) -> Result<CurrentBreak> {
        self.api.get("/breaks/current", &[]).await
    }

    /// Guided content (steps, timing) for one break type.
    pub async fn content(&self, break_type: &str) -> Result<BreakContent> {
        if break_type.trim().is_empty() {
            return Err(ClientError::validation("break type must not be empty"));
        }
        self.api
            .get("/breaks/content", &[("type", break_type.to_string())])
            .await
    }

    pub async fn history(&self, days: u32) -> Result<BreakHistory> {
        self.api
            .get("/breaks/history", &[("days", days.to_string())])
            .await
    }
}
