//! Stress analysis, calendar, and task reads.

use std::sync::Arc;

use crate::error::Result;
use crate::http::ApiClient;
use crate::types::{CalendarEvents, StressAnalysis, TaskList};

#[derive(Clone)]
pub struct WellnessService {
    api: Arc<ApiClient>,
}

impl WellnessService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Fetch the backend's stress intelligence snapshot.
    pub async fn stress_analysis(&self) -> Result<StressAnalysis> {
        let analysis: StressAnalysis = self.api.get("/analyze", &[]).await?;
        log::debug!(
            "stress analysis: {} ({}/10), burnout {}",
            analysis.stress_intelligence.stress_level,
            analysis.stress_intelligence.stress_score,
            analysis.stress_intelligence.burnout_risk
        );
        Ok(analysis)
    }

    /// Upcoming calendar events for the next `days` days.
    pub async fn calendar_events(&self, days: u32) -> Result<CalendarEvents> {
        self.api
            .get("/calendar", &[("days", days.to_string())])
            .await
    }

    /// Task list with counts.
    pub async fn tasks(&self) -> Result<TaskList> {
        self.api.get("/tasks", &[]).await
    }
}
