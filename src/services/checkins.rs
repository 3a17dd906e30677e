//! Check-in submission, status, history, and analytics.
//!
//! A check-in is built entirely from form state, validated client-side,
//! submitted once, and never mutated afterwards. The three variants share
//! mood/energy/stress and differ in their extra fields.

use std::sync::Arc;

use serde::Serialize;

use crate::cadence::CheckinKind;
use crate::error::{ClientError, Result};
use crate::http::ApiClient;
use crate::types::{CheckinAck, CheckinAnalytics, CheckinHistory, CheckinStatus};

/// Split a multi-line input into entries, dropping blank and
/// whitespace-only lines. Order is preserved; kept lines are untouched.
pub fn parse_entries(input: &str) -> Vec<String> {
    input
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect()
}

fn validate_score(field: &str, value: u8) -> Result<u8> {
    if (1..=10).contains(&value) {
        Ok(value)
    } else {
        Err(ClientError::validation(format!(
            "{} must be between 1 and 10, got {}",
            field, value
        )))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MorningCheckin {
    pub mood: u8,
    pub energy: u8,
    pub sleep_quality: u8,
    pub stress: u8,
    pub notes: String,
    pub goals: Vec<String>,
}

impl MorningCheckin {
    pub fn new(
        mood: u8,
        energy: u8,
        sleep_quality: u8,
        stress: u8,
        notes: &str,
        goals_input: &str,
    ) -> Result<Self> {
        Ok(Self {
            mood: validate_score("mood", mood)?,
            energy: validate_score("energy", energy)?,
            sleep_quality: validate_score("sleep_quality", sleep_quality)?,
            stress: validate_score("stress", stress)?,
            notes: notes.to_string(),
            goals: parse_entries(goals_input),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AfternoonCheckin {
    pub mood: u8,
    pub energy: u8,
    pub stress: u8,
    pub focus: u8,
    pub notes: String,
}

impl AfternoonCheckin {
    pub fn new(mood: u8, energy: u8, stress: u8, focus: u8, notes: &str) -> Result<Self> {
        Ok(Self {
            mood: validate_score("mood", mood)?,
            energy: validate_score("energy", energy)?,
            stress: validate_score("stress", stress)?,
            focus: validate_score("focus", focus)?,
            notes: notes.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EveningCheckin {
    pub mood: u8,
    pub energy: u8,
    pub stress: u8,
    pub productivity: u8,
    pub notes: String,
    pub gratitude: Vec<String>,
    pub goals_achieved: bool,
}

impl EveningCheckin {
    pub fn new(
        mood: u8,
        energy: u8,
        stress: u8,
        productivity: u8,
        notes: &str,
        gratitude_input: &str,
        goals_achieved: bool,
    ) -> Result<Self> {
        Ok(Self {
            mood: validate_score("mood", mood)?,
            energy: validate_score("energy", energy)?,
            stress: validate_score("stress", stress)?,
            productivity: validate_score("productivity", productivity)?,
            notes: notes.to_string(),
            gratitude: parse_entries(gratitude_input),
            goals_achieved,
        })
    }
}

/// Submission payload: the check-in fields plus the owning user id.
#[derive(Serialize)]
struct Submission<'a, T: Serialize> {
    #[serde(flatten)]
    checkin: &'a T,
    user_id: &'a str,
}

#[derive(Clone)]
pub struct CheckinService {
    api: Arc<ApiClient>,
    user_id: String,
}

impl CheckinService {
    pub fn new(api: Arc<ApiClient>, user_id: String) -> Self {
        Self { api, user_id }
    }

    pub async fn submit_morning(&self, checkin: &MorningCheckin) -> Result<CheckinAck> {
        self.submit(CheckinKind::Morning, checkin).await
    }

    pub async fn submit_afternoon(&self, checkin: &AfternoonCheckin) -> Result<CheckinAck> {
        self.submit(CheckinKind::Afternoon, checkin).await
    }

    pub async fn submit_evening(&self, checkin: &EveningCheckin) -> Result<CheckinAck> {
        self.submit(CheckinKind::Evening, checkin).await
    }

    async fn submit<T: Serialize>(&self, kind: CheckinKind, checkin: &T) -> Result<CheckinAck> {
        let path = format!("/checkin/{}", kind.path_segment());
        let payload = Submission {
            checkin,
            user_id: &self.user_id,
        };
        let ack: CheckinAck = self.api.post(&path, &payload).await?;
        log::info!("{} check-in submitted", kind);
        Ok(ack)
    }

    /// Which check-ins happened today and which is due next.
    pub async fn status(&self) -> Result<CheckinStatus> {
        self.api
            .get("/checkin/status", &[("user_id", self.user_id.clone())])
            .await
    }

    pub async fn history(&self, days: u32) -> Result<CheckinHistory> {
        self.api
            .get(
                "/checkin/history",
                &[
                    ("user_id", self.user_id.clone()),
                    ("days", days.to_string()),
                ],
            )
            .await
    }

    pub async fn analytics(&self, days: u32) -> Result<CheckinAnalytics> {
        self.api
            .get(
                "/checkin/analytics",
                &[
                    ("user_id", self.user_id.clone()),
                    ("days", days.to_string()),
                ],
            )
            .await
    }
}
