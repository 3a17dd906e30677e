//! Wire types for the wellness backend.
//!
//! All bodies are snake_case JSON. Response structs tolerate missing
//! fields (`#[serde(default)]`) so a backend revision that drops an
//! optional field does not break deserialization. List fields are ordered
//! and may be empty.

use serde::{Deserialize, Serialize};

// ============================================================================
// Stress analysis (/analyze)
// ============================================================================

/// Envelope returned by `GET /analyze`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StressAnalysis {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub stress_intelligence: StressIntelligence,
    #[serde(default)]
    pub data_sources: DataSources,
}

/// Backend-computed wellness snapshot. Opaque to this client: scores and
/// labels are displayed, never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressIntelligence {
    #[serde(default = "default_stress_level")]
    pub stress_level: String,
    #[serde(default = "default_score")]
    pub stress_score: f64,
    #[serde(default = "default_risk")]
    pub burnout_risk: String,
    #[serde(default = "default_mood_state")]
    pub mood_state: String,
    #[serde(default)]
    pub energy_forecast: Option<String>,
    #[serde(default)]
    pub key_patterns: Vec<String>,
    #[serde(default)]
    pub wellness_recommendations: Vec<WellnessRecommendation>,
    #[serde(default)]
    pub recommended_music_genres: Vec<String>,
    #[serde(default)]
    pub detailed_assessment: Option<String>,
}

fn default_stress_level() -> String {
    "moderate".to_string()
}

fn default_score() -> f64 {
    5.0
}

fn default_risk() -> String {
    "moderate".to_string()
}

fn default_mood_state() -> String {
    "coping".to_string()
}

impl Default for StressIntelligence {
    fn default() -> Self {
        Self {
            stress_level: default_stress_level(),
            stress_score: default_score(),
            burnout_risk: default_risk(),
            mood_state: default_mood_state(),
            energy_forecast: None,
            key_patterns: Vec::new(),
            wellness_recommendations: Vec::new(),
            recommended_music_genres: Vec::new(),
            detailed_assessment: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WellnessRecommendation {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub reasoning: String,
}

/// Counts of the inputs the analysis was computed from.
///
/// The backend has emitted both `notion_tasks` and `notion_tasks_total`
/// across revisions; both spellings are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSources {
    #[serde(default)]
    pub calendar_events: u32,
    #[serde(default, alias = "notion_tasks")]
    pub notion_tasks_total: u32,
    #[serde(default)]
    pub notion_tasks_relevant: u32,
}

// ============================================================================
// Tasks and calendar
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskList {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "type")]
    pub task_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarEvents {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub location: String,
    /// Attendee count, not a list; the backend flattens it.
    #[serde(default)]
    pub attendees: u32,
    #[serde(default, rename = "htmlLink")]
    pub html_link: Option<String>,
}

// ============================================================================
// Break schedule (/schedule-breaks)
// ============================================================================

/// Envelope returned by `GET /schedule-breaks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreakScheduleResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub stress_assessment: StressAssessment,
    #[serde(default)]
    pub break_schedule: BreakPlan,
    #[serde(default)]
    pub auto_inserted: bool,
    #[serde(default)]
    pub inserted_breaks: Vec<serde_json::Value>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StressAssessment {
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreakPlan {
    #[serde(default)]
    pub recommended_breaks: Vec<BreakRecommendation>,
    #[serde(default)]
    pub daily_strategy: Option<String>,
    #[serde(default)]
    pub energy_management: Option<String>,
}

/// One server-recommended break. Immutable once received; identity is
/// synthesized client-side (see `tracker::BreakId`), never server-assigned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreakRecommendation {
    #[serde(default)]
    pub time_slot: String,
    #[serde(default)]
    pub break_type: String,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub reason_tag: Option<String>,
    #[serde(default)]
    pub ui_message: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub preparation_tip: Option<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
}

// ============================================================================
// Break lifecycle acknowledgments
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartBreakAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub break_id: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompleteBreakAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub reward: Option<String>,
    #[serde(default)]
    pub next_recommendation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkipBreakAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub status: String,
}

/// `GET /breaks/current`: the break the backend believes is running.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentBreak {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub break_id: Option<String>,
    #[serde(default, rename = "type")]
    pub break_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub ai_reason: Option<String>,
    #[serde(default)]
    pub elapsed_seconds: Option<u64>,
}

/// Guided content for one break type (`GET /breaks/content?type=`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreakContent {
    #[serde(default, rename = "type")]
    pub break_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub steps: Vec<BreakStep>,
    #[serde(default)]
    pub animation: Option<String>,
    #[serde(default)]
    pub background_music: Option<String>,
    #[serde(default)]
    pub total_duration: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreakStep {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub seconds: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreakHistory {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub history: Vec<BreakRecord>,
    #[serde(default)]
    pub stats: BreakStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreakRecord {
    #[serde(default)]
    pub break_id: String,
    #[serde(default, rename = "type")]
    pub break_type: String,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreakStats {
    #[serde(default)]
    pub total_breaks: u32,
    #[serde(default)]
    pub completed_breaks: u32,
    #[serde(default)]
    pub completion_rate: f64,
    #[serde(default)]
    pub days: u32,
}

// ============================================================================
// Check-ins
// ============================================================================

/// `GET /checkin/status`: which check-ins happened today and which, if
/// any, is due next. `next_checkin` is the authoritative prompt signal;
/// the locally computed cadence is only a display hint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckinStatus {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub morning_completed: bool,
    #[serde(default)]
    pub afternoon_completed: bool,
    #[serde(default)]
    pub evening_completed: bool,
    #[serde(default)]
    pub next_checkin: Option<crate::cadence::CheckinKind>,
    #[serde(default)]
    pub current_hour: u32,
}

/// Acknowledgment for a submitted check-in. The saved entry and the mood
/// analysis are backend-owned blobs; this client carries them opaquely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckinAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub checkin: serde_json::Value,
    #[serde(default)]
    pub mood_analysis: serde_json::Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckinHistory {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub history: CheckinGroups,
    #[serde(default)]
    pub total_morning: u32,
    #[serde(default)]
    pub total_afternoon: u32,
    #[serde(default)]
    pub total_evening: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckinGroups {
    #[serde(default)]
    pub morning: Vec<serde_json::Value>,
    #[serde(default)]
    pub afternoon: Vec<serde_json::Value>,
    #[serde(default)]
    pub evening: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckinAnalytics {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub analytics: AnalyticsSummary,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub average_mood: f64,
    #[serde(default)]
    pub average_energy: f64,
    #[serde(default)]
    pub average_stress: f64,
    /// One of "improving", "declining", "stable".
    #[serde(default)]
    pub trend: String,
    #[serde(default)]
    pub total_checkins: u32,
    #[serde(default)]
    pub checkin_streak: u32,
    #[serde(default)]
    pub mood_history: Vec<f64>,
    #[serde(default)]
    pub energy_history: Vec<f64>,
    #[serde(default)]
    pub stress_history: Vec<f64>,
}

// ============================================================================
// Music (/spotify-*, /music-therapy, /create-playlist)
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotifyStatus {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<SpotifyUser>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotifyUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotifyLogin {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub auth_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MusicTherapyResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub tracks: Vec<SpotifyTrack>,
    #[serde(default)]
    pub total_tracks: u32,
    #[serde(default)]
    pub therapeutic_goal: Option<String>,
    #[serde(default)]
    pub therapeutic_explanation: Option<String>,
    #[serde(default)]
    pub stress_level: Option<String>,
    #[serde(default)]
    pub stress_score: Option<f64>,
    #[serde(default)]
    pub needs_auth: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotifyTrack {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub album_image: Option<String>,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub ai_reason: Option<String>,
    #[serde(default)]
    pub recommended_by: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub playlist: Option<PlaylistInfo>,
    #[serde(default)]
    pub needs_auth: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub tracks: u32,
}

// ============================================================================
// Video (/video-therapy)
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoTherapyResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub stress_assessment: Option<VideoStressAssessment>,
    #[serde(default)]
    pub ai_video_intelligence: Option<VideoIntelligence>,
    #[serde(default)]
    pub therapeutic_videos: Vec<YouTubeVideo>,
    #[serde(default)]
    pub total_videos: u32,
    #[serde(default)]
    pub user_input: Option<TherapyUserInput>,
    #[serde(default)]
    pub needs_auth: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoStressAssessment {
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub mood_state: String,
    #[serde(default)]
    pub energy_forecast: String,
    #[serde(default)]
    pub burnout_risk: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoIntelligence {
    #[serde(default)]
    pub primary_video_category: String,
    #[serde(default)]
    pub therapeutic_goal: String,
    #[serde(default)]
    pub video_duration_preference: String,
    #[serde(default)]
    pub viewing_context: String,
    #[serde(default)]
    pub therapeutic_explanation: String,
    #[serde(default)]
    pub avoid_content: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YouTubeVideo {
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub query_used: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TherapyUserInput {
    #[serde(default)]
    pub mood: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stress_analysis_full_envelope() {
        let json = r#"{
            "success": true,
            "timestamp": "2026-08-05T09:30:00",
            "stress_intelligence": {
                "stress_level": "high",
                "stress_score": 7.0,
                "burnout_risk": "medium",
                "mood_state": "strained",
                "key_patterns": ["back-to-back meetings"],
                "wellness_recommendations": [
                    {"action": "Take a walk", "priority": "high", "reasoning": "dense afternoon"}
                ],
                "recommended_music_genres": ["ambient"],
                "detailed_assessment": "Heavy meeting load."
            },
            "data_sources": {
                "calendar_events": 12,
                "notion_tasks_total": 9,
                "notion_tasks_relevant": 4
            }
        }"#;

        let parsed: StressAnalysis = serde_json::from_str(json).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.stress_intelligence.stress_level, "high");
        assert_eq!(parsed.stress_intelligence.stress_score, 7.0);
        assert_eq!(parsed.data_sources.calendar_events, 12);
        assert_eq!(parsed.data_sources.notion_tasks_total, 9);
    }

    #[test]
    fn test_data_sources_legacy_alias() {
        let parsed: DataSources =
            serde_json::from_str(r#"{"calendar_events": 3, "notion_tasks": 5}"#).unwrap();
        assert_eq!(parsed.notion_tasks_total, 5);
    }

    #[test]
    fn test_stress_intelligence_defaults_when_sparse() {
        let parsed: StressAnalysis = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(parsed.stress_intelligence.stress_level, "moderate");
        assert_eq!(parsed.stress_intelligence.stress_score, 5.0);
        assert_eq!(parsed.stress_intelligence.mood_state, "coping");
        assert!(parsed.stress_intelligence.key_patterns.is_empty());
    }

    #[test]
    fn test_break_recommendation_optional_fields() {
        let json = r#"{
            "time_slot": "10:30 - 10:40",
            "break_type": "breathing",
            "duration_minutes": 10,
            "reasoning": "Long focus block before lunch"
        }"#;
        let parsed: BreakRecommendation = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.break_type, "breathing");
        assert_eq!(parsed.duration_minutes, 10);
        assert!(parsed.confidence.is_none());
        assert!(parsed.benefits.is_empty());
    }

    #[test]
    fn test_break_content_type_rename() {
        let json = r#"{
            "type": "stretch",
            "title": "Desk Stretch",
            "steps": [{"text": "Neck stretch", "seconds": 15}],
            "animation": "stretch_pose",
            "background_music": null,
            "total_duration": 15
        }"#;
        let parsed: BreakContent = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.break_type, "stretch");
        assert_eq!(parsed.steps.len(), 1);
        assert_eq!(parsed.total_duration, 15);
    }

    #[test]
    fn test_checkin_status_next_kind() {
        let json = r#"{
            "success": true,
            "morning_completed": true,
            "afternoon_completed": false,
            "evening_completed": false,
            "next_checkin": "afternoon",
            "current_hour": 14
        }"#;
        let parsed: CheckinStatus = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.next_checkin,
            Some(crate::cadence::CheckinKind::Afternoon)
        );
    }

    #[test]
    fn test_checkin_status_all_done() {
        let parsed: CheckinStatus =
            serde_json::from_str(r#"{"success": true, "next_checkin": null}"#).unwrap();
        assert_eq!(parsed.next_checkin, None);
    }

    #[test]
    fn test_music_therapy_needs_auth_body() {
        let parsed: MusicTherapyResponse =
            serde_json::from_str(r#"{"success": false, "needs_auth": true}"#).unwrap();
        assert!(parsed.needs_auth);
        assert!(!parsed.success);
        assert!(parsed.tracks.is_empty());
    }

    #[test]
    fn test_current_break_inactive() {
        let parsed: CurrentBreak = serde_json::from_str(r#"{"active": false}"#).unwrap();
        assert!(!parsed.active);
        assert!(parsed.break_id.is_none());
    }
}
