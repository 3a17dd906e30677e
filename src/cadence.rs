//! Check-in cadence resolution.
//!
//! Maps the current time onto the morning/afternoon/evening cycle. The
//! mapping runs on a hard-coded +05:30 offset rather than the device
//! timezone; see DESIGN.md for why that is preserved as-is. The resolved
//! cadence is a display hint only: whether a check-in is actually due
//! comes from the backend's `/checkin/status` response.

use chrono::{DateTime, FixedOffset, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::types::CheckinStatus;

/// Fixed UTC offset applied before bucketing hours (+05:30).
pub const CHECKIN_UTC_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Which of the three daily check-ins a moment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckinKind {
    Morning,
    Afternoon,
    Evening,
}

impl CheckinKind {
    /// Path segment for the submit endpoint (`/checkin/<segment>`).
    pub fn path_segment(&self) -> &'static str {
        match self {
            CheckinKind::Morning => "morning",
            CheckinKind::Afternoon => "afternoon",
            CheckinKind::Evening => "evening",
        }
    }
}

impl std::fmt::Display for CheckinKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Resolve the cadence bucket for an instant.
///
/// Offset-local hours [5, 12) are morning, [12, 17) afternoon, everything
/// else evening. Total over the full 24-hour cycle.
pub fn checkin_kind_at(instant: DateTime<Utc>) -> CheckinKind {
    let offset = FixedOffset::east_opt(CHECKIN_UTC_OFFSET_SECS).expect("+05:30 is in range");
    let local_hour = instant.with_timezone(&offset).hour();

    match local_hour {
        5..=11 => CheckinKind::Morning,
        12..=16 => CheckinKind::Afternoon,
        _ => CheckinKind::Evening,
    }
}

/// Cadence bucket for right now.
pub fn current_checkin_kind() -> CheckinKind {
    checkin_kind_at(Utc::now())
}

/// Decide whether to surface a check-in prompt.
///
/// The backend's status is authoritative: when it reports no pending
/// check-in (or the status fetch failed upstream and `None` is passed),
/// no prompt is shown regardless of the local clock.
pub fn prompt_for(status: Option<&CheckinStatus>) -> Option<CheckinKind> {
    status.and_then(|s| s.next_checkin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_utc_hour(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 5, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_morning_window() {
        // 00:00 UTC is 05:30 local: first slot of the morning window.
        assert_eq!(checkin_kind_at(at_utc_hour(0, 0)), CheckinKind::Morning);
        assert_eq!(checkin_kind_at(at_utc_hour(3, 0)), CheckinKind::Morning);
        // 06:29 UTC -> 11:59 local, still morning.
        assert_eq!(checkin_kind_at(at_utc_hour(6, 29)), CheckinKind::Morning);
    }

    #[test]
    fn test_afternoon_window() {
        // 06:30 UTC -> 12:00 local.
        assert_eq!(checkin_kind_at(at_utc_hour(6, 30)), CheckinKind::Afternoon);
        assert_eq!(checkin_kind_at(at_utc_hour(10, 0)), CheckinKind::Afternoon);
        // 11:29 UTC -> 16:59 local.
        assert_eq!(checkin_kind_at(at_utc_hour(11, 29)), CheckinKind::Afternoon);
    }

    #[test]
    fn test_evening_window() {
        // 11:30 UTC -> 17:00 local.
        assert_eq!(checkin_kind_at(at_utc_hour(11, 30)), CheckinKind::Evening);
        assert_eq!(checkin_kind_at(at_utc_hour(18, 0)), CheckinKind::Evening);
        // 23:00 UTC -> 04:30 local next day, before the morning window opens.
        assert_eq!(checkin_kind_at(at_utc_hour(23, 0)), CheckinKind::Evening);
    }

    #[test]
    fn test_offset_wraps_past_midnight() {
        // 19:00 UTC -> 00:30 local: the day wrap lands in evening.
        assert_eq!(checkin_kind_at(at_utc_hour(19, 0)), CheckinKind::Evening);
        // 23:30 UTC -> 05:00 local: wrap lands exactly at the morning boundary.
        assert_eq!(checkin_kind_at(at_utc_hour(23, 30)), CheckinKind::Morning);
    }

    #[test]
    fn test_every_hour_maps_to_exactly_one_kind() {
        // No gaps or overlaps anywhere in the cycle, checked at both
        // half-hour marks so the :30 offset boundaries are covered.
        for hour in 0..24 {
            for minute in [0, 30] {
                let _ = checkin_kind_at(at_utc_hour(hour, minute));
            }
        }
    }

    #[test]
    fn test_prompt_follows_server_status() {
        let mut status = CheckinStatus {
            success: true,
            next_checkin: Some(CheckinKind::Evening),
            ..Default::default()
        };
        assert_eq!(prompt_for(Some(&status)), Some(CheckinKind::Evening));

        status.next_checkin = None;
        assert_eq!(prompt_for(Some(&status)), None);
        assert_eq!(prompt_for(None), None);
    }

    #[test]
    fn test_kind_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&CheckinKind::Morning).unwrap(),
            "\"morning\""
        );
        let parsed: CheckinKind = serde_json::from_str("\"evening\"").unwrap();
        assert_eq!(parsed, CheckinKind::Evening);
    }
}
