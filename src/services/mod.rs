//! Typed wrappers over the backend endpoints, one module per capability.
//!
//! Every operation maps 1:1 to an endpoint: validated input in, typed
//! response out, errors propagated unchanged from the HTTP client. The
//! only deliberate exception is the music/video needs-auth case, which is
//! a discriminated outcome rather than an error (see `TherapyOutcome`).

pub mod breaks;
pub mod checkins;
pub mod music;
pub mod video;
pub mod wellness;

use crate::error::{ClientError, Result};

/// Outcome of a music or video recommendation request.
///
/// "Not connected yet" is routed to the login flow by the caller; it is
/// neither a transport nor an API failure, so it is not an error.
#[derive(Debug)]
pub enum TherapyOutcome<T> {
    Ready(T),
    /// The user must complete the provider login flow first.
    NeedsAuth,
}

/// Trim a caller-supplied mood, rejecting whitespace-only input.
///
/// `None` (no mood filter) is valid; an explicitly supplied empty mood is
/// a validation error so a blank form field never triggers a re-fetch.
pub fn normalize_mood(mood: Option<&str>) -> Result<Option<String>> {
    match mood {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Err(ClientError::validation("mood must not be empty"))
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
    }
}
