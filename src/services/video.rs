//! Video recommendations.
//!
//! Same discriminated needs-auth contract as the music service.

use std::sync::Arc;

use crate::error::{ClientError, Result};
use crate::http::ApiClient;
use crate::services::{normalize_mood, TherapyOutcome};
use crate::types::VideoTherapyResponse;

#[derive(Clone)]
pub struct VideoService {
    api: Arc<ApiClient>,
}

impl VideoService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Mood-aware guided video recommendations. `use_ai` selects between
    /// the AI-curated and the stress-level fallback query sets.
    pub async fn therapy(
        &self,
        mood: Option<&str>,
        use_ai: bool,
    ) -> Result<TherapyOutcome<VideoTherapyResponse>> {
        let mood = normalize_mood(mood)?;
        let mut query = vec![("use_ai", use_ai.to_string())];
        if let Some(m) = mood {
            query.push(("mood", m));
        }

        let response: VideoTherapyResponse = self.api.get("/video-therapy", &query).await?;
        if response.needs_auth {
            return Ok(TherapyOutcome::NeedsAuth);
        }
        if !response.success {
            return Err(ClientError::Api {
                status: 200,
                message: response
                    .error
                    .unwrap_or_else(|| "failed to get video recommendations".to_string()),
            });
        }
        Ok(TherapyOutcome::Ready(response))
    }
}
