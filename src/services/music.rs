//! Music integration: connection status, login URL, recommendations,
//! playlist creation.
//!
//! The backend answers "not connected to Spotify" with a success-status
//! body flagged `needs_auth`; these operations surface that as
//! `TherapyOutcome::NeedsAuth` so callers route to the login flow instead
//! of an error screen.

use std::sync::Arc;

use serde::Serialize;

use crate::error::{ClientError, Result};
use crate::http::ApiClient;
use crate::services::{normalize_mood, TherapyOutcome};
use crate::types::{CreatePlaylistResponse, MusicTherapyResponse, SpotifyLogin, SpotifyStatus};

#[derive(Serialize)]
struct PlaylistBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    mood: Option<String>,
}

#[derive(Clone)]
pub struct MusicService {
    api: Arc<ApiClient>,
}

impl MusicService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn status(&self) -> Result<SpotifyStatus> {
        self.api.get("/spotify-status", &[]).await
    }

    /// Fetch the URL the user opens to connect Spotify.
    pub async fn login_url(&self) -> Result<String> {
        let response: SpotifyLogin = self.api.get("/spotify-login", &[]).await?;
        match response.auth_url {
            Some(url) if response.success => Ok(url),
            _ => Err(ClientError::Api {
                status: 200,
                message: response
                    .error
                    .unwrap_or_else(|| "failed to get login URL".to_string()),
            }),
        }
    }

    /// Mood-aware track recommendations.
    pub async fn therapy(
        &self,
        mood: Option<&str>,
    ) -> Result<TherapyOutcome<MusicTherapyResponse>> {
        let mood = normalize_mood(mood)?;
        let mut query = Vec::new();
        if let Some(m) = mood {
            query.push(("mood", m));
        }

        let response: MusicTherapyResponse = self.api.get("/music-therapy", &query).await?;
        if response.needs_auth {
            log::info!("music therapy requires Spotify auth");
            return Ok(TherapyOutcome::NeedsAuth);
        }
        if !response.success {
            return Err(ClientError::Api {
                status: 200,
                message: response
                    .error
                    .unwrap_or_else(|| "failed to get music recommendations".to_string()),
            });
        }
        Ok(TherapyOutcome::Ready(response))
    }

    /// Create a playlist from the current recommendations.
    pub async fn create_playlist(
        &self,
        mood: Option<&str>,
    ) -> Result<TherapyOutcome<CreatePlaylistResponse>> {
        let mood = normalize_mood(mood)?;
        let body = PlaylistBody { mood };

        let response: CreatePlaylistResponse = self.api.post("/create-playlist", &body).await?;
        if response.needs_auth {
            return Ok(TherapyOutcome::NeedsAuth);
        }
        if !response.success {
            return Err(ClientError::Api {
                status: 200,
                message: response
                    .error
                    .unwrap_or_else(|| "failed to create playlist".to_string()),
            });
        }
        Ok(TherapyOutcome::Ready(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playlist_body_omits_absent_mood() {
        let body = PlaylistBody { mood: None };
        assert_eq!(serde_json::to_string(&body).unwrap(), "{}");

        let body = PlaylistBody {
            mood: Some("calm".to_string()),
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"mood":"calm"}"#);
    }
}
