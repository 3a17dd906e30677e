//! HTTP client for the wellness backend.
//!
//! One configured reqwest client: base URL, JSON content negotiation, and
//! the canonical request timeout. Every request and response is logged
//! (method, path, status); logging never alters the response path.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::Config;
use crate::error::{ClientError, Result};

pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| ClientError::Config(format!("invalid base URL: {}", e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {}", e)))?;

        log::info!("API client initialized: {}", base_url);

        Ok(Self { http, base_url })
    }

    /// Issue a GET against `path` with optional query parameters.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.join(path)?;
        log::debug!("GET {}", path);

        let result = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await;

        self.handle("GET", path, result).await
    }

    /// Issue a POST against `path` with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.join(path)?;
        log::debug!("POST {}", path);

        let result = self
            .http
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await;

        self.handle("POST", path, result).await
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Config(format!("invalid request path {}: {}", path, e)))
    }

    async fn handle<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        result: std::result::Result<reqwest::Response, reqwest::Error>,
    ) -> Result<T> {
        let response = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("{} {} failed before a response arrived: {}", method, path, e);
                return Err(e.into());
            }
        };

        let status = response.status();
        log::debug!("{} {} - {}", method, path, status.as_u16());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        let body = response.text().await.map_err(ClientError::from)?;
        serde_json::from_str(&body).map_err(|e| {
            log::warn!("{} {} returned an unparseable body: {}", method, path, e);
            ClientError::Parse(e)
        })
    }
}

/// Pull the backend's error message out of a failure body.
///
/// The backend wraps failures as `{"success": false, "error": "..."}`;
/// anything else falls back to the raw body (truncated) or a placeholder.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = value.get("error").and_then(|e| e.as_str()) {
            return msg.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no error detail provided".to_string()
    } else if trimmed.len() > 200 {
        format!("{}...", &trimmed[..200])
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message_from_envelope() {
        let body = r#"{"success": false, "error": "Invalid break type"}"#;
        assert_eq!(extract_error_message(body), "Invalid break type");
    }

    #[test]
    fn test_extract_error_message_raw_body() {
        assert_eq!(extract_error_message("  gateway timeout  "), "gateway timeout");
    }

    #[test]
    fn test_extract_error_message_empty_body() {
        assert_eq!(extract_error_message(""), "no error detail provided");
    }

    #[test]
    fn test_client_rejects_invalid_base_url() {
        let config = Config {
            api_base_url: "not a url".into(),
            ..Config::default()
        };
        assert!(matches!(
            ApiClient::new(&config),
            Err(ClientError::Config(_))
        ));
    }
}
