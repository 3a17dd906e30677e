//! Session, onboarding, and preference snapshots.
//!
//! All state lives behind the injected `KeyValueStore`; nothing here is
//! ambient or global. Sign-in takes an opaque identity token plus a user
//! snapshot. How the token was issued (real OAuth, a dev shortcut) is a
//! concern of the caller; this layer only persists and restores it.

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::storage::{self, keys, KeyValueStore};

/// Authenticated user snapshot as persisted locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub has_calendar: bool,
    #[serde(default)]
    pub has_notion: bool,
    #[serde(default)]
    pub has_spotify: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub token: String,
    pub user: UserProfile,
}

/// Onboarding progress, persisted between launches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingState {
    pub current_step: u32,
    #[serde(default)]
    pub completed_steps: Vec<String>,
    #[serde(default)]
    pub calendar_connected: bool,
    #[serde(default)]
    pub notion_connected: bool,
    #[serde(default)]
    pub spotify_connected: bool,
    #[serde(default)]
    pub preferences_set: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub working_hours: WorkingHours,
    #[serde(default)]
    pub break_preferences: Vec<String>,
    #[serde(default)]
    pub notification_settings: NotificationSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHours {
    pub start: String,
    pub end: String,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start: "09:00".to_string(),
            end: "17:00".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub enable_break_reminders: bool,
    pub enable_stress_alerts: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enable_break_reminders: true,
            enable_stress_alerts: true,
        }
    }
}

/// Reads and writes the fixed-key snapshots through the injected store.
pub struct SessionManager<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> SessionManager<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Persist a signed-in session. The token is opaque.
    pub async fn sign_in(&self, token: &str, user: &UserProfile) -> Result<AuthSession> {
        if token.trim().is_empty() {
            return Err(ClientError::validation("identity token must not be empty"));
        }
        self.store.set(keys::AUTH_TOKEN, token).await?;
        self.store
            .set(keys::USER, &serde_json::to_string(user)?)
            .await?;
        log::info!("session stored for {}", user.email);
        Ok(AuthSession {
            token: token.to_string(),
            user: user.clone(),
        })
    }

    /// Restore a previously stored session, if both halves are present.
    pub async fn restore(&self) -> Result<Option<AuthSession>> {
        let token = match self.store.get(keys::AUTH_TOKEN).await? {
            Some(t) => t,
            None => return Ok(None),
        };
        let user_json = match self.store.get(keys::USER).await? {
            Some(u) => u,
            None => return Ok(None),
        };
        let user: UserProfile = serde_json::from_str(&user_json)?;
        Ok(Some(AuthSession { token, user }))
    }

    /// Drop session and onboarding state; preferences survive sign-out.
    pub async fn sign_out(&self) -> Result<()> {
        storage::clear_session(self.store).await
    }

    pub async fn onboarding(&self) -> Result<OnboardingState> {
        match self.store.get(keys::ONBOARDING_STATE).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(OnboardingState::default()),
        }
    }

    pub async fn set_onboarding(&self, state: &OnboardingState) -> Result<()> {
        self.store
            .set(keys::ONBOARDING_STATE, &serde_json::to_string(state)?)
            .await
    }

    pub async fn preferences(&self) -> Result<UserPreferences> {
        match self.store.get(keys::PREFERENCES).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(UserPreferences::default()),
        }
    }

    pub async fn set_preferences(&self, prefs: &UserPreferences) -> Result<()> {
        self.store
            .set(keys::PREFERENCES, &serde_json::to_string(prefs)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileStore;

    fn sample_user() -> UserProfile {
        UserProfile {
            id: 1,
            email: "jane@example.com".to_string(),
            name: "Jane".to_string(),
            has_calendar: true,
            has_notion: false,
            has_spotify: false,
            created_at: None,
        }
    }

    fn temp_store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store"));
        (dir, store)
    }

    #[tokio::test]
    async fn test_sign_in_restore_roundtrip() {
        let (_dir, store) = temp_store();
        let manager = SessionManager::new(&store);

        manager.sign_in("opaque-token-abc", &sample_user()).await.unwrap();
        let restored = manager.restore().await.unwrap().unwrap();
        assert_eq!(restored.token, "opaque-token-abc");
        assert_eq!(restored.user, sample_user());
    }

    #[tokio::test]
    async fn test_empty_token_rejected() {
        let (_dir, store) = temp_store();
        let manager = SessionManager::new(&store);
        let err = manager.sign_in("   ", &sample_user()).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn test_restore_without_session_is_none() {
        let (_dir, store) = temp_store();
        let manager = SessionManager::new(&store);
        assert!(manager.restore().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_preserves_preferences() {
        let (_dir, store) = temp_store();
        let manager = SessionManager::new(&store);

        manager.sign_in("tok", &sample_user()).await.unwrap();
        let prefs = UserPreferences {
            break_preferences: vec!["walk".to_string()],
            ..Default::default()
        };
        manager.set_preferences(&prefs).await.unwrap();

        manager.sign_out().await.unwrap();
        assert!(manager.restore().await.unwrap().is_none());
        assert_eq!(manager.preferences().await.unwrap(), prefs);
    }

    #[tokio::test]
    async fn test_onboarding_defaults_then_persists() {
        let (_dir, store) = temp_store();
        let manager = SessionManager::new(&store);

        assert_eq!(manager.onboarding().await.unwrap(), OnboardingState::default());

        let state = OnboardingState {
            current_step: 2,
            completed_steps: vec!["welcome".to_string(), "calendar".to_string()],
            calendar_connected: true,
            ..Default::default()
        };
        manager.set_onboarding(&state).await.unwrap();
        assert_eq!(manager.onboarding().await.unwrap(), state);
    }

    #[test]
    fn test_preferences_camel_case_wire_format() {
        let prefs = UserPreferences::default();
        let json = serde_json::to_string(&prefs).unwrap();
        assert!(json.contains("workingHours"));
        assert!(json.contains("enableBreakReminders"));
    }
}
