//! Session context and the local storage keys derived from it.

use serde::{Deserialize, Serialize};

/// Well-known local storage keys.
pub mod keys {
    pub const AUTH_TOKEN: &str = "authToken";
    pub const USERNAME: &str = "username";
    /// Display name entered on the general-info step.
    pub const DISPLAY_NAME: &str = "userName";
    pub const NOTIFICATIONS_ENABLED: &str = "notificationsEnabled";
    pub const ONBOARDING_SCREEN: &str = "onboardingScreen";
}

/// Snapshot of the active session.
///
/// Captured once when a flow starts and passed explicitly to whatever needs
/// it, so a username change mid-flow cannot silently redirect reads and
/// writes to a different checkpoint key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub token: Option<String>,
    pub username: Option<String>,
}

impl SessionContext {
    pub fn new(token: Option<String>, username: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            username: username.filter(|u| !u.is_empty()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Checkpoint key for this session.
    ///
    /// `onboardingScreen_<username>` when the username is known, the bare
    /// `onboardingScreen` key otherwise.
    pub fn checkpoint_key(&self) -> String {
        match &self.username {
            Some(username) => format!("{}_{}", keys::ONBOARDING_SCREEN, username),
            None => keys::ONBOARDING_SCREEN.to_string(),
        }
    }
}
