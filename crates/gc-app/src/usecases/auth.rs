//! Sign-in and sign-out.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, info_span, warn, Instrument};

use gc_core::auth::LoginRequest;
use gc_core::ports::{ApiError, AuthApiPort};
use gc_core::validation::{FieldError, ValidationErrors};
use gc_core::SessionContext;

use crate::session::SessionStore;

#[derive(Debug, Error, PartialEq)]
pub enum LoginError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error("invalid username or password")]
    Rejected,
    #[error(transparent)]
    Api(ApiError),
}

impl From<ApiError> for LoginError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized | ApiError::Status { status: 400, .. } => LoginError::Rejected,
            other => LoginError::Api(other),
        }
    }
}

/// Exchange credentials for a token and persist the session.
pub struct Login {
    auth_api: Arc<dyn AuthApiPort>,
    sessions: SessionStore,
}

impl Login {
    pub fn new(auth_api: Arc<dyn AuthApiPort>, sessions: SessionStore) -> Self {
        Self { auth_api, sessions }
    }

    pub async fn execute(&self, username: &str, password: &str) -> Result<SessionContext, LoginError> {
        let span = info_span!("usecase.login.execute", username = %username.trim());
        async {
            let username = username.trim();
            let mut errors = Vec::new();
            if username.is_empty() {
                errors.push(FieldError::new("username", "required"));
            }
            if password.is_empty() {
                errors.push(FieldError::new("password", "required"));
            }
            if !errors.is_empty() {
                return Err(LoginError::Invalid(ValidationErrors(errors)));
            }

            let request = LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            };
            let response = self.auth_api.login(&request).await?;
            let username = response.username.as_deref().unwrap_or(username);
            let session = self.sessions.save(&response.token, username).await;
            info!("signed in");
            Ok(session)
        }
        .instrument(span)
        .await
    }
}

/// Tell the server to drop the token, then forget the session locally.
///
/// The server call is best-effort; the local session is cleared even when it
/// fails. Onboarding checkpoints survive.
pub struct Logout {
    auth_api: Arc<dyn AuthApiPort>,
    sessions: SessionStore,
}

impl Logout {
    pub fn new(auth_api: Arc<dyn AuthApiPort>, sessions: SessionStore) -> Self {
        Self { auth_api, sessions }
    }

    pub async fn execute(&self) {
        let span = info_span!("usecase.logout.execute");
        async {
            if let Err(err) = self.auth_api.logout().await {
                warn!(error = %err, "server logout failed, clearing local session anyway");
            }
            self.sessions.clear().await;
            info!("signed out");
        }
        .instrument(span)
        .await
    }
}
