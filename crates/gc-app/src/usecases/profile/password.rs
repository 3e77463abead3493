use std::sync::Arc;

use thiserror::Error;
use tracing::{info, info_span, Instrument};

use gc_core::auth::ChangePasswordRequest;
use gc_core::ports::{ApiError, AuthApiPort};
use gc_core::validation::{FieldError, ValidationErrors};

#[derive(Debug, Error, PartialEq)]
pub enum ChangePasswordError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error(transparent)]
    Api(#[from] ApiError),
}

pub struct ChangePassword {
    auth_api: Arc<dyn AuthApiPort>,
}

impl ChangePassword {
    pub fn new(auth_api: Arc<dyn AuthApiPort>) -> Self {
        Self { auth_api }
    }

    /// `confirmation` must repeat `new_password`, which must differ from the
    /// old one.
    pub async fn execute(
        &self,
        old_password: &str,
        new_password: &str,
        confirmation: &str,
    ) -> Result<(), ChangePasswordError> {
        let span = info_span!("usecase.change_password.execute");
        async {
            let request = validate(old_password, new_password, confirmation)?;
            self.auth_api.change_password(&request).await?;
            info!("password changed");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

fn validate(
    old_password: &str,
    new_password: &str,
    confirmation: &str,
) -> Result<ChangePasswordRequest, ValidationErrors> {
    let mut errors = Vec::new();
    if old_password.is_empty() {
        errors.push(FieldError::new("old_password", "required"));
    }
    if new_password.is_empty() {
        errors.push(FieldError::new("new_password", "required"));
    } else if new_password == old_password {
        errors.push(FieldError::new("new_password", "must differ from the current password"));
    }
    if confirmation != new_password {
        errors.push(FieldError::new("confirmation", "does not match"));
    }
    if !errors.is_empty() {
        return Err(ValidationErrors(errors));
    }
    Ok(ChangePasswordRequest {
        old_password: old_password.to_string(),
        new_password: new_password.to_string(),
    })
}
