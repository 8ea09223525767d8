//! Registration and password recovery.

use super::links::ActionError;
use crate::api::{ApiError, CoisaLinksClient};
use async_trait::async_trait;
use shared::models::{ApiMessage, ForgotPasswordRequest, RegisterRequest, ResetPasswordRequest};
use shared::validation::{validate_password_reset, validate_registration, validate_reset_request};

#[async_trait(?Send)]
pub trait AccountBackend {
    async fn register(&self, request: &RegisterRequest) -> Result<ApiMessage, ApiError>;

    async fn request_password_reset(
        &self,
        request: &ForgotPasswordRequest,
    ) -> Result<ApiMessage, ApiError>;

    async fn reset_password(
        &self,
        token: &str,
        request: &ResetPasswordRequest,
    ) -> Result<ApiMessage, ApiError>;
}

#[async_trait(?Send)]
impl AccountBackend for CoisaLinksClient {
    async fn register(&self, request: &RegisterRequest) -> Result<ApiMessage, ApiError> {
        CoisaLinksClient::register(self, request).await
    }

    async fn request_password_reset(
        &self,
        request: &ForgotPasswordRequest,
    ) -> Result<ApiMessage, ApiError> {
        CoisaLinksClient::request_password_reset(self, request).await
    }

    async fn reset_password(
        &self,
        token: &str,
        request: &ResetPasswordRequest,
    ) -> Result<ApiMessage, ApiError> {
        CoisaLinksClient::reset_password(self, token, request).await
    }
}

/// # Errors
/// A missing field, or the backend's refusal.
pub async fn register_account(
    backend: &dyn AccountBackend,
    request: &RegisterRequest,
) -> Result<ApiMessage, ActionError> {
    validate_registration(request)?;
    let message = backend
        .register(request)
        .await
        .inspect_err(|err| log::error!("registration failed: {err}"))?;
    log::info!("registered account {}", request.username);
    Ok(message)
}

/// Ask for a reset link to be mailed to `email`.
///
/// # Errors
/// [`shared::ValidationError::EmailRequired`] for a blank email, otherwise
/// the backend failure.
pub async fn send_reset_link(
    backend: &dyn AccountBackend,
    email: &str,
) -> Result<ApiMessage, ActionError> {
    validate_reset_request(email)?;
    let request = ForgotPasswordRequest {
        email: email.to_string(),
    };
    Ok(backend
        .request_password_reset(&request)
        .await
        .inspect_err(|err| log::error!("password reset request failed: {err}"))?)
}

/// Set a new password using the token from the emailed link.
///
/// # Errors
/// Presence, mismatch and token checks first, then the backend failure.
pub async fn reset_password(
    backend: &dyn AccountBackend,
    new_password: &str,
    confirmation: &str,
    token: Option<&str>,
) -> Result<ApiMessage, ActionError> {
    let token = validate_password_reset(new_password, confirmation, token)?;
    let request = ResetPasswordRequest {
        password: new_password.to_string(),
    };
    Ok(backend
        .reset_password(token, &request)
        .await
        .inspect_err(|err| log::error!("password reset failed: {err}"))?)
}
