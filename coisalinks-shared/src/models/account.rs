//! Registration and password recovery bodies.

use serde::{Deserialize, Serialize};

/// Body of `POST /registros/register/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Full name.
    pub name: String,

    /// Desired login handle.
    pub username: String,

    /// Contact email.
    pub email: String,

    /// Initial password.
    pub password: String,
}

/// Body of `POST /forgotpassword/forgot-password/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForgotPasswordRequest {
    /// Address that should receive the reset link.
    pub email: String,
}

/// Body of `POST /forgotpassword/reset-password/{token}/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResetPasswordRequest {
    /// The new password.
    pub password: String,
}
