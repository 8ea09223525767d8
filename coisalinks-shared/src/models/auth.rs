//! Sign-in request and response bodies.

use serde::{Deserialize, Serialize};

use super::User;

/// Body of `POST /autenticacao/login/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// The user's username or email address.
    pub username_or_email: String,

    /// The user's password.
    pub password: String,
}

/// Body of `POST /autenticacao/google-login/`: the provider-issued id token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FederatedLoginRequest {
    /// Token obtained from the identity provider popup.
    pub id_token: String,
}

/// Successful response of both sign-in endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// Backend-issued bearer token.
    pub token: String,

    /// The authenticated account.
    #[serde(rename = "usuario")]
    pub user: User,
}
