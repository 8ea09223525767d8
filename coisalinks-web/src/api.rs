use crate::config::FrontendConfig;
use once_cell::unsync::OnceCell;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{
    ApiMessage, AuthResponse, FederatedLoginRequest, ForgotPasswordRequest, Link,
    LinkUpdateRequest, LoginRequest, RegisterRequest, ResetPasswordRequest, ShortenRequest,
    ShortenResponse,
};
use std::sync::{Arc, Mutex};
use thiserror::Error;

thread_local! {
    static SHARED_CLIENT: OnceCell<CoisaLinksClient> = const { OnceCell::new() };
}

/// Failure of a backend call.
///
/// No distinction is made between client and server errors beyond the status
/// code and the optional message the backend put in the body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Backend-provided message, if the error response carried one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    #[allow(dead_code)]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            Self::Decode(_) => None,
        }
    }
}

/// Bearer token slot read by the client on every request.
///
/// The session store is the only writer. Cloning shares the slot.
#[derive(Clone, Debug, Default)]
pub struct Credentials {
    token: Arc<Mutex<Option<String>>>,
}

impl Credentials {
    pub fn set(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = token;
        }
    }

    pub fn clear(&self) {
        self.set(None);
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .lock()
            .ok()
            .and_then(|guard| guard.as_ref().cloned())
    }
}

/// Which statuses count as success for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    AnySuccess,
    Exactly(StatusCode),
}

impl Expect {
    fn accepts(self, status: StatusCode) -> bool {
        match self {
            Self::AnySuccess => status.is_success(),
            Self::Exactly(expected) => status == expected,
        }
    }
}

/// API client for the CoisaLinks backend.
#[derive(Clone, Debug)]
pub struct CoisaLinksClient {
    base_url: String,
    client: Client,
    credentials: Credentials,
}

impl CoisaLinksClient {
    /// Create a new API client with the provided base URL and token slot.
    pub fn new(base_url: &str, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            credentials,
        }
    }

    /// The per-tab client configured from [`FrontendConfig`].
    pub fn shared() -> Self {
        SHARED_CLIENT.with(|cell| {
            cell.get_or_init(|| {
                let config = FrontendConfig::new();
                Self::new(config.api_base_url(), Credentials::default())
            })
            .clone()
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.token() {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }

    /// Start a request against `path`, with the current bearer token attached.
    ///
    /// Every call made by this client goes through here, so the header always
    /// reflects the session at the moment the request is built.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.authorize(self.client.request(method, self.api_url(path)))
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        expect: Expect,
    ) -> Result<String, ApiError> {
        let mut request = self.request(method.clone(), path);
        if let Some(body) = body {
            request = request.json(body);
        }
        log::debug!("{method} {path}");
        let response = request.send().await?;
        read_body(response, expect).await
    }

    /// Authenticate with username-or-email and password.
    pub async fn login(&self, payload: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let body = self
            .send(Method::POST, "autenticacao/login/", Some(payload), Expect::AnySuccess)
            .await?;
        decode(&body)
    }

    /// Trade an identity-provider token for a backend token.
    pub async fn exchange_federated_token(
        &self,
        payload: &FederatedLoginRequest,
    ) -> Result<AuthResponse, ApiError> {
        let body = self
            .send(
                Method::POST,
                "autenticacao/google-login/",
                Some(payload),
                Expect::AnySuccess,
            )
            .await?;
        decode(&body)
    }

    /// Create an account.
    pub async fn register(&self, payload: &RegisterRequest) -> Result<ApiMessage, ApiError> {
        let body = self
            .send(Method::POST, "registros/register/", Some(payload), Expect::AnySuccess)
            .await?;
        Ok(ApiMessage::from_body(&body))
    }

    /// Ask the backend to email a password reset link.
    pub async fn request_password_reset(
        &self,
        payload: &ForgotPasswordRequest,
    ) -> Result<ApiMessage, ApiError> {
        let body = self
            .send(
                Method::POST,
                "forgotpassword/forgot-password/",
                Some(payload),
                Expect::AnySuccess,
            )
            .await?;
        Ok(ApiMessage::from_body(&body))
    }

    /// Consume a reset token with a new password.
    pub async fn reset_password(
        &self,
        token: &str,
        payload: &ResetPasswordRequest,
    ) -> Result<ApiMessage, ApiError> {
        let path = format!("forgotpassword/reset-password/{token}/");
        let body = self
            .send(Method::POST, &path, Some(payload), Expect::AnySuccess)
            .await?;
        Ok(ApiMessage::from_body(&body))
    }

    /// Create a short link. The backend answers `201 Created`.
    pub async fn shorten(&self, payload: &ShortenRequest) -> Result<ShortenResponse, ApiError> {
        let body = self
            .send(
                Method::POST,
                "shorten/",
                Some(payload),
                Expect::Exactly(StatusCode::CREATED),
            )
            .await?;
        decode(&body)
    }

    /// List every link owned by the signed-in user.
    pub async fn list_links(&self) -> Result<Vec<Link>, ApiError> {
        let body = self
            .send::<()>(Method::GET, "list", None, Expect::Exactly(StatusCode::OK))
            .await?;
        decode(&body)
    }

    /// Replace the destination and short code of a link.
    pub async fn update_link(&self, id: i64, payload: &LinkUpdateRequest) -> Result<(), ApiError> {
        let path = format!("links/{id}");
        self.send(Method::PUT, &path, Some(payload), Expect::Exactly(StatusCode::OK))
            .await?;
        Ok(())
    }
}

async fn read_body(response: Response, expect: Expect) -> Result<String, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    if expect.accepts(status) {
        Ok(body)
    } else {
        Err(ApiError::Status {
            status,
            message: ApiMessage::from_body(&body).into_text(),
        })
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_any_success() {
        assert!(Expect::AnySuccess.accepts(StatusCode::OK));
        assert!(Expect::AnySuccess.accepts(StatusCode::CREATED));
        assert!(!Expect::AnySuccess.accepts(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_expect_exact_status() {
        let created = Expect::Exactly(StatusCode::CREATED);
        assert!(created.accepts(StatusCode::CREATED));
        assert!(!created.accepts(StatusCode::OK));
    }

    #[test]
    fn test_api_url_joins_single_slash() {
        let client = CoisaLinksClient::new("http://localhost:8000/", Credentials::default());
        assert_eq!(client.api_url("/list"), "http://localhost:8000/list");
        assert_eq!(
            client.api_url("autenticacao/login/"),
            "http://localhost:8000/autenticacao/login/"
        );
    }

    #[test]
    fn test_status_error_exposes_message() {
        let error = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            message: Some("Link já existe".to_string()),
        };
        assert_eq!(error.message(), Some("Link já existe"));
        assert_eq!(error.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_decode_error_has_no_message() {
        let error = decode::<Vec<Link>>("{").unwrap_err();
        assert!(matches!(error, ApiError::Decode(_)));
        assert!(error.message().is_none());
    }
}
