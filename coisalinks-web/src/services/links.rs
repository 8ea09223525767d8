//! Link shortening and editing on top of the API client.

use crate::api::{ApiError, CoisaLinksClient};
use crate::models::link_editor::LinkDraft;
use async_trait::async_trait;
use shared::models::{Link, LinkUpdateRequest, ShortenRequest, ShortenResponse};
use shared::validation::validate_link_input;
use shared::ValidationError;
use thiserror::Error;

/// The link endpoints of the backend.
#[async_trait(?Send)]
pub trait LinkBackend {
    async fn shorten(&self, request: &ShortenRequest) -> Result<ShortenResponse, ApiError>;

    async fn list_links(&self) -> Result<Vec<Link>, ApiError>;

    async fn update_link(&self, id: i64, request: &LinkUpdateRequest) -> Result<(), ApiError>;
}

#[async_trait(?Send)]
impl LinkBackend for CoisaLinksClient {
    async fn shorten(&self, request: &ShortenRequest) -> Result<ShortenResponse, ApiError> {
        CoisaLinksClient::shorten(self, request).await
    }

    async fn list_links(&self) -> Result<Vec<Link>, ApiError> {
        CoisaLinksClient::list_links(self).await
    }

    async fn update_link(&self, id: i64, request: &LinkUpdateRequest) -> Result<(), ApiError> {
        CoisaLinksClient::update_link(self, id, request).await
    }
}

/// Failure of a user action that validates locally before calling the backend.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Validate `input` and shorten it. Invalid input never reaches the backend.
///
/// # Errors
/// [`ActionError::Invalid`] for empty or malformed input, [`ActionError::Api`]
/// when the backend does not answer `201 Created`.
pub async fn shorten_link(
    backend: &dyn LinkBackend,
    input: &str,
) -> Result<ShortenResponse, ActionError> {
    let url = validate_link_input(input)?;
    let response = backend
        .shorten(&ShortenRequest {
            url: url.to_string(),
        })
        .await
        .inspect_err(|err| log::error!("shortening failed: {err}"))?;
    log::info!("created short link {}", response.shortened_url);
    Ok(response)
}

/// Which half of [`save_link_edit`] failed.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The backend rejected the edit; the row should stay in edit mode.
    #[error("could not save the link: {0}")]
    Update(ApiError),
    /// The edit was saved but the list could not be fetched again.
    #[error("link saved but the list could not be reloaded: {0}")]
    Refetch(ApiError),
}

/// Save an edited row, then fetch the whole list again.
///
/// # Errors
/// [`SaveError::Update`] when the edit is rejected (nothing is refetched),
/// [`SaveError::Refetch`] when only the reload failed.
pub async fn save_link_edit(
    backend: &dyn LinkBackend,
    draft: &LinkDraft,
) -> Result<Vec<Link>, SaveError> {
    backend
        .update_link(draft.id, &draft.to_request())
        .await
        .map_err(|err| {
            log::error!("updating link {} failed: {err}", draft.id);
            SaveError::Update(err)
        })?;
    log::info!("updated link {}", draft.id);
    backend.list_links().await.map_err(|err| {
        log::error!("reloading links failed: {err}");
        SaveError::Refetch(err)
    })
}
