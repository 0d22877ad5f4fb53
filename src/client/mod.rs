use crate::{
    config::Config,
    dto::{ErrorBody, NotesEnvelope, UpdateNoteRequest},
    models::{Note, NoteId},
};

/// HTTP client for the external notes API. One instance is built at startup
/// and shared by every page.
pub struct NotesApiClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to reach notes API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode notes API response: {0}")]
    Decode(reqwest::Error),

    #[error("{message}")]
    Status { status: u16, message: String },
}

impl ApiError {
    /// Status a page should answer with when this error surfaces to the
    /// user: the upstream status when there is one, 502 otherwise.
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::Status { status, .. } => *status,
            Self::Transport(_) | Self::Decode(_) => 502,
        }
    }
}

/// Message for a failed write or delete: the server-provided one when the
/// error body carries it, a generic one naming the status otherwise.
fn status_message(action: &str, status: u16, body: Option<ErrorBody>) -> String {
    body.and_then(|body| body.message)
        .unwrap_or_else(|| format!("Failed to {action} note (status: {status})"))
}

impl NotesApiClient {
    pub fn new(cfg: &Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(cfg.connection_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: cfg.api.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/notes", self.base_url)
    }

    fn item_url(&self, id: &NoteId) -> String {
        format!("{}/notes/{}", self.base_url, id)
    }

    /// Fetch the whole collection. Order is whatever the API returns.
    pub async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        let url = self.collection_url();
        tracing::debug!("Fetching note list from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: format!("Notes API returned status {} for {}", status.as_u16(), url),
            });
        }

        let envelope: NotesEnvelope = response.json().await.map_err(ApiError::Decode)?;
        Ok(envelope.items)
    }

    /// Fetch one note. A 404 is an explicit `None`, distinct from errors.
    pub async fn get_note(&self, id: &NoteId) -> Result<Option<Note>, ApiError> {
        let url = self.item_url(id);
        tracing::debug!("Fetching note from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: format!("Notes API returned status {} for {}", status.as_u16(), url),
            });
        }

        let note = response.json().await.map_err(ApiError::Decode)?;
        Ok(Some(note))
    }

    /// Overwrite the editable fields of a note. Last write wins.
    pub async fn update_note(
        &self,
        id: &NoteId,
        request: &UpdateNoteRequest,
    ) -> Result<Note, ApiError> {
        let url = self.item_url(id);
        tracing::debug!("Updating note at {}", url);

        let response = self.client.put(&url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.ok();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: status_message("update", status.as_u16(), body),
            });
        }

        response.json().await.map_err(ApiError::Decode)
    }

    pub async fn delete_note(&self, id: &NoteId) -> Result<(), ApiError> {
        let url = self.item_url(id);
        tracing::debug!("Deleting note at {}", url);

        let response = self.client.delete(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.ok();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: status_message("delete", status.as_u16(), body),
            });
        }

        Ok(())
    }
}
