use serde::{Deserialize, Serialize};

use crate::models::Note;

/// Body of the collection endpoint: `{ "items": [Note, ...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct NotesEnvelope {
    #[serde(default)]
    pub items: Vec<Note>,
}

/// Editable fields sent to the API on PUT.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: String,
    pub content: String,
}

/// Error body the API may attach to a failed write or delete.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
