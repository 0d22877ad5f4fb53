use serde::{Deserialize, Serialize};

use std::fmt;

/// List previews are cut at this many characters.
const PREVIEW_LIMIT: usize = 100;

/// Identifier assigned by the notes API. The wire value may be a JSON
/// number or a string; the front-end never interprets it, it only round-trips
/// it into URLs and page-store keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteId {
    Num(i64),
    Str(String),
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<String> for NoteId {
    fn from(raw: String) -> Self {
        Self::Str(raw)
    }
}

/// A note as returned by the notes API. Title and content are optional on
/// the wire; the display fallbacks live here so pages never branch on raw
/// options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Note {
    /// Title shown in headings and lists, falling back to `Note {id}`.
    pub fn display_title(&self) -> String {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("Note {}", self.id),
        }
    }

    /// Content preview for list entries: at most [`PREVIEW_LIMIT`] characters,
    /// with an ellipsis marker appended iff something was cut off.
    pub fn preview(&self) -> String {
        match self.content.as_deref() {
            None | Some("") => "No content preview".to_string(),
            Some(content) => {
                let mut preview: String = content.chars().take(PREVIEW_LIMIT).collect();
                if content.chars().count() > PREVIEW_LIMIT {
                    preview.push_str("...");
                }
                preview
            }
        }
    }

    /// Full content for detail pages, with a placeholder when empty.
    pub fn content_or_placeholder(&self) -> &str {
        match self.content.as_deref() {
            None | Some("") => "...",
            Some(content) => content,
        }
    }

    /// The update timestamp is only shown when it exists and differs from
    /// the creation timestamp.
    pub fn show_updated(&self) -> bool {
        match (&self.created_at, &self.updated_at) {
            (Some(created), Some(updated)) => created != updated,
            (None, Some(_)) => true,
            _ => false,
        }
    }
}
