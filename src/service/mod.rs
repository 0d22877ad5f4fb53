use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

use crate::{
    client::{ApiError, NotesApiClient},
    models::NoteId,
    render::{self, RenderMode},
};

/// Pages pre-rendered when the process starts, the build-time half of the
/// site. The list page and the detail pages for every note known at build
/// time are served from here unchanged until the next restart; detail pages
/// for ids that show up later are rendered on demand and then kept.
pub struct StaticSite {
    client: Arc<NotesApiClient>,
    list_html: String,
    details: RwLock<HashMap<String, String>>,
}

impl StaticSite {
    /// Fetch the collection once and pre-render every static page. A failed
    /// fetch degrades to an empty site; the build never aborts startup.
    pub async fn build(client: Arc<NotesApiClient>) -> Self {
        tracing::info!("Fetching list of notes for the static build...");

        let notes = match client.list_notes().await {
            Ok(notes) => notes,
            Err(e) => {
                tracing::error!("Failed to fetch notes for the static build: {e}");
                Vec::new()
            }
        };

        let list_html = render::list_page(&notes, RenderMode::Static);

        let mut details = HashMap::new();
        for note in &notes {
            details.insert(
                note.id.to_string(),
                render::detail_page(note, RenderMode::Static, None),
            );
        }

        tracing::info!(
            "Static build finished, {} detail pages pre-rendered",
            details.len()
        );

        Self {
            client,
            list_html,
            details: RwLock::new(details),
        }
    }

    pub fn list_page(&self) -> &str {
        &self.list_html
    }

    /// Serve a pre-rendered detail page, with blocking fallback: an id not
    /// known at build time is fetched and rendered on first request, then
    /// served from the store like the rest. A missing note (`Ok(None)`) is
    /// not cached, so it becomes reachable once it exists.
    pub async fn detail_page(&self, id: &NoteId) -> Result<Option<String>, ApiError> {
        let key = id.to_string();

        if let Some(html) = self.details.read().await.get(&key) {
            return Ok(Some(html.clone()));
        }

        tracing::info!("Static page miss for note {id}, rendering on demand");

        let Some(note) = self.client.get_note(id).await? else {
            return Ok(None);
        };

        let html = render::detail_page(&note, RenderMode::Static, None);
        self.details.write().await.insert(key, html.clone());

        Ok(Some(html))
    }
}
