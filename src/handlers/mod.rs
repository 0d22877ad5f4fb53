use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_macros::debug_handler;
use serde::Deserialize;

use std::sync::Arc;

use crate::{
    client::{ApiError, NotesApiClient},
    dto::UpdateNoteRequest,
    models::NoteId,
    render::{self, RenderMode},
    service::StaticSite,
};

/// Shared state handed to every page handler.
pub struct AppState {
    pub client: Arc<NotesApiClient>,
    pub static_site: StaticSite,
}

/// Fields of the edit form, both required by the form itself.
#[derive(Debug, Clone, Deserialize)]
pub struct EditForm {
    pub title: String,
    pub content: String,
}

fn page(html: String) -> Response {
    Html(html).into_response()
}

fn not_found(mode: RenderMode) -> Response {
    (StatusCode::NOT_FOUND, Html(render::not_found_page(mode))).into_response()
}

fn error_status(error: &ApiError) -> StatusCode {
    StatusCode::from_u16(error.http_status()).unwrap_or(StatusCode::BAD_GATEWAY)
}

#[debug_handler]
pub async fn home() -> Response {
    page(render::home_page())
}

#[debug_handler]
pub async fn static_list(State(state): State<Arc<AppState>>) -> Response {
    page(state.static_site.list_page().to_string())
}

#[debug_handler]
pub async fn static_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let id = NoteId::from(id);

    match state.static_site.detail_page(&id).await {
        Ok(Some(html)) => page(html),
        Ok(None) => not_found(RenderMode::Static),
        Err(e) => {
            tracing::error!("Failed to fetch note {id}: {e}");
            not_found(RenderMode::Static)
        }
    }
}

#[debug_handler]
pub async fn ssr_list(State(state): State<Arc<AppState>>) -> Response {
    let notes = match state.client.list_notes().await {
        Ok(notes) => notes,
        Err(e) => {
            tracing::error!("Failed to fetch notes: {e}");
            Vec::new()
        }
    };

    page(render::list_page(&notes, RenderMode::PerRequest))
}

#[debug_handler]
pub async fn ssr_detail(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let id = NoteId::from(id);

    match state.client.get_note(&id).await {
        Ok(Some(note)) => page(render::detail_page(&note, RenderMode::PerRequest, None)),
        Ok(None) => not_found(RenderMode::PerRequest),
        Err(e) => {
            tracing::error!("Failed to fetch note {id}: {e}");
            not_found(RenderMode::PerRequest)
        }
    }
}

#[debug_handler]
pub async fn edit_form(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let id = NoteId::from(id);

    match state.client.get_note(&id).await {
        Ok(Some(note)) => {
            let title = note.title.unwrap_or_default();
            let content = note.content.unwrap_or_default();
            page(render::edit_page(&id, &title, &content, None))
        }
        Ok(None) => not_found(RenderMode::Static),
        Err(e) => {
            tracing::error!("Failed to fetch note {id} for editing: {e}");
            not_found(RenderMode::Static)
        }
    }
}

/// Submitting the edit form. Success navigates to the detail page; failure
/// re-renders the form with the submitted values and an inline message so
/// the user can resubmit.
#[debug_handler]
pub async fn submit_edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<EditForm>,
) -> Response {
    let id = NoteId::from(id);
    let request = UpdateNoteRequest {
        title: form.title,
        content: form.content,
    };

    match state.client.update_note(&id, &request).await {
        Ok(note) => {
            tracing::info!("Note {} updated", note.id);
            Redirect::to(&format!("/notes/{id}")).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to update note {id}: {e}");
            (
                error_status(&e),
                Html(render::edit_page(
                    &id,
                    &request.title,
                    &request.content,
                    Some(&e.to_string()),
                )),
            )
                .into_response()
        }
    }
}

/// Confirmed delete from the per-request detail page. Success navigates back
/// to the list; failure shows the error inline on the still-present note.
#[debug_handler]
pub async fn delete_note(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let id = NoteId::from(id);

    match state.client.delete_note(&id).await {
        Ok(()) => {
            tracing::info!("Note {id} deleted");
            Redirect::to(RenderMode::PerRequest.list_route()).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to delete note {id}: {e}");
            let status = error_status(&e);

            match state.client.get_note(&id).await {
                Ok(Some(note)) => (
                    status,
                    Html(render::detail_page(
                        &note,
                        RenderMode::PerRequest,
                        Some(&e.to_string()),
                    )),
                )
                    .into_response(),
                Ok(None) => not_found(RenderMode::PerRequest),
                Err(fetch_err) => {
                    tracing::error!("Failed to re-fetch note {id}: {fetch_err}");
                    not_found(RenderMode::PerRequest)
                }
            }
        }
    }
}
