#![allow(dead_code)]

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};
use std::time::Duration;

use tokio::sync::Mutex;

use notes_frontend::client::NotesApiClient;
use notes_frontend::config::{ApiConfig, Config};
use notes_frontend::handlers::AppState;
use notes_frontend::service::StaticSite;

/// In-memory stand-in for the external notes API, with switches to make
/// reads or writes fail.
pub struct StubApi {
    pub notes: Mutex<Vec<Value>>,
    pub item_fetches: AtomicUsize,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub write_error_body: Mutex<Option<Value>>,
}

impl StubApi {
    fn new(seed: Vec<Value>, fail_reads: bool) -> Arc<Self> {
        Arc::new(Self {
            notes: Mutex::new(seed),
            item_fetches: AtomicUsize::new(0),
            fail_reads: AtomicBool::new(fail_reads),
            fail_writes: AtomicBool::new(false),
            write_error_body: Mutex::new(None),
        })
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn set_write_error_body(&self, body: Option<Value>) {
        *self.write_error_body.lock().await = body;
    }
}

fn id_matches(note: &Value, id: &str) -> bool {
    match &note["id"] {
        Value::Number(n) => n.to_string() == id,
        Value::String(s) => s == id,
        _ => false,
    }
}

async fn list_notes(State(stub): State<Arc<StubApi>>) -> Response {
    if stub.fail_reads.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "stub failure").into_response();
    }

    let notes = stub.notes.lock().await.clone();
    Json(json!({ "items": notes })).into_response()
}

async fn get_note(State(stub): State<Arc<StubApi>>, Path(id): Path<String>) -> Response {
    stub.item_fetches.fetch_add(1, Ordering::SeqCst);

    if stub.fail_reads.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "stub failure").into_response();
    }

    let notes = stub.notes.lock().await;
    match notes.iter().find(|note| id_matches(note, &id)) {
        Some(note) => Json(note.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn write_failure(stub: &StubApi) -> Response {
    let body = stub.write_error_body.lock().await.clone();
    match body {
        Some(body) => (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn update_note(
    State(stub): State<Arc<StubApi>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if stub.fail_writes.load(Ordering::SeqCst) {
        return write_failure(&stub).await;
    }

    let mut notes = stub.notes.lock().await;
    for note in notes.iter_mut() {
        if id_matches(note, &id) {
            note["title"] = body["title"].clone();
            note["content"] = body["content"].clone();
            note["updatedAt"] = json!("2024-02-02T10:00:00Z");
            return Json(note.clone()).into_response();
        }
    }

    StatusCode::NOT_FOUND.into_response()
}

async fn delete_note(State(stub): State<Arc<StubApi>>, Path(id): Path<String>) -> Response {
    if stub.fail_writes.load(Ordering::SeqCst) {
        return write_failure(&stub).await;
    }

    let mut notes = stub.notes.lock().await;
    let before = notes.len();
    notes.retain(|note| !id_matches(note, &id));

    if notes.len() < before {
        StatusCode::NO_CONTENT.into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

/// The front-end under test, wired to a stub API. Both listen on ephemeral
/// ports; redirects are not followed so 303s stay observable.
pub struct TestApp {
    pub stub: Arc<StubApi>,
    pub base_url: String,
    pub http: reqwest::Client,
}

impl TestApp {
    pub async fn start(seed: Vec<Value>) -> Result<Self> {
        Self::start_inner(seed, false).await
    }

    /// Start with the stub refusing reads, so the static build runs against
    /// a dead API.
    pub async fn start_with_failing_reads(seed: Vec<Value>) -> Result<Self> {
        Self::start_inner(seed, true).await
    }

    async fn start_inner(seed: Vec<Value>, fail_reads: bool) -> Result<Self> {
        let stub = StubApi::new(seed, fail_reads);

        let stub_router = Router::new()
            .route("/notes", get(list_notes))
            .route(
                "/notes/{id}",
                get(get_note).put(update_note).delete(delete_note),
            )
            .with_state(stub.clone());

        let stub_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let stub_addr = stub_listener.local_addr()?;
        tokio::spawn(async move {
            axum::serve(stub_listener, stub_router)
                .await
                .expect("stub API server failed");
        });

        let cfg = Config {
            api: ApiConfig {
                base_url: format!("http://{stub_addr}"),
            },
            port: 0,
            connection_timeout: Duration::from_secs(5),
        };

        let client = Arc::new(NotesApiClient::new(&cfg)?);
        let static_site = StaticSite::build(client.clone()).await;
        let state = Arc::new(AppState {
            client,
            static_site,
        });

        let app_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let app_addr = app_listener.local_addr()?;
        let router = notes_frontend::router(state);
        tokio::spawn(async move {
            axum::serve(app_listener, router)
                .await
                .expect("front-end server failed");
        });

        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            stub,
            base_url: format!("http://{app_addr}"),
            http,
        })
    }

    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?)
    }

    pub async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<reqwest::Response> {
        Ok(self
            .http
            .post(format!("{}{}", self.base_url, path))
            .form(form)
            .send()
            .await?)
    }
}

/// A well-formed note fixture with equal timestamps.
pub fn note(id: i64, title: &str, content: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": content,
        "createdAt": "2024-01-01T09:30:00Z",
        "updatedAt": "2024-01-01T09:30:00Z",
    })
}
