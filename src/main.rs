use std::sync::Arc;

use notes_frontend::client::NotesApiClient;
use notes_frontend::config;
use notes_frontend::handlers::AppState;
use notes_frontend::service::StaticSite;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    let cfg = config::load_config().expect("failed to locate or load config file");
    tracing::info!("Successfully loaded front-end config");
    tracing::info!("Configured notes API: {}", cfg.api.base_url);

    let client = Arc::new(NotesApiClient::new(&cfg).unwrap_or_else(|e| {
        tracing::error!("Failed to build HTTP client: {e}");
        panic!("failed to build HTTP client: {e}");
    }));

    // Build-time rendering pass; a dead API degrades to an empty site
    let static_site = StaticSite::build(client.clone()).await;

    let state = Arc::new(AppState {
        client,
        static_site,
    });

    let router = notes_frontend::router(state);

    let addr = format!("0.0.0.0:{}", cfg.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to {addr}: {e}");
            panic!("failed to bind to {addr}: {e}");
        });

    tracing::info!("Notes front-end listening on {}", addr);
    tracing::info!("Server is ready to accept connections");

    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!("HTTP server error: {e}");
        panic!("failed to start HTTP server: {e}");
    }
}
