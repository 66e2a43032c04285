use std::num::NonZeroU16;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::ProviderConfig;
use crate::storage::UploadStore;

mod handlers;

/// Shared, read-only state handed to every request.
///
/// Provider clients are not stored here; handlers build them per request
/// from `config`.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: ProviderConfig,
    pub http: reqwest::Client,
    pub store: UploadStore,
}

impl AppState {
    pub fn new(config: ProviderConfig, store: UploadStore) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            store,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let uploads = ServeDir::new(state.store.dir());

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/v1/comments", post(handlers::create_comment_handler))
        .route("/api/v1/images", post(handlers::create_image_handler))
        .nest_service("/uploads", uploads)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn setup_server(
    listen_addr: &str,
    port: NonZeroU16,
    state: AppState,
) -> Result<(), anyhow::Error> {
    let app = create_router(state);

    let addr = format!("{}:{}", listen_addr, port);
    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server error: {}", err);
    }
    Ok(())
}
