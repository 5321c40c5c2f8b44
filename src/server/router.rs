use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::chat::ChatRelay;
use crate::db::Db;
use crate::server::routes::apps::create_app;
use crate::workspace_host::WorkspaceHost;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppdockState {
    pub db: Db,
    pub host: Arc<dyn WorkspaceHost>,
    pub relay: Arc<dyn ChatRelay>,
}

impl AppdockState {
    pub fn new(db: Db, host: Arc<dyn WorkspaceHost>, relay: Arc<dyn ChatRelay>) -> Self {
        Self { db, host, relay }
    }
}

async fn healthz_handler() -> StatusCode {
    StatusCode::OK
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

pub fn appdock_router(state: AppdockState) -> Router {
    Router::new()
        .route("/healthz", get(healthz_handler))
        .route("/v1/apps", post(create_app))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
