//! REST API server for Recap.
//!
//! Provides HTTP endpoints for:
//! - Meeting collection reads and lifecycle updates
//! - Transcript ingestion
//! - Demo reseeding
//! - Export downloads

pub mod error;
pub mod routes;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tracing::info;

pub use routes::meetings::{ApiCommand, MeetingsState};

pub struct ApiServer {
    port: u16,
    meetings_state: MeetingsState,
}

impl ApiServer {
    pub fn new(
        tx: tokio::sync::mpsc::Sender<ApiCommand>,
        store: crate::meeting::MeetingStore,
        port: u16,
    ) -> Self {
        Self {
            port,
            meetings_state: MeetingsState { tx, store },
        }
    }

    pub async fn start(self) -> Result<()> {
        let app = Router::new()
            .route("/", get(status))
            .route("/version", get(version))
            .merge(routes::meetings::router(self.meetings_state))
            .layer(ServiceBuilder::new());

        let listener = tokio::net::TcpListener::bind(&format!("127.0.0.1:{}", self.port)).await?;

        info!("API server listening on http://127.0.0.1:{}", self.port);
        info!("Endpoints:");
        info!("  GET  /                      - Service info");
        info!("  GET  /version               - Get version info");
        info!("  GET  /meetings              - List meetings");
        info!("  POST /meetings              - Submit a transcript for processing");
        info!("  GET  /meetings/:id          - Get a single meeting");
        info!("  POST /meetings/:id/status   - Update lifecycle status");
        info!("  POST /meetings/:id/progress - Update processing progress");
        info!("  POST /meetings/reseed       - Replace collection with demo data");
        info!("  GET  /meetings/:id/export   - Download export (format=pdf|word|json)");

        axum::serve(listener, app).await?;

        Ok(())
    }
}

async fn status() -> Json<Value> {
    Json(json!({
        "service": "recap",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn version() -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "name": "recap"
    }))
}
