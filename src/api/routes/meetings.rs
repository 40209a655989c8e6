//! Meeting API endpoints.
//!
//! Provides HTTP endpoints for:
//! - Listing meetings (GET /meetings)
//! - Getting a specific meeting (GET /meetings/:id)
//! - Submitting a transcript for processing (POST /meetings)
//! - Updating lifecycle status/progress (POST /meetings/:id/status, /progress)
//! - Reseeding the demo collection (POST /meetings/reseed)
//! - Downloading an export (GET /meetings/:id/export)

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::api::error::{ApiError, ApiResult};
use crate::demo;
use crate::export::{export_meeting, ExportFormat};
use crate::meeting::{MeetingStatus, MeetingStore};

/// Commands handed off to the service loop for processing.
#[derive(Debug, Clone)]
pub enum ApiCommand {
    IngestTranscript {
        title: Option<String>,
        transcript: String,
    },
}

/// Shared state for meeting routes.
#[derive(Clone)]
pub struct MeetingsState {
    pub tx: mpsc::Sender<ApiCommand>,
    pub store: MeetingStore,
}

#[derive(Debug, serde::Deserialize)]
pub struct IngestRequest {
    pub title: Option<String>,
    pub transcript: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct StatusRequest {
    pub status: MeetingStatus,
}

#[derive(Debug, serde::Deserialize)]
pub struct ProgressRequest {
    pub progress: u8,
}

pub fn router(state: MeetingsState) -> Router {
    Router::new()
        .route("/meetings", get(list_meetings).post(ingest_transcript))
        .route("/meetings/reseed", post(reseed))
        .route("/meetings/:id", get(get_meeting))
        .route("/meetings/:id/status", post(update_status))
        .route("/meetings/:id/progress", post(update_progress))
        .route("/meetings/:id/export", get(export))
        .with_state(state)
}

async fn list_meetings(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<MeetingsState>,
) -> Json<Value> {
    let limit: usize = params
        .get("limit")
        .and_then(|v| v.parse().ok())
        .unwrap_or(20);

    let meetings = state.store.snapshot().await;
    let entries: Vec<_> = meetings.iter().take(limit).collect();

    Json(json!({
        "meetings": entries,
        "total": meetings.len(),
    }))
}

async fn get_meeting(
    Path(id): Path<String>,
    State(state): State<MeetingsState>,
) -> ApiResult<Json<Value>> {
    match state.store.get(&id).await {
        Some(meeting) => Ok(Json(json!(meeting))),
        None => Err(ApiError::not_found(format!("meeting {} not found", id))),
    }
}

async fn ingest_transcript(
    State(state): State<MeetingsState>,
    Json(req): Json<IngestRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    if req.transcript.trim().is_empty() {
        return Err(ApiError::bad_request("transcript must not be empty"));
    }

    info!("Transcript ingestion request received via API");

    state
        .tx
        .send(ApiCommand::IngestTranscript {
            title: req.title,
            transcript: req.transcript,
        })
        .await
        .map_err(|e| {
            error!("Failed to queue ingestion command: {}", e);
            ApiError::internal("service loop unavailable")
        })?;

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({
            "success": true,
            "message": "Meeting queued for processing",
        })),
    ))
}

async fn update_status(
    Path(id): Path<String>,
    State(state): State<MeetingsState>,
    Json(req): Json<StatusRequest>,
) -> Json<Value> {
    // Unknown ids are a no-op by design; report whether anything changed
    let applied = state.store.update_status(&id, req.status).await;
    Json(json!({
        "success": true,
        "applied": applied,
        "status": req.status.as_str(),
    }))
}

async fn update_progress(
    Path(id): Path<String>,
    State(state): State<MeetingsState>,
    Json(req): Json<ProgressRequest>,
) -> Json<Value> {
    let applied = state.store.update_progress(&id, req.progress).await;
    Json(json!({
        "success": true,
        "applied": applied,
    }))
}

async fn reseed(State(state): State<MeetingsState>) -> Json<Value> {
    let meetings = demo::demo_meetings();
    let count = meetings.len();
    state.store.replace_snapshot(meetings).await;

    info!("Meeting collection reseeded with {} demo meetings", count);
    Json(json!({
        "success": true,
        "count": count,
    }))
}

async fn export(
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    State(state): State<MeetingsState>,
) -> ApiResult<Response> {
    let format: ExportFormat = params
        .get("format")
        .map(String::as_str)
        .unwrap_or("json")
        .parse()
        .map_err(|e| ApiError::bad_request(format!("{}", e)))?;

    let meeting = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| ApiError::not_found(format!("meeting {} not found", id)))?;

    let artifact = export_meeting(&meeting, format)
        .map_err(|e| ApiError::internal(format!("export failed: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", artifact.file_name),
            ),
        ],
        artifact.bytes,
    )
        .into_response())
}
