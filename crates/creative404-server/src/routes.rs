//! Router and handlers for the inbound HTTP API.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use creative404_render::{MAX_DIMENSION, available_themes, get_theme, render_png_blocking};
use creative404_types::{ErrorKind, InspectionResult};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::dto::{GenerateRequest, PreviewRequest};
use crate::error::AppError;
use crate::state::AppState;

const DOWNLOAD_DISPOSITION: &str = "attachment; filename=\"404-custom.png\"";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/gif/generate", post(generate_gif))
        .route("/api/gif/preview", post(preview))
        .route("/api/gif/themes", get(themes))
        .route("/api/image/generate", post(generate_image))
        .route("/healthz", get(healthz))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn themes() -> Json<Value> {
    Json(json!({ "themes": available_themes() }))
}

async fn preview(
    State(state): State<AppState>,
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload?;
    let address = require_address(&req.mcp_server_url)?;
    let inspection = state.inspector.inspect(address).await;
    Ok(Json(json!({ "success": true, "data": inspection })))
}

async fn generate_gif(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = payload?;
    let address = require_address(&req.mcp_server_url)?;
    check_dimensions(req.width, req.height)?;

    let inspection = connected(state.inspector.inspect(address).await)?;

    let png = render_png_blocking(get_theme(&req.theme), req.width, req.height, inspection)
        .await
        .map_err(|e| AppError::from_kind(e.kind(), "Failed to generate GIF", e.to_string()))?;

    Ok((
        [(CONTENT_TYPE, "image/png"), (CONTENT_DISPOSITION, DOWNLOAD_DISPOSITION)],
        png,
    )
        .into_response())
}

async fn generate_image(
    State(state): State<AppState>,
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    // A missing key is reported before the MCP server is contacted.
    let client = state.image_client()?;
    let Json(req) = payload?;
    let address = require_address(&req.mcp_server_url)?;

    let inspection = connected(state.inspector.inspect(address).await)?;

    let image = client
        .generate(&inspection)
        .await
        .map_err(|e| AppError::from_kind(e.kind(), "Failed to generate image", e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "imageUrl": image.image_url,
        "revisedPrompt": image.revised_prompt,
    })))
}

/// The trimmed address, or the 400 the caller gets for an empty or malformed one.
fn require_address(raw: &str) -> Result<&str, AppError> {
    let address = raw.trim();
    if address.is_empty() {
        return Err(AppError::bad_request("MCP server URL is required"));
    }
    if !creative404_mcp::validate(address) {
        return Err(AppError::bad_request("Invalid MCP server URL"));
    }
    Ok(address)
}

fn check_dimensions(width: u32, height: u32) -> Result<(), AppError> {
    let valid = 1..=MAX_DIMENSION;
    if valid.contains(&width) && valid.contains(&height) {
        Ok(())
    } else {
        Err(AppError::bad_request(format!(
            "Width and height must be between 1 and {MAX_DIMENSION}"
        )))
    }
}

fn connected(inspection: InspectionResult) -> Result<InspectionResult, AppError> {
    if inspection.success {
        return Ok(inspection);
    }
    Err(AppError::from_kind(
        inspection.error_kind.unwrap_or(ErrorKind::Unexpected),
        "Failed to connect to MCP server",
        inspection.error_message.unwrap_or_default(),
    ))
}
