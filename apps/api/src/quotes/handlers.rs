//! Axum route handlers for the Quotes API.

use std::time::Instant;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::quotes::display::{DisplayView, Language};
use crate::state::AppState;

/// File name offered to the browser for image downloads.
const DOWNLOAD_FILENAME: &str = "inspiration-quote.jpg";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CopyRequest {
    pub language: Language,
}

#[derive(Debug, Serialize)]
pub struct CopyResponse {
    pub language: Language,
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/quotes/generate
///
/// Runs one generation cycle. Ignored with 409 while another cycle is running.
/// The response describes the cycle this request ran, even if a later one has
/// already replaced it on screen.
pub async fn handle_generate(
    State(state): State<AppState>,
) -> Result<Json<DisplayView>, AppError> {
    let generation = state
        .orchestrator
        .generate()
        .await
        .ok_or(AppError::GenerationInFlight)?;

    Ok(Json(DisplayView::published(
        generation,
        state.orchestrator.is_in_flight(),
    )))
}

/// GET /api/v1/quotes/current
pub async fn handle_current(State(state): State<AppState>) -> Json<DisplayView> {
    let display = state.display.read().await;
    Json(display.view(Instant::now(), state.orchestrator.is_in_flight()))
}

/// POST /api/v1/quotes/copy
///
/// Returns the text for the client to put on its clipboard and starts the
/// "Copied!" acknowledgement.
pub async fn handle_copy(
    State(state): State<AppState>,
    Json(request): Json<CopyRequest>,
) -> Result<Json<CopyResponse>, AppError> {
    let mut display = state.display.write().await;
    let text = display
        .copy_text(request.language, Instant::now())
        .ok_or_else(|| AppError::NotFound("No quote has been generated yet".to_string()))?;

    Ok(Json(CopyResponse {
        language: request.language,
        text,
    }))
}

/// POST /api/v1/quotes/like
pub async fn handle_toggle_like(
    State(state): State<AppState>,
) -> Result<Json<DisplayView>, AppError> {
    let mut display = state.display.write().await;
    display
        .toggle_like()
        .ok_or_else(|| AppError::NotFound("No quote has been generated yet".to_string()))?;

    Ok(Json(display.view(
        Instant::now(),
        state.orchestrator.is_in_flight(),
    )))
}

/// GET /api/v1/quotes/image
///
/// Streams the current image back as a file download.
pub async fn handle_download_image(State(state): State<AppState>) -> Result<Response, AppError> {
    let url = {
        let display = state.display.read().await;
        display
            .generation()
            .map(|g| g.image.url.clone())
            .ok_or_else(|| AppError::NotFound("No image has been generated yet".to_string()))?
    };

    info!("Downloading image {url}");

    let response = state
        .http
        .get(&url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AppError::Upstream(format!("image download failed: {e}")))?;

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("image/jpeg")
        .to_string();

    let body: Bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::Upstream(format!("image download failed: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
            ),
        ],
        body,
    )
        .into_response())
}
