//! Axum route handlers for badge uploads.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::ocr::{scan_card, CardScan};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    /// Base64-encoded PNG or JPEG, optionally as a data URI.
    pub image: String,
}

/// POST /upload-card
///
/// Always 200: a failed scan comes back with `success: false`.
pub async fn handle_upload_card(
    State(state): State<AppState>,
    Json(request): Json<ImageRequest>,
) -> Json<CardScan> {
    Json(scan_card(&state.db, state.recognizer.as_ref(), &request.image).await)
}
