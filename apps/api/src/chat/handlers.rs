//! Axum route handlers for the chat API.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chat::responder::answer;
use crate::errors::AppError;
use crate::intent::Intent;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
    pub intent: Intent,
    pub confidence: f64,
    pub probabilities: BTreeMap<Intent, f64>,
}

/// POST /chatbot
///
/// Classifies the question and answers it from the employee table or the
/// salary model.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let prediction = state.classifier.predict(&request.question);
    debug!(
        "Classified question as {:?} ({:.3})",
        prediction.intent, prediction.confidence
    );

    let answer = answer(
        &state.db,
        &state.predictor,
        &request.question,
        prediction.intent,
    )
    .await?;

    Ok(Json(ChatResponse {
        answer,
        intent: prediction.intent,
        confidence: prediction.confidence,
        probabilities: prediction.probabilities,
    }))
}
