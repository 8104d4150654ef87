use std::sync::Arc;

use sqlx::SqlitePool;

use crate::intent::IntentClassifier;
use crate::ocr::recognizer::TextRecognizer;
use crate::salary::SalaryPredictor;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only once the server is listening.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub classifier: Arc<IntentClassifier>,
    pub predictor: Arc<SalaryPredictor>,
    /// Pluggable OCR backend. Default: Tesseract CLI.
    pub recognizer: Arc<dyn TextRecognizer>,
}
