//! Employee badge OCR: decode, binarize, recognize, parse, cross-check.

pub mod card_parser;
pub mod handlers;
pub mod preprocess;
pub mod recognizer;
pub mod validation;

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

use card_parser::{parse_card, CardFields};
use recognizer::TextRecognizer;
use validation::{validate_card, CardValidation};

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("could not decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OCR engine error: {0}")]
    Engine(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("image preprocessing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Outcome of one badge upload. Failures are reported in-band.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CardScan {
    pub success: bool,
    pub extracted_text: String,
    pub extracted_fields: CardFields,
    pub validation: CardValidation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CardScan {
    fn failed(err: &OcrError) -> Self {
        Self {
            error: Some(err.to_string()),
            ..Self::default()
        }
    }
}

pub async fn scan_card(
    pool: &SqlitePool,
    recognizer: &dyn TextRecognizer,
    image_base64: &str,
) -> CardScan {
    match run_pipeline(pool, recognizer, image_base64).await {
        Ok(scan) => scan,
        Err(e) => {
            warn!("Badge scan failed: {e}");
            CardScan::failed(&e)
        }
    }
}

async fn run_pipeline(
    pool: &SqlitePool,
    recognizer: &dyn TextRecognizer,
    image_base64: &str,
) -> Result<CardScan, OcrError> {
    let payload = image_base64.to_owned();
    let png = tokio::task::spawn_blocking(move || preprocess::prepare(&payload)).await??;

    let text = recognizer.recognize(&png).await?;
    let text = text.trim().to_string();

    let fields = parse_card(&text);
    let validation = validate_card(pool, &fields).await?;

    info!(
        "Badge scanned: {} chars, id_match={:?}, name_match={:?}",
        text.chars().count(),
        validation.id_match,
        validation.name_match
    );

    Ok(CardScan {
        success: true,
        extracted_text: text,
        extracted_fields: fields,
        validation,
        error: None,
    })
}
