mod chat;
mod config;
mod db;
mod employees;
mod errors;
mod intent;
mod models;
mod ocr;
mod routes;
mod salary;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::intent::IntentClassifier;
use crate::ocr::recognizer::TesseractCli;
use crate::routes::build_router;
use crate::salary::SalaryPredictor;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HR chatbot v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;

    let examples = intent::corpus::examples();
    let holdout = IntentClassifier::holdout_accuracy(&examples)
        .context("Failed to evaluate intent classifier")?;
    let classifier = IntentClassifier::train().context("Failed to train intent classifier")?;
    info!(
        "Intent classifier trained: {} features, training accuracy {:.3}, held-out accuracy {:.3}",
        classifier.vocabulary_size(),
        classifier.accuracy(&examples),
        holdout
    );

    let (predictor, report) = SalaryPredictor::train_from_db(&db)
        .await
        .context("Failed to train salary predictor")?;
    info!(
        "Salary predictor trained on {} rows: MAE {:.2}, RMSE {:.2}, R2 {:.4}",
        report.train_rows, report.train.mae, report.train.rmse, report.train.r2
    );
    info!(
        "Salary predictor held-out {} rows: MAE {:.2}, RMSE {:.2}, R2 {:.4}",
        report.test_rows, report.test.mae, report.test.rmse, report.test.r2
    );
    for (feature, weight) in predictor.coefficients() {
        debug!("Salary coefficient {feature}: {weight:.2}");
    }

    let recognizer = TesseractCli::new(config.tesseract_cmd.clone(), config.ocr_language.clone());
    info!(
        "OCR engine: {} (language: {})",
        config.tesseract_cmd, config.ocr_language
    );

    let state = AppState {
        db,
        classifier: Arc::new(classifier),
        predictor: Arc::new(predictor),
        recognizer: Arc::new(recognizer),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
