use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Models are trained before the listener binds, so a responding server has
/// all of them loaded.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "models_loaded": {
            "classifier": true,
            "salary_predictor": true,
            "ocr_processor": true
        }
    }))
}

/// GET /api
pub async fn api_info() -> Json<Value> {
    Json(json!({
        "name": "HR Chatbot API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "chatbot": "POST /chatbot",
            "predict_salary": "POST /predict-salary",
            "upload_card": "POST /upload-card",
            "health": "GET /health"
        }
    }))
}
