pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers::handle_chat;
use crate::ocr::handlers::handle_upload_card;
use crate::salary::handlers::handle_predict_salary;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api", get(health::api_info))
        .route("/chatbot", post(handle_chat))
        .route("/predict-salary", post(handle_predict_salary))
        .route("/upload-card", post(handle_upload_card))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::db::fixtures::seeded_pool;
    use crate::intent::IntentClassifier;
    use crate::ocr::preprocess::test_images::card_base64;
    use crate::ocr::recognizer::stub::FixedText;
    use crate::salary::SalaryPredictor;

    async fn test_state() -> AppState {
        let db = seeded_pool().await;
        let classifier = IntentClassifier::train().unwrap();
        let (predictor, _) = SalaryPredictor::train_from_db(&db).await.unwrap();
        AppState {
            db,
            classifier: Arc::new(classifier),
            predictor: Arc::new(predictor),
            recognizer: Arc::new(FixedText("Nombre: Ana García\nID: 1\nDepartamento: Ventas")),
        }
    }

    async fn send(method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let app = build_router(test_state().await);
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let request = match body {
            Some(b) => request.body(Body::from(b.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send("GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["models_loaded"]["ocr_processor"], true);
    }

    #[tokio::test]
    async fn test_api_info_lists_endpoints() {
        let (status, body) = send("GET", "/api", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoints"]["chatbot"], "POST /chatbot");
    }

    #[tokio::test]
    async fn test_chatbot_answers_headcount() {
        let (status, body) = send(
            "POST",
            "/chatbot",
            Some(json!({ "question": "¿Cuántos empleados hay en la empresa?" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["intent"], "count");
        assert_eq!(body["answer"], "Actualmente hay 6 empleados en la empresa.");
        assert_eq!(body["probabilities"].as_object().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_chatbot_rejects_blank_question() {
        let (status, body) = send("POST", "/chatbot", Some(json!({ "question": "  " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_predict_salary() {
        let (status, body) = send(
            "POST",
            "/predict-salary",
            Some(json!({
                "age": 30,
                "experience_years": 5,
                "department": "IT",
                "education_level": "Licenciatura"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["predicted_salary"].is_number());
        assert_eq!(body["confidence"], 0.8);
        assert_eq!(body["features_used"]["department"], "IT");
    }

    #[tokio::test]
    async fn test_predict_salary_validation_errors() {
        let (status, _) = send(
            "POST",
            "/predict-salary",
            Some(json!({
                "age": 12,
                "experience_years": 5,
                "department": "IT",
                "education_level": "Licenciatura"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            "POST",
            "/predict-salary",
            Some(json!({
                "age": 30,
                "experience_years": 5,
                "department": "Logística",
                "education_level": "Licenciatura"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_upload_card() {
        let (status, body) = send(
            "POST",
            "/upload-card",
            Some(json!({ "image": card_base64() })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["extracted_fields"]["id"], "1");
        assert_eq!(body["validation"]["id_match"], true);
        assert_eq!(body["validation"]["employee_found"]["name"], "Ana García");
    }

    #[tokio::test]
    async fn test_upload_card_with_garbage_is_still_ok() {
        let (status, body) = send("POST", "/upload-card", Some(json!({ "image": "@@" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }
}
