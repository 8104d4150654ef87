//! Axum route handlers for the salary prediction API.

use std::ops::RangeInclusive;

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::salary::SalaryPrediction;
use crate::state::AppState;

const AGE_RANGE: RangeInclusive<i64> = 18..=70;
const EXPERIENCE_RANGE: RangeInclusive<i64> = 0..=50;

#[derive(Debug, Deserialize)]
pub struct PredictSalaryRequest {
    pub age: i64,
    pub experience_years: i64,
    pub department: String,
    pub education_level: String,
}

/// POST /predict-salary
pub async fn handle_predict_salary(
    State(state): State<AppState>,
    Json(request): Json<PredictSalaryRequest>,
) -> Result<Json<SalaryPrediction>, AppError> {
    validate(&request)?;

    let prediction = state.predictor.predict(
        request.age,
        request.experience_years,
        &request.department,
        &request.education_level,
    )?;

    Ok(Json(prediction))
}

fn validate(request: &PredictSalaryRequest) -> Result<(), AppError> {
    if !AGE_RANGE.contains(&request.age) {
        return Err(AppError::Validation(format!(
            "age must be between {} and {}",
            AGE_RANGE.start(),
            AGE_RANGE.end()
        )));
    }
    if !EXPERIENCE_RANGE.contains(&request.experience_years) {
        return Err(AppError::Validation(format!(
            "experience_years must be between {} and {}",
            EXPERIENCE_RANGE.start(),
            EXPERIENCE_RANGE.end()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(age: i64, experience_years: i64) -> PredictSalaryRequest {
        PredictSalaryRequest {
            age,
            experience_years,
            department: "IT".to_string(),
            education_level: "Licenciatura".to_string(),
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(validate(&request(18, 0)).is_ok());
        assert!(validate(&request(70, 50)).is_ok());
    }

    #[test]
    fn test_out_of_range_age() {
        assert!(matches!(
            validate(&request(17, 0)),
            Err(AppError::Validation(m)) if m.contains("age")
        ));
        assert!(validate(&request(71, 0)).is_err());
    }

    #[test]
    fn test_out_of_range_experience() {
        assert!(validate(&request(30, -1)).is_err());
        assert!(matches!(
            validate(&request(30, 51)),
            Err(AppError::Validation(m)) if m.contains("experience_years")
        ));
    }
}
