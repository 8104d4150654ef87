use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};

use crate::employees::{self, TrainingRow};
use crate::salary::encoding::{LabelEncoder, StandardScaler};
use crate::salary::regression::{LinearRegression, RegressionMetrics};

/// Model inputs, in column order.
pub const FEATURE_NAMES: [&str; 4] = ["age", "experience_years", "department", "education_level"];

/// Reported with every prediction. Not derived from the fit.
pub const PREDICTION_CONFIDENCE: f64 = 0.8;

const MIN_TRAINING_ROWS: usize = 2;
const SPLIT_SEED: u64 = 42;

#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("need at least 2 employees to train the salary model, found {0}")]
    NotEnoughData(usize),

    #[error("unknown {feature} '{value}'")]
    UnknownCategory {
        feature: &'static str,
        value: String,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct FeaturesUsed {
    pub age: i64,
    pub experience_years: i64,
    pub department: String,
    pub education_level: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SalaryPrediction {
    pub predicted_salary: f64,
    pub confidence: f64,
    pub features_used: FeaturesUsed,
}

/// Fit quality on the held-out split and on the data the model saw.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub train_rows: usize,
    pub test_rows: usize,
    pub train: RegressionMetrics,
    pub test: RegressionMetrics,
}

#[derive(Debug, Clone)]
pub struct SalaryPredictor {
    departments: LabelEncoder,
    education_levels: LabelEncoder,
    scaler: StandardScaler,
    model: LinearRegression,
}

impl SalaryPredictor {
    /// Reads every employee and fits the model.
    pub async fn train_from_db(
        pool: &SqlitePool,
    ) -> Result<(Self, TrainingReport), PredictorError> {
        let rows = employees::training_rows(pool).await?;
        info!("Loaded {} employees for salary model training", rows.len());
        Self::fit(&rows)
    }

    /// Fits encoders on all rows, then the scaler and regression on a seeded
    /// 80/20 shuffle split.
    pub fn fit(rows: &[TrainingRow]) -> Result<(Self, TrainingReport), PredictorError> {
        if rows.len() < MIN_TRAINING_ROWS {
            return Err(PredictorError::NotEnoughData(rows.len()));
        }

        let departments = LabelEncoder::fit(rows.iter().map(|r| r.department.as_str()));
        let education_levels = LabelEncoder::fit(rows.iter().map(|r| r.education_level.as_str()));
        debug!(
            "Salary model categories: departments {:?}, education levels {:?}",
            departments.classes(),
            education_levels.classes()
        );

        let mut features = Vec::with_capacity(rows.len());
        for row in rows {
            features.push(encode(
                &departments,
                &education_levels,
                row.age,
                row.experience_years,
                &row.department,
                &row.education_level,
            )?);
        }
        let targets: Vec<f64> = rows.iter().map(|r| r.salary as f64).collect();

        let (train_idx, test_idx) = split_indices(rows.len());
        let pick = |idx: &[usize]| -> (Vec<Vec<f64>>, Vec<f64>) {
            (
                idx.iter().map(|&i| features[i].clone()).collect(),
                idx.iter().map(|&i| targets[i]).collect(),
            )
        };
        let (x_train, y_train) = pick(&train_idx);
        let (x_test, y_test) = pick(&test_idx);

        let scaler = StandardScaler::fit(&x_train);
        let scaled_train: Vec<Vec<f64>> = x_train.iter().map(|r| scaler.transform(r)).collect();
        let model = LinearRegression::fit(&scaled_train, &y_train);

        let predict_all = |xs: &[Vec<f64>]| -> Vec<f64> {
            xs.iter()
                .map(|r| model.predict(&scaler.transform(r)))
                .collect()
        };
        let report = TrainingReport {
            train_rows: y_train.len(),
            test_rows: y_test.len(),
            train: RegressionMetrics::compute(&y_train, &predict_all(&x_train)),
            test: RegressionMetrics::compute(&y_test, &predict_all(&x_test)),
        };

        Ok((
            Self {
                departments,
                education_levels,
                scaler,
                model,
            },
            report,
        ))
    }

    pub fn predict(
        &self,
        age: i64,
        experience_years: i64,
        department: &str,
        education_level: &str,
    ) -> Result<SalaryPrediction, PredictorError> {
        let row = encode(
            &self.departments,
            &self.education_levels,
            age,
            experience_years,
            department,
            education_level,
        )?;
        let predicted_salary = self.model.predict(&self.scaler.transform(&row));

        Ok(SalaryPrediction {
            predicted_salary,
            confidence: PREDICTION_CONFIDENCE,
            features_used: FeaturesUsed {
                age,
                experience_years,
                department: department.to_string(),
                education_level: education_level.to_string(),
            },
        })
    }

    /// Regression weight per feature, in standardized units.
    pub fn coefficients(&self) -> Vec<(&'static str, f64)> {
        FEATURE_NAMES
            .iter()
            .copied()
            .zip(self.model.coefficients.iter().copied())
            .collect()
    }
}

fn encode(
    departments: &LabelEncoder,
    education_levels: &LabelEncoder,
    age: i64,
    experience_years: i64,
    department: &str,
    education_level: &str,
) -> Result<Vec<f64>, PredictorError> {
    let dept_code =
        departments
            .transform(department)
            .ok_or_else(|| PredictorError::UnknownCategory {
                feature: "department",
                value: department.to_string(),
            })?;
    let edu_code = education_levels
        .transform(education_level)
        .ok_or_else(|| PredictorError::UnknownCategory {
            feature: "education_level",
            value: education_level.to_string(),
        })?;

    Ok(vec![
        age as f64,
        experience_years as f64,
        dept_code as f64,
        edu_code as f64,
    ])
}

/// Seeded shuffle, then the first fifth (rounded up) is held out for testing.
fn split_indices(n: usize) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(SPLIT_SEED);
    indices.shuffle(&mut rng);

    let n_test = n.div_ceil(5).clamp(1, n - 1);
    let train = indices.split_off(n_test);
    (train, indices)
}
