// Salary prediction: label-encoded categoricals, standardized features,
// ordinary least squares. Trained from the employee table at startup.

pub mod encoding;
pub mod handlers;
pub mod predictor;
pub mod regression;

pub use predictor::{PredictorError, SalaryPrediction, SalaryPredictor};
