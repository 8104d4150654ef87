//! Turns a classified question into a Spanish answer.

use sqlx::SqlitePool;

use crate::chat::extract::{extract_prediction_query, find_department};
use crate::employees;
use crate::errors::AppError;
use crate::intent::Intent;
use crate::models::employee::Department;
use crate::salary::SalaryPredictor;

const NO_EMPLOYEES: &str = "No se encontraron empleados.";

/// Answers `question`, whose intent has already been classified.
pub async fn answer(
    pool: &SqlitePool,
    predictor: &SalaryPredictor,
    question: &str,
    intent: Intent,
) -> Result<String, AppError> {
    match intent {
        Intent::Count => {
            let count = employees::count_all(pool).await?;
            Ok(format!("Actualmente hay {count} empleados en la empresa."))
        }
        Intent::HighestSalary => Ok(match employees::highest_paid(pool).await? {
            Some(e) => format!(
                "El empleado mejor pagado es {} del departamento de {} con un salario de ${}.",
                e.name,
                e.department,
                format_thousands(e.salary)
            ),
            None => NO_EMPLOYEES.to_string(),
        }),
        Intent::Statistics => {
            let avg = employees::averages(pool).await?;
            Ok(match (avg.age, avg.salary, avg.experience_years) {
                (Some(age), Some(salary), Some(experience)) => format!(
                    "Estadísticas de la empresa: Edad promedio {age:.1} años, salario promedio ${}, experiencia promedio {experience:.1} años.",
                    format_amount(salary)
                ),
                _ => NO_EMPLOYEES.to_string(),
            })
        }
        Intent::DepartmentFilter => {
            let Some(department) = find_department(question) else {
                return Ok(format!(
                    "Por favor, especifica un departamento ({}).",
                    department_list()
                ));
            };
            let count = employees::count_by_department(pool, department.as_str()).await?;
            Ok(format!(
                "Hay {count} empleados en el departamento de {}.",
                department.as_str()
            ))
        }
        Intent::Youngest => Ok(match employees::youngest(pool).await? {
            Some(e) => format!(
                "El empleado más joven es {} con {} años del departamento de {}.",
                e.name, e.age, e.department
            ),
            None => NO_EMPLOYEES.to_string(),
        }),
        Intent::SalaryPrediction => {
            let query = extract_prediction_query(question);
            let prediction = predictor.predict(
                query.age,
                query.experience_years,
                query.department.as_str(),
                query.education_level.as_str(),
            )?;
            Ok(format!(
                "Para un empleado de {} años con {} años de experiencia en {} con {}, el salario predicho sería aproximadamente ${}.",
                query.age,
                query.experience_years,
                query.department.as_str(),
                query.education_level.as_str(),
                format_amount(prediction.predicted_salary)
            ))
        }
    }
}

fn department_list() -> String {
    Department::ALL
        .iter()
        .map(|d| d.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `1234567` -> `"1,234,567"`.
pub fn format_thousands(value: i64) -> String {
    group_digits(&value.to_string())
}

/// Whole-unit amount with thousands separators. Exact halves round to even.
pub fn format_amount(value: f64) -> String {
    group_digits(&format!("{value:.0}"))
}

fn group_digits(formatted: &str) -> String {
    let (sign, digits) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures::{empty_pool, seeded_pool};

    async fn setup() -> (SqlitePool, SalaryPredictor) {
        let pool = seeded_pool().await;
        let (predictor, _) = SalaryPredictor::train_from_db(&pool).await.unwrap();
        (pool, predictor)
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(90000), "90,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
        assert_eq!(format_thousands(-25000), "-25,000");
    }

    #[test]
    fn test_format_amount_rounds_half_to_even() {
        assert_eq!(format_amount(53990.4), "53,990");
        assert_eq!(format_amount(53990.6), "53,991");
        assert_eq!(format_amount(52500.5), "52,500");
        assert_eq!(format_amount(52501.5), "52,502");
        assert_eq!(format_amount(-1234.5), "-1,234");
    }

    #[tokio::test]
    async fn test_count_answer() {
        let (pool, predictor) = setup().await;
        let text = answer(&pool, &predictor, "", Intent::Count).await.unwrap();
        assert_eq!(text, "Actualmente hay 6 empleados en la empresa.");
    }

    #[tokio::test]
    async fn test_highest_salary_answer() {
        let (pool, predictor) = setup().await;
        let text = answer(&pool, &predictor, "", Intent::HighestSalary)
            .await
            .unwrap();
        assert_eq!(
            text,
            "El empleado mejor pagado es Juan Pérez del departamento de Finanzas con un salario de $90,000."
        );
    }

    #[tokio::test]
    async fn test_statistics_answer() {
        let (pool, predictor) = setup().await;
        let text = answer(&pool, &predictor, "", Intent::Statistics)
            .await
            .unwrap();
        assert_eq!(
            text,
            "Estadísticas de la empresa: Edad promedio 34.7 años, salario promedio $53,990, experiencia promedio 6.3 años."
        );
    }

    #[tokio::test]
    async fn test_department_filter_answer() {
        let (pool, predictor) = setup().await;
        let text = answer(
            &pool,
            &predictor,
            "¿Cuántos empleados hay en it?",
            Intent::DepartmentFilter,
        )
        .await
        .unwrap();
        assert_eq!(text, "Hay 2 empleados en el departamento de IT.");
    }

    #[tokio::test]
    async fn test_department_filter_without_department_asks_for_one() {
        let (pool, predictor) = setup().await;
        let text = answer(
            &pool,
            &predictor,
            "¿Cuántos hay en el sitio?",
            Intent::DepartmentFilter,
        )
        .await
        .unwrap();
        assert!(text.starts_with("Por favor, especifica un departamento"));
        assert!(text.contains("Recursos Humanos"));
    }

    #[tokio::test]
    async fn test_youngest_answer() {
        let (pool, predictor) = setup().await;
        let text = answer(&pool, &predictor, "", Intent::Youngest).await.unwrap();
        assert_eq!(
            text,
            "El empleado más joven es María Rodríguez con 24 años del departamento de Marketing."
        );
    }

    #[tokio::test]
    async fn test_salary_prediction_answer_echoes_parameters() {
        let (pool, predictor) = setup().await;
        let text = answer(
            &pool,
            &predictor,
            "¿Cuánto ganaría alguien de 45 años con 10 años de experiencia en finanzas con doctorado?",
            Intent::SalaryPrediction,
        )
        .await
        .unwrap();
        assert!(text.starts_with(
            "Para un empleado de 45 años con 10 años de experiencia en Finanzas con Doctorado"
        ));
        assert!(text.contains("aproximadamente $"));
    }

    #[tokio::test]
    async fn test_empty_table_answers() {
        let pool = empty_pool().await;
        let (predictor, _) = SalaryPredictor::train_from_db(&seeded_pool().await)
            .await
            .unwrap();
        for intent in [Intent::HighestSalary, Intent::Statistics, Intent::Youngest] {
            let text = answer(&pool, &predictor, "", intent).await.unwrap();
            assert_eq!(text, NO_EMPLOYEES);
        }
    }
}
