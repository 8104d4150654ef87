//! Read-only queries against the `empleados` table.
//!
//! The table keeps its Spanish column names on disk; every query aliases them
//! to the field names of [`Employee`].

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::models::employee::Employee;

const EMPLOYEE_COLUMNS: &str = r#"
    id,
    nombre AS name,
    departamento AS department,
    salario AS salary,
    edad AS age,
    ciudad AS city,
    experiencia_anos AS experience_years,
    nivel_educacion AS education_level,
    fecha_ingreso AS hire_date
"#;

/// Company-wide means. `None` fields only occur on an empty table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Averages {
    pub age: Option<f64>,
    pub salary: Option<f64>,
    pub experience_years: Option<f64>,
}

/// The columns the salary model is trained on.
#[derive(Debug, Clone, FromRow)]
pub struct TrainingRow {
    pub age: i64,
    pub experience_years: i64,
    pub department: String,
    pub education_level: String,
    pub salary: i64,
}

pub async fn count_all(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM empleados")
        .fetch_one(pool)
        .await
}

/// Counts employees in `department`, ignoring case.
pub async fn count_by_department(pool: &SqlitePool, department: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM empleados WHERE LOWER(departamento) = LOWER(?)")
        .bind(department)
        .fetch_one(pool)
        .await
}

pub async fn highest_paid(pool: &SqlitePool) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM empleados ORDER BY salario DESC LIMIT 1"
    ))
    .fetch_optional(pool)
    .await
}

pub async fn youngest(pool: &SqlitePool) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM empleados ORDER BY edad ASC LIMIT 1"
    ))
    .fetch_optional(pool)
    .await
}

pub async fn averages(pool: &SqlitePool) -> Result<Averages, sqlx::Error> {
    let (age, salary, experience_years): (Option<f64>, Option<f64>, Option<f64>) =
        sqlx::query_as(
            r#"
            SELECT
                AVG(edad),
                AVG(salario),
                AVG(experiencia_anos)
            FROM empleados
            "#,
        )
        .fetch_one(pool)
        .await?;

    Ok(Averages {
        age,
        salary,
        experience_years,
    })
}

pub async fn training_rows(pool: &SqlitePool) -> Result<Vec<TrainingRow>, sqlx::Error> {
    sqlx::query_as::<_, TrainingRow>(
        r#"
        SELECT
            edad AS age,
            experiencia_anos AS experience_years,
            departamento AS department,
            nivel_educacion AS education_level,
            salario AS salary
        FROM empleados
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM empleados WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Employees whose name contains `fragment`, compared case-insensitively.
///
/// Filtering happens here rather than in SQL because SQLite's `LIKE` only
/// folds ASCII case, and badge text is full of accented capitals.
pub async fn find_by_name_fragment(
    pool: &SqlitePool,
    fragment: &str,
) -> Result<Vec<Employee>, sqlx::Error> {
    let needle = fragment.trim().to_lowercase();
    if needle.is_empty() {
        return Ok(Vec::new());
    }

    let all = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM empleados ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;

    Ok(all
        .into_iter()
        .filter(|e| e.name.to_lowercase().contains(&needle))
        .collect())
}

pub async fn distinct_departments(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT DISTINCT departamento FROM empleados ORDER BY departamento")
        .fetch_all(pool)
        .await
}
