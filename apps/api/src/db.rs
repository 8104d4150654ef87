use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

/// Opens a read-only SQLite pool on the employee database.
/// The file must already exist; this service never creates or writes it.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Opening employee database at {database_url}...");

    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid DATABASE_URL '{database_url}'"))?
        .read_only(true)
        .create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("Failed to open employee database")?;

    info!("SQLite connection pool established");
    Ok(pool)
}

/// In-memory database with the production table layout, for tests.
#[cfg(test)]
pub mod fixtures {
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    pub const CREATE_EMPLOYEES: &str = r#"
        CREATE TABLE empleados (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL,
            departamento TEXT NOT NULL,
            salario INTEGER NOT NULL,
            edad INTEGER NOT NULL,
            ciudad TEXT NOT NULL,
            experiencia_anos INTEGER NOT NULL,
            nivel_educacion TEXT NOT NULL,
            fecha_ingreso DATE NOT NULL
        )
    "#;

    /// (name, department, salary, age, city, experience, education, hire date)
    pub type SeedRow = (
        &'static str,
        &'static str,
        i64,
        i64,
        &'static str,
        i64,
        &'static str,
        &'static str,
    );

    pub const STAFF: &[SeedRow] = &[
        ("Ana García", "Ventas", 36750, 29, "Monterrey", 1, "Licenciatura", "2022-03-14"),
        ("Carlos López", "IT", 74250, 41, "Guadalajara", 13, "Maestría", "2021-07-01"),
        ("María Rodríguez", "Marketing", 40000, 24, "Puebla", 0, "Licenciatura", "2024-01-22"),
        ("Juan Pérez", "Finanzas", 90000, 52, "Ciudad de México", 20, "Doctorado", "2020-11-09"),
        ("Laura Martínez", "Recursos Humanos", 33440, 35, "Tijuana", 2, "Técnico", "2023-05-30"),
        ("Diego Silva", "IT", 49500, 27, "Monterrey", 2, "Licenciatura", "2023-09-18"),
    ];

    /// Single-connection pool so every query sees the same in-memory database.
    pub async fn empty_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query(CREATE_EMPLOYEES).execute(&pool).await.unwrap();
        pool
    }

    pub async fn seeded_pool() -> SqlitePool {
        let pool = empty_pool().await;
        for row in STAFF {
            sqlx::query(
                r#"
                INSERT INTO empleados
                    (nombre, departamento, salario, edad, ciudad,
                     experiencia_anos, nivel_educacion, fecha_ingreso)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(row.0)
            .bind(row.1)
            .bind(row.2)
            .bind(row.3)
            .bind(row.4)
            .bind(row.5)
            .bind(row.6)
            .bind(row.7)
            .execute(&pool)
            .await
            .unwrap();
        }
        pool
    }
}
