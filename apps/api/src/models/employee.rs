use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the `empleados` table, with columns aliased to English names.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub department: String,
    pub salary: i64,
    pub age: i64,
    pub city: String,
    pub experience_years: i64,
    pub education_level: String,
    pub hire_date: NaiveDate,
}

/// The fixed set of departments employees are generated into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Department {
    Ventas,
    #[serde(rename = "IT")]
    It,
    Marketing,
    Finanzas,
    #[serde(rename = "Recursos Humanos")]
    RecursosHumanos,
}

impl Department {
    pub const ALL: [Department; 5] = [
        Department::Ventas,
        Department::It,
        Department::Marketing,
        Department::Finanzas,
        Department::RecursosHumanos,
    ];

    /// Display name, as stored in the table.
    pub fn as_str(self) -> &'static str {
        match self {
            Department::Ventas => "Ventas",
            Department::It => "IT",
            Department::Marketing => "Marketing",
            Department::Finanzas => "Finanzas",
            Department::RecursosHumanos => "Recursos Humanos",
        }
    }

    /// Lower-case phrase that identifies the department in a question.
    pub fn keyword(self) -> &'static str {
        match self {
            Department::Ventas => "ventas",
            Department::It => "it",
            Department::Marketing => "marketing",
            Department::Finanzas => "finanzas",
            Department::RecursosHumanos => "recursos humanos",
        }
    }
}

/// The fixed set of education levels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EducationLevel {
    #[serde(rename = "Técnico")]
    Tecnico,
    Licenciatura,
    #[serde(rename = "Maestría")]
    Maestria,
    Doctorado,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 4] = [
        EducationLevel::Tecnico,
        EducationLevel::Licenciatura,
        EducationLevel::Maestria,
        EducationLevel::Doctorado,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EducationLevel::Tecnico => "Técnico",
            EducationLevel::Licenciatura => "Licenciatura",
            EducationLevel::Maestria => "Maestría",
            EducationLevel::Doctorado => "Doctorado",
        }
    }

    /// Accented and unaccented spellings accepted in questions.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            EducationLevel::Tecnico => &["técnico", "tecnico"],
            EducationLevel::Licenciatura => &["licenciatura"],
            EducationLevel::Maestria => &["maestría", "maestria"],
            EducationLevel::Doctorado => &["doctorado"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_serde_uses_table_names() {
        let json = serde_json::to_string(&Department::RecursosHumanos).unwrap();
        assert_eq!(json, r#""Recursos Humanos""#);
        let dept: Department = serde_json::from_str(r#""IT""#).unwrap();
        assert_eq!(dept, Department::It);
    }

    #[test]
    fn test_as_str_matches_serde_name() {
        for dept in Department::ALL {
            let json = serde_json::to_string(&dept).unwrap();
            assert_eq!(json, format!("\"{}\"", dept.as_str()));
        }
        for level in EducationLevel::ALL {
            let json = serde_json::to_string(&level).unwrap();
            assert_eq!(json, format!("\"{}\"", level.as_str()));
        }
    }
}
