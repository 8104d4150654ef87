//! Cross-checks extracted badge fields against the employee table.

use serde::Serialize;
use sqlx::SqlitePool;

use crate::employees;
use crate::models::employee::Employee;

use super::card_parser::CardFields;

pub const NO_FIELDS_EXTRACTED: &str = "No se pudieron extraer datos";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeSummary {
    pub id: i64,
    pub name: String,
    pub department: String,
}

impl From<&Employee> for EmployeeSummary {
    fn from(e: &Employee) -> Self {
        Self {
            id: e.id,
            name: e.name.clone(),
            department: e.department.clone(),
        }
    }
}

/// Each check is `None` when the corresponding field was not on the card.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CardValidation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_found: Option<Employee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_match: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub similar_employees: Vec<EmployeeSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_match: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn validate_card(
    pool: &SqlitePool,
    fields: &CardFields,
) -> Result<CardValidation, sqlx::Error> {
    if fields.is_empty() {
        return Ok(CardValidation {
            error: Some(NO_FIELDS_EXTRACTED.to_string()),
            ..CardValidation::default()
        });
    }

    let mut validation = CardValidation::default();

    if let Some(id) = &fields.id {
        // ids that do not fit an integer cannot exist in the table
        let found = match id.parse::<i64>() {
            Ok(id) => employees::find_by_id(pool, id).await?,
            Err(_) => None,
        };
        validation.id_match = Some(found.is_some());
        validation.employee_found = found;
    }

    if let Some(name) = &fields.name {
        let similar = employees::find_by_name_fragment(pool, name).await?;
        validation.name_match = Some(!similar.is_empty());
        validation.similar_employees = similar.iter().map(EmployeeSummary::from).collect();
    }

    if let Some(department) = &fields.department {
        let known = employees::distinct_departments(pool).await?;
        validation.department_valid = Some(department_matches(department, &known));
    }

    Ok(validation)
}

/// Either string containing the other counts as a match, ignoring case.
fn department_matches(candidate: &str, known: &[String]) -> bool {
    let candidate = candidate.trim().to_lowercase();
    if candidate.is_empty() {
        return false;
    }
    known.iter().any(|k| {
        let k = k.to_lowercase();
        k.contains(&candidate) || candidate.contains(&k)
    })
}
