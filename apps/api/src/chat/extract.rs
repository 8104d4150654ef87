//! Pulls rough parameters out of free-text questions.
//!
//! Keywords match on word boundaries: "it" must not fire inside "sitio".

use std::sync::OnceLock;

use regex::Regex;

use crate::models::employee::{Department, EducationLevel};

pub const DEFAULT_AGE: i64 = 30;
pub const DEFAULT_EXPERIENCE_YEARS: i64 = 5;
pub const DEFAULT_DEPARTMENT: Department = Department::It;
pub const DEFAULT_EDUCATION: EducationLevel = EducationLevel::Licenciatura;

/// Salary-model inputs read from a question, with defaults for the gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionQuery {
    pub age: i64,
    pub experience_years: i64,
    pub department: Department,
    pub education_level: EducationLevel,
}

fn word_regex(phrase: &str) -> Regex {
    Regex::new(&format!(r"\b{}\b", regex::escape(phrase))).expect("escaped keyword regex")
}

fn department_patterns() -> &'static [(Department, Regex)] {
    static PATTERNS: OnceLock<Vec<(Department, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        Department::ALL
            .iter()
            .map(|d| (*d, word_regex(d.keyword())))
            .collect()
    })
}

fn education_patterns() -> &'static [(EducationLevel, Regex)] {
    static PATTERNS: OnceLock<Vec<(EducationLevel, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        EducationLevel::ALL
            .iter()
            .flat_map(|level| level.keywords().iter().map(|kw| (*level, word_regex(kw))))
            .collect()
    })
}

fn years_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+)\s*a[ñn]os").expect("static regex"))
}

fn experience_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d+)\s*a[ñn]os\s*de\s*experiencia").expect("static regex")
    })
}

/// First department named in `question`, in `Department::ALL` order.
pub fn find_department(question: &str) -> Option<Department> {
    let lowered = question.to_lowercase();
    department_patterns()
        .iter()
        .find(|(_, re)| re.is_match(&lowered))
        .map(|(d, _)| *d)
}

pub fn find_education(question: &str) -> Option<EducationLevel> {
    let lowered = question.to_lowercase();
    education_patterns()
        .iter()
        .find(|(_, re)| re.is_match(&lowered))
        .map(|(e, _)| *e)
}

/// Reads age, experience, department and education from `question`.
///
/// Experience is the first "N años de experiencia"; age is the first other
/// "N años", so "alguien con 5 años de experiencia" keeps the default age.
pub fn extract_prediction_query(question: &str) -> PredictionQuery {
    let lowered = question.to_lowercase();

    let experience = experience_pattern().captures(&lowered).and_then(|caps| {
        let whole = caps.get(0)?;
        let years = caps[1].parse::<i64>().ok()?;
        Some((whole.start(), years))
    });
    let experience_start = experience.map(|(start, _)| start);

    let age = years_pattern()
        .captures_iter(&lowered)
        .filter(|caps| caps.get(0).map(|m| m.start()) != experience_start)
        .find_map(|caps| caps[1].parse::<i64>().ok());

    PredictionQuery {
        age: age.unwrap_or(DEFAULT_AGE),
        experience_years: experience.map_or(DEFAULT_EXPERIENCE_YEARS, |(_, years)| years),
        department: find_department(&lowered).unwrap_or(DEFAULT_DEPARTMENT),
        education_level: find_education(&lowered).unwrap_or(DEFAULT_EDUCATION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_matches_whole_words_only() {
        assert_eq!(find_department("¿Cuántos hay en IT?"), Some(Department::It));
        assert_eq!(find_department("¿Cuántos visitan el sitio?"), None);
        assert_eq!(
            find_department("empleados en Recursos Humanos"),
            Some(Department::RecursosHumanos)
        );
    }

    #[test]
    fn test_education_accepts_unaccented_spelling() {
        assert_eq!(find_education("alguien con maestria"), Some(EducationLevel::Maestria));
        assert_eq!(find_education("un Técnico"), Some(EducationLevel::Tecnico));
        assert_eq!(find_education("sin estudios"), None);
    }

    #[test]
    fn test_defaults_when_nothing_is_mentioned() {
        let q = extract_prediction_query("¿Cuánto ganaría alguien?");
        assert_eq!(
            q,
            PredictionQuery {
                age: DEFAULT_AGE,
                experience_years: DEFAULT_EXPERIENCE_YEARS,
                department: DEFAULT_DEPARTMENT,
                education_level: DEFAULT_EDUCATION,
            }
        );
    }

    #[test]
    fn test_age_and_experience_both_present() {
        let q = extract_prediction_query(
            "¿Cuánto ganaría alguien de 25 años con 3 años de experiencia?",
        );
        assert_eq!(q.age, 25);
        assert_eq!(q.experience_years, 3);
    }

    #[test]
    fn test_experience_is_not_mistaken_for_age() {
        let q = extract_prediction_query(
            "¿Cuánto ganaría un empleado con licenciatura y 5 años de experiencia?",
        );
        assert_eq!(q.age, DEFAULT_AGE);
        assert_eq!(q.experience_years, 5);
        assert_eq!(q.education_level, EducationLevel::Licenciatura);
    }

    #[test]
    fn test_full_question() {
        let q = extract_prediction_query(
            "¿Cuál sería el sueldo de alguien de 40 años con doctorado en finanzas?",
        );
        assert_eq!(q.age, 40);
        assert_eq!(q.department, Department::Finanzas);
        assert_eq!(q.education_level, EducationLevel::Doctorado);
    }
}
