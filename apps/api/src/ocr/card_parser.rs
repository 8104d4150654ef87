//! Field extraction from badge OCR text.
//!
//! Labelled fields ("Nombre: ...", "ID: ...") are matched on the lower-cased
//! text. Values never run past the end of their line. When no labelled field
//! is found at all, line heuristics take over.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CardFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl CardFields {
    pub fn is_empty(&self) -> bool {
        *self == CardFields::default()
    }
}

struct Patterns {
    name: Regex,
    id: Regex,
    department: Regex,
    position: Regex,
    email: Regex,
    phone: Regex,
    bare_number: Regex,
    long_number: Regex,
    department_hint: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let re = |p: &str| Regex::new(p).expect("static regex");
        // label, separator and value all sit on one line; an empty label
        // must not borrow the next line as its value
        let sep = r"[: \t]*";
        let words = r"[\p{L}][\p{L} \t]*";
        Patterns {
            name: re(&format!(r"nombre{sep}({words})")),
            id: re(&format!(r"\bid{sep}(\d+)")),
            department: re(&format!(r"departamento{sep}({words})")),
            position: re(&format!(r"cargo{sep}({words})")),
            email: re(&format!(r"email{sep}([a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{{2,}})")),
            phone: re(&format!(r"tel[ée]fono{sep}(\d{{10}})")),
            bare_number: re(r"^\d+$"),
            long_number: re(r"\b(\d{3,})\b"),
            department_hint: re(r"\b(ventas|it|marketing|finanzas|recursos humanos|rh)\b"),
        }
    })
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn parse_card(text: &str) -> CardFields {
    let p = patterns();
    let lowered = text.trim().to_lowercase();

    let fields = CardFields {
        name: capture(&p.name, &lowered),
        id: capture(&p.id, &lowered),
        department: capture(&p.department, &lowered),
        position: capture(&p.position, &lowered),
        email: capture(&p.email, &lowered),
        phone: capture(&p.phone, &lowered),
    };
    if !fields.is_empty() {
        return fields;
    }

    fallback_fields(text)
}

/// Unlabelled cards: first wordy line is the name, first 3+ digit number is
/// the id, first line naming a department is the department.
fn fallback_fields(text: &str) -> CardFields {
    let p = patterns();
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    CardFields {
        name: lines
            .iter()
            .find(|l| !p.bare_number.is_match(l) && l.chars().count() > 3)
            .map(|l| l.to_string()),
        id: capture(&p.long_number, text),
        department: lines
            .iter()
            .find(|l| p.department_hint.is_match(&l.to_lowercase()))
            .map(|l| l.to_string()),
        ..CardFields::default()
    }
}
