//! Example questions the intent classifier is trained on. Eight per intent.

use super::classifier::Intent;

/// Function words dropped before n-grams are built.
pub const STOP_WORDS: &[&str] = &[
    "el", "la", "los", "las", "de", "del", "en", "con", "por", "para", "a", "al", "se", "es",
    "son", "está", "están", "hay", "tiene", "tienen", "cuál", "cuántos", "quién", "qué", "cómo",
    "dónde", "cuándo",
];

pub const TRAINING_QUESTIONS: &[(Intent, &[&str])] = &[
    (
        Intent::Count,
        &[
            "¿Cuántos empleados hay?",
            "¿Cuántos trabajadores tenemos?",
            "¿Cuál es el total de empleados?",
            "¿Cuánta gente trabaja aquí?",
            "¿Cuántos hay en total?",
            "¿Cuántos empleados hay en la empresa?",
            "¿Cuántos trabajadores hay?",
            "¿Cuál es el número total de empleados?",
        ],
    ),
    (
        Intent::HighestSalary,
        &[
            "¿Quién gana más?",
            "¿Quién es el empleado mejor pagado?",
            "¿Cuál es el salario más alto?",
            "¿Quién tiene el sueldo más alto?",
            "¿Quién gana más dinero?",
            "¿Cuál es el empleado con mayor salario?",
            "¿Quién es el que más gana?",
            "¿Cuál es el sueldo máximo?",
        ],
    ),
    (
        Intent::Statistics,
        &[
            "¿Cuál es el promedio de edad?",
            "¿Cuál es la edad promedio?",
            "¿Cuál es el salario promedio?",
            "¿Cuál es el sueldo promedio?",
            "¿Cuál es la experiencia promedio?",
            "¿Cuál es el promedio de experiencia?",
            "¿Cuál es la media de edad?",
            "¿Cuál es el promedio de salarios?",
        ],
    ),
    (
        Intent::DepartmentFilter,
        &[
            "¿Cuántos empleados hay en ventas?",
            "¿Cuántos trabajadores hay en IT?",
            "¿Cuántos empleados hay en marketing?",
            "¿Cuántos hay en finanzas?",
            "¿Cuántos empleados hay en recursos humanos?",
            "¿Cuántos trabajadores hay en el departamento de ventas?",
            "¿Cuántos empleados trabajan en IT?",
            "¿Cuántos hay en el área de marketing?",
        ],
    ),
    (
        Intent::Youngest,
        &[
            "¿Quién es el más joven?",
            "¿Quién es el empleado más joven?",
            "¿Quién tiene menos edad?",
            "¿Quién es el más nuevo?",
            "¿Quién es el empleado con menos experiencia?",
            "¿Quién tiene menos años de experiencia?",
            "¿Quién es el más reciente?",
            "¿Quién es el empleado más reciente?",
        ],
    ),
    (
        Intent::SalaryPrediction,
        &[
            "¿Cuánto ganaría un empleado de 30 años en IT?",
            "¿Cuál sería el salario de alguien con maestría en marketing?",
            "¿Cuánto ganaría alguien de 25 años con 3 años de experiencia?",
            "¿Cuál sería el sueldo de un empleado de 40 años en ventas?",
            "¿Cuánto ganaría alguien con doctorado en finanzas?",
            "¿Cuál sería el salario de un técnico de 28 años?",
            "¿Cuánto ganaría un empleado con licenciatura y 5 años de experiencia?",
            "¿Cuál sería el sueldo de alguien de 35 años en recursos humanos?",
        ],
    ),
];

/// Flattens the corpus into `(intent, question)` pairs.
pub fn examples() -> Vec<(Intent, &'static str)> {
    TRAINING_QUESTIONS
        .iter()
        .flat_map(|(intent, questions)| questions.iter().map(move |q| (*intent, *q)))
        .collect()
}
