//! TF-IDF vectorizer over word unigrams and bigrams.
//!
//! Tokens are runs of two or more word characters in the lower-cased text.
//! Stop words are removed *before* bigrams are formed, so "empleados hay en
//! ventas" yields the bigram "empleados ventas".

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("static regex"))
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    stop_words: HashSet<String>,
    /// term -> column index; columns are in alphabetical term order
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Fits vocabulary and idf weights. Keeps at most `max_features` terms,
    /// preferring those with the highest total count across `documents`.
    pub fn fit(documents: &[&str], stop_words: &[&str], max_features: usize) -> Self {
        let stop_words: HashSet<String> = stop_words.iter().map(|w| w.to_string()).collect();

        let mut total_counts: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let terms = analyze(doc, &stop_words);
            let mut seen = HashSet::new();
            for term in terms {
                *total_counts.entry(term.clone()).or_default() += 1;
                if seen.insert(term.clone()) {
                    *doc_freq.entry(term).or_default() += 1;
                }
            }
        }

        let mut ranked: Vec<(String, usize)> = total_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_features);

        let kept: BTreeMap<String, usize> = ranked.into_iter().collect();
        let n_docs = documents.len() as f64;

        let mut vocabulary = HashMap::with_capacity(kept.len());
        let mut idf = Vec::with_capacity(kept.len());
        for (index, term) in kept.keys().enumerate() {
            let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
            idf.push(((1.0 + n_docs) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(term.clone(), index);
        }

        Self {
            stop_words,
            vocabulary,
            idf,
        }
    }

    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Dense, L2-normalised TF-IDF row for `text`. All zeros when no term of
    /// `text` is in the vocabulary.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut row = vec![0.0; self.n_features()];
        for term in analyze(text, &self.stop_words) {
            if let Some(&col) = self.vocabulary.get(&term) {
                row[col] += 1.0;
            }
        }

        for (value, idf) in row.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut row {
                *value /= norm;
            }
        }
        row
    }
}

/// Lower-cases, tokenizes, drops stop words, and emits unigrams then bigrams.
fn analyze(text: &str, stop_words: &HashSet<String>) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = token_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !stop_words.contains(*t))
        .collect();

    let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    terms.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop() -> HashSet<String> {
        ["hay", "en", "cuántos"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_analyze_drops_stop_words_before_bigrams() {
        let terms = analyze("¿Cuántos empleados hay en Ventas?", &stop());
        assert_eq!(terms, vec!["empleados", "ventas", "empleados ventas"]);
    }

    #[test]
    fn test_analyze_skips_single_character_tokens() {
        let terms = analyze("a b cd", &HashSet::new());
        assert_eq!(terms, vec!["cd"]);
    }

    #[test]
    fn test_transform_rows_are_unit_length() {
        let docs = ["salario promedio", "edad promedio", "salario alto"];
        let v = TfidfVectorizer::fit(&docs, &[], 1000);
        let row = v.transform("salario promedio");
        let norm: f64 = row.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_text_transforms_to_zeros() {
        let v = TfidfVectorizer::fit(&["salario promedio"], &[], 1000);
        assert!(v.transform("nada conocido").iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_rarer_terms_get_higher_idf() {
        let docs = ["salario alto", "salario bajo", "salario medio"];
        let v = TfidfVectorizer::fit(&docs, &[], 1000);
        let salario = v.idf[v.vocabulary["salario"]];
        let alto = v.idf[v.vocabulary["alto"]];
        assert!((salario - 1.0).abs() < 1e-12);
        assert!(alto > salario);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let docs = ["rojo rojo rojo azul", "rojo verde"];
        let v = TfidfVectorizer::fit(&docs, &[], 1);
        assert_eq!(v.n_features(), 1);
        assert!(v.vocabulary.contains_key("rojo"));
    }
}
