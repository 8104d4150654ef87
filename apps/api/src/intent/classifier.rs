use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::corpus::{self, STOP_WORDS};
use super::naive_bayes::{argmax, MultinomialNb};
use super::tfidf::TfidfVectorizer;

const MAX_FEATURES: usize = 1000;
const SMOOTHING_ALPHA: f64 = 1.0;
const SPLIT_SEED: u64 = 42;

/// What a question is asking for. Closed set; each maps to one answer path.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Count,
    HighestSalary,
    Statistics,
    DepartmentFilter,
    Youngest,
    SalaryPrediction,
}

impl Intent {
    pub const ALL: [Intent; 6] = [
        Intent::Count,
        Intent::HighestSalary,
        Intent::Statistics,
        Intent::DepartmentFilter,
        Intent::Youngest,
        Intent::SalaryPrediction,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("training set is empty")]
    EmptyTrainingSet,

    #[error("training set has no usable terms after stop-word removal")]
    EmptyVocabulary,
}

/// Classification of a single question.
#[derive(Debug, Clone, Serialize)]
pub struct IntentPrediction {
    pub intent: Intent,
    /// Posterior of `intent`, i.e. the maximum of `probabilities`.
    pub confidence: f64,
    pub probabilities: BTreeMap<Intent, f64>,
}

#[derive(Debug, Clone)]
pub struct IntentClassifier {
    vectorizer: TfidfVectorizer,
    model: MultinomialNb,
}

impl IntentClassifier {
    /// Trains on the built-in question corpus.
    pub fn train() -> Result<Self, ClassifierError> {
        Self::fit(&corpus::examples())
    }

    pub fn fit(examples: &[(Intent, &str)]) -> Result<Self, ClassifierError> {
        if examples.is_empty() {
            return Err(ClassifierError::EmptyTrainingSet);
        }

        let documents: Vec<String> = examples.iter().map(|(_, q)| normalize(q)).collect();
        let doc_refs: Vec<&str> = documents.iter().map(String::as_str).collect();

        let vectorizer = TfidfVectorizer::fit(&doc_refs, STOP_WORDS, MAX_FEATURES);
        if vectorizer.n_features() == 0 {
            return Err(ClassifierError::EmptyVocabulary);
        }

        let rows: Vec<Vec<f64>> = doc_refs.iter().map(|d| vectorizer.transform(d)).collect();
        let labels: Vec<usize> = examples.iter().map(|(i, _)| i.index()).collect();
        let model = MultinomialNb::fit(&rows, &labels, Intent::ALL.len(), SMOOTHING_ALPHA);

        Ok(Self { vectorizer, model })
    }

    pub fn predict(&self, question: &str) -> IntentPrediction {
        let row = self.vectorizer.transform(&normalize(question));
        let proba = self.model.predict_proba(&row);
        let best = argmax(&proba);

        IntentPrediction {
            intent: Intent::ALL[best],
            confidence: proba[best],
            probabilities: Intent::ALL.iter().copied().zip(proba).collect(),
        }
    }

    /// Share of `examples` whose predicted intent matches the label.
    pub fn accuracy(&self, examples: &[(Intent, &str)]) -> f64 {
        if examples.is_empty() {
            return 0.0;
        }
        let hits = examples
            .iter()
            .filter(|(intent, q)| {
                let row = self.vectorizer.transform(&normalize(q));
                self.model.predict(&row) == intent.index()
            })
            .count();
        hits as f64 / examples.len() as f64
    }

    /// Fits a throwaway model on a stratified 80% of `examples` and scores it
    /// on the remaining 20%.
    pub fn holdout_accuracy(examples: &[(Intent, &str)]) -> Result<f64, ClassifierError> {
        let (train, test) = stratified_split(examples);
        Ok(Self::fit(&train)?.accuracy(&test))
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.n_features()
    }
}

fn normalize(question: &str) -> String {
    question.trim().to_lowercase()
}

/// Per intent: seeded shuffle, then a fifth (rounded up) is held out. Intents
/// with a single example stay entirely in training.
fn stratified_split<'a>(
    examples: &[(Intent, &'a str)],
) -> (Vec<(Intent, &'a str)>, Vec<(Intent, &'a str)>) {
    let mut rng = StdRng::seed_from_u64(SPLIT_SEED);
    let mut train = Vec::with_capacity(examples.len());
    let mut test = Vec::new();

    for intent in Intent::ALL {
        let mut group: Vec<(Intent, &str)> = examples
            .iter()
            .copied()
            .filter(|(i, _)| *i == intent)
            .collect();
        group.shuffle(&mut rng);

        let n_test = if group.len() < 2 {
            0
        } else {
            group.len().div_ceil(5).min(group.len() - 1)
        };
        test.extend(group.drain(..n_test));
        train.extend(group);
    }
    (train, test)
}
