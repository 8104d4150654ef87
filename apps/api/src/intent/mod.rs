// Intent classification: TF-IDF features + multinomial naive Bayes,
// trained once at startup on a fixed corpus of example questions.

pub mod classifier;
pub mod corpus;
pub mod naive_bayes;
pub mod tfidf;

pub use classifier::{Intent, IntentClassifier};
