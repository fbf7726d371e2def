// Ranking Engine: per-call TF-IDF lexical similarity blended with skill overlap.
// Stateless; every call refits its own vocabulary.

pub mod handlers;
pub mod models;
pub mod ranker;
pub mod tfidf;
