//! Word and document frequency analysis: term counts, document totals and
//! tf-idf scores over a stream of `(document_id, term)` token occurrences.

pub mod config;
pub mod error;
pub mod frequency;
pub mod persist;
pub mod rank;
pub mod table;
pub mod tfidf;
pub mod tokenizer;

pub use error::{Result, ScoreError};
pub use table::{DocumentTotal, ScoredTerm, TermCount, TokenOccurrence, TokenRecord};
pub use tfidf::{bind_tf_idf, compute_counts, compute_totals, document_frequency, score, score_corpus};
