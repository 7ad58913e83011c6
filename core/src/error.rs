//! Error types for the scoring pipeline.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// A token occurrence has an empty document id or term.
    #[error("invalid token at position {position}: {reason}")]
    InvalidInput { position: usize, reason: &'static str },

    /// A term-count row matched zero or several document-total rows.
    #[error("term `{term}` in document `{document_id}` matched {matches} document totals, expected exactly one")]
    JoinMismatch { document_id: String, term: String, matches: usize },

    /// No documents to score against.
    #[error("degenerate corpus: {0}")]
    DegenerateCorpus(&'static str),

    /// The supplied document count is smaller than the documents seen in the counts table.
    #[error("corpus size {documents} is smaller than the {observed} documents present in the counts table")]
    CorpusSizeMismatch { documents: usize, observed: usize },

    /// A caller-built table breaks the count/total invariants.
    #[error("inconsistent row for term `{term}` in document `{document_id}`: {reason}")]
    InconsistentTable { document_id: String, term: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ScoreError>;
