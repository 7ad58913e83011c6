use serde::{Deserialize, Serialize};

/// Anything that can be grouped as a token occurrence: the field used as the
/// document key and the field used as the term.
pub trait TokenRecord {
    fn document_id(&self) -> &str;
    fn term(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenOccurrence {
    pub document_id: String,
    pub term: String,
}

impl TokenOccurrence {
    pub fn new(document_id: impl Into<String>, term: impl Into<String>) -> Self {
        Self { document_id: document_id.into(), term: term.into() }
    }
}

impl TokenRecord for TokenOccurrence {
    fn document_id(&self) -> &str { &self.document_id }
    fn term(&self) -> &str { &self.term }
}

impl<A: AsRef<str>, B: AsRef<str>> TokenRecord for (A, B) {
    fn document_id(&self) -> &str { self.0.as_ref() }
    fn term(&self) -> &str { self.1.as_ref() }
}

impl<T: TokenRecord + ?Sized> TokenRecord for &T {
    fn document_id(&self) -> &str { (**self).document_id() }
    fn term(&self) -> &str { (**self).term() }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TermCount {
    pub document_id: String,
    pub term: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentTotal {
    pub document_id: String,
    pub total: u64,
}

/// One row of the tf-idf table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTerm {
    pub document_id: String,
    pub term: String,
    pub count: u64,
    pub total: u64,
    pub tf: f64,
    pub idf: f64,
    pub tf_idf: f64,
}
