//! Selecting the highest tf-idf terms.
//!
//! Ties in `tf_idf` are broken by `term`, then `document_id`, both ascending,
//! so a selection of `n` rows is always exactly reproducible.

use crate::table::ScoredTerm;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Descending `tf_idf`, then ascending `term`, then ascending `document_id`.
pub fn by_tf_idf(a: &ScoredTerm, b: &ScoredTerm) -> Ordering {
    b.tf_idf
        .total_cmp(&a.tf_idf)
        .then_with(|| a.term.cmp(&b.term))
        .then_with(|| a.document_id.cmp(&b.document_id))
}

/// The `n` best rows across the whole table.
pub fn top_terms(scored: &[ScoredTerm], n: usize) -> Vec<ScoredTerm> {
    let mut rows: Vec<&ScoredTerm> = scored.iter().collect();
    rows.sort_by(|a, b| by_tf_idf(a, b));
    rows.into_iter().take(n).cloned().collect()
}

/// At most `n` best rows for each document, keyed by document id.
pub fn top_terms_per_document(scored: &[ScoredTerm], n: usize) -> BTreeMap<String, Vec<ScoredTerm>> {
    let mut grouped: BTreeMap<&str, Vec<&ScoredTerm>> = BTreeMap::new();
    for row in scored {
        grouped.entry(row.document_id.as_str()).or_default().push(row);
    }
    grouped
        .into_iter()
        .map(|(document_id, mut rows)| {
            rows.sort_by(|a, b| by_tf_idf(a, b));
            (document_id.to_owned(), rows.into_iter().take(n).cloned().collect())
        })
        .collect()
}
