//! Term counts, document totals and the tf-idf join.
//!
//! Every function takes the previous stage's table by reference and returns a
//! fresh table. Document frequency is a corpus-wide aggregate, so adding
//! documents means scoring the whole corpus again.

use crate::error::{Result, ScoreError};
use crate::table::{DocumentTotal, ScoredTerm, TermCount, TokenRecord};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Group token occurrences into one row per distinct `(document_id, term)`.
///
/// Rows come back sorted by `(document_id, term)`. An empty document id or
/// term rejects the whole input.
pub fn compute_counts<I>(tokens: I) -> Result<Vec<TermCount>>
where
    I: IntoIterator,
    I::Item: TokenRecord,
{
    let mut counts: HashMap<(String, String), u64> = HashMap::new();
    for (position, token) in tokens.into_iter().enumerate() {
        let document_id = token.document_id();
        let term = token.term();
        if document_id.trim().is_empty() {
            return Err(ScoreError::InvalidInput { position, reason: "empty document_id" });
        }
        if term.trim().is_empty() {
            return Err(ScoreError::InvalidInput { position, reason: "empty term" });
        }
        *counts.entry((document_id.to_owned(), term.to_owned())).or_insert(0) += 1;
    }

    let mut rows: Vec<TermCount> = counts
        .into_iter()
        .map(|((document_id, term), count)| TermCount { document_id, term, count })
        .collect();
    rows.sort_by(|a, b| (&a.document_id, &a.term).cmp(&(&b.document_id, &b.term)));
    Ok(rows)
}

/// Sum counts per document. Sorted by `document_id`.
pub fn compute_totals(counts: &[TermCount]) -> Vec<DocumentTotal> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for row in counts {
        *totals.entry(row.document_id.as_str()).or_insert(0) += row.count;
    }
    totals
        .into_iter()
        .map(|(document_id, total)| DocumentTotal { document_id: document_id.to_owned(), total })
        .collect()
}

/// Number of distinct documents containing each term.
///
/// Repeated `(document_id, term)` rows count once.
pub fn document_frequency(counts: &[TermCount]) -> HashMap<String, u64> {
    let mut containing: HashMap<&str, HashSet<&str>> = HashMap::new();
    for row in counts {
        containing.entry(row.term.as_str()).or_default().insert(row.document_id.as_str());
    }
    containing
        .into_iter()
        .map(|(term, documents)| (term.to_owned(), documents.len() as u64))
        .collect()
}

/// Join counts to totals and compute `tf`, `idf = ln(documents / df)` and `tf_idf`.
///
/// `documents` is the corpus size `D`. Output rows follow the order of `counts`.
pub fn score(counts: &[TermCount], totals: &[DocumentTotal], documents: usize) -> Result<Vec<ScoredTerm>> {
    if documents == 0 {
        return Err(ScoreError::DegenerateCorpus("corpus has no documents"));
    }

    // document_id -> (total, number of rows carrying that id)
    let mut total_index: HashMap<&str, (u64, usize)> = HashMap::with_capacity(totals.len());
    for row in totals {
        total_index.entry(row.document_id.as_str()).or_insert((row.total, 0)).1 += 1;
    }

    let mut seen: HashSet<(&str, &str)> = HashSet::with_capacity(counts.len());
    let mut observed: HashSet<&str> = HashSet::new();
    for row in counts {
        if !seen.insert((row.document_id.as_str(), row.term.as_str())) {
            return Err(inconsistent(row, "duplicate (document_id, term) row".into()));
        }
        observed.insert(row.document_id.as_str());
    }
    if observed.len() > documents {
        return Err(ScoreError::CorpusSizeMismatch { documents, observed: observed.len() });
    }

    let df = document_frequency(counts);
    let n = documents as f64;
    let mut scored = Vec::with_capacity(counts.len());
    for row in counts {
        let total = match total_index.get(row.document_id.as_str()) {
            Some(&(total, 1)) => total,
            Some(&(_, matches)) => return Err(join_mismatch(row, matches)),
            None => return Err(join_mismatch(row, 0)),
        };
        if row.count == 0 {
            return Err(inconsistent(row, "count is zero".into()));
        }
        if row.count > total {
            return Err(inconsistent(row, format!("count {} exceeds document total {}", row.count, total)));
        }

        let tf = row.count as f64 / total as f64;
        // every term in `counts` has an entry
        let idf = (n / df[row.term.as_str()] as f64).ln();
        scored.push(ScoredTerm {
            document_id: row.document_id.clone(),
            term: row.term.clone(),
            count: row.count,
            total,
            tf,
            idf,
            tf_idf: tf * idf,
        });
    }

    tracing::debug!(documents, terms = df.len(), rows = scored.len(), "scored term table");
    Ok(scored)
}

/// `score` with the corpus size taken from the distinct documents in `counts`.
pub fn score_corpus(counts: &[TermCount], totals: &[DocumentTotal]) -> Result<Vec<ScoredTerm>> {
    let documents = counts.iter().map(|row| row.document_id.as_str()).collect::<HashSet<_>>().len();
    score(counts, totals, documents)
}

/// Count, total and score a token stream in one call.
pub fn bind_tf_idf<I>(tokens: I) -> Result<Vec<ScoredTerm>>
where
    I: IntoIterator,
    I::Item: TokenRecord,
{
    let counts = compute_counts(tokens)?;
    let totals = compute_totals(&counts);
    score_corpus(&counts, &totals)
}

fn join_mismatch(row: &TermCount, matches: usize) -> ScoreError {
    ScoreError::JoinMismatch { document_id: row.document_id.clone(), term: row.term.clone(), matches }
}

fn inconsistent(row: &TermCount, reason: String) -> ScoreError {
    ScoreError::InconsistentTable { document_id: row.document_id.clone(), term: row.term.clone(), reason }
}
