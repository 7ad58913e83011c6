//! Corpus-wide word counts and Zipf's law.

use crate::table::{ScoredTerm, TermCount};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::ops::RangeBounds;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub term: String,
    pub count: u64,
}

/// Rank of a term within its document by raw count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZipfRow {
    pub document_id: String,
    pub term: String,
    pub count: u64,
    pub total: u64,
    /// 1-based
    pub rank: usize,
    pub term_frequency: f64,
}

/// Least-squares line through `log10(term_frequency)` against `log10(rank)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerLawFit {
    pub intercept: f64,
    pub slope: f64,
    pub points: usize,
}

impl PowerLawFit {
    /// Expected term frequency at `rank` under the fitted law.
    pub fn predict(&self, rank: usize) -> f64 {
        10f64.powf(self.intercept + self.slope * (rank as f64).log10())
    }
}

/// Total occurrences of each term over every document, most frequent first.
pub fn corpus_word_counts(counts: &[TermCount]) -> Vec<WordCount> {
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for row in counts {
        *totals.entry(row.term.as_str()).or_insert(0) += row.count;
    }
    let mut words: Vec<WordCount> = totals
        .into_iter()
        .map(|(term, count)| WordCount { term: term.to_owned(), count })
        .collect();
    words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.term.cmp(&b.term)));
    words
}

/// Order each document's terms by count (ties by term) and number them from 1.
pub fn zipf_ranks(scored: &[ScoredTerm]) -> Vec<ZipfRow> {
    let mut grouped: BTreeMap<&str, Vec<&ScoredTerm>> = BTreeMap::new();
    for row in scored {
        grouped.entry(row.document_id.as_str()).or_default().push(row);
    }

    let mut out = Vec::with_capacity(scored.len());
    for (_, mut rows) in grouped {
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.term.cmp(&b.term)));
        for (i, row) in rows.into_iter().enumerate() {
            out.push(ZipfRow {
                document_id: row.document_id.clone(),
                term: row.term.clone(),
                count: row.count,
                total: row.total,
                rank: i + 1,
                term_frequency: row.tf,
            });
        }
    }
    out
}

/// Fit a power law to the rows whose rank falls in `ranks`.
///
/// Returns `None` when fewer than two rows fall in `ranks`, or when all of
/// them share one rank so the slope is undefined.
pub fn fit_zipf<'a, I, R>(rows: I, ranks: R) -> Option<PowerLawFit>
where
    I: IntoIterator<Item = &'a ZipfRow>,
    R: RangeBounds<usize>,
{
    let points: Vec<(f64, f64)> = rows
        .into_iter()
        .filter(|row| ranks.contains(&row.rank) && row.term_frequency > 0.0)
        .map(|row| ((row.rank as f64).log10(), row.term_frequency.log10()))
        .collect();
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, y) in &points {
        sxx += (x - mean_x) * (x - mean_x);
        sxy += (x - mean_x) * (y - mean_y);
    }
    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    Some(PowerLawFit { intercept: mean_y - slope * mean_x, slope, points: points.len() })
}

/// `fit_zipf` applied to each document separately. Documents without a fit are left out.
pub fn fit_zipf_per_document<R>(rows: &[ZipfRow], ranks: R) -> BTreeMap<String, PowerLawFit>
where
    R: RangeBounds<usize> + Clone,
{
    let mut grouped: BTreeMap<&str, Vec<&ZipfRow>> = BTreeMap::new();
    for row in rows {
        grouped.entry(row.document_id.as_str()).or_default().push(row);
    }
    grouped
        .into_iter()
        .filter_map(|(document_id, rows)| {
            fit_zipf(rows, ranks.clone()).map(|fit| (document_id.to_owned(), fit))
        })
        .collect()
}
