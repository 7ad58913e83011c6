use tfidf_core::frequency::{fit_zipf, fit_zipf_per_document, zipf_ranks, ZipfRow};
use tfidf_core::rank::{top_terms, top_terms_per_document};
use tfidf_core::{bind_tf_idf, ScoredTerm, TokenOccurrence};

fn corpus() -> Vec<ScoredTerm> {
    let mut tokens = Vec::new();
    for (doc, text) in [
        ("Moby Dick", "whale whale whale sea sea ship captain"),
        ("Emma", "sea ball ball ball letter party"),
    ] {
        tokens.extend(text.split_whitespace().map(|t| TokenOccurrence::new(doc, t)));
    }
    bind_tf_idf(&tokens).unwrap()
}

#[test]
fn per_document_top_terms_are_deterministic() {
    let top = top_terms_per_document(&corpus(), 2);
    let moby: Vec<&str> = top["Moby Dick"].iter().map(|r| r.term.as_str()).collect();
    assert_eq!(moby, vec!["whale", "captain"]);
    let emma: Vec<&str> = top["Emma"].iter().map(|r| r.term.as_str()).collect();
    assert_eq!(emma, vec!["ball", "letter"]);
}

#[test]
fn global_top_terms_interleave_documents() {
    let top = top_terms(&corpus(), 3);
    let picked: Vec<(&str, &str)> = top.iter().map(|r| (r.document_id.as_str(), r.term.as_str())).collect();
    assert_eq!(picked, vec![("Emma", "ball"), ("Moby Dick", "whale"), ("Emma", "letter")]);
}

#[test]
fn zipf_ranks_are_contiguous_per_document() {
    let rows = zipf_ranks(&corpus());
    let moby: Vec<&ZipfRow> = rows.iter().filter(|r| r.document_id == "Moby Dick").collect();
    let ranks: Vec<usize> = moby.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
    assert_eq!(moby[0].term, "whale");
    assert_eq!(moby[1].term, "sea");
    // ties on count fall back to term order
    assert_eq!(moby[2].term, "captain");
    assert!((moby[0].term_frequency - 3.0 / 7.0).abs() < 1e-12);
}

#[test]
fn fit_recovers_exact_power_law() {
    let rows: Vec<ZipfRow> = (1..=50)
        .map(|rank| ZipfRow {
            document_id: "synthetic".into(),
            term: format!("t{rank}"),
            count: 1,
            total: 1,
            rank,
            term_frequency: 0.1 / rank as f64,
        })
        .collect();
    let fit = fit_zipf(&rows, 11..50).unwrap();
    assert_eq!(fit.points, 39);
    assert!((fit.slope + 1.0).abs() < 1e-9);
    assert!((fit.intercept - 0.1f64.log10()).abs() < 1e-9);
    assert!((fit.predict(20) - 0.005).abs() < 1e-9);

    let per_doc = fit_zipf_per_document(&rows, 11..50);
    assert_eq!(per_doc.len(), 1);
    assert!(fit_zipf(&rows, 60..).is_none());
}
