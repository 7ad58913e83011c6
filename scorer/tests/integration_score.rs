use scorer::{load_documents, run_score, run_zipf, LoadOptions, ScoreOptions, ZipfOptions};
use std::fs;
use tempfile::tempdir;
use tfidf_core::config::ScoringConfig;
use tfidf_core::persist::{load_meta, load_scored, load_scored_bin, load_top_terms, load_word_counts, load_zipf, OutputPaths};

fn write_corpus(dir: &std::path::Path) {
    let lines = [
        r#"{"id": "sense", "author": "Austen", "body": "Elinor walked with Marianne. Marianne wept."}"#,
        r#"{"id": "pride", "author": "Austen", "body": "Elizabeth walked to Netherfield with Darcy."}"#,
        r#"{"id": "moby", "author": "Melville", "body": "Ishmael walked the deck. The whale, the whale!"}"#,
    ];
    fs::write(dir.join("books.jsonl"), lines.join("\n")).unwrap();
}

#[test]
fn score_writes_all_tables() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());
    let out = dir.path().join("out");

    let summary = run_score(&ScoreOptions {
        input: dir.path().join("books.jsonl"),
        output: out.clone(),
        load: LoadOptions::default(),
        config: ScoringConfig { top_n: 2, ..ScoringConfig::default() },
        binary: true,
    })
    .unwrap();
    assert_eq!(summary.num_docs, 3);

    let paths = OutputPaths::new(&out);
    let scored = load_scored(&paths).unwrap();
    assert_eq!(scored.len(), summary.num_rows);
    assert_eq!(load_scored_bin(&paths).unwrap().len(), scored.len());

    let walked: Vec<_> = scored.iter().filter(|r| r.term == "walked").collect();
    assert_eq!(walked.len(), 3);
    assert!(walked.iter().all(|r| r.tf_idf == 0.0));

    let top = load_top_terms(&paths).unwrap();
    assert_eq!(top["moby"][0].term, "whale");
    assert!(top.values().all(|rows| rows.len() <= 2));

    let words = load_word_counts(&paths).unwrap();
    assert_eq!(words[0].term, "walked");
    assert_eq!(words[0].count, 3);

    let meta = load_meta(&paths).unwrap();
    assert_eq!(meta.num_docs, 3);
    assert_eq!(meta.num_rows, summary.num_rows);
}

#[test]
fn group_by_author_merges_books() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());
    let load = LoadOptions { group_by: "author".into(), ..LoadOptions::default() };

    let summary = run_score(&ScoreOptions {
        input: dir.path().to_path_buf(),
        output: dir.path().join("by_author"),
        load,
        config: ScoringConfig::default(),
        binary: false,
    })
    .unwrap();
    assert_eq!(summary.num_docs, 2);

    let scored = load_scored(&OutputPaths::new(dir.path().join("by_author"))).unwrap();
    let austen_walked = scored.iter().find(|r| r.document_id == "Austen" && r.term == "walked").unwrap();
    assert_eq!(austen_walked.count, 2);
}

#[test]
fn text_files_use_their_stem_as_key() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("emma.txt"), "Emma Woodhouse, handsome, clever, and rich.").unwrap();
    fs::write(dir.path().join("persuasion.txt"), "Sir Walter Elliot, of Kellynch Hall.").unwrap();

    let docs = load_documents(dir.path(), &LoadOptions::default()).unwrap();
    let keys: Vec<&str> = docs.iter().map(|d| d.key.as_str()).collect();
    assert_eq!(keys, vec!["emma", "persuasion"]);
}

#[test]
fn missing_group_field_is_an_error() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());
    let load = LoadOptions { group_by: "title".into(), ..LoadOptions::default() };
    assert!(load_documents(dir.path(), &load).is_err());
}

#[test]
fn empty_corpus_fails_scoring() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("empty.json"), "[]").unwrap();
    let err = run_score(&ScoreOptions {
        input: dir.path().join("empty.json"),
        output: dir.path().join("out"),
        load: LoadOptions::default(),
        config: ScoringConfig::default(),
        binary: false,
    })
    .unwrap_err();
    assert!(err.to_string().contains("degenerate corpus"));
}

#[test]
fn zipf_writes_ranks() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());
    let out = dir.path().join("zipf");
    let config = ScoringConfig { zipf_min_rank: 1, zipf_max_rank: 100, ..ScoringConfig::default() };

    let fits = run_zipf(&ZipfOptions {
        input: dir.path().join("books.jsonl"),
        output: Some(out.clone()),
        load: LoadOptions::default(),
        config,
    })
    .unwrap();
    assert!(fits.contains_key("moby"));
    assert!(fits["moby"].slope < 0.0);

    let rows = load_zipf(&OutputPaths::new(&out)).unwrap();
    let moby_top = rows.iter().find(|r| r.document_id == "moby" && r.rank == 1).unwrap();
    assert_eq!(moby_top.term, "whale");
}
