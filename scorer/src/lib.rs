use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;
use tfidf_core::config::ScoringConfig;
use tfidf_core::frequency::{corpus_word_counts, fit_zipf_per_document, zipf_ranks, PowerLawFit};
use tfidf_core::persist::{save_meta, save_scored, save_scored_bin, save_top_terms, save_word_counts, save_zipf, OutputPaths, RunMeta};
use tfidf_core::rank::top_terms_per_document;
use tfidf_core::tokenizer::{document_tokens, TokenizerConfig};
use tfidf_core::{bind_tf_idf, compute_counts, compute_totals, score_corpus, TokenOccurrence};
use walkdir::WalkDir;

use std::collections::{BTreeMap, HashSet};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// A document after grouping: `key` is the value of the group-by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDoc {
    pub key: String,
    pub text: String,
}

/// Which JSON fields act as the document key and the text to tokenize.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub group_by: String,
    pub text_field: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { group_by: "id".into(), text_field: "body".into() }
    }
}

pub struct ScoreOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub load: LoadOptions,
    pub config: ScoringConfig,
    /// Also write `scored.bin`.
    pub binary: bool,
}

pub struct ZipfOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub load: LoadOptions,
    pub config: ScoringConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub num_docs: usize,
    pub num_terms: usize,
    pub num_rows: usize,
}

/// JSON, JSONL and plain-text files under `input` (or `input` itself), in path order.
pub fn collect_input_files(input: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl" | "txt") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        bail!("input path {} does not exist", input.display());
    }
    Ok(files)
}

pub fn load_documents(input: &Path, opts: &LoadOptions) -> Result<Vec<InputDoc>> {
    let mut docs = Vec::new();
    for file in collect_input_files(input)? {
        match file.extension().and_then(|s| s.to_str()) {
            Some("jsonl") => load_jsonl(&file, opts, &mut docs)?,
            Some("txt") => load_text(&file, &mut docs)?,
            _ => load_json(&file, opts, &mut docs)?,
        }
    }
    tracing::info!(documents = docs.len(), input = %input.display(), "loaded documents");
    Ok(docs)
}

fn load_jsonl(file: &Path, opts: &LoadOptions, docs: &mut Vec<InputDoc>) -> Result<()> {
    let f = File::open(file)?;
    let reader = BufReader::new(f);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let value: Value = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid JSON", file.display(), lineno + 1))?;
        docs.push(doc_from_value(&value, opts).with_context(|| format!("{}:{}", file.display(), lineno + 1))?);
    }
    Ok(())
}

fn load_json(file: &Path, opts: &LoadOptions, docs: &mut Vec<InputDoc>) -> Result<()> {
    let f = File::open(file)?;
    let reader = BufReader::new(f);
    let json: Value = serde_json::from_reader(reader).with_context(|| format!("{}: invalid JSON", file.display()))?;
    match json {
        Value::Array(arr) => {
            for v in arr {
                docs.push(doc_from_value(&v, opts).with_context(|| file.display().to_string())?);
            }
        }
        Value::Object(_) => {
            docs.push(doc_from_value(&json, opts).with_context(|| file.display().to_string())?);
        }
        _ => tracing::warn!(file = %file.display(), "skipping JSON that is neither an object nor an array"),
    }
    Ok(())
}

fn load_text(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let key = match file.file_stem().and_then(|s| s.to_str()) {
        Some(stem) => stem.to_string(),
        None => bail!("{}: file name is not valid UTF-8", file.display()),
    };
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    docs.push(InputDoc { key, text });
    Ok(())
}

fn doc_from_value(value: &Value, opts: &LoadOptions) -> Result<InputDoc> {
    let key = match value.get(&opts.group_by) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => bail!("group-by field `{}` must be a string or number, got {other}", opts.group_by),
        None => bail!("document has no `{}` field", opts.group_by),
    };
    let text = match value.get(&opts.text_field) {
        Some(Value::String(s)) => s.clone(),
        Some(_) => bail!("text field `{}` must be a string", opts.text_field),
        None => bail!("document has no `{}` field", opts.text_field),
    };
    Ok(InputDoc { key, text })
}

/// Tokenize every document. Documents sharing a key are merged into one.
pub fn tokenize_documents(docs: &[InputDoc], config: &TokenizerConfig) -> Vec<TokenOccurrence> {
    let mut tokens = Vec::new();
    for doc in docs {
        let before = tokens.len();
        tokens.extend(document_tokens(&doc.key, &doc.text, config));
        if tokens.len() == before {
            tracing::warn!(document = %doc.key, "document produced no tokens");
        }
    }
    tokens
}

pub fn run_score(opts: &ScoreOptions) -> Result<RunSummary> {
    let docs = load_documents(&opts.input, &opts.load)?;
    let tokens = tokenize_documents(&docs, &opts.config.tokenizer);

    let counts = compute_counts(&tokens)?;
    let totals = compute_totals(&counts);
    let scored = score_corpus(&counts, &totals)?;
    let top = top_terms_per_document(&scored, opts.config.top_n);
    let words = corpus_word_counts(&counts);

    let out_paths = OutputPaths::new(&opts.output);
    save_scored(&out_paths, &scored)?;
    if opts.binary {
        save_scored_bin(&out_paths, &scored)?;
    }
    save_top_terms(&out_paths, &top)?;
    save_word_counts(&out_paths, &words)?;

    let summary = RunSummary {
        num_docs: totals.len(),
        num_terms: counts.iter().map(|c| c.term.as_str()).collect::<HashSet<_>>().len(),
        num_rows: scored.len(),
    };
    let meta = RunMeta {
        num_docs: summary.num_docs,
        num_terms: summary.num_terms,
        num_rows: summary.num_rows,
        created_at: time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339).unwrap_or_else(|_| "".into()),
        version: 1,
    };
    save_meta(&out_paths, &meta)?;

    tracing::info!(num_docs = summary.num_docs, num_terms = summary.num_terms, output = %opts.output.display(), "scoring complete");
    Ok(summary)
}

pub fn run_zipf(opts: &ZipfOptions) -> Result<BTreeMap<String, PowerLawFit>> {
    let docs = load_documents(&opts.input, &opts.load)?;
    let tokens = tokenize_documents(&docs, &opts.config.tokenizer);
    let scored = bind_tf_idf(&tokens)?;
    let rows = zipf_ranks(&scored);
    let fits = fit_zipf_per_document(&rows, opts.config.zipf_ranks());

    for (document, fit) in &fits {
        tracing::info!(document = %document, slope = fit.slope, intercept = fit.intercept, points = fit.points, "zipf fit");
    }
    if let Some(output) = &opts.output {
        save_zipf(&OutputPaths::new(output), &rows)?;
    }
    Ok(fits)
}
