use crate::frequency::{WordCount, ZipfRow};
use crate::table::ScoredTerm;
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMeta {
    pub num_docs: usize,
    pub num_terms: usize,
    pub num_rows: usize,
    pub created_at: String,
    pub version: u32,
}

pub struct OutputPaths {
    pub root: PathBuf,
}

impl OutputPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn scored(&self) -> PathBuf { self.root.join("scored.jsonl") }
    pub fn scored_bin(&self) -> PathBuf { self.root.join("scored.bin") }
    pub fn top_terms(&self) -> PathBuf { self.root.join("top_terms.json") }
    pub fn word_counts(&self) -> PathBuf { self.root.join("word_counts.json") }
    pub fn zipf(&self) -> PathBuf { self.root.join("zipf.jsonl") }
    pub fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

fn save_jsonl<T: Serialize>(root: &Path, path: PathBuf, rows: &[T]) -> Result<()> {
    create_dir_all(root)?;
    let mut w = BufWriter::new(File::create(path)?);
    for row in rows {
        serde_json::to_writer(&mut w, row)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}

fn load_jsonl<T: DeserializeOwned>(path: PathBuf) -> Result<Vec<T>> {
    let reader = BufReader::new(File::open(path)?);
    let mut rows = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        rows.push(serde_json::from_str(&line)?);
    }
    Ok(rows)
}

fn save_json<T: Serialize + ?Sized>(root: &Path, path: PathBuf, value: &T) -> Result<()> {
    create_dir_all(root)?;
    let mut f = File::create(path)?;
    let json = serde_json::to_string_pretty(value)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: PathBuf) -> Result<T> {
    let mut f = File::open(path)?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    Ok(serde_json::from_str(&buf)?)
}

pub fn save_scored(paths: &OutputPaths, rows: &[ScoredTerm]) -> Result<()> {
    save_jsonl(&paths.root, paths.scored(), rows)
}

pub fn load_scored(paths: &OutputPaths) -> Result<Vec<ScoredTerm>> {
    load_jsonl(paths.scored())
}

pub fn save_scored_bin(paths: &OutputPaths, rows: &[ScoredTerm]) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.scored_bin())?;
    let bytes = bincode::serialize(rows)?;
    f.write_all(&bytes)?;
    Ok(())
}

pub fn load_scored_bin(paths: &OutputPaths) -> Result<Vec<ScoredTerm>> {
    let mut f = File::open(paths.scored_bin())?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let rows = bincode::deserialize(&buf)?;
    Ok(rows)
}

pub fn save_top_terms(paths: &OutputPaths, top: &BTreeMap<String, Vec<ScoredTerm>>) -> Result<()> {
    save_json(&paths.root, paths.top_terms(), top)
}

pub fn load_top_terms(paths: &OutputPaths) -> Result<BTreeMap<String, Vec<ScoredTerm>>> {
    load_json(paths.top_terms())
}

pub fn save_word_counts(paths: &OutputPaths, words: &[WordCount]) -> Result<()> {
    save_json(&paths.root, paths.word_counts(), words)
}

pub fn load_word_counts(paths: &OutputPaths) -> Result<Vec<WordCount>> {
    load_json(paths.word_counts())
}

pub fn save_zipf(paths: &OutputPaths, rows: &[ZipfRow]) -> Result<()> {
    save_jsonl(&paths.root, paths.zipf(), rows)
}

pub fn load_zipf(paths: &OutputPaths) -> Result<Vec<ZipfRow>> {
    load_jsonl(paths.zipf())
}

pub fn save_meta(paths: &OutputPaths, meta: &RunMeta) -> Result<()> {
    save_json(&paths.root, paths.meta(), meta)
}

pub fn load_meta(paths: &OutputPaths) -> Result<RunMeta> {
    load_json(paths.meta())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn scored_rows_survive_jsonl_and_bincode() {
        let dir = tempdir().unwrap();
        let paths = OutputPaths::new(dir.path().join("out"));
        let rows = vec![ScoredTerm {
            document_id: "Emma".into(),
            term: "emma".into(),
            count: 1,
            total: 4,
            tf: 0.25,
            idf: 0.5,
            tf_idf: 0.125,
        }];
        save_scored(&paths, &rows).unwrap();
        save_scored_bin(&paths, &rows).unwrap();
        assert_eq!(load_scored(&paths).unwrap(), rows);
        assert_eq!(load_scored_bin(&paths).unwrap(), rows);
    }
}
