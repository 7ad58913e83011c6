use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use scorer::{run_score, run_zipf, LoadOptions, ScoreOptions, ZipfOptions};
use std::path::PathBuf;
use tfidf_core::config::ScoringConfig;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "scorer")]
#[command(about = "Word and document frequency analysis with tf-idf", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Input path (JSON, JSONL or .txt file, or a directory of them)
    #[arg(long)]
    input: PathBuf,
    /// JSON field used as the document key; documents sharing a key are merged
    #[arg(long, default_value = "id")]
    group_by: String,
    /// JSON field holding the text to tokenize
    #[arg(long, default_value = "body")]
    text_field: String,
    /// JSON file with analysis settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Keep stop words instead of removing them
    #[arg(long, default_value_t = false)]
    keep_stopwords: bool,
    /// Apply English stemming to tokens
    #[arg(long, default_value_t = false)]
    stem: bool,
}

impl CorpusArgs {
    fn load_options(&self) -> LoadOptions {
        LoadOptions { group_by: self.group_by.clone(), text_field: self.text_field.clone() }
    }

    fn scoring_config(&self) -> Result<ScoringConfig> {
        let mut config = match &self.config {
            Some(path) => ScoringConfig::from_file(path)?,
            None => ScoringConfig::default(),
        };
        if self.keep_stopwords { config.tokenizer.remove_stopwords = false; }
        if self.stem { config.tokenizer.stem = true; }
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the tf-idf table and write it with rankings and word counts
    Score {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Output directory
        #[arg(long)]
        output: PathBuf,
        /// Terms kept per document in top_terms.json
        #[arg(long)]
        top_n: Option<usize>,
        /// Also write the scored table as bincode
        #[arg(long, default_value_t = false)]
        binary: bool,
    },
    /// Rank terms by frequency and fit Zipf's law per document
    Zipf {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Output directory for zipf.jsonl
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Score { corpus, output, top_n, binary } => {
            let mut config = corpus.scoring_config()?;
            if let Some(n) = top_n { config.top_n = n; }
            let summary = run_score(&ScoreOptions { input: corpus.input.clone(), output, load: corpus.load_options(), config, binary })?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Zipf { corpus, output } => {
            let config = corpus.scoring_config()?;
            let fits = run_zipf(&ZipfOptions { input: corpus.input.clone(), output, load: corpus.load_options(), config })?;
            println!("{}", serde_json::to_string_pretty(&fits)?);
        }
    }
    Ok(())
}
