use anyhow::{Context, Result};
use clap::Parser;
use engine::{DocId, DocumentStatus, SearchEngine, MAX_RESULT_DOCUMENT_COUNT};
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: DocId,
    text: String,
    status: DocumentStatus,
    ratings: Vec<i32>,
}

#[derive(Parser)]
#[command(name = "repl")]
#[command(about = "Interactive search over an in-memory TF-IDF index", long_about = None)]
struct Args {
    /// JSONL corpus to index at startup, one {id, text, status, ratings} per line
    #[arg(long)]
    corpus: Option<String>,
    /// Stop words, separated by single spaces
    #[arg(long, default_value = "")]
    stop_words: String,
    /// Maximum number of hits per query
    #[arg(long, default_value_t = MAX_RESULT_DOCUMENT_COUNT)]
    max_results: usize,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let mut engine = SearchEngine::with_max_results(args.max_results);
    if !args.stop_words.is_empty() {
        engine.set_stop_words(&args.stop_words);
    }
    if let Some(path) = &args.corpus {
        load_corpus(&mut engine, path)?;
    }
    tracing::info!(documents = engine.get_document_count(), "ready for queries");

    // One query per input line; hits go to stdout as one JSON array per line.
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let query = line?;
        if query.trim().is_empty() {
            continue;
        }
        match engine.find_top_documents(&query) {
            Ok(hits) => {
                serde_json::to_writer(&mut stdout, &hits)?;
                writeln!(stdout)?;
            }
            Err(err) => tracing::warn!(%err, "query rejected"),
        }
    }
    Ok(())
}

fn load_corpus(engine: &mut SearchEngine, path: &str) -> Result<()> {
    let file = File::open(path).with_context(|| format!("opening corpus {path}"))?;
    let reader = BufReader::new(file);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: InputDoc = serde_json::from_str(&line)?;
        engine
            .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
            .with_context(|| format!("indexing document {}", doc.id))?;
    }
    Ok(())
}
