//! Times membership queries against a word list held in a `Vec` and in three
//! differently shaped trees: built from sorted input, from shuffled input, and
//! the sorted one after a rebalance.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use linked_bst::Tree;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Compare lookups in a list and in binary search trees of different shapes
#[derive(Parser, Debug)]
#[command(name = "word_search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Newline-delimited word list
    #[arg(env = "WORD_SEARCH_PATH")]
    path: PathBuf,

    /// Number of random words to look up
    #[arg(short, long, env = "WORD_SEARCH_QUERIES", default_value_t = 10_000)]
    queries: usize,

    /// Number of leading words of the list to store
    #[arg(short, long, env = "WORD_SEARCH_LIMIT", default_value_t = 900)]
    limit: usize,

    /// Seed for choosing and shuffling words
    #[arg(short, long, env = "WORD_SEARCH_SEED")]
    seed: Option<u64>,

    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let text = fs::read_to_string(&cli.path)
        .with_context(|| format!("reading word list {}", cli.path.display()))?;
    let mut words: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_owned)
        .collect();
    ensure!(!words.is_empty(), "{} holds no words", cli.path.display());
    info!(words = words.len(), "loaded word list");

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let queries: Vec<String> = words
        .choose_multiple(&mut rng, cli.queries)
        .cloned()
        .collect();
    words.truncate(cli.limit);
    debug!(queries = queries.len(), stored = words.len(), "sampled queries");

    println!("Search using Vec::contains");
    report(|| queries.iter().filter(|w| words.contains(w)).count());

    let mut sorted: Tree<String> = words.iter().cloned().collect();
    println!("Search in a tree built from words in alphabetical order");
    println!("(height {})", sorted.height());
    report(|| queries.iter().filter(|w| sorted.contains(w)).count());

    let mut shuffled_words = words.clone();
    shuffled_words.shuffle(&mut rng);
    let shuffled: Tree<String> = shuffled_words.into_iter().collect();
    println!("Search in a tree built from words in random order");
    println!("(height {})", shuffled.height());
    report(|| queries.iter().filter(|w| shuffled.contains(w)).count());

    sorted.rebalance();
    println!("Search in the alphabetical tree after rebalancing");
    println!("(height {})", sorted.height());
    report(|| queries.iter().filter(|w| sorted.contains(w)).count());

    Ok(())
}

/// Runs one batch of lookups and prints how long it took.
fn report(lookups: impl FnOnce() -> usize) {
    let start = Instant::now();
    let hits = lookups();
    let elapsed = start.elapsed();
    debug!(hits, "lookups done");
    println!("{} seconds\n", elapsed.as_secs_f64());
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
