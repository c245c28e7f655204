//! Command-line front end for the recipe search engine.
//!
//! Loads an engine config and a JSON recipe collection, runs one operation and
//! prints the result as JSON.
//!
//! Usage:
//!     recipe-search --recipes recipes.json search "辛くない簡単な鶏肉料理"
//!     recipe-search parse "チキンのソテー"
//!     recipe-search --config engine.json suggest 鶏

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recipe_search::{EngineConfig, InMemoryRecipes, Lexicon, RecipeSearchApi, RecipeSearchEngine};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Engine config (JSON). Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Recipe collection (JSON array of recipe documents)
    #[arg(short, long)]
    recipes: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank recipes for a query and record it in history
    Search {
        query: String,
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },
    /// Show how a query is understood, without searching
    Parse { query: String },
    /// Complete a prefix from history and the lexicon
    Suggest {
        prefix: String,
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },
    /// List past searches, most recent first
    History {
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },
    /// Re-run a past search (0 = most recent)
    Rerun {
        index: usize,
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },
    /// Validate a lexicon resource and print its size
    CheckLexicon { path: PathBuf },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipe_search=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if let Command::CheckLexicon { path } = &args.command {
        let lexicon = Lexicon::load(path).with_context(|| format!("invalid lexicon {}", path.display()))?;
        println!("ok: {} terms", lexicon.term_count());
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => EngineConfig::load(path).with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let recipes = match &args.recipes {
        Some(path) => InMemoryRecipes::load_json(path)?,
        None => InMemoryRecipes::default(),
    };
    let engine = RecipeSearchEngine::new(config, Arc::new(recipes)).context("failed to start search engine")?;

    match args.command {
        Command::Search { query, limit } => print_json(&engine.search(&query, limit)?),
        Command::Parse { query } => print_json(&engine.parse_only(&query)),
        Command::Suggest { prefix, limit } => print_json(&engine.suggest(&prefix, limit)),
        Command::History { limit } => print_json(&engine.history(limit)),
        Command::Rerun { index, limit } => print_json(&engine.rerun(index, limit)?),
        Command::CheckLexicon { .. } => Ok(()),
    }
}
