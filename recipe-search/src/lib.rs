//! Recipe Search - natural-language search over a personal recipe collection
//!
//! Turns a conversational query ("辛くない簡単な鶏肉料理") into a structured
//! [`ParsedQuery`], scores every recipe against it with additive term weights,
//! and offers prefix completions from the lexicon and search history.
//!
//! Pipeline: normalizer → negation → extractor → filter builder → ranking.
//! [`RecipeSearchEngine`] is the service object that wires it together.

mod candidate;
pub mod config;
pub mod engine;
pub mod extractor;
pub mod history;
pub mod interface;
pub mod lexicon;
pub mod negation;
pub mod normalizer;
pub mod query;
pub mod ranking;
pub mod recipes;
pub mod suggest;
pub mod text;

pub use candidate::RecipeCandidate;
pub use config::EngineConfig;
pub use engine::RecipeSearchEngine;
pub use interface::*;
pub use lexicon::Lexicon;
pub use recipes::{InMemoryRecipes, RecipeSource};
