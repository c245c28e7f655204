//! Recipe search public interface.
//!
//! This file defines the types and the service trait exposed to callers (the HTTP
//! layer, the CLI). It acts as the source of truth for shared types.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// ENUMS
// ═══════════════════════════════════════════════════════════════════════════════

/// Why a term contributed to a recipe's score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermRole {
    Ingredient,
    ExcludedIngredient,
    CookingMethod,
    Category,
    Adjective,
    Keyword,
}

// ═══════════════════════════════════════════════════════════════════════════════
// RECORDS (Structs)
// ═══════════════════════════════════════════════════════════════════════════════

/// Structured filter set derived from a raw query.
///
/// Immutable once built: fields are only reachable through accessors, and the
/// only constructor re-asserts that no term is both included and excluded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuery {
    original: String,
    ingredients_include: BTreeSet<String>,
    ingredients_exclude: BTreeSet<String>,
    cooking_methods: BTreeSet<String>,
    categories: BTreeSet<String>,
    adjectives: BTreeSet<String>,
    keywords: BTreeSet<String>,
}

impl ParsedQuery {
    /// A query with nothing recognized (blank input).
    pub fn empty(original: &str) -> Self {
        Self {
            original: original.to_string(),
            ..Self::default()
        }
    }

    /// Assemble a query. Exclusion dominates: any excluded term is removed from
    /// `ingredients_include`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        original: String,
        mut ingredients_include: BTreeSet<String>,
        ingredients_exclude: BTreeSet<String>,
        cooking_methods: BTreeSet<String>,
        categories: BTreeSet<String>,
        adjectives: BTreeSet<String>,
        keywords: BTreeSet<String>,
    ) -> Self {
        ingredients_include.retain(|t| !ingredients_exclude.contains(t));
        Self {
            original,
            ingredients_include,
            ingredients_exclude,
            cooking_methods,
            categories,
            adjectives,
            keywords,
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn ingredients_include(&self) -> &BTreeSet<String> {
        &self.ingredients_include
    }

    pub fn ingredients_exclude(&self) -> &BTreeSet<String> {
        &self.ingredients_exclude
    }

    pub fn cooking_methods(&self) -> &BTreeSet<String> {
        &self.cooking_methods
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    pub fn adjectives(&self) -> &BTreeSet<String> {
        &self.adjectives
    }

    pub fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }

    /// True if nothing at all was recognized; such a query matches no recipe.
    pub fn is_empty(&self) -> bool {
        self.ingredients_include.is_empty()
            && self.ingredients_exclude.is_empty()
            && self.cooking_methods.is_empty()
            && self.categories.is_empty()
            && self.adjectives.is_empty()
            && self.keywords.is_empty()
    }
}

/// A recipe as handed over by the recipe store. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeDocument {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub tags: Vec<String>,
}

impl RecipeDocument {
    /// All searchable fields joined into one blob (not yet folded).
    pub fn searchable_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(2 + self.ingredients.len() + self.steps.len() + self.tags.len());
        parts.push(&self.title);
        parts.push(&self.description);
        parts.extend(self.ingredients.iter().map(String::as_str));
        parts.extend(self.steps.iter().map(String::as_str));
        parts.extend(self.tags.iter().map(String::as_str));
        parts.join("\n")
    }
}

/// One term that contributed to a score, with its weight
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedTerm {
    pub term: String,
    pub role: TermRole,
    pub weight: i32,
}

/// A ranked recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredResult {
    pub recipe_id: i64,
    pub title: String,
    pub score: i32,
    pub matched_terms: Vec<MatchedTerm>,
}

/// One completed search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryEntry {
    pub query: String,
    pub timestamp: DateTime<Utc>,
    pub result_count: u64,
}

/// Error type for search engine operations
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Lexicon error: {0}")]
    Lexicon(#[from] crate::lexicon::LexiconError),
    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("Recipe source error: {0}")]
    RecipeSource(String),
    #[error("No lexicon resource configured")]
    NoLexiconPath,
    #[error("No history entry at index {0}")]
    HistoryIndexOutOfRange(usize),
}

// ═══════════════════════════════════════════════════════════════════════════════
// SERVICE INTERFACE
// ═══════════════════════════════════════════════════════════════════════════════

/// The operations the engine serves to the transport layer.
pub trait RecipeSearchApi: Send + Sync {
    /// Run the full pipeline, rank the current recipe collection and record the
    /// query in history. `max_results == 0` returns nothing.
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<ScoredResult>, SearchError>;

    /// Parse without scoring or touching history.
    fn parse_only(&self, query: &str) -> ParsedQuery;

    /// Completions for a prefix, history first (most recent first), then lexicon terms.
    fn suggest(&self, prefix: &str, max_results: usize) -> Vec<String>;
}
