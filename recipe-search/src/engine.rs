//! RecipeSearchEngine - the service object handed to every request handler.
//!
//! Owns the current lexicon, the history store and a handle to the recipe source.
//! Constructed once at process start; no global state.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;

use crate::config::EngineConfig;
use crate::history::HistoryStore;
use crate::interface::{ParsedQuery, RecipeSearchApi, ScoredResult, SearchError, SearchHistoryEntry};
use crate::lexicon::Lexicon;
use crate::query::parse_query;
use crate::ranking::Ranker;
use crate::recipes::RecipeSource;
use crate::suggest;

/// Thread-safe natural-language recipe search.
///
/// Concurrency Model:
/// - The lexicon sits behind `RwLock<Arc<Lexicon>>`; a request clones the `Arc`
///   once and works on that snapshot, so a reload swaps atomically and never
///   exposes a half-built vocabulary. The lock is held only for the clone.
/// - History appends are serialized by the history store's own mutex.
/// - Everything else is pure per request.
pub struct RecipeSearchEngine {
    config: EngineConfig,
    lexicon: RwLock<Arc<Lexicon>>,
    history: HistoryStore,
    recipes: Arc<dyn RecipeSource>,
    ranker: Ranker,
}

impl RecipeSearchEngine {
    /// Build the engine from config. A missing or malformed lexicon is fatal;
    /// a missing or malformed history file is not.
    pub fn new(config: EngineConfig, recipes: Arc<dyn RecipeSource>) -> Result<Self, SearchError> {
        config.validate()?;
        let lexicon = match &config.lexicon_path {
            Some(path) => Lexicon::load(path)?,
            None => Lexicon::bundled()?,
        };
        tracing::info!(
            source = %config.lexicon_path.as_ref().map_or("bundled".to_string(), |p| p.display().to_string()),
            terms = lexicon.term_count(),
            "lexicon loaded"
        );
        Ok(Self::with_lexicon(config, lexicon, recipes))
    }

    /// Build the engine around an already-validated lexicon.
    pub fn with_lexicon(config: EngineConfig, lexicon: Lexicon, recipes: Arc<dyn RecipeSource>) -> Self {
        let history = match &config.history_path {
            Some(path) => HistoryStore::open(path, config.history_capacity),
            None => HistoryStore::in_memory(config.history_capacity),
        };
        let ranker = config.ranker();
        Self {
            config,
            lexicon: RwLock::new(Arc::new(lexicon)),
            history,
            recipes,
            ranker,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Snapshot of the current lexicon.
    pub fn lexicon(&self) -> Arc<Lexicon> {
        Arc::clone(&self.lexicon.read())
    }

    /// Re-read the configured lexicon resource and swap it in. On failure the
    /// current lexicon stays in place.
    pub fn reload_lexicon(&self) -> Result<(), SearchError> {
        let path = self.config.lexicon_path.as_ref().ok_or(SearchError::NoLexiconPath)?;
        match Lexicon::load(path) {
            Ok(lexicon) => {
                tracing::info!(path = %path.display(), terms = lexicon.term_count(), "lexicon reloaded");
                self.replace_lexicon(lexicon);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "lexicon reload failed, keeping current");
                Err(e.into())
            }
        }
    }

    pub fn replace_lexicon(&self, lexicon: Lexicon) {
        *self.lexicon.write() = Arc::new(lexicon);
    }

    /// Up to `limit` past searches, most recent first.
    pub fn history(&self, limit: usize) -> Vec<SearchHistoryEntry> {
        self.history.recent(limit)
    }

    /// Re-execute the search `index` positions back in history (0 = latest).
    /// The re-run is itself a search and is recorded.
    pub fn rerun(&self, index: usize, max_results: usize) -> Result<Vec<ScoredResult>, SearchError> {
        let entry = self
            .history
            .get_recent(index)
            .ok_or(SearchError::HistoryIndexOutOfRange(index))?;
        self.search(&entry.query, max_results)
    }
}

impl RecipeSearchApi for RecipeSearchEngine {
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<ScoredResult>, SearchError> {
        if max_results == 0 || query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let lexicon = self.lexicon();
        let parsed = parse_query(query, &lexicon, self.config.negation_window);

        let recipes = self.recipes.recipes()?;
        let results = self.ranker.rank(&parsed, &recipes, max_results);

        self.history.append(SearchHistoryEntry {
            query: query.to_string(),
            timestamp: Utc::now(),
            result_count: results.len() as u64,
        });
        Ok(results)
    }

    fn parse_only(&self, query: &str) -> ParsedQuery {
        parse_query(query, &self.lexicon(), self.config.negation_window)
    }

    fn suggest(&self, prefix: &str, max_results: usize) -> Vec<String> {
        let history = self.history.snapshot();
        suggest::suggest(prefix, max_results, &self.lexicon(), &history)
    }
}
