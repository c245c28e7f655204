//! Seam to the external recipe store.
//!
//! The engine never owns recipes; it asks a [`RecipeSource`] for the current
//! collection on every search. Snapshots are `Arc`ed so a search keeps a
//! consistent collection even if the store is replaced mid-flight.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::candidate::RecipeCandidate;
use crate::interface::{RecipeDocument, SearchError};

pub trait RecipeSource: Send + Sync {
    /// The current collection, in the order ties should be broken (e.g. newest first).
    fn recipes(&self) -> Result<Arc<Vec<RecipeCandidate>>, SearchError>;
}

/// Recipes held in memory, replaceable as a whole.
#[derive(Default)]
pub struct InMemoryRecipes {
    recipes: RwLock<Arc<Vec<RecipeCandidate>>>,
}

impl InMemoryRecipes {
    pub fn new(documents: Vec<RecipeDocument>) -> Self {
        Self {
            recipes: RwLock::new(Arc::new(documents.into_iter().map(RecipeCandidate::new).collect::<Vec<_>>())),
        }
    }

    /// Load a JSON array of recipe documents.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, SearchError> {
        let path = path.as_ref();
        let raw = std::fs::read(path)
            .map_err(|e| SearchError::RecipeSource(format!("{}: {e}", path.display())))?;
        let documents: Vec<RecipeDocument> = serde_json::from_slice(&raw)
            .map_err(|e| SearchError::RecipeSource(format!("{}: {e}", path.display())))?;
        tracing::info!(path = %path.display(), recipes = documents.len(), "recipes loaded");
        Ok(Self::new(documents))
    }

    pub fn replace_all(&self, documents: Vec<RecipeDocument>) {
        let fresh: Vec<RecipeCandidate> = documents.into_iter().map(RecipeCandidate::new).collect();
        *self.recipes.write() = Arc::new(fresh);
    }

    pub fn len(&self) -> usize {
        self.recipes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.read().is_empty()
    }
}

impl RecipeSource for InMemoryRecipes {
    fn recipes(&self) -> Result<Arc<Vec<RecipeCandidate>>, SearchError> {
        Ok(Arc::clone(&self.recipes.read()))
    }
}
