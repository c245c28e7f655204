//! Recipe candidate with memoized searchable text.
//!
//! Module isolation ensures no code outside this module can mutate `document`
//! after construction, so the `OnceLock` cache can never go stale.

use std::sync::OnceLock;

use crate::interface::RecipeDocument;
use crate::text::fold;

/// A recipe ready for scoring. `folded_text()` is computed on first access and
/// cached, so repeated searches over the same collection fold each recipe once.
#[derive(Debug)]
pub struct RecipeCandidate {
    document: RecipeDocument,
    folded_text: OnceLock<String>,
}

impl RecipeCandidate {
    pub fn new(document: RecipeDocument) -> Self {
        Self {
            document,
            folded_text: OnceLock::new(),
        }
    }

    pub fn document(&self) -> &RecipeDocument {
        &self.document
    }

    pub fn id(&self) -> i64 {
        self.document.id
    }

    /// Title, description, ingredients, steps and tags, case/width folded.
    pub fn folded_text(&self) -> &str {
        self.folded_text.get_or_init(|| fold(&self.document.searchable_text()))
    }
}

impl From<RecipeDocument> for RecipeCandidate {
    fn from(document: RecipeDocument) -> Self {
        Self::new(document)
    }
}
