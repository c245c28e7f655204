//! Query normalization: case/width fold, whitespace collapse, synonym substitution.

use crate::lexicon::Lexicon;
use crate::text::fold_term;

/// Normalize a raw query against the lexicon's synonym table.
/// Idempotent: `normalize(&normalize(q, lex), lex) == normalize(q, lex)`.
pub fn normalize(query: &str, lexicon: &Lexicon) -> String {
    let folded = fold_term(query);
    if folded.is_empty() {
        return folded;
    }
    lexicon.synonyms().substitute(&folded)
}
