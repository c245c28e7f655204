//! Negation extraction: "term + marker" spans become exclusions.
//!
//! A recognized term counts as negated when a negation marker starts within
//! `window` characters after it, and the gap holds no separator and no other
//! recognized term. Negated spans are consumed so the element extractor never
//! sees them as positive mentions.

use std::collections::BTreeSet;

use crate::lexicon::{Lexicon, LexiconCategory};
use crate::text::{is_separator, MaskedText};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NegationOutcome {
    /// Normalized query with every negated span replaced by a space.
    pub remaining: String,
    /// Canonical ingredients the query asked to exclude.
    pub excluded: BTreeSet<String>,
    /// Negated terms from other categories; dropped, not required.
    pub dropped: BTreeSet<String>,
}

/// Scan a normalized query for negated terms.
pub fn extract_negations(normalized: &str, lexicon: &Lexicon, window: usize) -> NegationOutcome {
    let mut text = MaskedText::new(normalized);
    // Every span taken so far, negated or not. Shorter terms inside a claimed span
    // are never tested, and markers may not reach into one.
    let mut claimed = MaskedText::new(normalized);
    let mut outcome = NegationOutcome::default();

    for rule in lexicon.rules() {
        for start in claimed.free_occurrences(&rule.chars) {
            // An earlier occurrence's marker may have swallowed this one.
            if !claimed.matches_free_at(start, &rule.chars) {
                continue;
            }
            let end = start + rule.chars.len();
            match negation_end(&claimed, lexicon, end, window) {
                Some(span_end) => {
                    text.consume(start, span_end);
                    claimed.consume(start, span_end);
                    if rule.category == LexiconCategory::Ingredient {
                        outcome.excluded.insert(rule.term.clone());
                    } else {
                        outcome.dropped.insert(rule.term.clone());
                    }
                }
                None => claimed.consume(start, end),
            }
        }
    }

    if !outcome.dropped.is_empty() {
        tracing::debug!(dropped = ?outcome.dropped, "negated non-ingredient terms dropped");
    }
    outcome.remaining = text.remaining();
    outcome
}

/// If a negation marker follows a term ending at `term_end`, return the end of the marker.
///
/// `claimed` masks every span already taken by a longer term, negated or not. Neither
/// the gap nor the marker may touch a claimed span or the start of another term, so
/// "簡単なしめじ" never reads as "簡単" + "なし".
fn negation_end(claimed: &MaskedText, lexicon: &Lexicon, term_end: usize, window: usize) -> Option<usize> {
    let chars = claimed.chars();
    for gap in 0..=window {
        let marker_start = term_end + gap;
        if marker_start >= claimed.len() {
            return None;
        }
        if gap > 0 {
            let gap_pos = marker_start - 1;
            let gap_char = claimed.char_at(gap_pos)?;
            if is_separator(gap_char) || claimed.is_consumed(gap_pos) || lexicon.term_starts_at(chars, gap_pos) {
                return None;
            }
        }
        for marker in lexicon.negation_markers() {
            let marker_end = marker_start + marker.len();
            if claimed.matches_free_at(marker_start, marker)
                && !(marker_start..marker_end).any(|pos| lexicon.term_starts_at(chars, pos))
            {
                return Some(marker_end);
            }
        }
    }
    None
}
