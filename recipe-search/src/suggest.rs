//! Prefix completions from search history and the lexicon.

use std::collections::HashSet;

use crate::interface::SearchHistoryEntry;
use crate::lexicon::Lexicon;
use crate::text::fold_term;

/// Suggest completions for `prefix`.
///
/// `history` is oldest-first, as the history store keeps it. History candidates come
/// first (most recent first, distinct by original text), then lexicon terms in
/// category/declaration order. Matching is on the case/width-folded form.
pub fn suggest(prefix: &str, max_results: usize, lexicon: &Lexicon, history: &[SearchHistoryEntry]) -> Vec<String> {
    let needle = fold_term(prefix);
    if needle.is_empty() || max_results == 0 {
        return Vec::new();
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let from_history = history.iter().rev().map(|e| e.query.as_str());
    let from_lexicon = lexicon.canonical_terms();

    let mut out = Vec::with_capacity(max_results);
    for candidate in from_history.chain(from_lexicon) {
        if out.len() >= max_results {
            break;
        }
        if !seen.insert(candidate) {
            continue;
        }
        if fold_term(candidate).starts_with(&needle) {
            out.push(candidate.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use serde_json::json;

    fn lexicon() -> Lexicon {
        Lexicon::from_json_str(
            &json!({
                "categories": {
                    "ingredient": ["鶏肉", "鶏むね肉", "豚肉"],
                    "adjective": ["簡単"]
                }
            })
            .to_string(),
        )
        .unwrap()
    }

    fn history(queries: &[&str]) -> Vec<SearchHistoryEntry> {
        let start = Utc::now() - Duration::minutes(queries.len() as i64);
        queries
            .iter()
            .enumerate()
            .map(|(i, q)| SearchHistoryEntry {
                query: q.to_string(),
                timestamp: start + Duration::minutes(i as i64),
                result_count: 1,
            })
            .collect()
    }

    #[test]
    fn test_lexicon_terms_in_lexicon_order() {
        let out = suggest("鶏", 5, &lexicon(), &[]);
        assert_eq!(out, vec!["鶏肉", "鶏むね肉"]);
    }

    #[test]
    fn test_history_precedes_lexicon_most_recent_first() {
        let h = history(&["鶏肉の照り焼き", "豚肉炒め", "鶏ハム"]);
        let out = suggest("鶏", 10, &lexicon(), &h);
        assert_eq!(out, vec!["鶏ハム", "鶏肉の照り焼き", "鶏肉", "鶏むね肉"]);
    }

    #[test]
    fn test_history_deduplicated() {
        let h = history(&["鶏肉", "鶏ハム", "鶏ハム"]);
        let out = suggest("鶏", 10, &lexicon(), &h);
        assert_eq!(out, vec!["鶏ハム", "鶏肉", "鶏むね肉"]);
    }

    #[test]
    fn test_truncates_to_max() {
        let h = history(&["鶏a", "鶏b", "鶏c"]);
        assert_eq!(suggest("鶏", 2, &lexicon(), &h), vec!["鶏c", "鶏b"]);
        assert!(suggest("鶏", 0, &lexicon(), &h).is_empty());
    }

    #[test]
    fn test_blank_prefix_returns_empty() {
        let h = history(&["鶏肉"]);
        assert!(suggest("", 5, &lexicon(), &h).is_empty());
        assert!(suggest("  \t", 5, &lexicon(), &h).is_empty());
    }

    #[test]
    fn test_prefix_matching_is_folded() {
        let h = history(&["Chicken Curry"]);
        assert_eq!(suggest("ＣＨＩ", 5, &lexicon(), &h), vec!["Chicken Curry"]);
        assert_eq!(suggest("  chicken   c", 5, &lexicon(), &h), vec!["Chicken Curry"]);
    }

    #[test]
    fn test_no_match() {
        assert!(suggest("魚", 5, &lexicon(), &[]).is_empty());
    }
}
