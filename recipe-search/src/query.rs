//! Query pipeline: normalize → negation → element extraction → `ParsedQuery`.

use crate::extractor::{extract_elements, ExtractedElements};
use crate::interface::ParsedQuery;
use crate::lexicon::Lexicon;
use crate::negation::{extract_negations, NegationOutcome};
use crate::normalizer::normalize;

/// Filter builder: combine exclusions and the extracted buckets.
pub fn build_query(original: &str, negations: NegationOutcome, elements: ExtractedElements) -> ParsedQuery {
    ParsedQuery::new(
        original.to_string(),
        elements.ingredients,
        negations.excluded,
        elements.cooking_methods,
        elements.categories,
        elements.adjectives,
        elements.keywords,
    )
}

/// Parse a raw query. Pure: same input and lexicon, same output.
pub fn parse_query(raw: &str, lexicon: &Lexicon, negation_window: usize) -> ParsedQuery {
    let normalized = normalize(raw, lexicon);
    if normalized.is_empty() {
        return ParsedQuery::empty(raw);
    }
    let negations = extract_negations(&normalized, lexicon, negation_window);
    let elements = extract_elements(&negations.remaining, lexicon);
    let query = build_query(raw, negations, elements);
    tracing::debug!(
        original = raw,
        normalized = %normalized,
        include = ?query.ingredients_include(),
        exclude = ?query.ingredients_exclude(),
        keywords = ?query.keywords(),
        "parsed query"
    );
    query
}
