//! Element extraction: bucket every recognized term by category; leftovers become keywords.

use std::collections::BTreeSet;

use crate::lexicon::{Lexicon, LexiconCategory};
use crate::text::{MaskedText, ResidualToken};

/// A keyword never shrinks below this many chars when a particle is trimmed.
const MIN_TRIMMED_CHARS: usize = 2;

/// The five positive buckets of a query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedElements {
    pub ingredients: BTreeSet<String>,
    pub cooking_methods: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub adjectives: BTreeSet<String>,
    pub keywords: BTreeSet<String>,
}

impl ExtractedElements {
    fn bucket_mut(&mut self, category: LexiconCategory) -> &mut BTreeSet<String> {
        match category {
            LexiconCategory::Ingredient => &mut self.ingredients,
            LexiconCategory::CookingMethod => &mut self.cooking_methods,
            LexiconCategory::Category => &mut self.categories,
            LexiconCategory::Adjective => &mut self.adjectives,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
            && self.cooking_methods.is_empty()
            && self.categories.is_empty()
            && self.adjectives.is_empty()
            && self.keywords.is_empty()
    }
}

/// Extract elements from the text left after negation removal.
///
/// One loop over the length-sorted rules: a matched span is consumed so a shorter
/// term (or a keyword) can never be counted inside it.
pub fn extract_elements(remaining: &str, lexicon: &Lexicon) -> ExtractedElements {
    let mut text = MaskedText::new(remaining);
    let mut elements = ExtractedElements::default();

    for rule in lexicon.rules() {
        let hits = text.free_occurrences(&rule.chars);
        if hits.is_empty() {
            continue;
        }
        for start in hits {
            text.consume(start, start + rule.chars.len());
        }
        elements.bucket_mut(rule.category).insert(rule.term.clone());
    }

    elements.keywords = text
        .residual_tokens()
        .into_iter()
        .map(|token| trim_particles(token, lexicon))
        .filter(|token| !lexicon.is_stopword(token))
        .collect();
    elements
}

/// Drop a stopword glued to the side of a token that touches a recognized term,
/// so "バジルの|パスタ" leaves "バジル". At most one per side.
fn trim_particles(token: ResidualToken, lexicon: &Lexicon) -> String {
    let mut text = token.text;
    if token.before_term {
        if let Some(rest) = trim_stopword(&text, lexicon, true) {
            text = rest;
        }
    }
    if token.after_term {
        if let Some(rest) = trim_stopword(&text, lexicon, false) {
            text = rest;
        }
    }
    text
}

/// Longest stopword at one end of `text` whose removal leaves a usable keyword.
fn trim_stopword(text: &str, lexicon: &Lexicon, from_end: bool) -> Option<String> {
    lexicon
        .stopwords()
        .filter_map(|word| {
            if from_end {
                text.strip_suffix(word)
            } else {
                text.strip_prefix(word)
            }
        })
        .filter(|rest| rest.chars().count() >= MIN_TRIMMED_CHARS)
        .min_by_key(|rest| rest.len())
        .map(str::to_string)
}
