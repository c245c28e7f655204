//! Category-tagged vocabulary and synonym table.
//!
//! The lexicon is deserialized from a JSON resource into [`LexiconResource`], then
//! validated and compiled into an immutable [`Lexicon`]. Malformed resources are
//! rejected here, at load time, so request-time code never sees a bad vocabulary.
//!
//! Extraction rules are data: every canonical term becomes a [`Rule`] tagged with its
//! category, and the extractors walk one length-sorted rule list.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::text::fold_term;

const BUNDLED_LEXICON: &str = include_str!("../data/lexicon.json");

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed lexicon resource: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Lexicon contains no terms")]
    Empty,
    #[error("Empty term in category {0}")]
    EmptyTerm(LexiconCategory),
    #[error("Term '{term}' listed under both {first} and {second}")]
    DuplicateTerm {
        term: String,
        first: LexiconCategory,
        second: LexiconCategory,
    },
    #[error("Synonyms given for unknown term '{0}'")]
    UnknownCanonical(String),
    #[error("Empty synonym for '{0}'")]
    EmptySynonym(String),
    #[error("Synonym '{variant}' is itself a canonical term")]
    SynonymShadowsTerm { variant: String },
    #[error("Synonym '{variant}' maps to both '{first}' and '{second}'")]
    AmbiguousSynonym {
        variant: String,
        first: String,
        second: String,
    },
    #[error("Empty negation marker")]
    EmptyNegationMarker,
}

pub type LexiconResult<T> = Result<T, LexiconError>;

/// Category a canonical term belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LexiconCategory {
    Ingredient,
    CookingMethod,
    Category,
    Adjective,
}

impl LexiconCategory {
    pub const ALL: [LexiconCategory; 4] = [
        LexiconCategory::Ingredient,
        LexiconCategory::CookingMethod,
        LexiconCategory::Category,
        LexiconCategory::Adjective,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LexiconCategory::Ingredient => "ingredient",
            LexiconCategory::CookingMethod => "cooking_method",
            LexiconCategory::Category => "category",
            LexiconCategory::Adjective => "adjective",
        }
    }
}

impl fmt::Display for LexiconCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_negation_markers() -> Vec<String> {
    ["を使わない", "使わない", "不使用", "抜き", "なし", "無し", "ない"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// On-disk schema of the lexicon resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LexiconResource {
    /// Category name → canonical terms, in suggestion order.
    pub categories: BTreeMap<LexiconCategory, Vec<String>>,
    /// Canonical term → variant spellings.
    #[serde(default)]
    pub synonyms: BTreeMap<String, Vec<String>>,
    #[serde(default = "default_negation_markers")]
    pub negation_markers: Vec<String>,
    /// Residual tokens dropped instead of becoming keywords.
    #[serde(default)]
    pub stopwords: Vec<String>,
}

/// One category and its canonical terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    pub category: LexiconCategory,
    pub terms: Vec<String>,
}

/// A canonical term tagged with its category, pre-split into chars for scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub term: String,
    pub category: LexiconCategory,
    pub(crate) chars: Vec<char>,
}

/// Variant → canonical substitution table.
///
/// Canonical terms map to themselves so a canonical that contains a variant
/// (e.g. "電子レンジ" containing "レンジ") is never rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymTable {
    by_canonical: BTreeMap<String, Vec<String>>,
    /// (pattern chars, replacement, is_canonical), longest pattern first.
    patterns: Vec<(Vec<char>, String, bool)>,
}

impl SynonymTable {
    fn build(by_canonical: BTreeMap<String, Vec<String>>, canonical_terms: &[String]) -> Self {
        let mut patterns: Vec<(Vec<char>, String, bool)> = canonical_terms
            .iter()
            .map(|t| (t.chars().collect(), t.clone(), true))
            .collect();
        for (canonical, variants) in &by_canonical {
            for v in variants {
                patterns.push((v.chars().collect(), canonical.clone(), false));
            }
        }
        // Longest first; at equal length a canonical wins over a variant.
        patterns.sort_by(|a, b| {
            b.0.len()
                .cmp(&a.0.len())
                .then_with(|| b.2.cmp(&a.2))
                .then_with(|| a.0.cmp(&b.0))
        });
        Self { by_canonical, patterns }
    }

    pub fn variants(&self, canonical: &str) -> &[String] {
        self.by_canonical.get(canonical).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.by_canonical.values().all(Vec::is_empty)
    }

    /// Leftmost-longest substitution of variants, repeated until the text stops changing.
    ///
    /// A replacement can complete a new variant with the text before it ("唐唐揚げ"
    /// becomes "唐揚げ", then "揚げ"), so one pass is not enough. Passes are bounded
    /// by the input length.
    pub fn substitute(&self, text: &str) -> String {
        let max_passes = text.chars().count() + 1;
        let mut current = self.substitute_once(text);
        for _ in 1..max_passes {
            let next = self.substitute_once(&current);
            if next == current {
                return current;
            }
            current = next;
        }
        if self.substitute_once(&current) != current {
            tracing::debug!(text, "synonym substitution did not settle");
        }
        current
    }

    fn substitute_once(&self, text: &str) -> String {
        if self.is_empty() {
            return text.to_string();
        }
        let chars: Vec<char> = text.chars().collect();
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;
        'scan: while pos < chars.len() {
            for (pattern, replacement, _) in &self.patterns {
                let end = pos + pattern.len();
                if end <= chars.len() && chars[pos..end] == pattern[..] {
                    out.push_str(replacement);
                    pos = end;
                    continue 'scan;
                }
            }
            out.push(chars[pos]);
            pos += 1;
        }
        out
    }
}

/// Validated, immutable vocabulary. Shared read-only across requests.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
    synonyms: SynonymTable,
    rules: Vec<Rule>,
    negation_markers: Vec<Vec<char>>,
    stopwords: BTreeSet<String>,
}

impl Lexicon {
    /// The Japanese home-cooking vocabulary compiled into the crate.
    pub fn bundled() -> LexiconResult<Self> {
        Self::from_json_str(BUNDLED_LEXICON)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> LexiconResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> LexiconResult<Self> {
        let resource: LexiconResource = serde_json::from_str(raw)?;
        Self::from_resource(resource)
    }

    pub fn from_resource(resource: LexiconResource) -> LexiconResult<Self> {
        let mut owner: HashMap<String, LexiconCategory> = HashMap::new();
        let mut entries = Vec::new();

        for category in LexiconCategory::ALL {
            let Some(raw_terms) = resource.categories.get(&category) else {
                continue;
            };
            let mut terms = Vec::with_capacity(raw_terms.len());
            for raw in raw_terms {
                let term = fold_term(raw);
                if term.is_empty() {
                    return Err(LexiconError::EmptyTerm(category));
                }
                if let Some(&first) = owner.get(&term) {
                    return Err(LexiconError::DuplicateTerm { term, first, second: category });
                }
                owner.insert(term.clone(), category);
                terms.push(term);
            }
            if !terms.is_empty() {
                entries.push(LexiconEntry { category, terms });
            }
        }
        if owner.is_empty() {
            return Err(LexiconError::Empty);
        }

        let mut variant_owner: HashMap<String, String> = HashMap::new();
        let mut by_canonical: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (raw_canonical, raw_variants) in &resource.synonyms {
            let canonical = fold_term(raw_canonical);
            if !owner.contains_key(&canonical) {
                return Err(LexiconError::UnknownCanonical(raw_canonical.clone()));
            }
            let variants = by_canonical.entry(canonical.clone()).or_default();
            for raw in raw_variants {
                let variant = fold_term(raw);
                if variant.is_empty() {
                    return Err(LexiconError::EmptySynonym(canonical));
                }
                if variant == canonical {
                    // Differs only by case/width; folding already covers it.
                    continue;
                }
                if owner.contains_key(&variant) {
                    return Err(LexiconError::SynonymShadowsTerm { variant });
                }
                match variant_owner.get(&variant) {
                    Some(first) if *first == canonical => continue,
                    Some(first) => {
                        return Err(LexiconError::AmbiguousSynonym {
                            variant,
                            first: first.clone(),
                            second: canonical,
                        })
                    }
                    None => {}
                }
                variant_owner.insert(variant.clone(), canonical.clone());
                variants.push(variant);
            }
        }

        let mut negation_markers = Vec::with_capacity(resource.negation_markers.len());
        for raw in &resource.negation_markers {
            let marker = fold_term(raw);
            if marker.is_empty() {
                return Err(LexiconError::EmptyNegationMarker);
            }
            negation_markers.push(marker.chars().collect::<Vec<char>>());
        }
        negation_markers.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        negation_markers.dedup();

        let stopwords = resource
            .stopwords
            .iter()
            .map(|s| fold_term(s))
            .filter(|s| !s.is_empty())
            .collect();

        let canonical_terms: Vec<String> = entries.iter().flat_map(|e| e.terms.iter().cloned()).collect();
        let synonyms = SynonymTable::build(by_canonical, &canonical_terms);

        let mut rules: Vec<Rule> = entries
            .iter()
            .flat_map(|e| {
                e.terms.iter().map(move |t| Rule {
                    term: t.clone(),
                    category: e.category,
                    chars: t.chars().collect(),
                })
            })
            .collect();
        // Stable: equal-length rules keep category then declaration order.
        rules.sort_by(|a, b| b.chars.len().cmp(&a.chars.len()));

        Ok(Self {
            entries,
            synonyms,
            rules,
            negation_markers,
            stopwords,
        })
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// Extraction rules, longest term first.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub(crate) fn negation_markers(&self) -> &[Vec<char>] {
        &self.negation_markers
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    pub(crate) fn stopwords(&self) -> impl Iterator<Item = &str> {
        self.stopwords.iter().map(String::as_str)
    }

    /// Every canonical term in category order, then declaration order.
    pub fn canonical_terms(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().flat_map(|e| e.terms.iter().map(String::as_str))
    }

    pub fn category_of(&self, term: &str) -> Option<LexiconCategory> {
        self.rules.iter().find(|r| r.term == term).map(|r| r.category)
    }

    pub fn term_count(&self) -> usize {
        self.rules.len()
    }

    /// True if any rule's term starts at `pos` of `chars`.
    pub(crate) fn term_starts_at(&self, chars: &[char], pos: usize) -> bool {
        self.rules.iter().any(|r| {
            let end = pos + r.chars.len();
            end <= chars.len() && chars[pos..end] == r.chars[..]
        })
    }
}
