//! Text folding and masked scanning shared by the query pipeline and the scorer.
//!
//! Every string that takes part in matching (lexicon terms, queries, recipe text)
//! goes through [`fold`] first, so comparisons are plain substring checks.

use unicode_normalization::UnicodeNormalization;

/// Case/width fold: NFKC (full-width latin and half-width katakana collapse to
/// their canonical forms) followed by lowercasing.
pub fn fold(text: &str) -> String {
    text.nfkc().flat_map(char::to_lowercase).collect()
}

/// Trim and collapse every whitespace run to a single ASCII space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Fold, then collapse whitespace. The form all lexicon terms are stored in.
pub fn fold_term(text: &str) -> String {
    collapse_whitespace(&fold(text))
}

/// Token separator for residual keywords: whitespace and punctuation.
pub(crate) fn is_separator(c: char) -> bool {
    !c.is_alphanumeric()
}

/// A query string under extraction. Spans claimed by a rule are marked consumed
/// so later (shorter) rules cannot match inside them.
#[derive(Debug, Clone)]
pub(crate) struct MaskedText {
    chars: Vec<char>,
    consumed: Vec<bool>,
}

impl MaskedText {
    pub(crate) fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let consumed = vec![false; chars.len()];
        Self { chars, consumed }
    }

    pub(crate) fn len(&self) -> usize {
        self.chars.len()
    }

    pub(crate) fn chars(&self) -> &[char] {
        &self.chars
    }

    pub(crate) fn char_at(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }

    pub(crate) fn is_consumed(&self, pos: usize) -> bool {
        self.consumed.get(pos).copied().unwrap_or(true)
    }

    /// True if `needle` occurs at `pos` and none of its chars are consumed.
    pub(crate) fn matches_free_at(&self, pos: usize, needle: &[char]) -> bool {
        let end = pos + needle.len();
        if needle.is_empty() || end > self.chars.len() {
            return false;
        }
        self.chars[pos..end] == *needle && !self.consumed[pos..end].iter().any(|&c| c)
    }

    /// All non-overlapping free occurrences of `needle`, left to right.
    pub(crate) fn free_occurrences(&self, needle: &[char]) -> Vec<usize> {
        let mut found = Vec::new();
        let mut pos = 0;
        while pos + needle.len() <= self.chars.len() && !needle.is_empty() {
            if self.matches_free_at(pos, needle) {
                found.push(pos);
                pos += needle.len();
            } else {
                pos += 1;
            }
        }
        found
    }

    pub(crate) fn consume(&mut self, start: usize, end: usize) {
        let end = end.min(self.consumed.len());
        for flag in &mut self.consumed[start..end] {
            *flag = true;
        }
    }

    /// Text with every consumed run replaced by one space.
    pub(crate) fn remaining(&self) -> String {
        let mut out = String::with_capacity(self.chars.len());
        let mut in_gap = false;
        for (c, &gone) in self.chars.iter().zip(&self.consumed) {
            if gone {
                if !in_gap {
                    out.push(' ');
                    in_gap = true;
                }
            } else {
                out.push(*c);
                in_gap = false;
            }
        }
        collapse_whitespace(&out)
    }

    /// Unconsumed text split on consumed spans and separators. Empty tokens are dropped.
    pub(crate) fn residual_tokens(&self) -> Vec<ResidualToken> {
        let len = self.chars.len();
        let free = |pos: usize| !self.consumed[pos] && !is_separator(self.chars[pos]);
        let mut tokens = Vec::new();
        let mut pos = 0;
        while pos < len {
            if !free(pos) {
                pos += 1;
                continue;
            }
            let start = pos;
            while pos < len && free(pos) {
                pos += 1;
            }
            tokens.push(ResidualToken {
                text: self.chars[start..pos].iter().collect(),
                after_term: start > 0 && self.consumed[start - 1],
                before_term: pos < len && self.consumed[pos],
            });
        }
        tokens
    }
}

/// A run of leftover text after extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResidualToken {
    pub(crate) text: String,
    /// Directly preceded by a consumed span.
    pub(crate) after_term: bool,
    /// Directly followed by a consumed span.
    pub(crate) before_term: bool,
}
