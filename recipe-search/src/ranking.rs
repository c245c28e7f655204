//! Additive weighted scoring and stable ranking.
//!
//! A recipe's score is the sum of the weights of every query term present in its
//! folded text. Recipes scoring <= 0 are "no match". Sorting is stable, so equal
//! scores keep the order of the input collection.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::candidate::RecipeCandidate;
use crate::interface::{MatchedTerm, ParsedQuery, ScoredResult, TermRole};

/// Per-role term weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreWeights {
    pub ingredient: i32,
    pub excluded_ingredient: i32,
    pub cooking_method: i32,
    pub category: i32,
    pub adjective: i32,
    pub keyword: i32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            ingredient: 20,
            excluded_ingredient: -50,
            cooking_method: 15,
            category: 10,
            adjective: 8,
            keyword: 5,
        }
    }
}

impl ScoreWeights {
    pub fn for_role(&self, role: TermRole) -> i32 {
        match role {
            TermRole::Ingredient => self.ingredient,
            TermRole::ExcludedIngredient => self.excluded_ingredient,
            TermRole::CookingMethod => self.cooking_method,
            TermRole::Category => self.category,
            TermRole::Adjective => self.adjective,
            TermRole::Keyword => self.keyword,
        }
    }
}

/// What an excluded ingredient does to a recipe that contains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionPolicy {
    /// Add the (negative) excluded-ingredient weight; strong matches can still rank.
    #[default]
    Penalty,
    /// Drop the recipe from results outright.
    Reject,
}

/// Score of one recipe plus the terms that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeScore {
    pub score: i32,
    pub matched_terms: Vec<MatchedTerm>,
    pub contains_excluded: bool,
}

/// Score folded recipe text against a query.
pub fn score_text(query: &ParsedQuery, folded_text: &str, weights: &ScoreWeights) -> RecipeScore {
    let groups = [
        (query.ingredients_include(), TermRole::Ingredient),
        (query.ingredients_exclude(), TermRole::ExcludedIngredient),
        (query.cooking_methods(), TermRole::CookingMethod),
        (query.categories(), TermRole::Category),
        (query.adjectives(), TermRole::Adjective),
        (query.keywords(), TermRole::Keyword),
    ];

    let mut result = RecipeScore::default();
    for (terms, role) in groups {
        let weight = weights.for_role(role);
        for term in terms.iter().filter(|t| folded_text.contains(t.as_str())) {
            result.score = result.score.saturating_add(weight);
            if role == TermRole::ExcludedIngredient {
                result.contains_excluded = true;
            }
            result.matched_terms.push(MatchedTerm {
                term: term.clone(),
                role,
                weight,
            });
        }
    }
    result
}

/// Scores a whole collection and keeps the best matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranker {
    pub weights: ScoreWeights,
    pub exclusion_policy: ExclusionPolicy,
    /// Collections at least this large are scored on the rayon pool.
    pub parallel_threshold: usize,
}

impl Default for Ranker {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            exclusion_policy: ExclusionPolicy::default(),
            parallel_threshold: 512,
        }
    }
}

impl Ranker {
    fn score_candidate(&self, query: &ParsedQuery, candidate: &RecipeCandidate) -> Option<ScoredResult> {
        let scored = score_text(query, candidate.folded_text(), &self.weights);
        if scored.score <= 0 {
            return None;
        }
        if scored.contains_excluded && self.exclusion_policy == ExclusionPolicy::Reject {
            return None;
        }
        Some(ScoredResult {
            recipe_id: candidate.id(),
            title: candidate.document().title.clone(),
            score: scored.score,
            matched_terms: scored.matched_terms,
        })
    }

    /// Score every candidate, drop non-matches, sort descending (stable) and truncate.
    pub fn rank(&self, query: &ParsedQuery, candidates: &[RecipeCandidate], max_results: usize) -> Vec<ScoredResult> {
        if max_results == 0 || query.is_empty() {
            return Vec::new();
        }

        // Indexed parallel collect keeps input order, so both paths feed the same
        // sequence into the stable sort.
        let mut results: Vec<ScoredResult> = if candidates.len() >= self.parallel_threshold {
            candidates
                .par_iter()
                .map(|c| self.score_candidate(query, c))
                .collect::<Vec<_>>()
                .into_iter()
                .flatten()
                .collect()
        } else {
            candidates
                .iter()
                .filter_map(|c| self.score_candidate(query, c))
                .collect()
        };

        let matched = results.len();
        results.sort_by(|a, b| b.score.cmp(&a.score));
        results.truncate(max_results);

        tracing::debug!(
            candidates = candidates.len(),
            matched,
            returned = results.len(),
            "ranked recipes"
        );
        results
    }
}
