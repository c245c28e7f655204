//! End-to-end search behavior through `RecipeSearchEngine`, using the bundled
//! lexicon and a small in-memory recipe collection.

mod test_data;

use std::sync::Arc;

use recipe_search::ranking::{score_text, ExclusionPolicy, ScoreWeights};
use recipe_search::{
    EngineConfig, InMemoryRecipes, Lexicon, RecipeCandidate, RecipeSearchApi, RecipeSearchEngine, TermRole,
};
use test_data::{recipe, sample_recipes};

fn engine_with(config: EngineConfig) -> RecipeSearchEngine {
    RecipeSearchEngine::new(config, Arc::new(InMemoryRecipes::new(sample_recipes()))).unwrap()
}

fn engine() -> RecipeSearchEngine {
    engine_with(EngineConfig::default())
}

fn result_ids(engine: &RecipeSearchEngine, query: &str) -> Vec<i64> {
    engine
        .search(query, 10)
        .unwrap()
        .into_iter()
        .map(|r| r.recipe_id)
        .collect()
}

// ============================================================
// Parsing
// ============================================================

#[test]
fn test_single_ingredient_query() {
    let parsed = engine().parse_only("鶏肉");
    assert_eq!(parsed.ingredients_include().len(), 1);
    assert!(parsed.ingredients_include().contains("鶏肉"));
    assert!(parsed.ingredients_exclude().is_empty());
    assert!(parsed.keywords().is_empty());
}

#[test]
fn test_negated_spicy_simple_chicken_query() {
    let parsed = engine().parse_only("辛くない簡単な鶏肉料理");
    assert!(parsed.ingredients_include().contains("鶏肉"));
    assert!(parsed.ingredients_exclude().contains("辛味"));
    assert!(!parsed.ingredients_include().contains("辛味"));
    assert!(parsed.adjectives().contains("簡単"));
    assert!(parsed.keywords().is_empty());
    assert_eq!(parsed.original(), "辛くない簡単な鶏肉料理");
}

#[test]
fn test_variant_spelling_parses_like_canonical() {
    let engine = engine();
    let canonical = engine.parse_only("鶏肉の炒め");
    let variant = engine.parse_only("チキンのソテー");
    assert_eq!(canonical.ingredients_include(), variant.ingredients_include());
    assert_eq!(canonical.cooking_methods(), variant.cooking_methods());
}

#[test]
fn test_fullwidth_latin_is_folded() {
    let parsed = engine().parse_only("ＣＨＩＣＫＥＮ");
    assert!(parsed.ingredients_include().contains("鶏肉"));
}

#[test]
fn test_unknown_word_becomes_keyword() {
    let parsed = engine().parse_only("親子丼");
    assert!(parsed.categories().contains("丼"));
    assert!(parsed.keywords().contains("親子"));
}

// ============================================================
// Ranking Behavior
// ============================================================

#[test]
fn test_single_ingredient_match_scores_twenty() {
    let results = engine().search("鶏肉", 10).unwrap();
    assert_eq!(results.len(), 2);
    for r in &results {
        assert_eq!(r.score, 20);
        assert_eq!(r.matched_terms.len(), 1);
        assert_eq!(r.matched_terms[0].role, TermRole::Ingredient);
    }
}

#[test]
fn test_equal_scores_keep_collection_order() {
    // ピリ辛よだれ鶏 (2) precedes 親子丼 (3) in the collection.
    assert_eq!(result_ids(&engine(), "鶏肉"), vec![2, 3]);
    assert_eq!(result_ids(&engine(), "中華"), vec![2, 4]);
}

#[test]
fn test_excluded_ingredient_sinks_recipe() {
    let results = engine().search("辛くない簡単な鶏肉料理", 10).unwrap();
    let ids: Vec<i64> = results.iter().map(|r| r.recipe_id).collect();
    // 親子丼: 20 + 8. レンジ蒸し: 8 (簡単 only). よだれ鶏: 20 - 50, dropped.
    assert_eq!(ids, vec![3, 1]);
    assert_eq!(results[0].score, 28);
    assert_eq!(results[1].score, 8);
}

#[test]
fn test_excluded_penalty_arithmetic() {
    let engine = engine();
    let parsed = engine.parse_only("辛くない簡単な鶏肉料理");
    let candidate = RecipeCandidate::new(recipe(
        10,
        "簡単よだれ鶏",
        "辛味がきいた一品",
        &["鶏肉", "ラー油"],
        &[],
        &[],
    ));
    let scored = score_text(&parsed, candidate.folded_text(), &ScoreWeights::default());
    assert_eq!(scored.score, 20 + 8 - 50);
    assert!(scored.contains_excluded);
}

#[test]
fn test_cooking_methods_add_up() {
    let results = engine().search("オーブンで焼き", 10).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].recipe_id, 5);
    assert_eq!(results[0].score, 30);
}

#[test]
fn test_synonym_query_matches_canonical_recipe_text() {
    assert_eq!(result_ids(&engine(), "チキン"), result_ids(&engine(), "鶏肉"));
}

#[test]
fn test_no_match_returns_empty() {
    assert!(engine().search("ガパオライス", 10).unwrap().is_empty());
}

#[test]
fn test_max_results_truncates() {
    let results = engine().search("和食", 2).unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.score > 0));
}

#[test]
fn test_results_sorted_descending() {
    let results = engine().search("簡単な和食の鶏むね肉", 10).unwrap();
    assert!(!results.is_empty());
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    assert_eq!(results[0].recipe_id, 1);
}

#[test]
fn test_reject_policy_drops_recipes_with_excluded_ingredient() {
    let collection = vec![
        recipe(1, "ピリ辛チキン南蛮", "辛味たっぷり", &["鶏肉", "唐辛子"], &["揚げ焼きにする"], &["和食"]),
        recipe(2, "チキン南蛮", "甘酢だれ", &["鶏肉", "卵"], &["揚げ焼きにする"], &["和食"]),
    ];
    let query = "辛くない鶏肉の和食";

    let penalty = RecipeSearchEngine::new(EngineConfig::default(), Arc::new(InMemoryRecipes::new(collection.clone())))
        .unwrap();
    // 20 + 10 - 50 is still a non-match; the mild recipe wins either way.
    assert_eq!(result_ids(&penalty, query), vec![2]);

    let config = EngineConfig {
        exclusion_policy: ExclusionPolicy::Reject,
        weights: ScoreWeights {
            excluded_ingredient: -1,
            ..ScoreWeights::default()
        },
        ..EngineConfig::default()
    };
    let reject = RecipeSearchEngine::new(config, Arc::new(InMemoryRecipes::new(collection))).unwrap();
    assert_eq!(result_ids(&reject, query), vec![2]);
}

#[test]
fn test_small_penalty_lets_strong_match_through() {
    let collection = vec![recipe(1, "ピリ辛チキン南蛮", "辛味たっぷり", &["鶏肉"], &[], &["和食"])];
    let config = EngineConfig {
        weights: ScoreWeights {
            excluded_ingredient: -1,
            ..ScoreWeights::default()
        },
        ..EngineConfig::default()
    };
    let engine = RecipeSearchEngine::new(config, Arc::new(InMemoryRecipes::new(collection))).unwrap();
    let results = engine.search("辛くない鶏肉の和食", 10).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].score, 20 + 10 - 1);
}

#[test]
fn test_parallel_ranking_matches_sequential() {
    let collection: Vec<_> = (0..2000)
        .map(|i| {
            let ingredients: &[&str] = match i % 4 {
                0 => &["鶏肉", "卵"],
                1 => &["鶏肉", "唐辛子"],
                2 => &["豚肉"],
                _ => &["鶏肉"],
            };
            let tags: &[&str] = if i % 3 == 0 { &["和食"] } else { &["中華"] };
            recipe(i, &format!("レシピ{i}"), "簡単", ingredients, &[], tags)
        })
        .collect();

    let run = |threshold: usize| {
        let config = EngineConfig {
            parallel_threshold: threshold,
            ..EngineConfig::default()
        };
        let engine = RecipeSearchEngine::new(config, Arc::new(InMemoryRecipes::new(collection.clone()))).unwrap();
        engine.search("唐辛子なしの簡単な鶏肉の和食", 500).unwrap()
    };

    let parallel = run(1);
    let sequential = run(usize::MAX);
    assert_eq!(parallel, sequential);
    assert_eq!(parallel.len(), 500);
}

// ============================================================
// Suggestions and History
// ============================================================

#[test]
fn test_suggest_from_lexicon_when_history_empty() {
    let engine = engine();
    let lexicon = Lexicon::from_json_str(r#"{ "categories": { "ingredient": ["鶏肉", "鶏むね肉", "豚肉"] } }"#).unwrap();
    engine.replace_lexicon(lexicon);
    assert_eq!(engine.suggest("鶏", 5), vec!["鶏肉", "鶏むね肉"]);
    assert_eq!(engine.suggest("鶏", 1), vec!["鶏肉"]);
}

#[test]
fn test_repeated_searches_each_recorded() {
    let engine = engine_with(EngineConfig {
        history_capacity: 3,
        ..EngineConfig::default()
    });
    for _ in 0..3 {
        engine.search("鶏肉", 10).unwrap();
    }
    let history = engine.history(10);
    assert_eq!(history.len(), 3);
    assert!(history.iter().all(|e| e.query == "鶏肉" && e.result_count == 2));

    engine.search("豚肉", 10).unwrap();
    let history = engine.history(10);
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].query, "豚肉");
    assert_eq!(history[0].result_count, 1);
    assert_eq!(history.iter().filter(|e| e.query == "鶏肉").count(), 2);
}

#[test]
fn test_concurrent_searches_all_recorded() {
    let engine = Arc::new(engine_with(EngineConfig {
        history_capacity: 1000,
        ..EngineConfig::default()
    }));
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                let query = if t % 2 == 0 { "鶏肉" } else { "簡単な和食" };
                for _ in 0..25 {
                    assert!(!engine.search(query, 10).unwrap().is_empty());
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(engine.history(1000).len(), 200);
}
