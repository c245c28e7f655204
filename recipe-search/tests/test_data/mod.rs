//! Shared recipe fixtures for integration tests.

#![allow(dead_code)]

use recipe_search::RecipeDocument;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn recipe(id: i64, title: &str, description: &str, ingredients: &[&str], steps: &[&str], tags: &[&str]) -> RecipeDocument {
    RecipeDocument {
        id,
        title: title.to_string(),
        description: description.to_string(),
        ingredients: strings(ingredients),
        steps: strings(steps),
        tags: strings(tags),
    }
}

/// A small home-cooking collection, newest first.
pub fn sample_recipes() -> Vec<RecipeDocument> {
    vec![
        recipe(
            1,
            "鶏むね肉のレンジ蒸し",
            "簡単でヘルシーな作り置き",
            &["鶏むね肉", "生姜", "酒", "塩"],
            &["鶏むね肉に塩をふる", "電子レンジで5分加熱する"],
            &["和食", "主菜"],
        ),
        recipe(
            2,
            "ピリ辛よだれ鶏",
            "辛味の効いた中華の定番",
            &["鶏肉", "唐辛子", "ラー油", "にんにく"],
            &["鶏肉を茹でる", "タレをかける"],
            &["中華", "おつまみ"],
        ),
        recipe(
            3,
            "親子丼",
            "簡単に作れる丼もの",
            &["鶏肉", "卵", "玉ねぎ", "醤油", "みりん"],
            &["玉ねぎを煮る", "鶏肉を加えて卵でとじる"],
            &["和食", "丼"],
        ),
        recipe(
            4,
            "豚肉とキャベツの味噌炒め",
            "ごはんが進むおかず",
            &["豚肉", "キャベツ", "味噌"],
            &["フライパンで豚肉を炒める", "キャベツを加える"],
            &["中華", "主菜"],
        ),
        recipe(
            5,
            "鮭のホイル焼き",
            "オーブンで焼くだけ",
            &["鮭", "しめじ", "バター"],
            &["ホイルに包む", "オーブンで15分焼き上げる"],
            &["洋食"],
        ),
        recipe(
            6,
            "豆腐とわかめの味噌汁",
            "毎日の汁物",
            &["豆腐", "わかめ", "味噌"],
            &["だしを温める", "味噌を溶く"],
            &["和食", "汁物"],
        ),
    ]
}
