//! Ingredient counts per kitchen card.

use super::batch::KitchenBatch;
use crate::domain::a002_meal::aggregate::IngredientsIndex;

/// Long stock names folded into the short word cooks use.
pub const INGREDIENT_ALIASES: &[(&str, &str)] = &[
    ("cumberland sausage", "sausage"),
    ("pork sausage", "sausage"),
    ("free range eggs", "egg"),
    ("baked beans", "beans"),
    ("sliced mushrooms", "mushroom"),
    ("frozen hashbrowns", "hashbrown"),
    ("back bacon unsmoked", "bacon"),
    ("crushed tomatoes", "tomato"),
];

pub fn prep_label(ingredient: &str) -> String {
    let lower = ingredient.to_lowercase();
    INGREDIENT_ALIASES
        .iter()
        .find(|(long, _)| lower.contains(long))
        .map(|(_, short)| short.to_string())
        .unwrap_or_else(|| ingredient.to_string())
}

/// Each ingredient of each item counts once per portion ordered. Labels
/// keep first-seen order.
pub fn summarize(batch: &KitchenBatch, index: &IngredientsIndex) -> Vec<(String, u32)> {
    let mut out: Vec<(String, u32)> = Vec::new();
    for item in &batch.items {
        let Some(ingredients) = index.get(&item.meal_name.trim().to_lowercase()) else {
            continue;
        };
        for ingredient in ingredients {
            let label = prep_label(ingredient);
            match out.iter_mut().find(|(l, _)| *l == label) {
                Some((_, count)) => *count += item.quantity,
                None => out.push((label, item.quantity)),
            }
        }
    }
    out
}

pub fn total_portions(summary: &[(String, u32)]) -> u32 {
    summary.iter().map(|(_, n)| n).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u502_kitchen_display::batch::group_batches;
    use crate::usecases::u502_kitchen_display::row::KitchenRow;

    #[test]
    fn test_aliases() {
        assert_eq!(prep_label("Cumberland Sausage 6pk"), "sausage");
        assert_eq!(prep_label("Crushed Tomatoes"), "tomato");
        assert_eq!(prep_label("Milk"), "Milk");
    }

    #[test]
    fn test_summary_counts_portions() {
        let rows: Vec<KitchenRow> = serde_json::from_value(serde_json::json!([
            {"id":"1","batch_id":"b","meal_name":"Full English","quantity":2,"created_at":"2025-01-01T10:00:00Z"},
            {"id":"2","batch_id":"b","meal_name":"Sausage Bap","quantity":1,"created_at":"2025-01-01T10:00:00Z"},
            {"id":"3","batch_id":"b","meal_name":"Mystery","quantity":5,"created_at":"2025-01-01T10:00:00Z"}
        ]))
        .unwrap();
        let batch = group_batches(rows, &["meals".to_string()]).remove(0);

        let mut index = IngredientsIndex::new();
        index.insert(
            "full english".into(),
            vec!["Cumberland Sausage".into(), "Free Range Eggs".into(), "Baked Beans".into()],
        );
        index.insert("sausage bap".into(), vec!["Pork Sausage".into(), "Bap".into()]);

        let summary = summarize(&batch, &index);
        assert_eq!(summary[0], ("sausage".to_string(), 3));
        assert!(summary.contains(&("egg".to_string(), 2)));
        assert!(summary.contains(&("Bap".to_string(), 1)));
        assert_eq!(total_portions(&summary), 8);
    }
}
