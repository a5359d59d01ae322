use serde::{Deserialize, Serialize};

use super::aggregate::{Meal, MealIngredient};
use crate::domain::a003_stock_item::aggregate::StockItem;
use crate::shared::money::round_pennies;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateCostLine {
    pub ingredient: String,
    pub quantity: f64,
    /// Cost of one unit of the stock item (price ÷ stocked quantity)
    pub unit_cost: f64,
    pub cost: f64,
}

/// Cost of one plate, derived from stock prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateCost {
    pub meal_id: String,
    pub meal_name: String,
    pub price: f64,
    pub total_cost: f64,
    pub margin: f64,
    /// Gross margin as a percentage of the selling price
    pub margin_percent: f64,
    pub lines: Vec<PlateCostLine>,
    /// Recipe ingredients with no priced stock item
    pub missing: Vec<String>,
}

/// Stock items are matched by case-insensitive ingredient name.
pub fn ingredient_costs(
    ingredients: &[MealIngredient],
    stock: &[StockItem],
) -> (Vec<PlateCostLine>, Vec<String>) {
    let mut lines = Vec::new();
    let mut missing = Vec::new();

    for recipe_line in ingredients {
        let wanted = recipe_line.ingredient.trim().to_lowercase();
        let unit_cost = stock
            .iter()
            .find(|s| s.ingredient().trim().to_lowercase() == wanted)
            .and_then(StockItem::unit_price);

        match unit_cost {
            Some(unit_cost) => lines.push(PlateCostLine {
                ingredient: recipe_line.ingredient.clone(),
                quantity: recipe_line.quantity,
                unit_cost,
                cost: round_pennies(unit_cost * recipe_line.quantity),
            }),
            None => missing.push(recipe_line.ingredient.clone()),
        }
    }

    (lines, missing)
}

pub fn plate_cost(meal: &Meal, stock: &[StockItem]) -> PlateCost {
    let (lines, missing) = ingredient_costs(&meal.ingredients, stock);
    let exact_total: f64 = lines.iter().map(|l| l.unit_cost * l.quantity).sum();
    let total_cost = round_pennies(exact_total);
    let margin = round_pennies(meal.price - total_cost);
    let margin_percent = if meal.price > 0.0 {
        round_pennies(margin / meal.price * 100.0)
    } else {
        0.0
    };

    PlateCost {
        meal_id: meal.base.id.value().to_string(),
        meal_name: meal.name().to_string(),
        price: meal.price,
        total_cost,
        margin,
        margin_percent,
        lines,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_meal::aggregate::MealDto;
    use crate::domain::a003_stock_item::aggregate::StockItemDto;

    fn stock(name: &str, quantity: f64, price: f64) -> StockItem {
        StockItem::new_for_insert(&StockItemDto {
            ingredient: name.into(),
            quantity,
            unit: "g".into(),
            price,
            ..Default::default()
        })
    }

    #[test]
    fn test_plate_cost_per_gram() {
        let meal = Meal::new_for_insert(&MealDto {
            id: None,
            name: "Bacon Bap".into(),
            price: 6.0,
            category: "Breakfast".into(),
            allergens: None,
            calories: None,
            ingredients: vec![
                MealIngredient { ingredient: "back bacon".into(), quantity: 100.0 },
                MealIngredient { ingredient: "Bap".into(), quantity: 1.0 },
                MealIngredient { ingredient: "Truffle".into(), quantity: 5.0 },
            ],
        });
        let stock = vec![
            // £8 for 2kg -> £0.004 per gram
            stock("Back Bacon", 2000.0, 8.0),
            // £3 for 12 baps
            stock("bap", 12.0, 3.0),
        ];

        let cost = plate_cost(&meal, &stock);
        assert_eq!(cost.lines.len(), 2);
        assert_eq!(cost.lines[0].cost, 0.4);
        assert_eq!(cost.lines[1].cost, 0.25);
        assert_eq!(cost.total_cost, 0.65);
        assert_eq!(cost.margin, 5.35);
        assert_eq!(cost.missing, vec!["Truffle".to_string()]);
    }

    #[test]
    fn test_out_of_stock_item_counts_as_missing() {
        let mut empty = stock("Eggs", 1.0, 2.0);
        empty.quantity = 0.0;
        let (lines, missing) = ingredient_costs(
            &[MealIngredient { ingredient: "eggs".into(), quantity: 2.0 }],
            &[empty],
        );
        assert!(lines.is_empty());
        assert_eq!(missing, vec!["eggs".to_string()]);
    }
}
