use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a003_stock_item::aggregate::{StockItem, StockItemDto};
use crate::domain::a010_prep_recipe::aggregate::PrepRecipe;
use crate::shared::money::round_pennies;

/// Payload of POST /api/prep/prepare
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareBatchRequest {
    pub name: String,
    #[serde(alias = "batchQuantity")]
    pub batch_quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepDeduction {
    pub stock_id: String,
    pub ingredient: String,
    pub unit: String,
    pub amount: f64,
    /// Stock value used up, at the item's current unit price
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchPlan {
    pub prepped_item: String,
    pub unit: String,
    pub batch_quantity: f64,
    pub deductions: Vec<PrepDeduction>,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepareBatchResult {
    pub plan: BatchPlan,
    pub stock_id: String,
    pub in_stock: f64,
    pub expiry_date: NaiveDate,
}

/// Row of GET /api/prep/due
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepDue {
    pub recipe_id: String,
    pub prepped_item: String,
    pub unit: String,
    pub in_stock: f64,
    pub needed: f64,
    pub to_prepare: f64,
}

fn matching<'a>(stock: &'a [StockItem], name: &str) -> impl Iterator<Item = &'a StockItem> + 'a {
    let name = name.trim().to_lowercase();
    stock
        .iter()
        .filter(move |s| !s.base.metadata.is_deleted && s.ingredient().to_lowercase() == name)
}

/// Works out what a batch takes from stock. Nothing is changed; the caller
/// applies the deductions.
pub fn plan_batch(recipe: &PrepRecipe, batch_quantity: f64, stock: &[StockItem]) -> Result<BatchPlan, String> {
    if !batch_quantity.is_finite() || batch_quantity <= 0.0 {
        return Err("Batch quantity must be greater than zero".into());
    }
    let mut needed: Vec<(String, f64)> = Vec::new();
    for line in &recipe.ingredients {
        let amount = line.amount * batch_quantity;
        match needed.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(&line.ingredient)) {
            Some((_, total)) => *total += amount,
            None => needed.push((line.ingredient.clone(), amount)),
        }
    }

    let mut deductions = Vec::with_capacity(needed.len());
    for (ingredient, amount) in needed {
        let item = matching(stock, &ingredient)
            .max_by(|a, b| a.quantity.total_cmp(&b.quantity))
            .ok_or_else(|| format!("{} is not in stock", ingredient))?;
        if amount > item.quantity + 1e-9 {
            return Err(format!(
                "Not enough {}: need {} {}, have {} {}",
                item.ingredient(),
                amount,
                item.unit,
                item.quantity,
                item.unit
            ));
        }
        deductions.push(PrepDeduction {
            stock_id: item.base.id.value().to_string(),
            ingredient: item.ingredient().to_string(),
            unit: item.unit.clone(),
            amount,
            value: round_pennies(item.unit_price().unwrap_or(0.0) * amount),
        });
    }
    let cost = round_pennies(deductions.iter().map(|d| d.value).sum());
    Ok(BatchPlan {
        prepped_item: recipe.name().to_string(),
        unit: recipe.unit.clone(),
        batch_quantity,
        deductions,
        cost,
    })
}

/// New stock entry for a first batch of a prepped item
pub fn prepped_stock_dto(recipe: &PrepRecipe, plan: &BatchPlan, made: NaiveDate) -> StockItemDto {
    StockItemDto {
        ingredient: recipe.name().to_string(),
        quantity: plan.batch_quantity,
        unit: recipe.unit.clone(),
        price: plan.cost,
        minimum_level: Some(recipe.minimum_level),
        expiry_date: Some(recipe.expiry_for(made)),
        is_prepped: true,
        ..Default::default()
    }
}

/// Prepped items below their minimum, by name
pub fn prep_due(recipes: &[PrepRecipe], stock: &[StockItem]) -> Vec<PrepDue> {
    let mut due: Vec<PrepDue> = recipes
        .iter()
        .filter(|r| !r.base.metadata.is_deleted)
        .filter_map(|recipe| {
            let in_stock: f64 = matching(stock, recipe.name()).map(|s| s.quantity).sum();
            if in_stock >= recipe.minimum_level {
                return None;
            }
            Some(PrepDue {
                recipe_id: recipe.base.id.value().to_string(),
                prepped_item: recipe.name().to_string(),
                unit: recipe.unit.clone(),
                in_stock,
                needed: recipe.minimum_level,
                to_prepare: (recipe.minimum_level - in_stock).ceil(),
            })
        })
        .collect();
    due.sort_by_key(|d| d.prepped_item.to_lowercase());
    due
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a010_prep_recipe::aggregate::{PrepIngredient, PrepRecipeDto};

    fn stock(name: &str, quantity: f64, price: f64) -> StockItem {
        StockItem::new_for_insert(&StockItemDto {
            ingredient: name.into(),
            quantity,
            unit: "kg".into(),
            price,
            ..Default::default()
        })
    }

    fn gravy() -> PrepRecipe {
        PrepRecipe::new_for_insert(&PrepRecipeDto {
            name: "Gravy".into(),
            ingredients: vec![
                PrepIngredient { ingredient: "Beef Stock".into(), amount: 0.5 },
                PrepIngredient { ingredient: "flour".into(), amount: 0.1 },
                PrepIngredient { ingredient: "Flour".into(), amount: 0.1 },
            ],
            minimum_level: Some(3.0),
            ..Default::default()
        })
    }

    #[test]
    fn test_plan_scales_and_prices_the_batch() {
        let items = vec![stock("Beef Stock", 10.0, 20.0), stock("Flour", 5.0, 5.0)];
        let plan = plan_batch(&gravy(), 4.0, &items).unwrap();

        assert_eq!(plan.deductions.len(), 2);
        assert_eq!(plan.deductions[0].amount, 2.0);
        assert_eq!(plan.deductions[0].value, 4.0);
        assert_eq!(plan.deductions[1].ingredient, "Flour");
        assert!((plan.deductions[1].amount - 0.8).abs() < 1e-9);
        assert_eq!(plan.deductions[1].value, 0.8);
        assert_eq!(plan.cost, 4.8);
    }

    #[test]
    fn test_plan_refuses_short_or_missing_stock() {
        let short = vec![stock("Beef Stock", 1.0, 2.0), stock("Flour", 5.0, 5.0)];
        assert_eq!(
            plan_batch(&gravy(), 4.0, &short).unwrap_err(),
            "Not enough Beef Stock: need 2 kg, have 1 kg"
        );
        let missing = vec![stock("Beef Stock", 10.0, 2.0)];
        assert_eq!(plan_batch(&gravy(), 1.0, &missing).unwrap_err(), "flour is not in stock");
        assert!(plan_batch(&gravy(), 0.0, &missing).is_err());
    }

    #[test]
    fn test_prep_due_lists_items_below_minimum() {
        let recipe = gravy();
        assert_eq!(prep_due(std::slice::from_ref(&recipe), &[])[0].to_prepare, 3.0);

        let items = vec![stock("gravy", 1.5, 3.0)];
        let due = prep_due(std::slice::from_ref(&recipe), &items);
        assert_eq!(due[0].in_stock, 1.5);
        assert_eq!(due[0].to_prepare, 2.0);

        let plenty = vec![stock("Gravy", 3.0, 3.0)];
        assert!(prep_due(&[recipe], &plenty).is_empty());
    }

    #[test]
    fn test_first_batch_becomes_prepped_stock() {
        let recipe = gravy();
        let items = vec![stock("Beef Stock", 10.0, 20.0), stock("Flour", 5.0, 5.0)];
        let plan = plan_batch(&recipe, 2.0, &items).unwrap();
        let made = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let dto = prepped_stock_dto(&recipe, &plan, made);
        assert!(dto.is_prepped);
        assert_eq!(dto.quantity, 2.0);
        assert_eq!(dto.price, plan.cost);
        assert_eq!(dto.expiry_date, NaiveDate::from_ymd_opt(2024, 5, 3));
    }
}
