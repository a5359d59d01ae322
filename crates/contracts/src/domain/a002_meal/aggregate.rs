use serde::{Deserialize, Serialize};

use crate::domain::common::BaseAggregate;
use crate::shared::item_classifier;
use crate::shared::money::round_pennies;

crate::uuid_aggregate_id!(MealId);

/// One recipe line: grams (or units) of a stock ingredient per plate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealIngredient {
    #[serde(alias = "name")]
    pub ingredient: String,
    pub quantity: f64,
}

/// Sellable menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    #[serde(flatten)]
    pub base: BaseAggregate<MealId>,
    pub price: f64,
    pub category: String,
    pub allergens: String,
    pub calories: Option<i32>,
    pub ingredients: Vec<MealIngredient>,
}

impl Meal {
    pub fn new_for_insert(dto: &MealDto) -> Self {
        let id = MealId::new_v4();
        let code = format!("MEAL-{}", &id.value().simple().to_string()[..8]);
        let mut meal = Self {
            base: BaseAggregate::new(id, code, String::new()),
            price: 0.0,
            category: String::new(),
            allergens: String::new(),
            calories: None,
            ingredients: Vec::new(),
        };
        meal.update(dto);
        meal
    }

    pub fn name(&self) -> &str {
        &self.base.description
    }

    pub fn update(&mut self, dto: &MealDto) {
        if (self.price - dto.price).abs() > f64::EPSILON && !self.base.description.is_empty() {
            self.base.events.record("price_changed");
        }
        self.base.description = dto.name.trim().to_string();
        self.price = round_pennies(dto.price);
        self.category = dto.category.trim().to_string();
        self.allergens = dto
            .allergens
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or("None")
            .to_string();
        self.calories = dto.calories;
        self.ingredients = dto
            .ingredients
            .iter()
            .map(|i| MealIngredient {
                ingredient: i.ingredient.trim().to_string(),
                quantity: i.quantity,
            })
            .collect();
    }

    pub fn is_drink(&self) -> bool {
        item_classifier::is_drink(self.name())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.is_empty() {
            return Err("Meal name is required".into());
        }
        if self.price.is_nan() || self.price <= 0.0 {
            return Err("Price must be greater than zero".into());
        }
        if self.ingredients.is_empty() {
            return Err("Add at least one ingredient".into());
        }
        for line in &self.ingredients {
            if line.ingredient.is_empty() {
                return Err("Ingredient name is required".into());
            }
            if line.quantity.is_nan() || line.quantity <= 0.0 {
                return Err(format!("Quantity of {} must be greater than zero", line.ingredient));
            }
        }
        if let Some(calories) = self.calories {
            if calories < 0 {
                return Err("Calories cannot be negative".into());
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }
}

crate::impl_aggregate_root!(Meal, MealId, "a002", "meal", "Meal", "Meals");

/// Payload of POST /api/meals; `id` set means update
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MealDto {
    pub id: Option<String>,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub allergens: Option<String>,
    #[serde(default)]
    pub calories: Option<i32>,
    #[serde(default)]
    pub ingredients: Vec<MealIngredient>,
}

impl From<&Meal> for MealDto {
    fn from(meal: &Meal) -> Self {
        Self {
            id: Some(meal.base.id.value().to_string()),
            name: meal.name().to_string(),
            price: meal.price,
            category: meal.category.clone(),
            allergens: Some(meal.allergens.clone()),
            calories: meal.calories,
            ingredients: meal.ingredients.clone(),
        }
    }
}

/// Query string of GET /api/meals
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MealListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of meals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPage {
    pub items: Vec<Meal>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

impl MealPage {
    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            return 1;
        }
        self.total.div_ceil(self.limit).max(1)
    }
}

/// Applies category/search filters and slices one page (pages start at 1).
pub fn paginate(meals: Vec<Meal>, query: &MealListQuery) -> MealPage {
    let category = query
        .category
        .as_deref()
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty() && c != "all");
    let search = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let filtered: Vec<Meal> = meals
        .into_iter()
        .filter(|m| match &category {
            Some(c) => m.category.to_lowercase() == *c,
            None => true,
        })
        .filter(|m| match &search {
            Some(s) => m.name().to_lowercase().contains(s.as_str()),
            None => true,
        })
        .collect();

    let limit = query.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_PAGE_SIZE);
    let page = query.page.filter(|p| *p > 0).unwrap_or(1);
    let total = filtered.len();
    let items = filtered
        .into_iter()
        .skip((page - 1) * limit)
        .take(limit)
        .collect();

    MealPage {
        items,
        total,
        page,
        limit,
    }
}

/// Meal name → ingredient names, for the kitchen prep summary
pub type IngredientsIndex = std::collections::HashMap<String, Vec<String>>;

pub fn build_ingredients_index(meals: &[Meal]) -> IngredientsIndex {
    meals
        .iter()
        .map(|m| {
            (
                m.name().to_lowercase(),
                m.ingredients.iter().map(|i| i.ingredient.clone()).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(name: &str, price: f64, category: &str) -> MealDto {
        MealDto {
            id: None,
            name: name.into(),
            price,
            category: category.into(),
            allergens: None,
            calories: Some(850),
            ingredients: vec![MealIngredient {
                ingredient: "Back Bacon Unsmoked".into(),
                quantity: 60.0,
            }],
        }
    }

    #[test]
    fn test_new_meal_from_dto() {
        let meal = Meal::new_for_insert(&dto("  Full English ", 9.999, "Breakfast"));
        assert_eq!(meal.name(), "Full English");
        assert_eq!(meal.price, 10.0);
        assert_eq!(meal.allergens, "None");
        assert!(meal.base.code.starts_with("MEAL-"));
        assert!(meal.validate().is_ok());
        assert!(!meal.is_drink());
    }

    #[test]
    fn test_validation_rules() {
        assert!(Meal::new_for_insert(&dto("", 5.0, "x")).validate().is_err());
        assert!(Meal::new_for_insert(&dto("Toast", 0.0, "x")).validate().is_err());

        let mut no_ingredients = dto("Toast", 2.0, "x");
        no_ingredients.ingredients.clear();
        assert!(Meal::new_for_insert(&no_ingredients).validate().is_err());

        let mut zero_quantity = dto("Toast", 2.0, "x");
        zero_quantity.ingredients[0].quantity = 0.0;
        assert!(Meal::new_for_insert(&zero_quantity).validate().is_err());
    }

    #[test]
    fn test_price_change_records_event() {
        let mut meal = Meal::new_for_insert(&dto("Full English", 9.5, "Breakfast"));
        assert!(meal.base.events.pending().is_empty());
        meal.update(&dto("Full English", 10.5, "Breakfast"));
        assert_eq!(meal.base.events.pending(), ["price_changed".to_string()]);
    }

    #[test]
    fn test_paginate_filters_and_slices() {
        let meals: Vec<Meal> = (1..=25)
            .map(|i| {
                let category = if i % 5 == 0 { "Drinks" } else { "Breakfast" };
                Meal::new_for_insert(&dto(&format!("Item {i}"), 1.0, category))
            })
            .collect();

        let page = paginate(meals.clone(), &MealListQuery { page: Some(3), ..Default::default() });
        assert_eq!(page.total, 25);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total_pages(), 3);

        let drinks = paginate(
            meals.clone(),
            &MealListQuery { category: Some("drinks".into()), ..Default::default() },
        );
        assert_eq!(drinks.total, 5);

        let search = paginate(
            meals,
            &MealListQuery { search: Some("item 2".into()), ..Default::default() },
        );
        // Item 2, Item 20..25
        assert_eq!(search.total, 7);
    }

    #[test]
    fn test_ingredients_index_uses_lowercase_names() {
        let meal = Meal::new_for_insert(&dto("Full English", 9.5, "Breakfast"));
        let index = build_ingredients_index(&[meal]);
        assert_eq!(index["full english"], vec!["Back Bacon Unsmoked".to_string()]);
    }
}
