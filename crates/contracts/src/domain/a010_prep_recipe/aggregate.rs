use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::common::BaseAggregate;

crate::uuid_aggregate_id!(PrepRecipeId);

pub const DEFAULT_PREP_UNIT: &str = "kg";
pub const DEFAULT_SHELF_LIFE_HOURS: u32 = 48;
pub const DEFAULT_PREP_MINIMUM: f64 = 2.0;

/// Stock ingredient used per one unit of the prepped item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepIngredient {
    pub ingredient: String,
    pub amount: f64,
}

/// Something the kitchen makes ahead (sauces, doughs, stocks)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepRecipe {
    #[serde(flatten)]
    pub base: BaseAggregate<PrepRecipeId>,
    pub unit: String,
    pub ingredients: Vec<PrepIngredient>,
    pub hold_temperature: String,
    pub shelf_life_hours: u32,
    /// Below this much in stock the item shows on the prep list
    pub minimum_level: f64,
}

impl PrepRecipe {
    pub fn new_for_insert(dto: &PrepRecipeDto) -> Self {
        let id = PrepRecipeId::new_v4();
        let code = format!("PREP-{}", &id.value().simple().to_string()[..8]);
        let mut recipe = Self {
            base: BaseAggregate::new(id, code, String::new()),
            unit: DEFAULT_PREP_UNIT.to_string(),
            ingredients: Vec::new(),
            hold_temperature: String::new(),
            shelf_life_hours: DEFAULT_SHELF_LIFE_HOURS,
            minimum_level: DEFAULT_PREP_MINIMUM,
        };
        recipe.update(dto);
        recipe
    }

    pub fn name(&self) -> &str {
        &self.base.description
    }

    pub fn update(&mut self, dto: &PrepRecipeDto) {
        self.base.description = dto.name.trim().to_string();
        self.unit = Some(dto.unit.trim())
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_PREP_UNIT)
            .to_string();
        self.ingredients = dto
            .ingredients
            .iter()
            .map(|i| PrepIngredient {
                ingredient: i.ingredient.trim().to_string(),
                amount: i.amount,
            })
            .collect();
        self.hold_temperature = dto.hold_temperature.trim().to_string();
        self.shelf_life_hours = dto.shelf_life_hours.unwrap_or(DEFAULT_SHELF_LIFE_HOURS);
        self.minimum_level = dto
            .minimum_level
            .filter(|m| m.is_finite() && *m >= 0.0)
            .unwrap_or(DEFAULT_PREP_MINIMUM);
    }

    /// A batch made on `made` is good until the end of the returned day.
    pub fn expiry_for(&self, made: NaiveDate) -> NaiveDate {
        let days = u64::from(self.shelf_life_hours.div_ceil(24));
        made.checked_add_days(Days::new(days)).unwrap_or(made)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.is_empty() {
            return Err("Prepped item name is required".into());
        }
        if self.ingredients.is_empty() {
            return Err("Add at least one ingredient".into());
        }
        for line in &self.ingredients {
            if line.ingredient.is_empty() {
                return Err("Ingredient name is required".into());
            }
            if !line.amount.is_finite() || line.amount <= 0.0 {
                return Err(format!("Amount of {} must be greater than zero", line.ingredient));
            }
            if line.ingredient.eq_ignore_ascii_case(&self.base.description) {
                return Err(format!("{} cannot be made from itself", line.ingredient));
            }
        }
        if self.shelf_life_hours == 0 {
            return Err("Shelf life must be at least one hour".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }
}

crate::impl_aggregate_root!(PrepRecipe, PrepRecipeId, "a010", "prep_recipe", "Prepped item", "Prepped items");

/// Payload of POST /api/prep-recipes and PUT /api/prep-recipes/:id
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PrepRecipeDto {
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub ingredients: Vec<PrepIngredient>,
    #[serde(default)]
    pub hold_temperature: String,
    #[serde(default)]
    pub shelf_life_hours: Option<u32>,
    #[serde(default)]
    pub minimum_level: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(name: &str, ingredients: &[(&str, f64)]) -> PrepRecipeDto {
        PrepRecipeDto {
            name: name.into(),
            ingredients: ingredients
                .iter()
                .map(|(i, a)| PrepIngredient { ingredient: i.to_string(), amount: *a })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_and_validation() {
        let recipe = PrepRecipe::new_for_insert(&dto(" Gravy ", &[(" Stock ", 0.8), ("Flour", 0.05)]));
        assert_eq!(recipe.name(), "Gravy");
        assert_eq!(recipe.unit, "kg");
        assert_eq!(recipe.shelf_life_hours, 48);
        assert_eq!(recipe.ingredients[0].ingredient, "Stock");
        assert!(recipe.validate().is_ok());

        let empty = PrepRecipe::new_for_insert(&dto("Gravy", &[]));
        assert_eq!(empty.validate().unwrap_err(), "Add at least one ingredient");

        let zero = PrepRecipe::new_for_insert(&dto("Gravy", &[("Flour", 0.0)]));
        assert_eq!(zero.validate().unwrap_err(), "Amount of Flour must be greater than zero");

        let looped = PrepRecipe::new_for_insert(&dto("Gravy", &[("gravy", 1.0)]));
        assert!(looped.validate().is_err());
    }

    #[test]
    fn test_expiry_rounds_up_to_whole_days() {
        let made = NaiveDate::from_ymd_opt(2024, 3, 30).unwrap();
        let mut recipe = PrepRecipe::new_for_insert(&dto("Gravy", &[("Flour", 1.0)]));
        assert_eq!(recipe.expiry_for(made), NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        recipe.shelf_life_hours = 30;
        assert_eq!(recipe.expiry_for(made), NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        recipe.shelf_life_hours = 12;
        assert_eq!(recipe.expiry_for(made), NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }
}
