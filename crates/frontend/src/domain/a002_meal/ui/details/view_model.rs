use super::model;
use crate::domain::a001_menu_category::api as category_api;
use crate::domain::a002_meal::api;
use contracts::domain::a002_meal::aggregate::{Meal, MealDto, MealIngredient};
use contracts::domain::a002_meal::plate_cost::PlateCost;
use contracts::shared::money::parse_amount;
use leptos::prelude::*;
use std::rc::Rc;

/// ViewModel for the meal form
#[derive(Clone)]
pub struct MealDetailsViewModel {
    pub form: RwSignal<MealDto>,
    /// Price and calories are edited as text and parsed on save
    pub price_text: RwSignal<String>,
    pub calories_text: RwSignal<String>,
    pub categories: RwSignal<Vec<String>>,
    pub cost: RwSignal<Option<PlateCost>>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl MealDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(MealDto {
                category: "meals".to_string(),
                ingredients: vec![MealIngredient {
                    ingredient: String::new(),
                    quantity: 1.0,
                }],
                ..Default::default()
            }),
            price_text: RwSignal::new(String::new()),
            calories_text: RwSignal::new(String::new()),
            categories: RwSignal::new(Vec::new()),
            cost: RwSignal::new(None),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.id.is_some())
    }

    /// Loads categories, then the meal and (for managers) its plate cost.
    pub fn load(&self, id: Option<String>, with_cost: bool, on_loaded: impl Fn(String) + 'static) {
        let this = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Ok(list) = category_api::fetch_categories().await {
                this.categories.set(list.iter().map(|c| c.normalized_name()).collect());
            }
            let Some(id) = id else {
                return;
            };
            match model::fetch_by_id(&id).await {
                Ok(meal) => {
                    on_loaded(meal.name().to_string());
                    this.fill_from(&meal);
                }
                Err(e) => {
                    this.error.set(Some(format!("Failed to load meal: {}", e)));
                    return;
                }
            }
            if with_cost {
                match api::fetch_plate_cost(&id).await {
                    Ok(cost) => this.cost.set(Some(cost)),
                    Err(e) => log::warn!("Plate cost unavailable: {}", e),
                }
            }
        });
    }

    fn fill_from(&self, meal: &Meal) {
        let dto = MealDto::from(meal);
        self.price_text.set(format!("{:.2}", dto.price));
        self.calories_text
            .set(dto.calories.map(|c| c.to_string()).unwrap_or_default());
        self.form.set(dto);
    }

    pub fn add_ingredient(&self) {
        self.form.update(|f| {
            f.ingredients.push(MealIngredient {
                ingredient: String::new(),
                quantity: 1.0,
            })
        });
    }

    pub fn remove_ingredient(&self, index: usize) {
        self.form.update(|f| {
            if index < f.ingredients.len() {
                f.ingredients.remove(index);
            }
        });
    }

    pub fn set_ingredient_name(&self, index: usize, name: String) {
        self.form.update(|f| {
            if let Some(line) = f.ingredients.get_mut(index) {
                line.ingredient = name;
            }
        });
    }

    pub fn set_ingredient_quantity(&self, index: usize, text: &str) {
        let quantity = text.trim().parse::<f64>().unwrap_or(0.0);
        self.form.update(|f| {
            if let Some(line) = f.ingredients.get_mut(index) {
                line.quantity = quantity;
            }
        });
    }

    /// Form as it would be sent, or the first validation message.
    pub fn build_dto(&self) -> Result<MealDto, String> {
        let mut dto = self.form.get_untracked();
        dto.price = parse_amount(&self.price_text.get_untracked()).ok_or("Price must be a number")?;
        let calories = self.calories_text.get_untracked();
        dto.calories = match calories.trim() {
            "" => None,
            text => Some(text.parse::<i32>().map_err(|_| "Calories must be a whole number")?),
        };
        dto.ingredients
            .retain(|line| !(line.ingredient.trim().is_empty() && line.quantity <= 0.0));
        Meal::new_for_insert(&dto).validate()?;
        Ok(dto)
    }

    /// Save form data to server
    pub fn save_command(&self, on_saved: Rc<dyn Fn(())>) {
        let dto = match self.build_dto() {
            Ok(dto) => dto,
            Err(e) => {
                self.error.set(Some(e));
                return;
            }
        };

        let error = self.error;
        let saving = self.saving;
        saving.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match model::save_form(&dto).await {
                Ok(id) => {
                    log::info!("Meal saved: {}", id);
                    (on_saved)(());
                }
                Err(e) => error.set(Some(e)),
            }
            saving.set(false);
        });
    }
}
