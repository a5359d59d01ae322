use contracts::domain::a002_meal::aggregate::{IngredientsIndex, Meal, MealListQuery, MealPage};
use contracts::domain::a002_meal::plate_cost::PlateCost;

use crate::shared::api_utils::{delete, get_json};

/// Large enough to load the whole menu for the till.
pub const FULL_MENU_LIMIT: usize = 1000;

pub async fn fetch_page(query: &MealListQuery) -> Result<MealPage, String> {
    let qs = serde_qs::to_string(query).map_err(|e| format!("Failed to build query: {}", e))?;
    get_json(&format!("/api/meals?{}", qs)).await
}

pub async fn fetch_full_menu() -> Result<Vec<Meal>, String> {
    let query = MealListQuery {
        page: Some(1),
        limit: Some(FULL_MENU_LIMIT),
        ..Default::default()
    };
    Ok(fetch_page(&query).await?.items)
}

pub async fn delete_meal(id: &str) -> Result<(), String> {
    delete(&format!("/api/meals/{}", id)).await
}

/// Managers and admins only; staff get 403.
pub async fn fetch_plate_cost(id: &str) -> Result<PlateCost, String> {
    get_json(&format!("/api/meals/{}/cost", id)).await
}

pub async fn fetch_ingredients_index() -> Result<IngredientsIndex, String> {
    get_json("/api/meals/ingredients-index").await
}
