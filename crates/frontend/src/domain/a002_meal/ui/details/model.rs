use contracts::domain::a002_meal::aggregate::{Meal, MealDto};

use crate::shared::api_utils::{get_json, post_json};

pub async fn fetch_by_id(id: &str) -> Result<Meal, String> {
    get_json(&format!("/api/meals/{}", id)).await
}

/// Creates or updates depending on `dto.id`; returns the meal id.
pub async fn save_form(dto: &MealDto) -> Result<String, String> {
    let body: serde_json::Value = post_json("/api/meals", dto).await?;
    body.get("id")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| "Server did not return an id".to_string())
}
