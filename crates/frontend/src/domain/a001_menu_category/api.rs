use contracts::domain::a001_menu_category::aggregate::{MenuCategory, MenuCategoryDto};

use crate::shared::api_utils::{delete, get_json, post_json};

pub async fn fetch_categories() -> Result<Vec<MenuCategory>, String> {
    get_json("/api/categories").await
}

/// Returns the new category id.
pub async fn create_category(dto: &MenuCategoryDto) -> Result<String, String> {
    let body: serde_json::Value = post_json("/api/categories", dto).await?;
    Ok(body
        .get("id")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string())
}

pub async fn delete_category(id: &str) -> Result<(), String> {
    delete(&format!("/api/categories/{}", id)).await
}
