use contracts::domain::a010_prep_recipe::aggregate::{PrepRecipe, PrepRecipeDto};

use crate::shared::api_utils::{delete, get_json, post_json, send_no_content};

pub async fn fetch_recipes() -> Result<Vec<PrepRecipe>, String> {
    get_json("/api/prep-recipes").await
}

pub async fn create_recipe(dto: &PrepRecipeDto) -> Result<(), String> {
    let _: serde_json::Value = post_json("/api/prep-recipes", dto).await?;
    Ok(())
}

pub async fn update_recipe(id: &str, dto: &PrepRecipeDto) -> Result<(), String> {
    send_no_content("PUT", &format!("/api/prep-recipes/{}", id), dto).await
}

pub async fn delete_recipe(id: &str) -> Result<(), String> {
    delete(&format!("/api/prep-recipes/{}", id)).await
}
