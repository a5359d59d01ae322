use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a010_prep_recipe::aggregate::{PrepRecipe, PrepRecipeDto};
use serde_json::json;

use crate::domain::a010_prep_recipe;
use crate::shared::error::{ApiResult, ServiceError};

fn parse_id(id: &str) -> Result<uuid::Uuid, ServiceError> {
    uuid::Uuid::parse_str(id).map_err(|_| ServiceError::Validation(format!("Invalid id '{}'", id)))
}

/// GET /api/prep-recipes
pub async fn list_all() -> ApiResult<Json<Vec<PrepRecipe>>> {
    Ok(Json(a010_prep_recipe::service::list_all().await?))
}

/// POST /api/prep-recipes
pub async fn create(Json(dto): Json<PrepRecipeDto>) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let id = a010_prep_recipe::service::create(dto).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id.to_string() }))))
}

/// PUT /api/prep-recipes/:id
pub async fn update(Path(id): Path<String>, Json(dto): Json<PrepRecipeDto>) -> ApiResult<StatusCode> {
    a010_prep_recipe::service::update(parse_id(&id)?, dto).await?;
    Ok(StatusCode::OK)
}

/// DELETE /api/prep-recipes/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<StatusCode> {
    if a010_prep_recipe::service::delete(parse_id(&id)?).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ServiceError::NotFound("Prepped item".into()).into())
    }
}
