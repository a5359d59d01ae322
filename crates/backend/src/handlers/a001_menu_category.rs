use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a001_menu_category::aggregate::{MenuCategory, MenuCategoryDto};
use serde_json::json;

use crate::domain::a001_menu_category;
use crate::shared::error::{ApiResult, ServiceError};

fn parse_id(id: &str) -> Result<uuid::Uuid, ServiceError> {
    uuid::Uuid::parse_str(id).map_err(|_| ServiceError::Validation(format!("Invalid id '{}'", id)))
}

/// GET /api/categories
pub async fn list_all() -> ApiResult<Json<Vec<MenuCategory>>> {
    Ok(Json(a001_menu_category::service::list_all().await?))
}

/// POST /api/categories
pub async fn create(Json(dto): Json<MenuCategoryDto>) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let id = a001_menu_category::service::create(dto).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id.to_string() }))))
}

/// DELETE /api/categories/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<StatusCode> {
    if a001_menu_category::service::delete(parse_id(&id)?).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ServiceError::NotFound("Category".into()).into())
    }
}
