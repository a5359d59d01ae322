use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a002_meal::aggregate::{IngredientsIndex, Meal, MealDto, MealListQuery, MealPage};
use contracts::domain::a002_meal::plate_cost::PlateCost;
use serde_json::json;

use crate::domain::a002_meal;
use crate::shared::error::{ApiResult, ServiceError};

fn parse_id(id: &str) -> Result<uuid::Uuid, ServiceError> {
    uuid::Uuid::parse_str(id).map_err(|_| ServiceError::Validation(format!("Invalid id '{}'", id)))
}

/// GET /api/meals?category=&search=&page=&limit=
pub async fn list_page(Query(query): Query<MealListQuery>) -> ApiResult<Json<MealPage>> {
    Ok(Json(a002_meal::service::list_page(&query).await?))
}

/// GET /api/meals/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Json<Meal>> {
    a002_meal::service::get_by_id(parse_id(&id)?)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::NotFound("Meal".into()).into())
}

/// POST /api/meals
pub async fn upsert(Json(dto): Json<MealDto>) -> ApiResult<Json<serde_json::Value>> {
    let id = match dto.id.clone().filter(|id| !id.is_empty()) {
        Some(id) => {
            a002_meal::service::update(dto).await?;
            id
        }
        None => a002_meal::service::create(dto).await?.to_string(),
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/meals/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<StatusCode> {
    if a002_meal::service::delete(parse_id(&id)?).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ServiceError::NotFound("Meal".into()).into())
    }
}

/// GET /api/meals/:id/cost
pub async fn plate_cost(Path(id): Path<String>) -> ApiResult<Json<PlateCost>> {
    Ok(Json(a002_meal::service::cost_of(parse_id(&id)?).await?))
}

/// GET /api/meals/ingredients-index
pub async fn ingredients_index() -> ApiResult<Json<IngredientsIndex>> {
    Ok(Json(a002_meal::service::ingredients_index().await?))
}
