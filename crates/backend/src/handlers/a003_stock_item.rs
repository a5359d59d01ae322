use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a003_stock_item::aggregate::{ExpiredRemoval, StockItem, StockItemDto, StockPriceDto};
use serde_json::json;

use crate::domain::a003_stock_item;
use crate::shared::error::{ApiResult, ServiceError};

fn parse_id(id: &str) -> Result<uuid::Uuid, ServiceError> {
    uuid::Uuid::parse_str(id).map_err(|_| ServiceError::Validation(format!("Invalid id '{}'", id)))
}

/// GET /api/stock
pub async fn list_all() -> ApiResult<Json<Vec<StockItem>>> {
    Ok(Json(a003_stock_item::service::list_all().await?))
}

/// POST /api/stock
pub async fn create(Json(dto): Json<StockItemDto>) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let id = a003_stock_item::service::create(dto).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id.to_string() }))))
}

/// PUT /api/stock/:id
pub async fn update(Path(id): Path<String>, Json(dto): Json<StockItemDto>) -> ApiResult<StatusCode> {
    a003_stock_item::service::update(parse_id(&id)?, dto).await?;
    Ok(StatusCode::OK)
}

/// PUT /api/stock/:id/price
pub async fn set_price(Path(id): Path<String>, Json(dto): Json<StockPriceDto>) -> ApiResult<StatusCode> {
    a003_stock_item::service::set_price(parse_id(&id)?, dto.price).await?;
    Ok(StatusCode::OK)
}

/// DELETE /api/stock/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<StatusCode> {
    if a003_stock_item::service::delete(parse_id(&id)?).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ServiceError::NotFound("Stock item".into()).into())
    }
}

/// DELETE /api/stock/expired
pub async fn remove_expired() -> ApiResult<Json<ExpiredRemoval>> {
    Ok(Json(a003_stock_item::service::remove_expired().await?))
}
