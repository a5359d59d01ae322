use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a009_supplier_order::aggregate::{PlaceOrdersRequest, SupplierOrder};
use contracts::projections::p902_smart_order::dto::SmartOrder;

use crate::projections::p902_smart_order::service;
use crate::shared::error::{ApiResult, ServiceError};
use crate::system::auth::extractor::CurrentUser;

/// GET /api/ordering/smart-order
pub async fn get_smart_order() -> ApiResult<Json<SmartOrder>> {
    Ok(Json(service::get_smart_order().await?))
}

/// POST /api/ordering/orders
pub async fn place_orders(
    CurrentUser(claims): CurrentUser,
    Json(request): Json<PlaceOrdersRequest>,
) -> ApiResult<(StatusCode, Json<Vec<SupplierOrder>>)> {
    let orders = service::place_orders(request, &claims.username).await?;
    Ok((StatusCode::CREATED, Json(orders)))
}

/// POST /api/ordering/auto-restock/:stock_id
pub async fn auto_restock(
    CurrentUser(claims): CurrentUser,
    Path(stock_id): Path<String>,
) -> ApiResult<(StatusCode, Json<SupplierOrder>)> {
    let stock_id = uuid::Uuid::parse_str(&stock_id)
        .map_err(|_| ServiceError::Validation(format!("Invalid id '{}'", stock_id)))?;
    let order = service::auto_restock(stock_id, &claims.username).await?;
    Ok((StatusCode::CREATED, Json(order)))
}
