use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a005_order_line::aggregate::OrderLine;
use contracts::domain::a005_order_line::requests::{GroupedOrderRequest, GroupedOrderResponse};
use contracts::usecases::u502_kitchen_display::request::{
    ClearedRows, DeliveryStatusRequest, DeliveryStatusResponse, RestoreRequest,
};
use contracts::usecases::u501_pos_terminal::request::AffectedRows;

use crate::domain::a005_order_line;
use crate::shared::error::ApiResult;

/// POST /api/orders/grouped
pub async fn place_grouped(
    Json(request): Json<GroupedOrderRequest>,
) -> ApiResult<(StatusCode, Json<GroupedOrderResponse>)> {
    let response = a005_order_line::service::place_grouped(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/orders
pub async fn kitchen_feed() -> ApiResult<Json<Vec<OrderLine>>> {
    Ok(Json(a005_order_line::service::kitchen_feed().await?))
}

/// GET /api/orders/by-table/:table
pub async fn by_table(Path(table): Path<String>) -> ApiResult<Json<Vec<OrderLine>>> {
    Ok(Json(a005_order_line::service::by_table(&table).await?))
}

/// DELETE /api/orders/:id
pub async fn bump(Path(id): Path<String>) -> ApiResult<StatusCode> {
    a005_order_line::service::bump(&id).await?;
    Ok(StatusCode::OK)
}

/// DELETE /api/orders/clear-all
pub async fn clear_all() -> ApiResult<Json<ClearedRows>> {
    Ok(Json(a005_order_line::service::clear_all().await?))
}

/// POST /api/orders/restore
pub async fn restore(Json(request): Json<RestoreRequest>) -> ApiResult<Json<AffectedRows>> {
    let affected = a005_order_line::service::restore(&request.ids).await?;
    Ok(Json(AffectedRows { affected }))
}

/// PUT /api/orders/delivery-status/:batch_id
pub async fn delivery_status(
    Path(batch_id): Path<String>,
    Json(request): Json<DeliveryStatusRequest>,
) -> ApiResult<Json<DeliveryStatusResponse>> {
    Ok(Json(
        a005_order_line::service::set_delivery_status(&batch_id, request.status).await?,
    ))
}
