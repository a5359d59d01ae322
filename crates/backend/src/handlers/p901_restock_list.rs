use axum::Json;
use contracts::projections::p901_restock_list::dto::RestockList;

use crate::projections::p901_restock_list::service;
use crate::shared::error::ApiResult;

/// GET /api/stock/restock
pub async fn get_restock_list() -> ApiResult<Json<RestockList>> {
    Ok(Json(service::get_restock_list().await?))
}
