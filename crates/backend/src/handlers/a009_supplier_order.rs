use axum::{extract::Path, Json};
use contracts::domain::a009_supplier_order::aggregate::SupplierOrder;

use crate::domain::a009_supplier_order;
use crate::shared::error::ApiResult;

/// GET /api/ordering/orders
pub async fn history() -> ApiResult<Json<Vec<SupplierOrder>>> {
    Ok(Json(a009_supplier_order::service::list_history().await?))
}

/// POST /api/ordering/orders/:id/receive
pub async fn receive(Path(id): Path<String>) -> ApiResult<Json<SupplierOrder>> {
    Ok(Json(a009_supplier_order::service::receive(&id).await?))
}
