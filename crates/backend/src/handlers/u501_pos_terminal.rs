use axum::{extract::Path, Json};
use contracts::usecases::u501_pos_terminal::request::{
    AffectedRows, CloseTableRequest, MarkPaidRequest, PayShareRequest, PayShareResponse,
    PaymentResult, PosSettings, SplitByPeopleRequest, SplitByPeopleResponse, SplitPayRequest,
    TableBalance, TransferTableRequest, TransferTableResponse,
};

use crate::shared::error::ApiResult;
use crate::usecases::u501_pos_terminal::service;

/// GET /api/pos/settings
pub async fn settings() -> Json<PosSettings> {
    Json(service::settings())
}

/// POST /api/orders/split-pay
pub async fn split_pay(Json(request): Json<SplitPayRequest>) -> ApiResult<Json<PaymentResult>> {
    Ok(Json(service::split_pay(request).await?))
}

/// POST /api/orders/mark-paid
pub async fn mark_paid(Json(request): Json<MarkPaidRequest>) -> ApiResult<Json<PaymentResult>> {
    Ok(Json(service::mark_paid(request).await?))
}

/// GET /api/orders/balance/:table
pub async fn balance(Path(table): Path<String>) -> ApiResult<Json<TableBalance>> {
    Ok(Json(service::table_balance(&table).await?))
}

/// POST /api/orders/split-by-people
pub async fn split_by_people(
    Json(request): Json<SplitByPeopleRequest>,
) -> ApiResult<Json<SplitByPeopleResponse>> {
    Ok(Json(service::split_by_people(request).await?))
}

/// POST /api/orders/pay-share
pub async fn pay_share(Json(request): Json<PayShareRequest>) -> ApiResult<Json<PayShareResponse>> {
    Ok(Json(service::pay_share(request).await?))
}

/// PUT /api/orders/transfer-table
pub async fn transfer_table(
    Json(request): Json<TransferTableRequest>,
) -> ApiResult<Json<TransferTableResponse>> {
    Ok(Json(service::transfer_table(request).await?))
}

/// POST /api/orders/close
pub async fn close_table(Json(request): Json<CloseTableRequest>) -> ApiResult<Json<AffectedRows>> {
    Ok(Json(service::close_table(request).await?))
}

/// DELETE /api/orders/clear-unpaid/:table
pub async fn clear_unpaid(Path(table): Path<String>) -> ApiResult<Json<AffectedRows>> {
    Ok(Json(service::clear_unpaid(&table).await?))
}
