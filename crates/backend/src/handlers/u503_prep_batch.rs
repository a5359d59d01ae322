use axum::Json;
use contracts::usecases::u503_prep_batch::plan::{PrepDue, PrepareBatchRequest, PrepareBatchResult};

use crate::shared::error::ApiResult;
use crate::usecases::u503_prep_batch::service;

/// POST /api/prep/prepare
pub async fn prepare(Json(request): Json<PrepareBatchRequest>) -> ApiResult<Json<PrepareBatchResult>> {
    Ok(Json(service::prepare(request).await?))
}

/// GET /api/prep/due
pub async fn due() -> ApiResult<Json<Vec<PrepDue>>> {
    Ok(Json(service::list_due().await?))
}
