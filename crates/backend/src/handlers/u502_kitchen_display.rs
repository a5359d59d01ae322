use axum::Json;
use contracts::usecases::u502_kitchen_display::request::{EstimatedDelay, PauseStatus};

use crate::shared::error::ApiResult;
use crate::usecases::u502_kitchen_display::service;

/// GET /api/kitchen/pause-status
pub async fn pause_status() -> ApiResult<Json<PauseStatus>> {
    Ok(Json(service::pause_status().await?))
}

/// PUT /api/kitchen/pause-status
pub async fn set_pause_status(Json(status): Json<PauseStatus>) -> ApiResult<Json<PauseStatus>> {
    Ok(Json(service::set_paused(status).await?))
}

/// GET /api/kitchen/estimated-delay
pub async fn estimated_delay() -> ApiResult<Json<EstimatedDelay>> {
    Ok(Json(service::estimated_delay().await?))
}
