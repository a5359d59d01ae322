use axum::{extract::Query, Json};
use contracts::dashboards::d400_daily_summary::dto::{DailySummary, DailySummaryQuery};

use crate::dashboards::d400_daily_summary::service;
use crate::shared::error::ApiResult;

/// GET /api/analytics/summary?date=YYYY-MM-DD
pub async fn get_daily_summary(Query(query): Query<DailySummaryQuery>) -> ApiResult<Json<DailySummary>> {
    Ok(Json(service::get_daily_summary(query).await?))
}
