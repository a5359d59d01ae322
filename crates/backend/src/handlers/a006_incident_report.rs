use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::d400_daily_summary::dto::DailySummaryQuery;
use contracts::domain::a006_incident_report::aggregate::{IncidentReport, IncidentReportDto};

use crate::domain::a006_incident_report;
use crate::shared::error::ApiResult;
use crate::system::auth::extractor::CurrentUser;

/// POST /api/reports
pub async fn create(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<IncidentReportDto>,
) -> ApiResult<(StatusCode, Json<IncidentReport>)> {
    let report = a006_incident_report::service::create(dto, &claims.username).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// GET /api/reports?date=YYYY-MM-DD
pub async fn list_for_day(Query(query): Query<DailySummaryQuery>) -> ApiResult<Json<Vec<IncidentReport>>> {
    Ok(Json(
        a006_incident_report::service::list_for_day(query.date.as_deref()).await?,
    ))
}
