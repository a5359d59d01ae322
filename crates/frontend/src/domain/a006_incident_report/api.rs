use contracts::domain::a006_incident_report::aggregate::{IncidentReport, IncidentReportDto};

use crate::shared::api_utils::{encode_segment, get_json, post_json};

pub async fn create_report(dto: &IncidentReportDto) -> Result<IncidentReport, String> {
    post_json("/api/reports", dto).await
}

/// `date` is `YYYY-MM-DD`; the server defaults to today.
pub async fn list_for_day(date: &str) -> Result<Vec<IncidentReport>, String> {
    get_json(&format!("/api/reports?date={}", encode_segment(date))).await
}
