use contracts::dashboards::d400_daily_summary::dto::DailySummary;

use crate::shared::api_utils::{encode_segment, get_json};

pub async fn fetch_summary(date: &str) -> Result<DailySummary, String> {
    get_json(&format!("/api/analytics/summary?date={}", encode_segment(date))).await
}
