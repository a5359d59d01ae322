use anyhow::Result;
use contracts::dashboards::d400_daily_summary::dto::{summarize, DailySummary, DailySummaryQuery};

use crate::domain::{a004_dining_table, a005_order_line, a006_incident_report, a007_payment};
use crate::shared::period::{local_day_bounds, parse_day};

/// Takings and activity for one local calendar day
pub async fn get_daily_summary(query: DailySummaryQuery) -> Result<DailySummary> {
    let date = parse_day(query.date.as_deref())?;
    let (from, to) = local_day_bounds(date);

    let lines = a005_order_line::repository::list_between(from, to).await?;
    let payments = a007_payment::repository::list_between(from, to).await?;
    let reports = a006_incident_report::repository::list_between(from, to).await?;
    let tables = a004_dining_table::service::list_all().await?;

    Ok(summarize(date, &lines, &payments, &reports, &tables))
}
