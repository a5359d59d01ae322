//! Calendar-day helpers for date-filtered queries.

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};

use crate::shared::error::ServiceError;

/// `YYYY-MM-DD`, today (local) when absent or blank
pub fn parse_day(value: Option<&str>) -> anyhow::Result<NaiveDate> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(Local::now().date_naive()),
        Some(v) => NaiveDate::parse_from_str(v, "%Y-%m-%d")
            .map_err(|_| ServiceError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", v)).into()),
    }
}

/// UTC bounds `[start, end)` of a local calendar day
pub fn local_day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start_of = |d: NaiveDate| {
        let midnight = d.and_hms_opt(0, 0, 0).unwrap_or_default();
        Local
            .from_local_datetime(&midnight)
            .earliest()
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
    };
    (start_of(day), start_of(day + Duration::days(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day() {
        assert_eq!(
            parse_day(Some("2024-03-09")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
        assert_eq!(parse_day(Some(" ")).unwrap(), Local::now().date_naive());
        assert!(parse_day(Some("09/03/2024")).is_err());
    }

    #[test]
    fn test_day_bounds_span_a_day() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let (start, end) = local_day_bounds(day);
        assert!(end > start);
        assert!((end - start).num_hours() >= 23);
    }
}
