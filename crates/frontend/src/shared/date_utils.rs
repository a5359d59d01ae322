/// Utilities for date and time formatting
///
/// Provides consistent date/time formatting across the application
use chrono::{DateTime, Local, NaiveDate, Utc};

/// Format ISO datetime string to DD/MM/YYYY HH:MM:SS format
/// Example: "2024-03-15T14:02:26.123Z" -> "15/03/2024 14:02:26"
pub fn format_datetime(datetime_str: &str) -> String {
    if let Some((date_part, time_part)) = datetime_str.split_once('T') {
        if let Some((year, rest)) = date_part.split_once('-') {
            if let Some((month, day)) = rest.split_once('-') {
                let time = time_part
                    .split(['.', 'Z', '+'])
                    .next()
                    .unwrap_or(time_part);
                return format!("{}/{}/{} {}", day, month, year, time);
            }
        }
    }
    datetime_str.to_string()
}

/// Format ISO date string to DD/MM/YYYY format
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15/03/2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}/{}/{}", day, month, year);
        }
    }
    date_str.to_string()
}

/// Wall-clock time of a server timestamp, e.g. "14:02".
pub fn format_local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M").to_string()
}

/// Today in the browser's timezone as `YYYY-MM-DD`, the value date inputs use.
pub fn today_iso() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Expiry dates before today are past their use.
pub fn is_expired(expiry: Option<NaiveDate>, today: NaiveDate) -> bool {
    expiry.map(|d| d < today).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2024-03-15T14:02:26.123Z"),
            "15/03/2024 14:02:26"
        );
        assert_eq!(format_datetime("2024-03-15T14:02:26Z"), "15/03/2024 14:02:26");
        assert_eq!(format_datetime("garbage"), "garbage");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26Z"), "15/03/2024");
    }

    #[test]
    fn test_is_expired() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert!(is_expired(NaiveDate::from_ymd_opt(2024, 3, 14), today));
        assert!(!is_expired(Some(today), today));
        assert!(!is_expired(None, today));
    }
}
