//! Money helpers shared by the till, the receipts and the backend.
//!
//! Amounts travel as `f64` pounds and are rounded to whole pennies at every
//! step that produces a figure shown to a customer.

pub const CURRENCY_SYMBOL: &str = "£";

/// Rounds to whole pennies.
pub fn round_pennies(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn to_pennies(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

pub fn from_pennies(pennies: i64) -> f64 {
    pennies as f64 / 100.0
}

/// Formats a number with comma thousands separators and two decimals.
///
/// ```
/// use contracts::shared::money::format_amount;
/// assert_eq!(format_amount(1234.5), "1,234.50");
/// ```
pub fn format_amount(value: f64) -> String {
    let formatted = format!("{:.2}", round_pennies(value).abs());
    let (integer_part, decimal_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let integer: String = grouped.chars().rev().collect();

    let sign = if to_pennies(value) < 0 { "-" } else { "" };
    format!("{}{}.{}", sign, integer, decimal_part)
}

/// Formats pounds for display, e.g. `£12.50` or `-£3.00`.
pub fn format_gbp(value: f64) -> String {
    let amount = format_amount(value);
    match amount.strip_prefix('-') {
        Some(rest) => format!("-{}{}", CURRENCY_SYMBOL, rest),
        None => format!("{}{}", CURRENCY_SYMBOL, amount),
    }
}

/// Parses a typed amount. Accepts a leading `£` and thousands commas.
pub fn parse_amount(input: &str) -> Option<f64> {
    let cleaned: String = input
        .trim()
        .trim_start_matches(CURRENCY_SYMBOL)
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_pennies() {
        assert_eq!(round_pennies(10.005), 10.01);
        assert_eq!(round_pennies(2.344), 2.34);
        assert_eq!(round_pennies(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_format_gbp() {
        assert_eq!(format_gbp(0.0), "£0.00");
        assert_eq!(format_gbp(12.5), "£12.50");
        assert_eq!(format_gbp(1234567.891), "£1,234,567.89");
        assert_eq!(format_gbp(-3.0), "-£3.00");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 4.50 "), Some(4.5));
        assert_eq!(parse_amount("£1,200"), Some(1200.0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("NaN"), None);
    }
}
