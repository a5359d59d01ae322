//! Per-meal choices offered when a dish is customised at the till.

pub const BREAD_CHOICES: &[&str] = &["White Bread", "Brown Bread"];

/// Option buttons for a meal; empty when the dish has no choices.
pub fn choices_for(meal_name: &str) -> &'static [&'static str] {
    if meal_name.to_lowercase().contains("english") {
        BREAD_CHOICES
    } else {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakfasts_offer_bread() {
        assert_eq!(choices_for("Full ENGLISH"), BREAD_CHOICES);
        assert!(choices_for("Pancakes").is_empty());
    }
}
