use crate::domain::a005_order_line::aggregate::OrderLine;
use crate::shared::money::{from_pennies, round_pennies, to_pennies};

/// Splits `total` into `people` shares that add up to the penny. Leftover
/// pennies go to the first payers.
pub fn split_evenly(total: f64, people: u32) -> Vec<f64> {
    if people == 0 {
        return Vec::new();
    }
    let pennies = to_pennies(total).max(0);
    let base = pennies / people as i64;
    let remainder = pennies % people as i64;
    (0..people as i64)
        .map(|i| from_pennies(base + if i < remainder { 1 } else { 0 }))
        .collect()
}

/// Total of the unpaid lines whose ids are selected.
pub fn selected_total(lines: &[OrderLine], item_ids: &[String]) -> f64 {
    round_pennies(
        lines
            .iter()
            .filter(|l| l.is_unpaid() && item_ids.contains(&l.id))
            .map(|l| l.total_price)
            .sum(),
    )
}

/// What is still owed after recorded share payments.
pub fn remaining_after(total: f64, paid_so_far: f64) -> f64 {
    round_pennies((total - paid_so_far).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a005_order_line::aggregate::sample_line;

    #[test]
    fn test_split_evenly_sums_to_total() {
        let shares = split_evenly(100.0, 3);
        assert_eq!(shares, vec![33.34, 33.33, 33.33]);
        let sum: i64 = shares.iter().map(|s| to_pennies(*s)).sum();
        assert_eq!(sum, 10_000);
    }

    #[test]
    fn test_split_edge_cases() {
        assert!(split_evenly(10.0, 0).is_empty());
        assert_eq!(split_evenly(0.05, 10).iter().filter(|s| **s > 0.0).count(), 5);
        assert_eq!(split_evenly(20.0, 1), vec![20.0]);
    }

    #[test]
    fn test_selected_total_skips_paid_and_unselected() {
        let a = sample_line("Latte", 1, 3.0);
        let b = sample_line("Toast", 2, 4.0);
        let mut c = sample_line("Cake", 1, 5.0);
        c.paid = true;
        let ids = vec![a.id.clone(), c.id.clone()];
        assert_eq!(selected_total(&[a, b, c], &ids), 3.0);
    }

    #[test]
    fn test_remaining_after() {
        assert_eq!(remaining_after(50.0, 33.34), 16.66);
        assert_eq!(remaining_after(50.0, 60.0), 0.0);
    }
}
