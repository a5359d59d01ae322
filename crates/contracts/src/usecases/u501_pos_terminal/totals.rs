use serde::{Deserialize, Serialize};

use crate::shared::money::round_pennies;

pub const DEFAULT_SERVICE_RATE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    #[default]
    Percent,
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub kind: DiscountKind,
    pub value: f64,
}

impl Discount {
    /// Discount in pounds; zero unless `value` is a positive number.
    pub fn amount_for(&self, subtotal: f64) -> f64 {
        if !self.value.is_finite() || self.value <= 0.0 {
            return 0.0;
        }
        match self.kind {
            DiscountKind::Percent => subtotal * self.value / 100.0,
            DiscountKind::Amount => self.value,
        }
    }
}

/// Till-side adjustments applied on top of the item subtotal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BillAdjustments {
    #[serde(default)]
    pub discount: Option<Discount>,
    #[serde(default)]
    pub service_enabled: bool,
    #[serde(default = "default_service_rate")]
    pub service_rate: f64,
}

fn default_service_rate() -> f64 {
    DEFAULT_SERVICE_RATE
}

impl Default for BillAdjustments {
    fn default() -> Self {
        Self {
            discount: None,
            service_enabled: false,
            service_rate: DEFAULT_SERVICE_RATE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Totals {
    pub subtotal: f64,
    pub discount: f64,
    pub after_discount: f64,
    pub service: f64,
    pub grand_total: f64,
    /// Share payments already taken against the bill
    #[serde(default)]
    pub shares_paid: f64,
    #[serde(default)]
    pub amount_due: f64,
}

impl Totals {
    /// Takes earlier share payments off what the bill still owes.
    pub fn less_shares(mut self, shares_paid: f64) -> Self {
        let shares = if shares_paid.is_finite() {
            round_pennies(shares_paid.max(0.0))
        } else {
            0.0
        };
        self.shares_paid = shares;
        self.amount_due = round_pennies((self.grand_total - shares).max(0.0));
        self
    }
}

/// subtotal → minus discount (floored at zero) → plus optional service charge
pub fn compute_totals(subtotal: f64, adjustments: &BillAdjustments) -> Totals {
    let subtotal = round_pennies(subtotal);
    let discount = adjustments
        .discount
        .map(|d| round_pennies(d.amount_for(subtotal)))
        .unwrap_or(0.0);
    let after_discount = round_pennies((subtotal - discount).max(0.0));
    let rate = if adjustments.service_rate.is_finite() && adjustments.service_rate > 0.0 {
        adjustments.service_rate
    } else {
        0.0
    };
    let service = if adjustments.service_enabled {
        round_pennies(after_discount * rate / 100.0)
    } else {
        0.0
    };

    let grand_total = round_pennies(after_discount + service);
    Totals {
        subtotal,
        discount,
        after_discount,
        service,
        grand_total,
        shares_paid: 0.0,
        amount_due: grand_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_subtotal() {
        let totals = compute_totals(23.5, &BillAdjustments::default());
        assert_eq!(totals.discount, 0.0);
        assert_eq!(totals.service, 0.0);
        assert_eq!(totals.grand_total, 23.5);
    }

    #[test]
    fn test_percent_discount_then_service() {
        let adjustments = BillAdjustments {
            discount: Some(Discount { kind: DiscountKind::Percent, value: 10.0 }),
            service_enabled: true,
            service_rate: DEFAULT_SERVICE_RATE,
        };
        let totals = compute_totals(50.0, &adjustments);
        assert_eq!(totals.discount, 5.0);
        assert_eq!(totals.after_discount, 45.0);
        assert_eq!(totals.service, 4.5);
        assert_eq!(totals.grand_total, 49.5);
    }

    #[test]
    fn test_amount_discount_cannot_go_negative() {
        let adjustments = BillAdjustments {
            discount: Some(Discount { kind: DiscountKind::Amount, value: 30.0 }),
            service_enabled: true,
            ..Default::default()
        };
        let totals = compute_totals(20.0, &adjustments);
        assert_eq!(totals.after_discount, 0.0);
        assert_eq!(totals.service, 0.0);
        assert_eq!(totals.grand_total, 0.0);
    }

    #[test]
    fn test_invalid_discount_is_ignored() {
        for value in [0.0, -5.0, f64::NAN] {
            let adjustments = BillAdjustments {
                discount: Some(Discount { kind: DiscountKind::Percent, value }),
                ..Default::default()
            };
            assert_eq!(compute_totals(10.0, &adjustments).grand_total, 10.0);
        }
    }

    #[test]
    fn test_adjustments_wire_defaults() {
        let adjustments: BillAdjustments = serde_json::from_str(r#"{"service_enabled":true}"#).unwrap();
        assert_eq!(adjustments.service_rate, DEFAULT_SERVICE_RATE);
        assert_eq!(compute_totals(12.34, &adjustments).service, 1.23);
    }

    #[test]
    fn test_shares_come_off_the_amount_due() {
        let adjustments = BillAdjustments {
            service_enabled: true,
            ..Default::default()
        };
        let totals = compute_totals(40.0, &adjustments);
        assert_eq!(totals.amount_due, 44.0);

        let totals = totals.less_shares(20.0);
        assert_eq!(totals.grand_total, 44.0);
        assert_eq!(totals.shares_paid, 20.0);
        assert_eq!(totals.amount_due, 24.0);

        assert_eq!(totals.less_shares(50.0).amount_due, 0.0);
        assert_eq!(totals.less_shares(f64::NAN).amount_due, 44.0);
    }
}
