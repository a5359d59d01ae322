use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a007_payment::aggregate::PaymentMethod;
use crate::shared::money::round_pennies;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    #[default]
    #[serde(alias = "dine_in", alias = "dinein")]
    DineIn,
    #[serde(alias = "take-away", alias = "take_away")]
    Takeaway,
    Delivery,
    Collection,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::DineIn => "dine-in",
            OrderType::Takeaway => "takeaway",
            OrderType::Delivery => "delivery",
            OrderType::Collection => "collection",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderType::DineIn => "Dine in",
            OrderType::Takeaway => "Takeaway",
            OrderType::Delivery => "Delivery",
            OrderType::Collection => "Collection",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "dine-in" | "dine_in" | "dinein" => Some(OrderType::DineIn),
            "takeaway" | "take-away" | "take_away" => Some(OrderType::Takeaway),
            "delivery" => Some(OrderType::Delivery),
            "collection" => Some(OrderType::Collection),
            _ => None,
        }
    }

    /// Orders coming in from outside the restaurant floor
    pub fn is_remote(&self) -> bool {
        matches!(self, OrderType::Delivery | OrderType::Collection)
    }

    pub const ALL: [OrderType; 4] = [
        OrderType::DineIn,
        OrderType::Takeaway,
        OrderType::Delivery,
        OrderType::Collection,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Pending,
    Accepted,
    Declined,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::Accepted => "accepted",
            DeliveryStatus::Declined => "declined",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pending" => Some(DeliveryStatus::Pending),
            "accepted" | "accept" => Some(DeliveryStatus::Accepted),
            "declined" | "decline" | "rejected" => Some(DeliveryStatus::Declined),
            _ => None,
        }
    }
}

/// One flattened order row. A placement writes one row per cart line, all
/// sharing `batch_id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: String,
    pub batch_id: Option<String>,
    pub table_number: Option<String>,
    pub order_type: OrderType,
    pub meal_id: Option<String>,
    pub meal_name: String,
    pub category: String,
    pub quantity: u32,
    /// Line total (unit price × quantity)
    pub total_price: f64,
    pub options: Option<String>,
    pub note: Option<String>,
    pub paid: bool,
    pub payment_method: Option<PaymentMethod>,
    pub delivery_status: Option<DeliveryStatus>,
    pub delivery_code: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Set when the kitchen removes the row from the display
    pub bumped_at: Option<DateTime<Utc>>,
    /// Set when the table is closed
    pub closed_at: Option<DateTime<Utc>>,
}

impl OrderLine {
    pub fn unit_price(&self) -> f64 {
        if self.quantity == 0 {
            return 0.0;
        }
        round_pennies(self.total_price / self.quantity as f64)
    }

    /// Still on the table's bill (not closed)
    pub fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }

    pub fn is_unpaid(&self) -> bool {
        !self.paid && self.is_open()
    }

    pub fn is_on_kitchen_display(&self) -> bool {
        self.bumped_at.is_none()
    }

    pub fn batch_key(&self) -> String {
        batch_key_for(self.batch_id.as_deref(), self.table_number.as_deref(), self.created_at)
    }
}

/// Grouping key for one placement: the batch id, or table plus placement
/// millis for rows written without one.
pub fn batch_key_for(batch_id: Option<&str>, table: Option<&str>, created_at: DateTime<Utc>) -> String {
    match batch_id.map(str::trim).filter(|b| !b.is_empty()) {
        Some(batch_id) => batch_id.to_string(),
        None => format!(
            "{}-{}",
            table.map(str::trim).filter(|t| !t.is_empty()).unwrap_or("unknown"),
            created_at.timestamp_millis()
        ),
    }
}

/// Sum of line totals, rounded to pennies.
pub fn lines_total<'a>(lines: impl IntoIterator<Item = &'a OrderLine>) -> f64 {
    round_pennies(lines.into_iter().map(|l| l.total_price).sum())
}

/// Four-digit code the driver quotes on collection.
pub fn delivery_code_from(seed: u128) -> String {
    format!("{:04}", seed % 10_000)
}

#[cfg(test)]
pub(crate) fn sample_line(name: &str, quantity: u32, total: f64) -> OrderLine {
    OrderLine {
        id: uuid::Uuid::new_v4().to_string(),
        batch_id: None,
        table_number: Some("Table 1".into()),
        order_type: OrderType::DineIn,
        meal_id: None,
        meal_name: name.into(),
        category: "meals".into(),
        quantity,
        total_price: total,
        options: None,
        note: None,
        paid: false,
        payment_method: None,
        delivery_status: None,
        delivery_code: None,
        created_at: Utc::now(),
        bumped_at: None,
        closed_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_type_wire_format() {
        assert_eq!(serde_json::to_string(&OrderType::DineIn).unwrap(), r#""dine-in""#);
        let parsed: OrderType = serde_json::from_str(r#""dine_in""#).unwrap();
        assert_eq!(parsed, OrderType::DineIn);
        assert_eq!(OrderType::parse("Collection"), Some(OrderType::Collection));
        assert!(OrderType::Delivery.is_remote());
        assert!(!OrderType::Takeaway.is_remote());
    }

    #[test]
    fn test_unit_price_and_totals() {
        let a = sample_line("Latte", 3, 9.0);
        let b = sample_line("Toast", 1, 1.1);
        assert_eq!(a.unit_price(), 3.0);
        assert_eq!(lines_total([&a, &b]), 10.1);
        assert_eq!(sample_line("Free", 0, 0.0).unit_price(), 0.0);
    }

    #[test]
    fn test_delivery_code_is_four_digits() {
        assert_eq!(delivery_code_from(7), "0007");
        assert_eq!(delivery_code_from(123_456), "3456");
    }
}
