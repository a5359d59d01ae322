use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::money::round_pennies;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplierOrderStatus {
    Placed,
    Received,
}

impl SupplierOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplierOrderStatus::Placed => "placed",
            SupplierOrderStatus::Received => "received",
        }
    }

    /// Unknown values read back as placed
    pub fn parse(value: &str) -> Self {
        match value {
            "received" => SupplierOrderStatus::Received,
            _ => SupplierOrderStatus::Placed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SupplierOrderStatus::Placed => "Placed",
            SupplierOrderStatus::Received => "Received",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierOrderLine {
    pub stock_id: String,
    pub ingredient: String,
    pub unit: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub line_total: f64,
}

/// Purchase sent to one supplier; history is kept after receiving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierOrder {
    pub id: String,
    pub supplier_id: Option<String>,
    pub supplier_name: String,
    pub lines: Vec<SupplierOrderLine>,
    pub total: f64,
    pub status: SupplierOrderStatus,
    pub placed_by: String,
    pub created_at: DateTime<Utc>,
    pub received_at: Option<DateTime<Utc>>,
}

impl SupplierOrder {
    pub fn new(
        supplier_id: Option<String>,
        supplier_name: &str,
        lines: Vec<SupplierOrderLine>,
        placed_by: &str,
    ) -> Self {
        let total = round_pennies(lines.iter().map(|l| l.line_total).sum());
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            supplier_id,
            supplier_name: supplier_name.to_string(),
            lines,
            total,
            status: SupplierOrderStatus::Placed,
            placed_by: placed_by.to_string(),
            created_at: Utc::now(),
            received_at: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.lines.is_empty() {
            return Err("Nothing to order".into());
        }
        for line in &self.lines {
            if !line.quantity.is_finite() || line.quantity <= 0.0 {
                return Err(format!("Quantity of {} must be greater than zero", line.ingredient));
            }
        }
        Ok(())
    }

    pub fn receive(&mut self, at: DateTime<Utc>) -> Result<(), String> {
        if self.status == SupplierOrderStatus::Received {
            return Err(format!("Order from {} was already received", self.supplier_name));
        }
        self.status = SupplierOrderStatus::Received;
        self.received_at = Some(at);
        Ok(())
    }
}

/// Payload of POST /api/ordering/orders; no ids means every supplier on the smart order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceOrdersRequest {
    #[serde(default)]
    pub supplier_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, quantity: f64, unit_price: f64) -> SupplierOrderLine {
        SupplierOrderLine {
            stock_id: format!("stk-{}", name),
            ingredient: name.into(),
            unit: "kg".into(),
            quantity,
            unit_price,
            line_total: round_pennies(quantity * unit_price),
        }
    }

    #[test]
    fn test_total_and_receive_once() {
        let mut order = SupplierOrder::new(
            Some("s1".into()),
            "Brakes",
            vec![line("Flour", 3.0, 1.1), line("Eggs", 2.0, 0.25)],
            "manager",
        );
        assert_eq!(order.total, 3.8);
        assert!(order.validate().is_ok());

        let now = Utc::now();
        order.receive(now).unwrap();
        assert_eq!(order.status, SupplierOrderStatus::Received);
        assert_eq!(order.received_at, Some(now));
        assert_eq!(order.receive(now).unwrap_err(), "Order from Brakes was already received");
    }

    #[test]
    fn test_empty_or_zero_lines_are_refused() {
        assert!(SupplierOrder::new(None, "Unassigned", vec![], "x").validate().is_err());
        let order = SupplierOrder::new(None, "Brakes", vec![line("Flour", 0.0, 1.0)], "x");
        assert_eq!(order.validate().unwrap_err(), "Quantity of Flour must be greater than zero");
        assert_eq!(SupplierOrderStatus::parse("received"), SupplierOrderStatus::Received);
        assert_eq!(SupplierOrderStatus::parse("odd"), SupplierOrderStatus::Placed);
    }
}
