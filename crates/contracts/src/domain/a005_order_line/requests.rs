use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::{DeliveryStatus, OrderType};

/// Most of one item a single order line may carry
pub const MAX_LINE_QUANTITY: u32 = 999;

/// One cart line inside a grouped order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedOrderItem {
    #[serde(default)]
    pub meal_id: Option<String>,
    #[serde(alias = "name")]
    pub meal_name: String,
    pub quantity: u32,
    /// Line total (unit price × quantity)
    pub total_price: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "option", alias = "customizations")]
    pub options: Option<String>,
    #[serde(default, alias = "notes", alias = "comment")]
    pub note: Option<String>,
}

/// Payload of POST /api/orders/grouped: one placement, one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedOrderRequest {
    #[serde(default)]
    pub table_number: Option<String>,
    #[serde(default)]
    pub order_type: OrderType,
    pub items: Vec<GroupedOrderItem>,
}

impl GroupedOrderRequest {
    /// Table name with blanks treated as "no table".
    pub fn table(&self) -> Option<&str> {
        self.table_number
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.items.is_empty() {
            return Err("Cart is empty".into());
        }
        if self.order_type == OrderType::DineIn && self.table().is_none() {
            return Err("Select a table for dine-in orders".into());
        }
        for item in &self.items {
            if item.meal_name.trim().is_empty() {
                return Err("Every item needs a name".into());
            }
            if item.quantity == 0 {
                return Err(format!("Quantity of {} must be at least 1", item.meal_name));
            }
            if item.quantity > MAX_LINE_QUANTITY {
                return Err(format!(
                    "Quantity of {} cannot be more than {}",
                    item.meal_name, MAX_LINE_QUANTITY
                ));
            }
            if !item.total_price.is_finite() || item.total_price < 0.0 {
                return Err(format!("Price of {} must be zero or more", item.meal_name));
            }
        }
        Ok(())
    }

    /// Remote orders wait for the kitchen to accept them.
    pub fn initial_delivery_status(&self) -> Option<DeliveryStatus> {
        if self.order_type == OrderType::Delivery {
            Some(DeliveryStatus::Pending)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupedOrderResponse {
    pub batch_id: String,
    pub created_at: DateTime<Utc>,
    pub line_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, quantity: u32, total: f64) -> GroupedOrderItem {
        GroupedOrderItem {
            meal_id: None,
            meal_name: name.into(),
            quantity,
            total_price: total,
            category: None,
            options: None,
            note: None,
        }
    }

    #[test]
    fn test_dine_in_needs_table() {
        let request = GroupedOrderRequest {
            table_number: Some("  ".into()),
            order_type: OrderType::DineIn,
            items: vec![item("Latte", 1, 3.0)],
        };
        assert!(request.validate().is_err());

        let takeaway = GroupedOrderRequest {
            order_type: OrderType::Takeaway,
            ..request
        };
        assert!(takeaway.validate().is_ok());
        assert_eq!(takeaway.table(), None);
    }

    #[test]
    fn test_items_are_checked() {
        let empty = GroupedOrderRequest {
            table_number: Some("Table 2".into()),
            order_type: OrderType::DineIn,
            items: vec![],
        };
        assert!(empty.validate().is_err());

        let zero_quantity = GroupedOrderRequest {
            items: vec![item("Latte", 0, 0.0)],
            ..empty.clone()
        };
        assert!(zero_quantity.validate().is_err());

        let negative = GroupedOrderRequest {
            items: vec![item("Refund", 1, -2.0)],
            ..empty.clone()
        };
        assert!(negative.validate().is_err());

        let at_limit = GroupedOrderRequest {
            items: vec![item("Latte", MAX_LINE_QUANTITY, 3.0)],
            ..empty.clone()
        };
        assert!(at_limit.validate().is_ok());

        // Would wrap in the i32 column
        let oversized = GroupedOrderRequest {
            items: vec![item("Latte", i32::MAX as u32 + 1, 3.0)],
            ..empty
        };
        let err = oversized.validate().unwrap_err();
        assert!(err.contains("cannot be more than 999"));
    }

    #[test]
    fn test_payload_aliases() {
        let request: GroupedOrderRequest = serde_json::from_str(
            r#"{"table_number":"Table 4","order_type":"delivery",
                "items":[{"name":"Full English","quantity":2,"total_price":19.0,
                          "customizations":"Brown Bread","notes":"no beans"}]}"#,
        )
        .unwrap();
        assert_eq!(request.items[0].meal_name, "Full English");
        assert_eq!(request.items[0].options.as_deref(), Some("Brown Bread"));
        assert_eq!(request.items[0].note.as_deref(), Some("no beans"));
        assert_eq!(request.initial_delivery_status(), Some(DeliveryStatus::Pending));
    }
}
