use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::a005_order_line::aggregate::{DeliveryStatus, OrderLine, OrderType};
use crate::usecases::u501_pos_terminal::cart::DEFAULT_CATEGORY;

/// Order row as read by the kitchen screen.
///
/// Feeds from older tills name the category, options and note fields
/// differently, so every known spelling is accepted and resolved on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenRow {
    pub id: String,
    #[serde(default)]
    pub batch_id: Option<String>,
    #[serde(default)]
    pub table_number: Option<String>,
    #[serde(default)]
    pub order_type: OrderType,
    pub meal_name: String,
    #[serde(default = "one")]
    pub quantity: u32,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub delivery_status: Option<DeliveryStatus>,
    #[serde(default)]
    pub delivery_code: Option<String>,
    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos_category: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(
        default,
        alias = "option",
        alias = "customizations",
        alias = "choices",
        alias = "options_text",
        alias = "options_json",
        alias = "optionsJSON",
        skip_serializing_if = "Value::is_null"
    )]
    pub options: Value,
    #[serde(
        default,
        alias = "notes",
        alias = "comment",
        alias = "special_instructions",
        alias = "instructions",
        skip_serializing_if = "Option::is_none"
    )]
    pub note: Option<String>,
}

fn one() -> u32 {
    1
}

impl KitchenRow {
    /// First non-empty category field, trimmed and lowercased.
    pub fn resolve_category(&self) -> String {
        [&self.category_name, &self.category, &self.pos_category, &self.kind]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_lowercase()
    }

    /// Options as display text; structured options are shown as JSON.
    pub fn options_text(&self) -> Option<String> {
        let text = match &self.options {
            Value::Null => return None,
            Value::String(s) => s.trim().to_string(),
            Value::Array(items) => items
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.trim().to_string(),
                    other => other.to_string(),
                })
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
            Value::Object(map) if map.is_empty() => String::new(),
            other => other.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }

    pub fn note_text(&self) -> Option<String> {
        self.note
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    pub fn is_declined_delivery(&self) -> bool {
        self.order_type == OrderType::Delivery
            && self.delivery_status == Some(DeliveryStatus::Declined)
    }
}

impl From<OrderLine> for KitchenRow {
    fn from(line: OrderLine) -> Self {
        Self {
            id: line.id,
            batch_id: line.batch_id,
            table_number: line.table_number,
            order_type: line.order_type,
            meal_name: line.meal_name,
            quantity: line.quantity,
            paid: line.paid,
            delivery_status: line.delivery_status,
            delivery_code: line.delivery_code,
            created_at: line.created_at,
            category_name: None,
            category: Some(line.category),
            pos_category: None,
            kind: None,
            options: line.options.map(Value::String).unwrap_or(Value::Null),
            note: line.note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a005_order_line::aggregate::sample_line;

    fn parse(json: &str) -> KitchenRow {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_category_fallback_order() {
        let row = parse(
            r#"{"id":"1","meal_name":"Tea","created_at":"2025-01-01T10:00:00Z",
                "category":"  ","pos_category":"Drinks","type":"meals"}"#,
        );
        assert_eq!(row.resolve_category(), "drinks");

        let bare = parse(r#"{"id":"2","meal_name":"Toast","created_at":"2025-01-01T10:00:00Z"}"#);
        assert_eq!(bare.resolve_category(), "meals");
        assert_eq!(bare.quantity, 1);
    }

    #[test]
    fn test_option_and_note_aliases() {
        let row = parse(
            r#"{"id":"1","meal_name":"Full English","created_at":"2025-01-01T10:00:00Z",
                "customizations":["Brown Bread","No beans"],"special_instructions":" well done "}"#,
        );
        assert_eq!(row.options_text().as_deref(), Some("Brown Bread, No beans"));
        assert_eq!(row.note_text().as_deref(), Some("well done"));

        let structured = parse(
            r#"{"id":"1","meal_name":"Pizza","created_at":"2025-01-01T10:00:00Z",
                "optionsJSON":{"size":"large"}}"#,
        );
        assert_eq!(structured.options_text().as_deref(), Some(r#"{"size":"large"}"#));
    }

    #[test]
    fn test_from_order_line() {
        let mut line = sample_line("Latte", 2, 6.0);
        line.options = Some("Oat milk".into());
        let row = KitchenRow::from(line);
        assert_eq!(row.resolve_category(), "meals");
        assert_eq!(row.options_text().as_deref(), Some("Oat milk"));
        assert!(row.note_text().is_none());
    }
}
