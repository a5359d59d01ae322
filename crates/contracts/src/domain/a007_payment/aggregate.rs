use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    #[serde(alias = "cash", alias = "CASH")]
    Cash,
    #[serde(alias = "card", alias = "CARD")]
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "cash" => Some(PaymentMethod::Cash),
            "card" => Some(PaymentMethod::Card),
            _ => None,
        }
    }
}

/// What a payment settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    /// Whole bill, after discount and service
    Full,
    /// Selected lines only
    Items,
    /// One diner's share of an evenly split bill
    Share,
}

impl PaymentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentKind::Full => "full",
            PaymentKind::Items => "items",
            PaymentKind::Share => "share",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "full" => Some(PaymentKind::Full),
            "items" => Some(PaymentKind::Items),
            "share" => Some(PaymentKind::Share),
            _ => None,
        }
    }
}

/// Money taken at the till
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub table_number: Option<String>,
    pub amount: f64,
    pub method: PaymentMethod,
    pub kind: PaymentKind,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(table_number: Option<String>, amount: f64, method: PaymentMethod, kind: PaymentKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            table_number,
            amount,
            method,
            kind,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_wire_format() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Card).unwrap(), r#""Card""#);
        let parsed: PaymentMethod = serde_json::from_str(r#""cash""#).unwrap();
        assert_eq!(parsed, PaymentMethod::Cash);
        assert_eq!(PaymentMethod::parse(" CARD "), Some(PaymentMethod::Card));
        assert_eq!(PaymentMethod::parse("voucher"), None);
    }
}
