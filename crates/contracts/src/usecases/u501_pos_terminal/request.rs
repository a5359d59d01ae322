use serde::{Deserialize, Serialize};

use super::totals::BillAdjustments;
use crate::domain::a007_payment::aggregate::PaymentMethod;

/// POST /api/orders/split-pay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitPayRequest {
    #[serde(alias = "itemIds")]
    pub item_ids: Vec<String>,
    #[serde(default, alias = "paymentMethod")]
    pub payment_method: PaymentMethod,
}

/// POST /api/orders/mark-paid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkPaidRequest {
    #[serde(default, alias = "tableNumber")]
    pub table_number: Option<String>,
    #[serde(alias = "itemIds")]
    pub item_ids: Vec<String>,
    #[serde(default, alias = "paymentMethod")]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub adjustments: BillAdjustments,
}

/// Outcome of a payment operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub paid_items: u64,
    pub amount: f64,
}

/// POST /api/orders/split-by-people
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitByPeopleRequest {
    pub table_number: String,
    pub people: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitByPeopleResponse {
    pub total: f64,
    /// Largest share; what the first payer is asked for
    pub share: f64,
    pub shares: Vec<f64>,
}

/// POST /api/orders/pay-share
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayShareRequest {
    pub table_number: String,
    pub amount: f64,
    #[serde(default, alias = "paymentMethod")]
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayShareResponse {
    pub paid_so_far: f64,
    pub remaining: f64,
    /// All unpaid lines were marked paid by this share
    pub settled: bool,
}

/// GET /api/orders/balance/:table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TableBalance {
    pub table_number: String,
    /// Unpaid open rows at line prices
    pub unpaid_total: f64,
    /// Share payments taken since the oldest unpaid row
    pub shares_paid: f64,
    pub remaining: f64,
}

/// PUT /api/orders/transfer-table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferTableRequest {
    #[serde(alias = "oldTable")]
    pub old_table: String,
    #[serde(alias = "newTable")]
    pub new_table: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferTableResponse {
    pub moved: u64,
}

/// POST /api/orders/close
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseTableRequest {
    #[serde(alias = "tableNumber")]
    pub table_number: String,
}

/// Row counts touched by table-level operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedRows {
    pub affected: u64,
}

/// GET /api/pos/settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PosSettings {
    pub default_service_rate: f64,
}

impl Default for PosSettings {
    fn default() -> Self {
        Self {
            default_service_rate: super::totals::DEFAULT_SERVICE_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_pos_terminal::totals::DEFAULT_SERVICE_RATE;

    #[test]
    fn test_camel_case_payloads_accepted() {
        let request: MarkPaidRequest = serde_json::from_str(
            r#"{"tableNumber":"Table 2","itemIds":["a","b"],"paymentMethod":"Card"}"#,
        )
        .unwrap();
        assert_eq!(request.item_ids.len(), 2);
        assert_eq!(request.payment_method, PaymentMethod::Card);
        assert_eq!(request.adjustments.service_rate, DEFAULT_SERVICE_RATE);

        let transfer: TransferTableRequest =
            serde_json::from_str(r#"{"oldTable":"Table 1","newTable":"Table 5"}"#).unwrap();
        assert_eq!(transfer.new_table, "Table 5");
    }
}
