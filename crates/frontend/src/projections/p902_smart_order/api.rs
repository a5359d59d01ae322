use contracts::domain::a009_supplier_order::aggregate::{PlaceOrdersRequest, SupplierOrder};
use contracts::projections::p902_smart_order::dto::SmartOrder;

use crate::shared::api_utils::{encode_segment, get_json, post_json};

pub async fn fetch_smart_order() -> Result<SmartOrder, String> {
    get_json("/api/ordering/smart-order").await
}

/// Empty `supplier_ids` orders from every supplier on the list
pub async fn place_orders(supplier_ids: Vec<String>) -> Result<Vec<SupplierOrder>, String> {
    post_json("/api/ordering/orders", &PlaceOrdersRequest { supplier_ids }).await
}

pub async fn auto_restock(stock_id: &str) -> Result<SupplierOrder, String> {
    post_json(
        &format!("/api/ordering/auto-restock/{}", encode_segment(stock_id)),
        &serde_json::json!({}),
    )
    .await
}
