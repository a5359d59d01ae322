use contracts::domain::a009_supplier_order::aggregate::SupplierOrder;

use crate::shared::api_utils::{encode_segment, get_json, post_json};

pub async fn fetch_history() -> Result<Vec<SupplierOrder>, String> {
    get_json("/api/ordering/orders").await
}

pub async fn receive(id: &str) -> Result<SupplierOrder, String> {
    post_json(
        &format!("/api/ordering/orders/{}/receive", encode_segment(id)),
        &serde_json::json!({}),
    )
    .await
}
