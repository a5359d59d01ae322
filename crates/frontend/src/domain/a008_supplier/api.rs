use contracts::domain::a008_supplier::aggregate::{Supplier, SupplierDto};

use crate::shared::api_utils::{delete, get_json, post_json, send_no_content};

pub async fn fetch_suppliers() -> Result<Vec<Supplier>, String> {
    get_json("/api/suppliers").await
}

pub async fn create_supplier(dto: &SupplierDto) -> Result<(), String> {
    let _: serde_json::Value = post_json("/api/suppliers", dto).await?;
    Ok(())
}

pub async fn update_supplier(id: &str, dto: &SupplierDto) -> Result<(), String> {
    send_no_content("PUT", &format!("/api/suppliers/{}", id), dto).await
}

pub async fn delete_supplier(id: &str) -> Result<(), String> {
    delete(&format!("/api/suppliers/{}", id)).await
}
