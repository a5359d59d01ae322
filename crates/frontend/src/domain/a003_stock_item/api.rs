use contracts::domain::a003_stock_item::aggregate::{
    ExpiredRemoval, StockItem, StockItemDto, StockPriceDto,
};

use crate::shared::api_utils::{delete, delete_json, get_json, post_json, send_no_content};

pub async fn fetch_stock() -> Result<Vec<StockItem>, String> {
    get_json("/api/stock").await
}

pub async fn create_item(dto: &StockItemDto) -> Result<(), String> {
    let _: serde_json::Value = post_json("/api/stock", dto).await?;
    Ok(())
}

pub async fn update_item(id: &str, dto: &StockItemDto) -> Result<(), String> {
    send_no_content("PUT", &format!("/api/stock/{}", id), dto).await
}

pub async fn set_price(id: &str, price: f64) -> Result<(), String> {
    send_no_content("PUT", &format!("/api/stock/{}/price", id), &StockPriceDto { price }).await
}

pub async fn delete_item(id: &str) -> Result<(), String> {
    delete(&format!("/api/stock/{}", id)).await
}

pub async fn remove_expired() -> Result<u64, String> {
    let result: ExpiredRemoval = delete_json("/api/stock/expired").await?;
    Ok(result.removed)
}
