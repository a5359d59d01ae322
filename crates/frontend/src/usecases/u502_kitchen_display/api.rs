use contracts::domain::a005_order_line::aggregate::DeliveryStatus;
use contracts::usecases::u501_pos_terminal::request::AffectedRows;
use contracts::usecases::u502_kitchen_display::request::{
    ClearedRows, DeliveryStatusRequest, DeliveryStatusResponse, EstimatedDelay, PauseStatus,
    RestoreRequest,
};
use contracts::usecases::u502_kitchen_display::row::KitchenRow;

use crate::shared::api_utils::{delete, delete_json, encode_segment, get_json, post_json, put_json};

/// Rows still on the pass
pub async fn fetch_rows() -> Result<Vec<KitchenRow>, String> {
    get_json("/api/orders").await
}

pub async fn fetch_delay() -> Result<EstimatedDelay, String> {
    get_json("/api/kitchen/estimated-delay").await
}

pub async fn fetch_pause() -> Result<PauseStatus, String> {
    get_json("/api/kitchen/pause-status").await
}

pub async fn set_pause(is_paused: bool) -> Result<PauseStatus, String> {
    put_json("/api/kitchen/pause-status", &PauseStatus { is_paused }).await
}

pub async fn set_delivery_status(
    batch_id: &str,
    status: DeliveryStatus,
) -> Result<DeliveryStatusResponse, String> {
    put_json(
        &format!("/api/orders/delivery-status/{}", encode_segment(batch_id)),
        &DeliveryStatusRequest { status },
    )
    .await
}

/// Takes a row off the display
pub async fn bump_row(id: &str) -> Result<(), String> {
    delete(&format!("/api/orders/{}", id)).await
}

pub async fn clear_all() -> Result<ClearedRows, String> {
    delete_json("/api/orders/clear-all").await
}

pub async fn restore(ids: Vec<String>) -> Result<AffectedRows, String> {
    post_json("/api/orders/restore", &RestoreRequest { ids }).await
}
