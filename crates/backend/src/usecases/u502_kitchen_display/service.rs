use contracts::usecases::u502_kitchen_display::request::{estimate_delay, EstimatedDelay, PauseStatus};
use contracts::usecases::u502_kitchen_display::{open_batch_count, KitchenRow};

use crate::domain::a005_order_line;
use crate::shared::config;
use crate::shared::data::settings;

const PAUSE_KEY: &str = "kitchen_paused";

pub async fn is_paused() -> anyhow::Result<bool> {
    settings::get_bool(PAUSE_KEY).await
}

pub async fn pause_status() -> anyhow::Result<PauseStatus> {
    Ok(PauseStatus {
        is_paused: is_paused().await?,
    })
}

/// While paused, delivery and collection orders are refused
pub async fn set_paused(status: PauseStatus) -> anyhow::Result<PauseStatus> {
    let value = if status.is_paused { "true" } else { "false" };
    settings::set(PAUSE_KEY, value, "Kitchen refuses remote orders while true").await?;
    tracing::info!("Kitchen {}", if status.is_paused { "paused" } else { "resumed" });
    Ok(status)
}

/// Wait quoted to new orders: base plus a slice per open batch
pub async fn estimated_delay() -> anyhow::Result<EstimatedDelay> {
    let rows: Vec<KitchenRow> = a005_order_line::service::kitchen_feed()
        .await?
        .into_iter()
        .map(KitchenRow::from)
        .collect();
    let kitchen = config::current().kitchen;
    Ok(estimate_delay(
        kitchen.base_minutes,
        kitchen.minutes_per_batch,
        open_batch_count(&rows),
    ))
}
