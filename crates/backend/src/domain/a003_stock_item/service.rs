use super::repository;
use chrono::Local;
use contracts::domain::a003_stock_item::aggregate::{ExpiredRemoval, StockItem, StockItemDto};
use uuid::Uuid;

use crate::shared::error::ServiceError;

pub async fn create(dto: StockItemDto) -> anyhow::Result<Uuid> {
    let mut aggregate = StockItem::new_for_insert(&dto);

    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();

    let id = repository::insert(&aggregate).await?;
    tracing::info!(
        "Stock '{}' added: {} {}",
        aggregate.ingredient(),
        aggregate.quantity,
        aggregate.unit
    );
    Ok(id)
}

async fn load(id: Uuid) -> anyhow::Result<StockItem> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Stock item".into()).into())
}

/// Full replacement of the editable fields
pub async fn update(id: Uuid, dto: StockItemDto) -> anyhow::Result<()> {
    let mut aggregate = load(id).await?;
    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();

    log_events(&mut aggregate);
    repository::update(&aggregate).await
}

pub async fn set_price(id: Uuid, price: f64) -> anyhow::Result<()> {
    let mut aggregate = load(id).await?;
    aggregate.set_price(price).map_err(ServiceError::Validation)?;
    aggregate.before_write();

    log_events(&mut aggregate);
    repository::update(&aggregate).await
}

fn log_events(aggregate: &mut StockItem) {
    for event in aggregate.base.events.drain() {
        tracing::info!("Stock '{}': {} ({:.2})", aggregate.ingredient(), event, aggregate.price);
    }
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

/// Removes items whose expiry date is before today (local calendar)
pub async fn remove_expired() -> anyhow::Result<ExpiredRemoval> {
    let today = Local::now().date_naive();
    let removed = repository::soft_delete_expired(today).await?;
    if removed > 0 {
        tracing::info!("Removed {} expired stock items", removed);
    }
    Ok(ExpiredRemoval { removed })
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<StockItem>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<StockItem>> {
    repository::list_all().await
}
