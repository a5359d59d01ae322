use super::repository;
use chrono::Utc;
use contracts::domain::a009_supplier_order::aggregate::SupplierOrder;
use sea_orm::TransactionTrait;
use uuid::Uuid;

use crate::domain::a003_stock_item;
use crate::shared::data::db::get_connection;
use crate::shared::error::ServiceError;

const HISTORY_LIMIT: u64 = 100;

/// Stores placed orders together
pub async fn insert_all(orders: &[SupplierOrder]) -> anyhow::Result<()> {
    let txn = get_connection().begin().await?;
    for order in orders {
        repository::insert(&txn, order).await?;
    }
    txn.commit().await?;
    for order in orders {
        tracing::info!(
            "Ordered {} lines from {} ({:.2}) by {}",
            order.lines.len(),
            order.supplier_name,
            order.total,
            order.placed_by
        );
    }
    Ok(())
}

pub async fn list_history() -> anyhow::Result<Vec<SupplierOrder>> {
    repository::list_recent(HISTORY_LIMIT).await
}

/// Books a delivery into stock: every line adds its quantity and cost to the
/// stock item it was ordered for.
pub async fn receive(id: &str) -> anyhow::Result<SupplierOrder> {
    let txn = get_connection().begin().await?;
    let mut order = repository::get_by_id(&txn, id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Supplier order".into()))?;
    let now = Utc::now();
    order.receive(now).map_err(ServiceError::Conflict)?;

    let mut booked = 0;
    for line in &order.lines {
        let stock = match Uuid::parse_str(&line.stock_id) {
            Ok(stock_id) => a003_stock_item::repository::get_by_id_in(&txn, stock_id).await?,
            Err(_) => None,
        };
        let Some(mut item) = stock else {
            tracing::warn!("{} is no longer in stock; delivery line skipped", line.ingredient);
            continue;
        };
        item.receive(line.quantity, line.line_total)
            .map_err(ServiceError::Validation)?;
        item.base.events.drain();
        item.before_write();
        a003_stock_item::repository::update_in(&txn, &item).await?;
        booked += 1;
    }
    if repository::mark_received(&txn, &order.id, now).await? == 0 {
        return Err(ServiceError::Conflict(format!(
            "Order from {} was already received",
            order.supplier_name
        ))
        .into());
    }
    txn.commit().await?;

    tracing::info!(
        "Received order from {}: {} of {} lines booked into stock",
        order.supplier_name,
        booked,
        order.lines.len()
    );
    Ok(order)
}
