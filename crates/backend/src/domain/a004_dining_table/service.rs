use super::repository;
use contracts::domain::a004_dining_table::aggregate::{
    seed_tables, DiningTable, TableStatus, TableTotal,
};
use contracts::domain::a005_order_line::aggregate::lines_total;
use uuid::Uuid;

use crate::domain::a005_order_line;
use crate::shared::config::FloorConfig;
use crate::shared::error::ServiceError;

/// Creates the floor from config on first start. Returns how many tables were added.
pub async fn seed_if_empty(floor: &FloorConfig) -> anyhow::Result<usize> {
    if repository::count().await? > 0 {
        return Ok(0);
    }
    let tables = seed_tables(floor.tables, &floor.zones, floor.seats);
    for table in &tables {
        table.validate().map_err(ServiceError::Validation)?;
        repository::insert(table).await?;
    }
    Ok(tables.len())
}

pub async fn list_all() -> anyhow::Result<Vec<DiningTable>> {
    repository::list_all().await
}

pub async fn set_status(id: Uuid, status: TableStatus) -> anyhow::Result<()> {
    if !repository::set_status(id, status).await? {
        return Err(ServiceError::NotFound("Table".into()).into());
    }
    tracing::info!("Table {} is now {}", id, status.as_str());
    Ok(())
}

/// Unpaid balance of the table with the given id
pub async fn total(id: Uuid) -> anyhow::Result<TableTotal> {
    let table = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Table".into()))?;
    total_by_name(table.name()).await
}

pub async fn total_by_name(name: &str) -> anyhow::Result<TableTotal> {
    let unpaid: Vec<_> = a005_order_line::service::by_table(name)
        .await?
        .into_iter()
        .filter(|l| l.is_unpaid())
        .collect();
    Ok(TableTotal {
        table_number: name.to_string(),
        total: lines_total(&unpaid),
        unpaid_items: unpaid.iter().map(|l| l.quantity).sum(),
    })
}
