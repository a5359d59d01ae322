use contracts::projections::p901_restock_list::dto::{build_restock_list, RestockList};

use crate::domain::a003_stock_item;

/// Stock at or below its minimum level, most urgent first
pub async fn get_restock_list() -> anyhow::Result<RestockList> {
    let stock = a003_stock_item::service::list_all().await?;
    let list = build_restock_list(&stock);
    if list.urgent_count() > 0 {
        tracing::warn!("{} stock items are out", list.urgent_count());
    }
    Ok(list)
}
