use chrono::{Datelike, Local, Weekday};
use contracts::domain::a009_supplier_order::aggregate::{PlaceOrdersRequest, SupplierOrder};
use contracts::projections::p901_restock_list::dto::build_restock_list;
use contracts::projections::p902_smart_order::dto::{build_smart_order, SmartOrder};
use uuid::Uuid;

use crate::domain::{a003_stock_item, a008_supplier, a009_supplier_order};
use crate::projections::p901_restock_list;
use crate::shared::error::ServiceError;

fn today() -> Weekday {
    Local::now().weekday()
}

/// Restock list split by the supplier that delivers soonest
pub async fn get_smart_order() -> anyhow::Result<SmartOrder> {
    let list = p901_restock_list::service::get_restock_list().await?;
    let suppliers = a008_supplier::service::list_all().await?;
    let order = build_smart_order(&list, &suppliers, today());
    if let Some(group) = order.unassigned() {
        tracing::warn!("{} restock lines have no supplier", group.lines.len());
    }
    Ok(order)
}

/// Places one order per supplier group. Lines no supplier carries are never ordered.
pub async fn place_orders(request: PlaceOrdersRequest, placed_by: &str) -> anyhow::Result<Vec<SupplierOrder>> {
    let smart = get_smart_order().await?;
    let orders: Vec<SupplierOrder> = smart
        .groups
        .iter()
        .filter(|g| g.is_assigned())
        .filter(|g| {
            request.supplier_ids.is_empty()
                || g.supplier_id
                    .as_ref()
                    .is_some_and(|id| request.supplier_ids.contains(id))
        })
        .map(|g| g.to_order(placed_by))
        .collect();
    if orders.is_empty() {
        return Err(ServiceError::Validation("Nothing to order".into()).into());
    }
    for order in &orders {
        order.validate().map_err(ServiceError::Validation)?;
    }
    a009_supplier_order::service::insert_all(&orders).await?;
    Ok(orders)
}

/// Orders one low stock item from the supplier that delivers it soonest
pub async fn auto_restock(stock_id: Uuid, placed_by: &str) -> anyhow::Result<SupplierOrder> {
    let item = a003_stock_item::service::get_by_id(stock_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Stock item".into()))?;
    let list = build_restock_list(std::slice::from_ref(&item));
    if list.lines.is_empty() {
        return Err(ServiceError::Validation(format!(
            "{} is above its minimum level",
            item.ingredient()
        ))
        .into());
    }
    let suppliers = a008_supplier::service::list_all().await?;
    let smart = build_smart_order(&list, &suppliers, today());
    if smart.groups.is_empty() {
        return Err(ServiceError::Validation(format!("{} is already at its minimum", item.ingredient())).into());
    }
    let group = smart
        .groups
        .iter()
        .find(|g| g.is_assigned())
        .ok_or_else(|| ServiceError::Validation(format!("No supplier carries {}", item.ingredient())))?;

    let order = group.to_order(placed_by);
    order.validate().map_err(ServiceError::Validation)?;
    a009_supplier_order::service::insert_all(std::slice::from_ref(&order)).await?;
    Ok(order)
}
