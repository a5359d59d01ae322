use super::repository;
use chrono::Utc;
use contracts::domain::a004_dining_table::aggregate::TableStatus;
use contracts::domain::a005_order_line::aggregate::{delivery_code_from, DeliveryStatus, OrderLine};
use contracts::domain::a005_order_line::requests::{GroupedOrderRequest, GroupedOrderResponse};
use contracts::usecases::u502_kitchen_display::request::{ClearedRows, DeliveryStatusResponse};
use sea_orm::TransactionTrait;
use uuid::Uuid;

use crate::domain::a004_dining_table;
use crate::shared::data::db::get_connection;
use crate::shared::error::ServiceError;
use crate::usecases::u502_kitchen_display;

/// Expands a grouped order into rows sharing one batch id and timestamp
pub fn build_lines(request: &GroupedOrderRequest, batch_id: &str) -> Vec<OrderLine> {
    let created_at = Utc::now();
    let table = request.table().map(str::to_string);
    request
        .items
        .iter()
        .map(|item| OrderLine {
            id: Uuid::new_v4().to_string(),
            batch_id: Some(batch_id.to_string()),
            table_number: table.clone(),
            order_type: request.order_type,
            meal_id: item.meal_id.clone(),
            meal_name: item.meal_name.trim().to_string(),
            category: item
                .category
                .as_deref()
                .map(|c| c.trim().to_lowercase())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "meals".to_string()),
            quantity: item.quantity,
            total_price: item.total_price,
            options: item.options.clone().filter(|o| !o.trim().is_empty()),
            note: item.note.clone().filter(|n| !n.trim().is_empty()),
            paid: false,
            payment_method: None,
            delivery_status: request.initial_delivery_status(),
            delivery_code: None,
            created_at,
            bumped_at: None,
            closed_at: None,
        })
        .collect()
}

/// Places one batch. A dine-in table becomes occupied in the same transaction.
pub async fn place_grouped(request: GroupedOrderRequest) -> anyhow::Result<GroupedOrderResponse> {
    request.validate().map_err(ServiceError::Validation)?;
    if request.order_type.is_remote() && u502_kitchen_display::service::is_paused().await? {
        return Err(ServiceError::KitchenPaused.into());
    }

    let batch_id = Uuid::new_v4().to_string();
    let lines = build_lines(&request, &batch_id);

    let txn = get_connection().begin().await?;
    repository::insert_many(&txn, &lines).await?;
    if let Some(table) = request.table() {
        a004_dining_table::repository::set_status_by_name(&txn, table, TableStatus::Occupied).await?;
    }
    txn.commit().await?;

    tracing::info!(
        "Batch {} placed: {} lines, {} for {}",
        batch_id,
        lines.len(),
        request.order_type.label(),
        request.table().unwrap_or("no table")
    );

    Ok(GroupedOrderResponse {
        created_at: lines.first().map(|l| l.created_at).unwrap_or_else(Utc::now),
        line_ids: lines.into_iter().map(|l| l.id).collect(),
        batch_id,
    })
}

/// Kitchen feed: everything not yet bumped
pub async fn kitchen_feed() -> anyhow::Result<Vec<OrderLine>> {
    repository::list_kitchen().await
}

pub async fn by_table(table: &str) -> anyhow::Result<Vec<OrderLine>> {
    repository::list_open_by_table(get_connection(), table).await
}

pub async fn get_by_id(id: &str) -> anyhow::Result<Option<OrderLine>> {
    repository::get_by_id(id).await
}

pub async fn bump(id: &str) -> anyhow::Result<()> {
    if !repository::bump(id).await? {
        return Err(ServiceError::NotFound("Order row".into()).into());
    }
    Ok(())
}

pub async fn clear_all() -> anyhow::Result<ClearedRows> {
    let ids = repository::bump_all().await?;
    tracing::info!("Kitchen display cleared: {} rows", ids.len());
    Ok(ClearedRows { ids })
}

pub async fn restore(ids: &[String]) -> anyhow::Result<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    repository::restore(ids).await
}

/// Accepting assigns a fresh four-digit code; declining clears it.
pub async fn set_delivery_status(batch_id: &str, status: DeliveryStatus) -> anyhow::Result<DeliveryStatusResponse> {
    let code = match status {
        DeliveryStatus::Accepted => Some(delivery_code_from(Uuid::new_v4().as_u128())),
        _ => None,
    };
    let updated = repository::set_delivery_status(batch_id, status, code.as_deref()).await?;
    if updated == 0 {
        return Err(ServiceError::NotFound(format!("Batch {}", batch_id)).into());
    }
    tracing::info!("Batch {} delivery {}", batch_id, status.as_str());
    Ok(DeliveryStatusResponse {
        success: true,
        updated,
        delivery_code: code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a005_order_line::aggregate::OrderType;
    use contracts::domain::a005_order_line::requests::GroupedOrderItem;

    #[test]
    fn test_build_lines_share_batch_and_timestamp() {
        let request = GroupedOrderRequest {
            table_number: Some(" Table 3 ".into()),
            order_type: OrderType::DineIn,
            items: vec![
                GroupedOrderItem {
                    meal_id: Some("m1".into()),
                    meal_name: "Full English".into(),
                    quantity: 2,
                    total_price: 19.0,
                    category: None,
                    options: Some("Brown Bread".into()),
                    note: Some("  ".into()),
                },
                GroupedOrderItem {
                    meal_id: None,
                    meal_name: "Latte".into(),
                    quantity: 1,
                    total_price: 3.0,
                    category: Some(" Drinks ".into()),
                    options: None,
                    note: None,
                },
            ],
        };
        let lines = build_lines(&request, "b1");
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.batch_id.as_deref() == Some("b1")));
        assert_eq!(lines[0].created_at, lines[1].created_at);
        assert_eq!(lines[0].table_number.as_deref(), Some("Table 3"));
        assert_eq!(lines[0].category, "meals");
        assert_eq!(lines[0].note, None);
        assert_eq!(lines[1].category, "drinks");
        assert_eq!(lines[0].delivery_status, None);
    }
}
