use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::row::KitchenRow;
use crate::domain::a005_order_line::aggregate::{batch_key_for, DeliveryStatus, OrderType};

/// Grouping key for a row, shared with the order lines it came from
pub fn batch_key(row: &KitchenRow) -> String {
    batch_key_for(row.batch_id.as_deref(), row.table_number.as_deref(), row.created_at)
}

/// One placement as shown on a kitchen card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenBatch {
    pub key: String,
    pub batch_id: Option<String>,
    pub table_number: Option<String>,
    pub order_type: OrderType,
    pub created_at: DateTime<Utc>,
    pub delivery_status: Option<DeliveryStatus>,
    pub delivery_code: Option<String>,
    pub items: Vec<KitchenRow>,
}

impl KitchenBatch {
    fn start(key: String, row: &KitchenRow) -> Self {
        Self {
            key,
            batch_id: row.batch_id.clone(),
            table_number: row.table_number.clone(),
            order_type: row.order_type,
            created_at: row.created_at,
            delivery_status: row.delivery_status,
            delivery_code: row.delivery_code.clone(),
            items: Vec::new(),
        }
    }

    /// Card header text.
    pub fn title(&self) -> String {
        match self.order_type {
            OrderType::Delivery => "🚗 DELIVERY".to_string(),
            OrderType::Collection => "🛍 COLLECTION".to_string(),
            _ => self
                .table_number
                .clone()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "Table Unknown".to_string()),
        }
    }

    pub fn is_paid(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|i| i.paid)
    }

    /// Delivery still waiting for the kitchen to accept or decline.
    pub fn awaits_decision(&self) -> bool {
        self.order_type == OrderType::Delivery && self.delivery_status != Some(DeliveryStatus::Accepted)
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn row_ids(&self) -> Vec<String> {
        self.items.iter().map(|i| i.id.clone()).collect()
    }
}

/// Filters rows to the active categories, drops declined deliveries and
/// groups the rest into batches ordered oldest first.
pub fn group_batches(rows: Vec<KitchenRow>, active_categories: &[String]) -> Vec<KitchenBatch> {
    let mut batches: Vec<KitchenBatch> = Vec::new();
    for row in rows {
        if row.is_declined_delivery() {
            continue;
        }
        if !active_categories.contains(&row.resolve_category()) {
            continue;
        }
        let key = batch_key(&row);
        let index = match batches.iter().position(|b| b.key == key) {
            Some(index) => index,
            None => {
                batches.push(KitchenBatch::start(key, &row));
                batches.len() - 1
            }
        };
        let batch = &mut batches[index];
        if row.created_at < batch.created_at {
            batch.created_at = row.created_at;
        }
        batch.items.push(row);
    }
    batches.sort_by_key(|b| b.created_at);
    batches
}

/// Batches still waiting on the pass, all categories counted.
pub fn open_batch_count(rows: &[KitchenRow]) -> u32 {
    let mut keys: Vec<String> = rows
        .iter()
        .filter(|r| !r.is_declined_delivery())
        .map(batch_key)
        .collect();
    keys.sort();
    keys.dedup();
    keys.len() as u32
}

/// Applies a manual drag: moves the card at `from` to `to`.
pub fn move_batch(batches: &mut Vec<KitchenBatch>, from: usize, to: usize) {
    if from >= batches.len() || from == to {
        return;
    }
    let batch = batches.remove(from);
    let to = to.min(batches.len());
    batches.insert(to, batch);
}

/// Re-applies a manual card order on a fresh poll. Known keys keep their
/// relative order; new batches follow in creation order.
pub fn apply_manual_order(batches: Vec<KitchenBatch>, order: &[String]) -> Vec<KitchenBatch> {
    if order.is_empty() {
        return batches;
    }
    let (mut known, fresh): (Vec<_>, Vec<_>) =
        batches.into_iter().partition(|b| order.contains(&b.key));
    known.sort_by_key(|b| order.iter().position(|k| *k == b.key));
    known.extend(fresh);
    known
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn row(id: &str, batch: Option<&str>, category: &str, created_at: DateTime<Utc>) -> KitchenRow {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "batch_id": batch,
            "table_number": "Table 2",
            "meal_name": format!("Item {}", id),
            "quantity": 2,
            "category": category,
            "created_at": created_at,
        }))
        .unwrap()
    }

    fn active(cats: &[&str]) -> Vec<String> {
        cats.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_batch_key_fallback() {
        let at = DateTime::parse_from_rfc3339("2025-01-01T10:00:00Z").unwrap().with_timezone(&Utc);
        assert_eq!(batch_key(&row("1", Some("b1"), "meals", at)), "b1");
        let mut loose = row("2", None, "meals", at);
        assert_eq!(batch_key(&loose), format!("Table 2-{}", at.timestamp_millis()));
        loose.table_number = None;
        assert!(batch_key(&loose).starts_with("unknown-"));
    }

    #[test]
    fn test_group_filters_and_orders() {
        let now = Utc::now();
        let rows = vec![
            row("1", Some("late"), "meals", now),
            row("2", Some("early"), "Drinks", now - Duration::minutes(5)),
            row("3", Some("early"), "meals", now - Duration::minutes(5)),
            row("4", Some("late"), "desserts", now),
        ];
        let batches = group_batches(rows, &active(&["meals", "drinks"]));
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].key, "early");
        assert_eq!(batches[0].items.len(), 2);
        assert_eq!(batches[1].items.len(), 1);
        assert_eq!(batches[0].item_count(), 4);
    }

    #[test]
    fn test_declined_delivery_dropped() {
        let mut declined = row("1", Some("d"), "meals", Utc::now());
        declined.order_type = OrderType::Delivery;
        declined.delivery_status = Some(DeliveryStatus::Declined);
        let mut pending = row("2", Some("p"), "meals", Utc::now());
        pending.order_type = OrderType::Delivery;
        pending.delivery_status = Some(DeliveryStatus::Pending);

        let batches = group_batches(vec![declined, pending], &active(&["meals"]));
        assert_eq!(batches.len(), 1);
        assert!(batches[0].awaits_decision());
        assert_eq!(batches[0].title(), "🚗 DELIVERY");
    }

    #[test]
    fn test_manual_order_survives_poll() {
        let now = Utc::now();
        let rows = vec![
            row("1", Some("a"), "meals", now - Duration::minutes(3)),
            row("2", Some("b"), "meals", now - Duration::minutes(2)),
            row("3", Some("c"), "meals", now - Duration::minutes(1)),
        ];
        let mut batches = group_batches(rows.clone(), &active(&["meals"]));
        move_batch(&mut batches, 2, 0);
        let order: Vec<String> = batches.iter().map(|b| b.key.clone()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);

        let mut polled = rows;
        polled.push(row("4", Some("d"), "meals", now));
        let reordered = apply_manual_order(group_batches(polled, &active(&["meals"])), &order);
        let keys: Vec<&str> = reordered.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_open_batch_count_ignores_categories() {
        let now = Utc::now();
        let mut declined = row("4", Some("x"), "meals", now);
        declined.order_type = OrderType::Delivery;
        declined.delivery_status = Some(DeliveryStatus::Declined);
        let rows = vec![
            row("1", Some("a"), "meals", now),
            row("2", Some("a"), "drinks", now),
            row("3", Some("b"), "desserts", now),
            declined,
        ];
        assert_eq!(open_batch_count(&rows), 2);
        assert_eq!(open_batch_count(&[]), 0);
    }
}
