use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a004_dining_table::aggregate::DiningTable;
use crate::domain::a005_order_line::aggregate::OrderLine;
use crate::domain::a006_incident_report::aggregate::IncidentReport;
use crate::domain::a007_payment::aggregate::{Payment, PaymentMethod};
use crate::shared::money::round_pennies;

pub const TOP_ITEMS_LIMIT: usize = 5;

/// Query of GET /api/analytics/summary
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DailySummaryQuery {
    /// "YYYY-MM-DD", today when absent
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopItem {
    pub name: String,
    pub quantity: u32,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodTotal {
    pub method: PaymentMethod,
    pub amount: f64,
    pub count: usize,
}

/// One trading day at a glance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// Money actually taken (sum of payments)
    pub revenue: f64,
    /// Placements sent to the kitchen
    pub batches: usize,
    pub items_sold: u32,
    pub average_ticket: f64,
    pub top_items: Vec<TopItem>,
    pub by_method: Vec<MethodTotal>,
    pub incidents: usize,
    pub open_tables: usize,
}

/// Aggregates the day's rows. Callers pass rows already limited to `date`.
pub fn summarize(
    date: NaiveDate,
    lines: &[OrderLine],
    payments: &[Payment],
    reports: &[IncidentReport],
    tables: &[DiningTable],
) -> DailySummary {
    let revenue = round_pennies(payments.iter().map(|p| p.amount).sum());

    let mut batch_keys: Vec<String> = lines.iter().map(OrderLine::batch_key).collect();
    batch_keys.sort();
    batch_keys.dedup();
    let batches = batch_keys.len();

    let mut top_items: Vec<TopItem> = Vec::new();
    for line in lines {
        match top_items.iter_mut().find(|t| t.name == line.meal_name) {
            Some(item) => {
                item.quantity += line.quantity;
                item.revenue = round_pennies(item.revenue + line.total_price);
            }
            None => top_items.push(TopItem {
                name: line.meal_name.clone(),
                quantity: line.quantity,
                revenue: round_pennies(line.total_price),
            }),
        }
    }
    let items_sold = top_items.iter().map(|t| t.quantity).sum();
    top_items.sort_by(|a, b| b.quantity.cmp(&a.quantity).then_with(|| a.name.cmp(&b.name)));
    top_items.truncate(TOP_ITEMS_LIMIT);

    let by_method = [PaymentMethod::Cash, PaymentMethod::Card]
        .into_iter()
        .map(|method| {
            let taken: Vec<&Payment> = payments.iter().filter(|p| p.method == method).collect();
            MethodTotal {
                method,
                amount: round_pennies(taken.iter().map(|p| p.amount).sum()),
                count: taken.len(),
            }
        })
        .collect();

    let average_ticket = if batches == 0 {
        0.0
    } else {
        round_pennies(revenue / batches as f64)
    };

    DailySummary {
        date,
        revenue,
        batches,
        items_sold,
        average_ticket,
        top_items,
        by_method,
        incidents: reports.len(),
        open_tables: tables.iter().filter(|t| !t.is_free()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a004_dining_table::aggregate::{seed_tables, TableStatus};
    use crate::domain::a005_order_line::aggregate::sample_line;
    use crate::domain::a007_payment::aggregate::PaymentKind;

    fn line(name: &str, qty: u32, total: f64, batch: &str) -> OrderLine {
        let mut l = sample_line(name, qty, total);
        l.batch_id = Some(batch.into());
        l
    }

    #[test]
    fn test_summary_figures() {
        let lines = vec![
            line("Latte", 2, 6.0, "b1"),
            line("Full English", 1, 9.5, "b1"),
            line("Latte", 1, 3.0, "b2"),
            line("Toast", 3, 4.5, "b3"),
        ];
        let payments = vec![
            Payment::new(Some("Table 1".into()), 15.5, PaymentMethod::Card, PaymentKind::Full),
            Payment::new(None, 7.5, PaymentMethod::Cash, PaymentKind::Items),
        ];
        let mut tables = seed_tables(3, &["Main".to_string()], 4);
        tables[1].status = TableStatus::Occupied;

        let today = chrono::Utc::now().date_naive();
        let summary = summarize(today, &lines, &payments, &[], &tables);
        assert_eq!(summary.revenue, 23.0);
        assert_eq!(summary.batches, 3);
        assert_eq!(summary.items_sold, 7);
        assert_eq!(summary.average_ticket, 7.67);
        assert_eq!(summary.top_items[0].name, "Latte");
        assert_eq!(summary.top_items[0].quantity, 3);
        assert_eq!(summary.top_items[0].revenue, 9.0);
        assert_eq!(summary.top_items[1].name, "Toast");
        assert_eq!(summary.by_method[1].amount, 15.5);
        assert_eq!(summary.open_tables, 1);
    }

    #[test]
    fn test_rows_without_batch_id_count_by_placement() {
        let first = sample_line("Latte", 1, 3.0);
        let mut same_placement = sample_line("Toast", 1, 1.5);
        same_placement.created_at = first.created_at;
        same_placement.batch_id = Some(String::new());
        let mut later = sample_line("Cake", 1, 4.0);
        later.created_at = first.created_at + chrono::Duration::seconds(5);

        let today = chrono::Utc::now().date_naive();
        let summary = summarize(today, &[first.clone(), same_placement.clone(), later], &[], &[], &[]);
        assert_eq!(summary.batches, 2);
        assert_eq!(first.batch_key(), same_placement.batch_key());
    }

    #[test]
    fn test_empty_day() {
        let today = chrono::Utc::now().date_naive();
        let summary = summarize(today, &[], &[], &[], &[]);
        assert_eq!(summary.average_ticket, 0.0);
        assert!(summary.top_items.is_empty());
        assert_eq!(summary.by_method.len(), 2);
    }
}
