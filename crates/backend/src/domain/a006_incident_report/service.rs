use super::repository;
use chrono::Utc;
use contracts::domain::a005_order_line::aggregate::OrderLine;
use contracts::domain::a006_incident_report::aggregate::{redo_note, IncidentReport, IncidentReportDto};
use sea_orm::TransactionTrait;
use uuid::Uuid;

use crate::domain::a005_order_line;
use crate::shared::data::db::get_connection;
use crate::shared::error::ServiceError;
use crate::shared::period::{local_day_bounds, parse_day};

/// Zero-priced replacement of the reported row, placed as its own batch
pub fn redo_line(original: &OrderLine, report: &IncidentReport) -> OrderLine {
    OrderLine {
        id: Uuid::new_v4().to_string(),
        batch_id: Some(Uuid::new_v4().to_string()),
        table_number: original.table_number.clone(),
        order_type: original.order_type,
        meal_id: original.meal_id.clone(),
        meal_name: original.meal_name.clone(),
        category: original.category.clone(),
        quantity: report.quantity,
        total_price: 0.0,
        options: original.options.clone(),
        note: Some(redo_note(&report.reason)),
        paid: true,
        payment_method: None,
        delivery_status: None,
        delivery_code: None,
        created_at: Utc::now(),
        bumped_at: None,
        closed_at: None,
    }
}

/// Logs the report; with `redo` a replacement goes to the kitchen in the same transaction
pub async fn create(dto: IncidentReportDto, current_user: &str) -> anyhow::Result<IncidentReport> {
    dto.validate().map_err(ServiceError::Validation)?;
    let report = dto.into_report(current_user);

    let redo = if report.redo {
        let original = a005_order_line::repository::get_by_id(&report.order_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Order row".into()))?;
        Some(redo_line(&original, &report))
    } else {
        None
    };

    let txn = get_connection().begin().await?;
    repository::insert(&txn, &report).await?;
    if let Some(line) = &redo {
        a005_order_line::repository::insert_many(&txn, std::slice::from_ref(line)).await?;
    }
    txn.commit().await?;

    tracing::info!(
        "Report on '{}' x{}: {} by {}{}",
        report.item_name,
        report.quantity,
        report.reason,
        report.reported_by,
        if redo.is_some() { " (redo sent)" } else { "" }
    );
    Ok(report)
}

/// Reports for a local calendar day, today by default
pub async fn list_for_day(date: Option<&str>) -> anyhow::Result<Vec<IncidentReport>> {
    let (from, to) = local_day_bounds(parse_day(date)?);
    repository::list_between(from, to).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a005_order_line::aggregate::OrderType;

    #[test]
    fn test_redo_line_is_free_and_marked() {
        let original = OrderLine {
            id: "row-1".into(),
            batch_id: Some("b1".into()),
            table_number: Some("Table 4".into()),
            order_type: OrderType::DineIn,
            meal_id: Some("m1".into()),
            meal_name: "Full English".into(),
            category: "meals".into(),
            quantity: 2,
            total_price: 19.0,
            options: Some("White Bread".into()),
            note: None,
            paid: false,
            payment_method: None,
            delivery_status: None,
            delivery_code: None,
            created_at: Utc::now(),
            bumped_at: Some(Utc::now()),
            closed_at: None,
        };
        let report = IncidentReportDto {
            order_id: "row-1".into(),
            item_name: "Full English".into(),
            reason: "broken".into(),
            reported_by: None,
            quantity: 1,
            redo: true,
        }
        .into_report("chef");

        let line = redo_line(&original, &report);
        assert_eq!(line.total_price, 0.0);
        assert_eq!(line.quantity, 1);
        assert_eq!(line.note.as_deref(), Some("REDO: Broken"));
        assert_eq!(line.table_number.as_deref(), Some("Table 4"));
        assert_ne!(line.batch_id, original.batch_id);
        assert!(line.is_on_kitchen_display());
        assert_eq!(report.reported_by, "chef");
    }
}
