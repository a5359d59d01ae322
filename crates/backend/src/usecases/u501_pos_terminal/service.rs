//! Settling and moving table bills. Every operation that touches rows and
//! payments runs in one transaction.

use contracts::domain::a004_dining_table::aggregate::TableStatus;
use contracts::domain::a005_order_line::aggregate::{lines_total, OrderLine};
use contracts::domain::a007_payment::aggregate::{Payment, PaymentKind};
use contracts::shared::money::round_pennies;
use contracts::usecases::u501_pos_terminal::request::{
    AffectedRows, CloseTableRequest, MarkPaidRequest, PayShareRequest, PayShareResponse,
    PaymentResult, PosSettings, SplitByPeopleRequest, SplitByPeopleResponse, SplitPayRequest,
    TableBalance, TransferTableRequest, TransferTableResponse,
};
use contracts::usecases::u501_pos_terminal::split::{remaining_after, selected_total, split_evenly};
use contracts::usecases::u501_pos_terminal::totals::compute_totals;
use sea_orm::{ConnectionTrait, TransactionTrait};

use crate::domain::{a004_dining_table, a005_order_line, a007_payment};
use crate::shared::config;
use crate::shared::data::db::get_connection;
use crate::shared::error::ServiceError;

fn required_table(table: &str) -> anyhow::Result<&str> {
    let table = table.trim();
    if table.is_empty() {
        return Err(ServiceError::Validation("Table is required".into()).into());
    }
    Ok(table)
}

fn unpaid(lines: Vec<OrderLine>) -> Vec<OrderLine> {
    lines.into_iter().filter(|l| l.is_unpaid()).collect()
}

/// Share payments recorded against the table's current bill
async fn shares_paid<C: ConnectionTrait>(db: &C, table: &str, open: &[OrderLine]) -> anyhow::Result<f64> {
    let Some(since) = open.iter().map(|l| l.created_at).min() else {
        return Ok(0.0);
    };
    let shares = a007_payment::repository::list_shares_since(db, table, since).await?;
    Ok(round_pennies(shares.iter().map(|p| p.amount).sum()))
}

pub fn settings() -> PosSettings {
    PosSettings {
        default_service_rate: config::current().pos.default_service_rate,
    }
}

/// Shares taken against the table's bill. Only a payment covering every
/// unpaid row may use them.
async fn share_credit<C: ConnectionTrait>(db: &C, table: Option<&str>, ids: &[String]) -> anyhow::Result<f64> {
    let Some(table) = table.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(0.0);
    };
    let open = unpaid(a005_order_line::repository::list_open_by_table(db, table).await?);
    let credit = shares_paid(db, table, &open).await?;
    if credit > 0.0 && open.iter().any(|l| !ids.contains(&l.id)) {
        return Err(ServiceError::Conflict(format!(
            "{} already has {:.2} paid in shares. Pay the rest by share or settle the whole bill",
            table, credit
        ))
        .into());
    }
    Ok(credit)
}

/// Pays the selected rows at their line prices
pub async fn split_pay(request: SplitPayRequest) -> anyhow::Result<PaymentResult> {
    if request.item_ids.is_empty() {
        return Err(ServiceError::Validation("Select items to pay".into()).into());
    }
    let txn = get_connection().begin().await?;
    let lines = a005_order_line::repository::list_by_ids(&txn, &request.item_ids).await?;
    let table = lines.iter().find_map(|l| l.table_number.clone());
    let credit = share_credit(&txn, table.as_deref(), &request.item_ids).await?;
    let amount = remaining_after(selected_total(&lines, &request.item_ids), credit);

    let paid_items = a005_order_line::repository::mark_paid(&txn, &request.item_ids, request.payment_method).await?;
    if paid_items == 0 {
        return Err(ServiceError::Conflict("Selected items are already paid".into()).into());
    }
    if amount > 0.0 {
        let payment = Payment::new(table, amount, request.payment_method, PaymentKind::Items);
        a007_payment::repository::insert(&txn, &payment).await?;
    }
    txn.commit().await?;

    tracing::info!(
        "Split payment {:.2} by {} for {} rows ({:.2} from shares)",
        amount,
        request.payment_method.as_str(),
        paid_items,
        credit
    );
    Ok(PaymentResult { paid_items, amount })
}

/// Pays rows with discount and service applied; no ids means the whole table.
/// Shares already taken come off the charge.
pub async fn mark_paid(request: MarkPaidRequest) -> anyhow::Result<PaymentResult> {
    let txn = get_connection().begin().await?;
    let ids = if request.item_ids.is_empty() {
        let table = required_table(request.table_number.as_deref().unwrap_or(""))?;
        unpaid(a005_order_line::repository::list_open_by_table(&txn, table).await?)
            .into_iter()
            .map(|l| l.id)
            .collect()
    } else {
        request.item_ids.clone()
    };
    let lines = a005_order_line::repository::list_by_ids(&txn, &ids).await?;
    let table = request
        .table_number
        .clone()
        .filter(|t| !t.trim().is_empty())
        .or_else(|| lines.iter().find_map(|l| l.table_number.clone()));
    let credit = share_credit(&txn, table.as_deref(), &ids).await?;
    let totals = compute_totals(selected_total(&lines, &ids), &request.adjustments).less_shares(credit);

    let paid_items = a005_order_line::repository::mark_paid(&txn, &ids, request.payment_method).await?;
    if paid_items == 0 {
        return Err(ServiceError::Conflict("Nothing left to pay".into()).into());
    }
    if totals.amount_due > 0.0 {
        let payment = Payment::new(table, totals.amount_due, request.payment_method, PaymentKind::Full);
        a007_payment::repository::insert(&txn, &payment).await?;
    }
    txn.commit().await?;

    tracing::info!(
        "Bill paid {:.2} by {} (subtotal {:.2}, discount {:.2}, service {:.2}, shares {:.2})",
        totals.amount_due,
        request.payment_method.as_str(),
        totals.subtotal,
        totals.discount,
        totals.service,
        totals.shares_paid
    );
    Ok(PaymentResult {
        paid_items,
        amount: totals.amount_due,
    })
}

/// Unpaid total, shares taken and what is left on a table
pub async fn table_balance(table: &str) -> anyhow::Result<TableBalance> {
    let table = required_table(table)?;
    let db = get_connection();
    let open = unpaid(a005_order_line::repository::list_open_by_table(db, table).await?);
    let unpaid_total = lines_total(&open);
    let shares = shares_paid(db, table, &open).await?;
    Ok(TableBalance {
        table_number: table.to_string(),
        unpaid_total,
        shares_paid: shares,
        remaining: remaining_after(unpaid_total, shares),
    })
}

/// Even shares of what the table still owes
pub async fn split_by_people(request: SplitByPeopleRequest) -> anyhow::Result<SplitByPeopleResponse> {
    let table = required_table(&request.table_number)?;
    if request.people == 0 {
        return Err(ServiceError::Validation("Split needs at least one person".into()).into());
    }
    let balance = table_balance(table).await?;
    if balance.unpaid_total <= 0.0 {
        return Err(ServiceError::Validation(format!("{} has nothing to pay", table)).into());
    }
    let shares = split_evenly(balance.remaining, request.people);
    Ok(SplitByPeopleResponse {
        total: balance.remaining,
        share: shares.first().copied().unwrap_or(0.0),
        shares,
    })
}

/// Records one diner's share; the last share settles every unpaid row
pub async fn pay_share(request: PayShareRequest) -> anyhow::Result<PayShareResponse> {
    let table = required_table(&request.table_number)?;
    if !request.amount.is_finite() || request.amount <= 0.0 {
        return Err(ServiceError::Validation("Share must be more than zero".into()).into());
    }
    let txn = get_connection().begin().await?;
    let open = unpaid(a005_order_line::repository::list_open_by_table(&txn, table).await?);
    if open.is_empty() {
        return Err(ServiceError::Validation(format!("{} has nothing to pay", table)).into());
    }
    let total = lines_total(&open);
    let before = shares_paid(&txn, table, &open).await?;

    let amount = round_pennies(request.amount);
    let payment = Payment::new(Some(table.to_string()), amount, request.payment_method, PaymentKind::Share);
    a007_payment::repository::insert(&txn, &payment).await?;

    let paid_so_far = round_pennies(before + amount);
    let remaining = remaining_after(total, paid_so_far);
    let settled = remaining <= 0.0;
    if settled {
        a005_order_line::repository::mark_table_paid(&txn, table, request.payment_method).await?;
    }
    txn.commit().await?;

    tracing::info!("{} share {:.2} paid, {:.2} remaining", table, amount, remaining);
    Ok(PayShareResponse {
        paid_so_far,
        remaining,
        settled,
    })
}

/// Moves open rows and the shares taken against them; the old table is freed
/// and the new one occupied
pub async fn transfer_table(request: TransferTableRequest) -> anyhow::Result<TransferTableResponse> {
    let old_table = required_table(&request.old_table)?;
    let new_table = required_table(&request.new_table)?;
    if old_table == new_table {
        return Err(ServiceError::Validation("Pick a different table".into()).into());
    }
    let txn = get_connection().begin().await?;
    let open = unpaid(a005_order_line::repository::list_open_by_table(&txn, old_table).await?);
    let moved = a005_order_line::repository::transfer(&txn, old_table, new_table).await?;
    if moved == 0 {
        return Err(ServiceError::NotFound(format!("Open orders on {}", old_table)).into());
    }
    let mut shares = 0;
    if let Some(since) = open.iter().map(|l| l.created_at).min() {
        shares = a007_payment::repository::move_shares(&txn, old_table, new_table, since).await?;
    }
    a004_dining_table::repository::set_status_by_name(&txn, old_table, TableStatus::Free).await?;
    a004_dining_table::repository::set_status_by_name(&txn, new_table, TableStatus::Occupied).await?;
    txn.commit().await?;

    tracing::info!("Moved {} rows and {} shares from {} to {}", moved, shares, old_table, new_table);
    Ok(TransferTableResponse { moved })
}

/// Closes every open row and frees the table. Unpaid rows are closed as they are.
pub async fn close_table(request: CloseTableRequest) -> anyhow::Result<AffectedRows> {
    let table = required_table(&request.table_number)?;
    let txn = get_connection().begin().await?;
    let affected = a005_order_line::repository::close_table(&txn, table).await?;
    a004_dining_table::repository::set_status_by_name(&txn, table, TableStatus::Free).await?;
    txn.commit().await?;

    tracing::info!("{} closed ({} rows)", table, affected);
    Ok(AffectedRows { affected })
}

/// Voids unpaid open rows; the table is freed when nothing open remains
pub async fn clear_unpaid(table: &str) -> anyhow::Result<AffectedRows> {
    let table = required_table(table)?;
    let txn = get_connection().begin().await?;
    let affected = a005_order_line::repository::delete_unpaid(&txn, table).await?;
    if a005_order_line::repository::list_open_by_table(&txn, table).await?.is_empty() {
        a004_dining_table::repository::set_status_by_name(&txn, table, TableStatus::Free).await?;
    }
    txn.commit().await?;

    tracing::info!("{} unpaid rows voided on {}", affected, table);
    Ok(AffectedRows { affected })
}
