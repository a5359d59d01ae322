//! Prep batches. Ingredients leave stock and the prepped item arrives in
//! the same transaction.

use chrono::Local;
use contracts::domain::a003_stock_item::aggregate::StockItem;
use contracts::usecases::u503_prep_batch::plan::{
    plan_batch, prep_due, prepped_stock_dto, PrepDue, PrepareBatchRequest, PrepareBatchResult,
};
use sea_orm::TransactionTrait;

use crate::domain::{a003_stock_item, a010_prep_recipe};
use crate::shared::data::db::get_connection;
use crate::shared::error::ServiceError;

pub async fn prepare(request: PrepareBatchRequest) -> anyhow::Result<PrepareBatchResult> {
    if !request.batch_quantity.is_finite() || request.batch_quantity <= 0.0 {
        return Err(ServiceError::Validation("Batch quantity must be greater than zero".into()).into());
    }
    let recipe = a010_prep_recipe::service::find_by_name(&request.name)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Prepped item".into()))?;

    let txn = get_connection().begin().await?;
    let mut stock = a003_stock_item::repository::list_all_in(&txn).await?;
    let plan = plan_batch(&recipe, request.batch_quantity, &stock).map_err(ServiceError::Conflict)?;

    for deduction in &plan.deductions {
        let Some(item) = stock
            .iter_mut()
            .find(|s| s.base.id.value().to_string() == deduction.stock_id)
        else {
            continue;
        };
        item.take(deduction.amount).map_err(ServiceError::Conflict)?;
        item.base.events.drain();
        item.before_write();
        a003_stock_item::repository::update_in(&txn, item).await?;
    }

    let made = Local::now().date_naive();
    let expiry_date = recipe.expiry_for(made);
    let existing = stock
        .iter_mut()
        .filter(|s| s.ingredient().eq_ignore_ascii_case(recipe.name()))
        .max_by_key(|s| s.is_prepped);
    let output = match existing {
        Some(item) => {
            item.receive(plan.batch_quantity, plan.cost)
                .map_err(ServiceError::Validation)?;
            item.base.events.drain();
            item.expiry_date = Some(expiry_date);
            item.is_prepped = true;
            item.before_write();
            a003_stock_item::repository::update_in(&txn, item).await?;
            item.clone()
        }
        None => {
            let mut item = StockItem::new_for_insert(&prepped_stock_dto(&recipe, &plan, made));
            item.validate().map_err(ServiceError::Validation)?;
            item.before_write();
            a003_stock_item::repository::insert_in(&txn, &item).await?;
            item
        }
    };
    txn.commit().await?;

    tracing::info!(
        "Prepared {} {} of {} from {} ingredients ({:.2}), use by {}",
        plan.batch_quantity,
        plan.unit,
        plan.prepped_item,
        plan.deductions.len(),
        plan.cost,
        expiry_date
    );
    Ok(PrepareBatchResult {
        stock_id: output.base.id.value().to_string(),
        in_stock: output.quantity,
        expiry_date,
        plan,
    })
}

/// Prepped items running below their minimum
pub async fn list_due() -> anyhow::Result<Vec<PrepDue>> {
    let recipes = a010_prep_recipe::service::list_all().await?;
    let stock = a003_stock_item::service::list_all().await?;
    Ok(prep_due(&recipes, &stock))
}
