use chrono::{DateTime, Utc};
use contracts::domain::a005_order_line::aggregate::{
    DeliveryStatus, OrderLine, OrderType,
};
use contracts::domain::a007_payment::aggregate::PaymentMethod;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a005_order_line")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub batch_id: Option<String>,
    pub table_number: Option<String>,
    pub order_type: String,
    pub meal_id: Option<String>,
    pub meal_name: String,
    pub category: String,
    pub quantity: i32,
    pub total_price: f64,
    pub options: Option<String>,
    pub note: Option<String>,
    pub paid: bool,
    pub payment_method: Option<String>,
    pub delivery_status: Option<String>,
    pub delivery_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub bumped_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for OrderLine {
    fn from(m: Model) -> Self {
        OrderLine {
            id: m.id,
            batch_id: m.batch_id,
            table_number: m.table_number,
            order_type: OrderType::parse(&m.order_type).unwrap_or_default(),
            meal_id: m.meal_id,
            meal_name: m.meal_name,
            category: m.category,
            quantity: m.quantity.max(0) as u32,
            total_price: m.total_price,
            options: m.options,
            note: m.note,
            paid: m.paid,
            payment_method: m.payment_method.as_deref().and_then(PaymentMethod::parse),
            delivery_status: m.delivery_status.as_deref().and_then(DeliveryStatus::parse),
            delivery_code: m.delivery_code,
            created_at: m.created_at,
            bumped_at: m.bumped_at,
            closed_at: m.closed_at,
        }
    }
}

impl From<&OrderLine> for ActiveModel {
    fn from(line: &OrderLine) -> Self {
        ActiveModel {
            id: Set(line.id.clone()),
            batch_id: Set(line.batch_id.clone()),
            table_number: Set(line.table_number.clone()),
            order_type: Set(line.order_type.as_str().to_string()),
            meal_id: Set(line.meal_id.clone()),
            meal_name: Set(line.meal_name.clone()),
            category: Set(line.category.clone()),
            quantity: Set(i32::try_from(line.quantity).unwrap_or(i32::MAX)),
            total_price: Set(line.total_price),
            options: Set(line.options.clone()),
            note: Set(line.note.clone()),
            paid: Set(line.paid),
            payment_method: Set(line.payment_method.map(|m| m.as_str().to_string())),
            delivery_status: Set(line.delivery_status.map(|s| s.as_str().to_string())),
            delivery_code: Set(line.delivery_code.clone()),
            created_at: Set(line.created_at),
            bumped_at: Set(line.bumped_at),
            closed_at: Set(line.closed_at),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn into_lines(models: Vec<Model>) -> Vec<OrderLine> {
    models.into_iter().map(Into::into).collect()
}

pub async fn insert_many<C: ConnectionTrait>(db: &C, lines: &[OrderLine]) -> anyhow::Result<()> {
    if lines.is_empty() {
        return Ok(());
    }
    Entity::insert_many(lines.iter().map(ActiveModel::from))
        .exec(db)
        .await?;
    Ok(())
}

pub async fn get_by_id(id: &str) -> anyhow::Result<Option<OrderLine>> {
    Ok(Entity::find_by_id(id.to_string()).one(conn()).await?.map(Into::into))
}

/// Rows still on the kitchen display, oldest first
pub async fn list_kitchen() -> anyhow::Result<Vec<OrderLine>> {
    let models = Entity::find()
        .filter(Column::BumpedAt.is_null())
        .order_by_asc(Column::CreatedAt)
        .all(conn())
        .await?;
    Ok(into_lines(models))
}

/// Rows of the table that have not been closed
pub async fn list_open_by_table<C: ConnectionTrait>(db: &C, table: &str) -> anyhow::Result<Vec<OrderLine>> {
    let models = Entity::find()
        .filter(Column::TableNumber.eq(table.trim()))
        .filter(Column::ClosedAt.is_null())
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?;
    Ok(into_lines(models))
}

pub async fn list_by_ids<C: ConnectionTrait>(db: &C, ids: &[String]) -> anyhow::Result<Vec<OrderLine>> {
    let models = Entity::find()
        .filter(Column::Id.is_in(ids.iter().cloned()))
        .all(db)
        .await?;
    Ok(into_lines(models))
}

/// Rows placed in `[from, to)`
pub async fn list_between(from: DateTime<Utc>, to: DateTime<Utc>) -> anyhow::Result<Vec<OrderLine>> {
    let models = Entity::find()
        .filter(Column::CreatedAt.gte(from))
        .filter(Column::CreatedAt.lt(to))
        .order_by_asc(Column::CreatedAt)
        .all(conn())
        .await?;
    Ok(into_lines(models))
}

/// Tables that still have open rows
pub async fn open_table_names() -> anyhow::Result<Vec<String>> {
    let mut names: Vec<String> = Entity::find()
        .filter(Column::ClosedAt.is_null())
        .filter(Column::TableNumber.is_not_null())
        .all(conn())
        .await?
        .into_iter()
        .filter_map(|m| m.table_number)
        .collect();
    names.sort();
    names.dedup();
    Ok(names)
}

/// Marks the given unpaid open rows as paid
pub async fn mark_paid<C: ConnectionTrait>(
    db: &C,
    ids: &[String],
    method: PaymentMethod,
) -> anyhow::Result<u64> {
    let result = Entity::update_many()
        .col_expr(Column::Paid, Expr::value(true))
        .col_expr(Column::PaymentMethod, Expr::value(method.as_str()))
        .filter(Column::Id.is_in(ids.iter().cloned()))
        .filter(Column::Paid.eq(false))
        .filter(Column::ClosedAt.is_null())
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

pub async fn mark_table_paid<C: ConnectionTrait>(
    db: &C,
    table: &str,
    method: PaymentMethod,
) -> anyhow::Result<u64> {
    let result = Entity::update_many()
        .col_expr(Column::Paid, Expr::value(true))
        .col_expr(Column::PaymentMethod, Expr::value(method.as_str()))
        .filter(Column::TableNumber.eq(table.trim()))
        .filter(Column::Paid.eq(false))
        .filter(Column::ClosedAt.is_null())
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Moves open rows to another table
pub async fn transfer<C: ConnectionTrait>(db: &C, old_table: &str, new_table: &str) -> anyhow::Result<u64> {
    let result = Entity::update_many()
        .col_expr(Column::TableNumber, Expr::value(new_table.trim()))
        .filter(Column::TableNumber.eq(old_table.trim()))
        .filter(Column::ClosedAt.is_null())
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

pub async fn close_table<C: ConnectionTrait>(db: &C, table: &str) -> anyhow::Result<u64> {
    let result = Entity::update_many()
        .col_expr(Column::ClosedAt, Expr::value(Utc::now()))
        .filter(Column::TableNumber.eq(table.trim()))
        .filter(Column::ClosedAt.is_null())
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Voids unpaid open rows of the table
pub async fn delete_unpaid<C: ConnectionTrait>(db: &C, table: &str) -> anyhow::Result<u64> {
    let result = Entity::delete_many()
        .filter(Column::TableNumber.eq(table.trim()))
        .filter(Column::Paid.eq(false))
        .filter(Column::ClosedAt.is_null())
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

pub async fn bump(id: &str) -> anyhow::Result<bool> {
    let result = Entity::update_many()
        .col_expr(Column::BumpedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id))
        .filter(Column::BumpedAt.is_null())
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

/// Bumps every row on the display and returns their ids
pub async fn bump_all() -> anyhow::Result<Vec<String>> {
    let txn = conn().begin().await?;
    let ids: Vec<String> = Entity::find()
        .filter(Column::BumpedAt.is_null())
        .all(&txn)
        .await?
        .into_iter()
        .map(|m| m.id)
        .collect();
    if !ids.is_empty() {
        Entity::update_many()
            .col_expr(Column::BumpedAt, Expr::value(Utc::now()))
            .filter(Column::Id.is_in(ids.iter().cloned()))
            .exec(&txn)
            .await?;
    }
    txn.commit().await?;
    Ok(ids)
}

pub async fn restore(ids: &[String]) -> anyhow::Result<u64> {
    let result = Entity::update_many()
        .col_expr(Column::BumpedAt, Expr::value(Option::<DateTime<Utc>>::None))
        .filter(Column::Id.is_in(ids.iter().cloned()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected)
}

/// Updates delivery status and code of every row in the batch
pub async fn set_delivery_status(
    batch_id: &str,
    status: DeliveryStatus,
    code: Option<&str>,
) -> anyhow::Result<u64> {
    let result = Entity::update_many()
        .col_expr(Column::DeliveryStatus, Expr::value(status.as_str()))
        .col_expr(Column::DeliveryCode, Expr::value(code.map(str::to_string)))
        .filter(Column::BatchId.eq(batch_id))
        .exec(conn())
        .await?;
    Ok(result.rows_affected)
}
