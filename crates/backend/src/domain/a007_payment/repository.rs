use chrono::{DateTime, Utc};
use contracts::domain::a007_payment::aggregate::{Payment, PaymentKind, PaymentMethod};
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a007_payment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub table_number: Option<String>,
    pub amount: f64,
    pub method: String,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Payment {
    fn from(m: Model) -> Self {
        Payment {
            id: m.id,
            table_number: m.table_number,
            amount: m.amount,
            method: PaymentMethod::parse(&m.method).unwrap_or_default(),
            kind: PaymentKind::parse(&m.kind).unwrap_or(PaymentKind::Full),
            created_at: m.created_at,
        }
    }
}

pub async fn insert<C: ConnectionTrait>(db: &C, payment: &Payment) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(payment.id.clone()),
        table_number: Set(payment.table_number.clone()),
        amount: Set(payment.amount),
        method: Set(payment.method.as_str().to_string()),
        kind: Set(payment.kind.as_str().to_string()),
        created_at: Set(payment.created_at),
    };
    active.insert(db).await?;
    Ok(())
}

/// Payments taken in `[from, to)`
pub async fn list_between(from: DateTime<Utc>, to: DateTime<Utc>) -> anyhow::Result<Vec<Payment>> {
    let models = Entity::find()
        .filter(Column::CreatedAt.gte(from))
        .filter(Column::CreatedAt.lt(to))
        .order_by_asc(Column::CreatedAt)
        .all(get_connection())
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

/// Share payments recorded for a table since `since`
pub async fn list_shares_since<C: ConnectionTrait>(
    db: &C,
    table: &str,
    since: DateTime<Utc>,
) -> anyhow::Result<Vec<Payment>> {
    let models = Entity::find()
        .filter(Column::TableNumber.eq(table.trim()))
        .filter(Column::Kind.eq(PaymentKind::Share.as_str()))
        .filter(Column::CreatedAt.gte(since))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

/// Re-keys share payments taken since `since` to the table the bill moved to
pub async fn move_shares<C: ConnectionTrait>(
    db: &C,
    old_table: &str,
    new_table: &str,
    since: DateTime<Utc>,
) -> anyhow::Result<u64> {
    let result = Entity::update_many()
        .col_expr(Column::TableNumber, Expr::value(new_table.trim()))
        .filter(Column::TableNumber.eq(old_table.trim()))
        .filter(Column::Kind.eq(PaymentKind::Share.as_str()))
        .filter(Column::CreatedAt.gte(since))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
