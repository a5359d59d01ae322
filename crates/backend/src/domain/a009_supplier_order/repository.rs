use chrono::{DateTime, Utc};
use contracts::domain::a009_supplier_order::aggregate::{
    SupplierOrder, SupplierOrderLine, SupplierOrderStatus,
};
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a009_supplier_order")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub supplier_id: Option<String>,
    pub supplier_name: String,
    /// Order lines as a JSON array
    pub lines_json: String,
    pub total: f64,
    pub status: String,
    pub placed_by: String,
    pub created_at: DateTime<Utc>,
    pub received_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SupplierOrder {
    fn from(m: Model) -> Self {
        let lines: Vec<SupplierOrderLine> = serde_json::from_str(&m.lines_json).unwrap_or_else(|e| {
            tracing::warn!("Supplier order {} has unreadable lines: {}", m.id, e);
            Vec::new()
        });
        SupplierOrder {
            id: m.id,
            supplier_id: m.supplier_id,
            supplier_name: m.supplier_name,
            lines,
            total: m.total,
            status: SupplierOrderStatus::parse(&m.status),
            placed_by: m.placed_by,
            created_at: m.created_at,
            received_at: m.received_at,
        }
    }
}

pub async fn insert<C: ConnectionTrait>(db: &C, order: &SupplierOrder) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(order.id.clone()),
        supplier_id: Set(order.supplier_id.clone()),
        supplier_name: Set(order.supplier_name.clone()),
        lines_json: Set(serde_json::to_string(&order.lines)?),
        total: Set(order.total),
        status: Set(order.status.as_str().to_string()),
        placed_by: Set(order.placed_by.clone()),
        created_at: Set(order.created_at),
        received_at: Set(order.received_at),
    };
    active.insert(db).await?;
    Ok(())
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: &str) -> anyhow::Result<Option<SupplierOrder>> {
    Ok(Entity::find_by_id(id.to_string()).one(db).await?.map(Into::into))
}

/// Newest first
pub async fn list_recent(limit: u64) -> anyhow::Result<Vec<SupplierOrder>> {
    let models = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .limit(limit)
        .all(get_connection())
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

/// Only flips orders still placed; 0 means someone got there first
pub async fn mark_received<C: ConnectionTrait>(db: &C, id: &str, at: DateTime<Utc>) -> anyhow::Result<u64> {
    let result = Entity::update_many()
        .col_expr(Column::Status, Expr::value(SupplierOrderStatus::Received.as_str()))
        .col_expr(Column::ReceivedAt, Expr::value(at))
        .filter(Column::Id.eq(id))
        .filter(Column::Status.eq(SupplierOrderStatus::Placed.as_str()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
