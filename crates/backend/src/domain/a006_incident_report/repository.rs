use chrono::{DateTime, Utc};
use contracts::domain::a006_incident_report::aggregate::IncidentReport;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a006_incident_report")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub order_id: String,
    pub item_name: String,
    pub reason: String,
    pub reported_by: String,
    pub quantity: i32,
    pub redo: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for IncidentReport {
    fn from(m: Model) -> Self {
        IncidentReport {
            id: m.id,
            order_id: m.order_id,
            item_name: m.item_name,
            reason: m.reason,
            reported_by: m.reported_by,
            quantity: m.quantity.max(1) as u32,
            redo: m.redo,
            created_at: m.created_at,
        }
    }
}

pub async fn insert<C: ConnectionTrait>(db: &C, report: &IncidentReport) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(report.id.clone()),
        order_id: Set(report.order_id.clone()),
        item_name: Set(report.item_name.clone()),
        reason: Set(report.reason.clone()),
        reported_by: Set(report.reported_by.clone()),
        quantity: Set(report.quantity as i32),
        redo: Set(report.redo),
        created_at: Set(report.created_at),
    };
    active.insert(db).await?;
    Ok(())
}

/// Newest first
pub async fn list_between(from: DateTime<Utc>, to: DateTime<Utc>) -> anyhow::Result<Vec<IncidentReport>> {
    let models = Entity::find()
        .filter(Column::CreatedAt.gte(from))
        .filter(Column::CreatedAt.lt(to))
        .order_by_desc(Column::CreatedAt)
        .all(get_connection())
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}
