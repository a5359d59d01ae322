use chrono::Utc;
use contracts::domain::a008_supplier::aggregate::{Supplier, SupplierId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a008_supplier")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub website: String,
    pub phone: String,
    pub contact_name: String,
    /// JSON array of day names
    pub delivery_days_json: String,
    /// JSON array of stock ingredient names
    pub supplies_json: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn string_list(id: &str, column: &str, json: &str) -> Vec<String> {
    serde_json::from_str(json).unwrap_or_else(|e| {
        tracing::warn!("Supplier {} has unreadable {}: {}", id, column, e);
        Vec::new()
    })
}

impl From<Model> for Supplier {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let delivery_days = string_list(&m.id, "delivery days", &m.delivery_days_json);
        let supplies = string_list(&m.id, "supplies", &m.supplies_json);

        Supplier {
            base: BaseAggregate::with_metadata(
                SupplierId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            website: m.website,
            phone: m.phone,
            contact_name: m.contact_name,
            delivery_days,
            supplies,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn active_model(aggregate: &Supplier) -> anyhow::Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        website: Set(aggregate.website.clone()),
        phone: Set(aggregate.phone.clone()),
        contact_name: Set(aggregate.contact_name.clone()),
        delivery_days_json: Set(serde_json::to_string(&aggregate.delivery_days)?),
        supplies_json: Set(serde_json::to_string(&aggregate.supplies)?),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    })
}

pub async fn list_all() -> anyhow::Result<Vec<Supplier>> {
    let mut items: Vec<Supplier> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by_key(|s| s.name().to_lowercase());
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Supplier>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Supplier) -> anyhow::Result<Uuid> {
    active_model(aggregate)?.insert(conn()).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update(aggregate: &Supplier) -> anyhow::Result<()> {
    let mut active = active_model(aggregate)?;
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
