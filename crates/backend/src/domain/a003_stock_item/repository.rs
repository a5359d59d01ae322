use chrono::{NaiveDate, Utc};
use contracts::domain::a003_stock_item::aggregate::{StockItem, StockItemId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_stock_item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub quantity: f64,
    pub unit: String,
    pub price: f64,
    pub calories_per_100g: Option<f64>,
    pub allergens: String,
    pub minimum_level: f64,
    pub expiry_date: Option<NaiveDate>,
    pub is_prepped: bool,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for StockItem {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        StockItem {
            base: BaseAggregate::with_metadata(
                StockItemId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            quantity: m.quantity,
            unit: m.unit,
            price: m.price,
            calories_per_100g: m.calories_per_100g,
            allergens: m.allergens,
            minimum_level: m.minimum_level,
            expiry_date: m.expiry_date,
            is_prepped: m.is_prepped,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn active_model(aggregate: &StockItem) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        quantity: Set(aggregate.quantity),
        unit: Set(aggregate.unit.clone()),
        price: Set(aggregate.price),
        calories_per_100g: Set(aggregate.calories_per_100g),
        allergens: Set(aggregate.allergens.clone()),
        minimum_level: Set(aggregate.minimum_level),
        expiry_date: Set(aggregate.expiry_date),
        is_prepped: Set(aggregate.is_prepped),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

/// Alphabetical by ingredient
pub async fn list_all() -> anyhow::Result<Vec<StockItem>> {
    list_all_in(conn()).await
}

pub async fn list_all_in<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<StockItem>> {
    let mut items: Vec<StockItem> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by_key(|s| s.ingredient().to_lowercase());
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<StockItem>> {
    get_by_id_in(conn(), id).await
}

pub async fn get_by_id_in<C: ConnectionTrait>(db: &C, id: Uuid) -> anyhow::Result<Option<StockItem>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(db)
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &StockItem) -> anyhow::Result<Uuid> {
    insert_in(conn(), aggregate).await
}

pub async fn insert_in<C: ConnectionTrait>(db: &C, aggregate: &StockItem) -> anyhow::Result<Uuid> {
    active_model(aggregate).insert(db).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update(aggregate: &StockItem) -> anyhow::Result<()> {
    update_in(conn(), aggregate).await
}

pub async fn update_in<C: ConnectionTrait>(db: &C, aggregate: &StockItem) -> anyhow::Result<()> {
    let mut active = active_model(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(db).await?;
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

/// Soft-deletes every item that expired before `today`
pub async fn soft_delete_expired(today: NaiveDate) -> anyhow::Result<u64> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::ExpiryDate.lt(today))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected)
}
