use chrono::Utc;
use contracts::domain::a002_meal::aggregate::{Meal, MealId, MealIngredient};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_meal")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub price: f64,
    pub category: String,
    pub allergens: String,
    pub calories: Option<i32>,
    /// Recipe lines as a JSON array of `{ingredient, quantity}`
    pub ingredients_json: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Meal {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let ingredients: Vec<MealIngredient> = serde_json::from_str(&m.ingredients_json)
            .unwrap_or_else(|e| {
                tracing::warn!("Meal {} has unreadable ingredients: {}", m.id, e);
                Vec::new()
            });

        Meal {
            base: BaseAggregate::with_metadata(
                MealId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            price: m.price,
            category: m.category,
            allergens: m.allergens,
            calories: m.calories,
            ingredients,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn active_model(aggregate: &Meal) -> anyhow::Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        price: Set(aggregate.price),
        category: Set(aggregate.category.clone()),
        allergens: Set(aggregate.allergens.clone()),
        calories: Set(aggregate.calories),
        ingredients_json: Set(serde_json::to_string(&aggregate.ingredients)?),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    })
}

pub async fn list_all() -> anyhow::Result<Vec<Meal>> {
    let mut items: Vec<Meal> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by_key(|m| m.name().to_lowercase());
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Meal>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Meal) -> anyhow::Result<Uuid> {
    active_model(aggregate)?.insert(conn()).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update(aggregate: &Meal) -> anyhow::Result<()> {
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
