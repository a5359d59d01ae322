use super::repository;
use contracts::domain::a002_meal::aggregate::{
    build_ingredients_index, paginate, IngredientsIndex, Meal, MealDto, MealListQuery, MealPage,
};
use contracts::domain::a002_meal::plate_cost::{plate_cost, PlateCost};
use uuid::Uuid;

use crate::domain::a003_stock_item;
use crate::shared::error::ServiceError;

pub async fn create(dto: MealDto) -> anyhow::Result<Uuid> {
    let mut aggregate = Meal::new_for_insert(&dto);

    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();

    let id = repository::insert(&aggregate).await?;
    tracing::info!("Meal '{}' added at {:.2}", aggregate.name(), aggregate.price);
    Ok(id)
}

pub async fn update(dto: MealDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ServiceError::Validation("Invalid meal id".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Meal".into()))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();

    for event in aggregate.base.events.drain() {
        tracing::info!("Meal '{}': {}", aggregate.name(), event);
    }
    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Meal>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Meal>> {
    repository::list_all().await
}

pub async fn list_page(query: &MealListQuery) -> anyhow::Result<MealPage> {
    Ok(paginate(repository::list_all().await?, query))
}

/// Recipe cost from current stock prices
pub async fn cost_of(id: Uuid) -> anyhow::Result<PlateCost> {
    let meal = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Meal".into()))?;
    let stock = a003_stock_item::service::list_all().await?;
    Ok(plate_cost(&meal, &stock))
}

pub async fn ingredients_index() -> anyhow::Result<IngredientsIndex> {
    Ok(build_ingredients_index(&repository::list_all().await?))
}
