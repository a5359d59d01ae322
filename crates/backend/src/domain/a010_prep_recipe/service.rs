use super::repository;
use contracts::domain::a010_prep_recipe::aggregate::{PrepRecipe, PrepRecipeDto};
use uuid::Uuid;

use crate::shared::error::ServiceError;

pub async fn create(dto: PrepRecipeDto) -> anyhow::Result<Uuid> {
    let mut aggregate = PrepRecipe::new_for_insert(&dto);

    aggregate.validate().map_err(ServiceError::Validation)?;
    if find_by_name(aggregate.name()).await?.is_some() {
        return Err(ServiceError::Conflict(format!("{} already exists", aggregate.name())).into());
    }
    aggregate.before_write();

    let id = repository::insert(&aggregate).await?;
    tracing::info!(
        "Prepped item '{}' added ({} ingredients, keeps {}h)",
        aggregate.name(),
        aggregate.ingredients.len(),
        aggregate.shelf_life_hours
    );
    Ok(id)
}

pub async fn update(id: Uuid, dto: PrepRecipeDto) -> anyhow::Result<()> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Prepped item".into()))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<PrepRecipe>> {
    repository::list_all().await
}

/// Case-insensitive lookup by prepped item name
pub async fn find_by_name(name: &str) -> anyhow::Result<Option<PrepRecipe>> {
    let wanted = name.trim();
    Ok(repository::list_all()
        .await?
        .into_iter()
        .find(|r| r.name().eq_ignore_ascii_case(wanted)))
}
