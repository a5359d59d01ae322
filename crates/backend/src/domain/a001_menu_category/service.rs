use super::repository;
use contracts::domain::a001_menu_category::aggregate::{
    normalize_category_name, CategoryKind, MenuCategory, MenuCategoryDto,
};
use uuid::Uuid;

use crate::shared::error::ServiceError;

/// Adds a category; names are unique ignoring case and surrounding spaces
pub async fn create(dto: MenuCategoryDto) -> anyhow::Result<Uuid> {
    let existing = repository::list_all().await?;
    let wanted = normalize_category_name(&dto.name);
    if existing.iter().any(|c| c.normalized_name() == wanted) {
        return Err(ServiceError::Conflict(format!("Category '{}' already exists", dto.name.trim())).into());
    }

    let kind = dto
        .kind
        .as_deref()
        .map(CategoryKind::parse)
        .unwrap_or_default();
    let sort_order = dto
        .sort_order
        .unwrap_or_else(|| existing.iter().map(|c| c.sort_order).max().unwrap_or(0) + 1);
    let mut aggregate = MenuCategory::new_for_insert(&dto.name, kind, dto.icon, sort_order);

    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();

    let id = repository::insert(&aggregate).await?;
    tracing::info!("Category '{}' added", aggregate.name());
    Ok(id)
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<MenuCategory>> {
    repository::list_all().await
}
