use super::repository;
use contracts::domain::a008_supplier::aggregate::{Supplier, SupplierDto};
use uuid::Uuid;

use crate::shared::error::ServiceError;

pub async fn create(dto: SupplierDto) -> anyhow::Result<Uuid> {
    let mut aggregate = Supplier::new_for_insert(&dto);

    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();

    let id = repository::insert(&aggregate).await?;
    tracing::info!(
        "Supplier '{}' added, delivers {}",
        aggregate.name(),
        if aggregate.delivery_days.is_empty() {
            "on request".to_string()
        } else {
            aggregate.delivery_days.join(", ")
        }
    );
    Ok(id)
}

pub async fn update(id: Uuid, dto: SupplierDto) -> anyhow::Result<()> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Supplier".into()))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Supplier>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Supplier>> {
    repository::list_all().await
}
