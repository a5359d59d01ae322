use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a004_dining_table::aggregate::{DiningTable, TableStatusDto, TableTotal};

use crate::domain::a004_dining_table;
use crate::shared::error::{ApiResult, ServiceError};

fn parse_id(id: &str) -> Result<uuid::Uuid, ServiceError> {
    uuid::Uuid::parse_str(id).map_err(|_| ServiceError::Validation(format!("Invalid id '{}'", id)))
}

/// GET /api/tables
pub async fn list_all() -> ApiResult<Json<Vec<DiningTable>>> {
    Ok(Json(a004_dining_table::service::list_all().await?))
}

/// POST /api/tables/:id/status
pub async fn set_status(Path(id): Path<String>, Json(dto): Json<TableStatusDto>) -> ApiResult<StatusCode> {
    a004_dining_table::service::set_status(parse_id(&id)?, dto.status).await?;
    Ok(StatusCode::OK)
}

/// GET /api/tables/:id/total
pub async fn total(Path(id): Path<String>) -> ApiResult<Json<TableTotal>> {
    Ok(Json(a004_dining_table::service::total(parse_id(&id)?).await?))
}
