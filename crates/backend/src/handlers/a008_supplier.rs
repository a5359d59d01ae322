use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a008_supplier::aggregate::{Supplier, SupplierDto};
use serde_json::json;

use crate::domain::a008_supplier;
use crate::shared::error::{ApiResult, ServiceError};

fn parse_id(id: &str) -> Result<uuid::Uuid, ServiceError> {
    uuid::Uuid::parse_str(id).map_err(|_| ServiceError::Validation(format!("Invalid id '{}'", id)))
}

/// GET /api/suppliers
pub async fn list_all() -> ApiResult<Json<Vec<Supplier>>> {
    Ok(Json(a008_supplier::service::list_all().await?))
}

/// POST /api/suppliers
pub async fn create(Json(dto): Json<SupplierDto>) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let id = a008_supplier::service::create(dto).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id.to_string() }))))
}

/// PUT /api/suppliers/:id
pub async fn update(Path(id): Path<String>, Json(dto): Json<SupplierDto>) -> ApiResult<StatusCode> {
    a008_supplier::service::update(parse_id(&id)?, dto).await?;
    Ok(StatusCode::OK)
}

/// DELETE /api/suppliers/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<StatusCode> {
    if a008_supplier::service::delete(parse_id(&id)?).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ServiceError::NotFound("Supplier".into()).into())
    }
}
