use axum::extract::{Json, Path};
use axum::http::StatusCode;
use contracts::system::users::{CreateUserDto, User};
use serde_json::json;

use crate::shared::error::{ApiResult, ServiceError};
use crate::system::auth::extractor::CurrentUser;
use crate::system::users::service;

/// GET /api/system/users
pub async fn list() -> ApiResult<Json<Vec<User>>> {
    Ok(Json(service::list_all().await?))
}

/// POST /api/system/users
pub async fn create(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<CreateUserDto>,
) -> ApiResult<Json<serde_json::Value>> {
    let id = service::create(dto).await?;
    tracing::info!("User {} created by {}", id, claims.username);
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/system/users/:id
pub async fn delete(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if claims.sub == id {
        return Err(ServiceError::Conflict("You cannot delete your own account".into()).into());
    }
    if service::delete(&id).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ServiceError::NotFound("User".into()).into())
    }
}
