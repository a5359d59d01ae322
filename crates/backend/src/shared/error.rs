use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Domain failures a handler can report precisely
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Kitchen is paused and not taking remote orders")]
    KitchenPaused,
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::KitchenPaused => StatusCode::LOCKED,
        }
    }
}

/// Handler error: service errors keep their status and message, anything
/// else is logged and answered with 500.
#[derive(Debug)]
pub struct ApiError(pub anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for ApiError {
    fn from(err: E) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0.downcast_ref::<ServiceError>() {
            Some(err) => (err.status(), err.to_string()).into_response(),
            None => {
                tracing::error!("Request failed: {:#}", self.0);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let paused: ApiError = anyhow::Error::new(ServiceError::KitchenPaused).into();
        assert_eq!(paused.into_response().status(), StatusCode::LOCKED);

        let missing = ApiError::from(ServiceError::NotFound("Meal".into()));
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let other = ApiError(anyhow::anyhow!("disk on fire"));
        assert_eq!(other.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
