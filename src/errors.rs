use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound => AppError::NotFound(e.to_string()),
            DomainError::ConstraintViolation(_) | DomainError::Persistence(_) => {
                AppError::Internal(e.to_string())
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        match self {
            AppError::NotFound(_) => HttpResponse::NotFound().json(body),
            AppError::BadRequest(_) => HttpResponse::BadRequest().json(body),
            AppError::Internal(msg) => {
                log::error!("request failed: {}", msg);
                HttpResponse::InternalServerError().json(body)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    #[test]
    fn not_found_returns_404() {
        let resp = AppError::NotFound("Order not found".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn bad_request_returns_400() {
        let resp = AppError::BadRequest("items: required".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_error_returns_500() {
        let err = AppError::Internal("something went wrong".to_string());
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn error_body_carries_the_message() {
        let resp = AppError::BadRequest("customerName: required".to_string()).error_response();

        let bytes = to_bytes(resp.into_body()).await.expect("readable body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");

        assert_eq!(body, serde_json::json!({ "error": "customerName: required" }));
    }

    #[actix_web::test]
    async fn error_body_is_the_documented_error_response() {
        let resp = AppError::from(DomainError::NotFound).error_response();

        let bytes = to_bytes(resp.into_body()).await.expect("readable body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        let documented = serde_json::to_value(ErrorResponse {
            error: "Order not found".to_string(),
        })
        .expect("serializable");

        assert_eq!(body, documented);
    }

    #[test]
    fn domain_not_found_maps_to_app_not_found() {
        let app_err: AppError = DomainError::NotFound.into();
        assert!(matches!(app_err, AppError::NotFound(_)));
        assert_eq!(app_err.to_string(), "Order not found");
    }

    #[test]
    fn domain_constraint_violation_maps_to_app_internal() {
        let app_err: AppError = DomainError::ConstraintViolation("duplicate key".to_string()).into();
        assert!(matches!(app_err, AppError::Internal(_)));
        assert_eq!(app_err.to_string(), "Constraint violation: duplicate key");
    }

    #[test]
    fn domain_persistence_maps_to_app_internal() {
        let app_err: AppError = DomainError::Persistence("connection refused".to_string()).into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }
}
