use axum::response::{IntoResponse, Response};
use axum::Json;
use hyper::StatusCode;
use serde::Serialize;

use crate::structs::sorting_and_order_arguments::FieldConstraintViolation;

pub struct AppError {
    status_code: StatusCode,
    message: Option<&'static str>,
    violations: Vec<FieldConstraintViolation>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    violations: &'a [FieldConstraintViolation],
}

impl AppError {
    pub fn new(status_code: StatusCode, message: Option<&'static str>) -> Self {
        Self {
            status_code,
            message,
            violations: Vec::new(),
        }
    }

    /// Rejects the whole request, carrying every violation that was found
    pub fn validation_error(violations: Vec<FieldConstraintViolation>) -> Self {
        Self {
            status_code: StatusCode::BAD_REQUEST,
            message: Some("Invalid query arguments."),
            violations,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let Some(message) = self.message else {
            return self.status_code.into_response();
        };

        if self.violations.is_empty() {
            return (self.status_code, message).into_response();
        }

        let body = ErrorBody {
            message,
            violations: &self.violations,
        };

        (self.status_code, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::sorting_and_order_arguments::ConstraintKind;

    #[tokio::test]
    async fn bare_error_has_empty_body() {
        let response = AppError::new(StatusCode::INTERNAL_SERVER_ERROR, None).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn validation_error_lists_violations_as_json() {
        let error = AppError::validation_error(vec![FieldConstraintViolation::new(
            "offset",
            ConstraintKind::Range,
            "must be greater than or equal to 0",
            "-1",
        )]);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["violations"][0]["field"], "offset");
        assert_eq!(json["violations"][0]["constraint"], "range");
        assert_eq!(json["violations"][0]["rejected_value"], "-1");
    }
}
