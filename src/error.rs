//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::diarias::responses::DiariasErrorResponse;
use crate::diarias::DiariasError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Diarias(#[from] DiariasError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Diarias(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Diarias(e) => {
                tracing::warn!("Rejected itinerary: {}", e);
                DiariasErrorResponse {
                    error_type: e.error_type().to_string(),
                    message: e.to_string(),
                }
            }
            AppError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                DiariasErrorResponse {
                    error_type: "bad_request".to_string(),
                    message: msg.clone(),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::from(DiariasError::EmptyItinerary).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::BadRequest("invalid date".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::from(DiariasError::MissingTariffClass { index: 1 }).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bad_request_body() {
        let response = AppError::BadRequest("invalid date '10/03/2026'".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error_type"], "bad_request");
        assert_eq!(json["message"], "invalid date '10/03/2026'");
    }
}
