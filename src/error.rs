use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// ApiError
///
/// The application's error taxonomy. Every failure that crosses the HTTP
/// boundary is one of these variants; nothing is retried or recovered below
/// this layer. The service performs exactly one recovery-like action —
/// translating an absent row into `NotFound` — and everything else simply
/// propagates here via `?`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field failed request-boundary validation (400).
    #[error("{0}")]
    Validation(&'static str),

    /// No row for the requested id (404). Carries the fixed message.
    #[error("{0}")]
    NotFound(&'static str),

    /// Missing or invalid credentials (401).
    #[error("unauthenticated")]
    Unauthenticated,

    /// Authenticated but the role does not permit the operation (403).
    #[error("forbidden")]
    Forbidden,

    /// Any storage-layer failure, including constraint violations from
    /// batch elements that bypass request-level validation (500).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    /// Maps the taxonomy onto HTTP. Client errors carry their message in the
    /// body; a 500 exposes nothing beyond the status code, with the
    /// underlying cause going to the log instead. A 401 additionally carries
    /// the Basic challenge so browsers and curl can prompt for credentials.
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            ApiError::Validation(msg) | ApiError::NotFound(msg) => {
                json!({ "status": status.as_u16(), "error": msg })
            }
            ApiError::Database(e) => {
                tracing::error!("storage failure: {:?}", e);
                json!({ "status": status.as_u16() })
            }
            _ => json!({ "status": status.as_u16() }),
        };

        if matches!(self, ApiError::Unauthenticated) {
            return (
                status,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"planets\"")],
                Json(body),
            )
                .into_response();
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_matches_taxonomy() {
        assert_eq!(
            ApiError::Validation("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("Planet not found").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::Database(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unauthenticated_response_carries_basic_challenge() {
        let response = ApiError::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let challenge = response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .expect("missing challenge header");
        assert!(challenge.to_str().unwrap().starts_with("Basic"));
    }
}
