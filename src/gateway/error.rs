//! Error type for the gateway HTTP layer.
//!
//! These are transport failures only. Policy rejections from the core are
//! ordinary accepted/rejected results and never appear here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Missing, stale, or mismatched request signature.
    #[error("unauthorized")]
    Unauthorized,

    /// The request body could not be read or parsed.
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
