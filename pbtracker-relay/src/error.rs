use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Everything a chat request can fail with. The display string is exactly
/// what the caller sees; upstream detail stays in the server log.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Message and financial data are required")]
    MissingFields,

    /// Provider rejected our credentials. Reported opaquely so the caller
    /// cannot tell which side misconfigured a key.
    #[error("API authentication failed")]
    UpstreamAuth,

    #[error("Too many requests. Please try again in a moment.")]
    RateLimited,

    #[error("Request timeout. Please try again.")]
    Timeout,

    #[error("An error occurred while processing your request.")]
    Upstream { detail: String },
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingFields => StatusCode::BAD_REQUEST,
            RelayError::UpstreamAuth => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            RelayError::Timeout => StatusCode::REQUEST_TIMEOUT,
            RelayError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string(),
            "success": false,
        }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(RelayError::MissingFields.status(), StatusCode::BAD_REQUEST);
        assert_eq!(RelayError::UpstreamAuth.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(RelayError::RateLimited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(RelayError::Timeout.status(), StatusCode::REQUEST_TIMEOUT);
        let upstream = RelayError::Upstream { detail: "502 bad gateway".to_string() };
        assert_eq!(upstream.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_upstream_detail_never_reaches_the_caller() {
        let err = RelayError::Upstream { detail: "secret internals".to_string() };
        assert!(!err.to_string().contains("secret"));
    }
}
