use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use geoprompt_core::GeopromptError;
use serde::Serialize;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            details: None,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<GeopromptError> for ApiError {
    fn from(err: GeopromptError) -> Self {
        match &err {
            e if e.is_fatal() => {
                Self::unavailable("Dataset engine is not available").with_details(err.to_string())
            }
            GeopromptError::UnknownDataset { .. } => {
                Self::not_found("Unknown dataset").with_details(err.to_string())
            }
            GeopromptError::Export(_) => Self::bad_request("Export failed").with_details(err.to_string()),
            GeopromptError::QueryExecution(_) => {
                Self::bad_request("Query failed").with_details(err.to_string())
            }
            _ => Self::internal("Internal error").with_details(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let setup = ApiError::from(GeopromptError::EngineSetup { reason: "bad magic".to_string() });
        assert_eq!(setup.status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(setup.details.unwrap().contains("bad magic"));

        let unknown = ApiError::from(GeopromptError::UnknownDataset { name: "rivers".to_string() });
        assert_eq!(unknown.status, StatusCode::NOT_FOUND);

        let export = ApiError::from(GeopromptError::Export("Unknown export format".to_string()));
        assert_eq!(export.status, StatusCode::BAD_REQUEST);
    }
}
