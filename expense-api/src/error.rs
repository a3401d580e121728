use serde::{Deserialize, Serialize};
use tower_api_client::{Error as ApiError, StatusCode};

#[derive(Debug)]
pub enum ExpenseApiError {
    Backend(StatusCode, String),
    Internal(ApiError),
}

impl From<ApiError> for ExpenseApiError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::ClientError(status, detail) | ApiError::ServerError(status, detail) => {
                // Firebase wraps failures as {"error": "..."}; anything else is passed through raw
                let message = serde_json::from_str::<ErrorResponse>(&detail)
                    .map(|response| response.error)
                    .unwrap_or(detail);
                ExpenseApiError::Backend(status, message)
            }
            e => ExpenseApiError::Internal(e),
        }
    }
}

impl std::fmt::Display for ExpenseApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpenseApiError::Internal(e) => write!(f, "Internal error: {}", e),
            ExpenseApiError::Backend(status, message) => write!(f, "({}) {}", status, message),
        }
    }
}

impl std::error::Error for ExpenseApiError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
