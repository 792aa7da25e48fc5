//! Uniform response envelope for API call outcomes.
//!
//! ```text
//! {"success":true,"data":{...},"responseId":"req-..."}
//! {"success":false,"error":{"type":"API_ERROR",...}}
//! ```
//!
//! The `success` flag discriminates the shape; `data` and `error` never
//! appear together.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::AppError;

/// Outcome of an API call, normalised for callers and clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "ApiResponseDto<T>",
    into = "ApiResponseDto<T>",
    bound(
        serialize = "T: Serialize + Clone",
        deserialize = "T: DeserializeOwned"
    )
)]
pub enum ApiResponse<T> {
    /// The call succeeded.
    Success {
        /// Returned payload.
        data: T,
        /// Correlation identifier, when one was assigned.
        response_id: Option<String>,
    },
    /// The call failed.
    Error {
        /// Normalised failure.
        error: AppError,
        /// Correlation identifier, when one was assigned.
        response_id: Option<String>,
    },
}

/// Wrap `data` in a success envelope.
///
/// # Examples
/// ```
/// use invitation::domain::create_success_response;
///
/// let envelope = create_success_response(5);
/// assert!(envelope.is_success());
/// assert_eq!(envelope.data(), Some(&5));
/// ```
pub const fn create_success_response<T>(data: T) -> ApiResponse<T> {
    ApiResponse::Success {
        data,
        response_id: None,
    }
}

/// Wrap `error` in a failure envelope.
pub const fn create_error_response<T>(error: AppError) -> ApiResponse<T> {
    ApiResponse::Error {
        error,
        response_id: None,
    }
}

impl<T> ApiResponse<T> {
    /// Whether this envelope carries data.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Payload of a success envelope.
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Error { .. } => None,
        }
    }

    /// Failure of an error envelope.
    pub const fn error(&self) -> Option<&AppError> {
        match self {
            Self::Success { .. } => None,
            Self::Error { error, .. } => Some(error),
        }
    }

    /// Correlation identifier, if any.
    pub fn response_id(&self) -> Option<&str> {
        match self {
            Self::Success { response_id, .. } | Self::Error { response_id, .. } => {
                response_id.as_deref()
            }
        }
    }

    /// Attach a correlation identifier.
    #[must_use]
    pub fn with_response_id(self, id: Option<String>) -> Self {
        match self {
            Self::Success { data, .. } => Self::Success {
                data,
                response_id: id,
            },
            Self::Error { error, .. } => Self::Error {
                error,
                response_id: id,
            },
        }
    }

    /// Convert into a `Result`, dropping the correlation identifier.
    pub fn into_result(self) -> Result<T, AppError> {
        match self {
            Self::Success { data, .. } => Ok(data),
            Self::Error { error, .. } => Err(error),
        }
    }

    /// Transform the success payload.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        match self {
            Self::Success { data, response_id } => ApiResponse::Success {
                data: f(data),
                response_id,
            },
            Self::Error { error, response_id } => ApiResponse::Error { error, response_id },
        }
    }
}

impl<T> From<Result<T, AppError>> for ApiResponse<T> {
    fn from(value: Result<T, AppError>) -> Self {
        match value {
            Ok(data) => create_success_response(data),
            Err(error) => create_error_response(error),
        }
    }
}

/// Rejected envelope shapes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeValidationError {
    /// `success` was true but `data` was absent, or `error` was present.
    #[error("success envelopes must carry data and no error")]
    InvalidSuccess,
    /// `success` was false but `error` was absent, or `data` was present.
    #[error("error envelopes must carry an error and no data")]
    InvalidError,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponseDto<T> {
    success: bool,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<AppError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response_id: Option<String>,
}

impl<T> From<ApiResponse<T>> for ApiResponseDto<T> {
    fn from(value: ApiResponse<T>) -> Self {
        match value {
            ApiResponse::Success { data, response_id } => Self {
                success: true,
                data: Some(data),
                error: None,
                response_id,
            },
            ApiResponse::Error { error, response_id } => Self {
                success: false,
                data: None,
                error: Some(error),
                response_id,
            },
        }
    }
}

impl<T> TryFrom<ApiResponseDto<T>> for ApiResponse<T> {
    type Error = EnvelopeValidationError;

    fn try_from(value: ApiResponseDto<T>) -> Result<Self, EnvelopeValidationError> {
        match value {
            ApiResponseDto {
                success: true,
                data: Some(data),
                error: None,
                response_id,
            } => Ok(ApiResponse::Success { data, response_id }),
            ApiResponseDto { success: true, .. } => Err(EnvelopeValidationError::InvalidSuccess),
            ApiResponseDto {
                success: false,
                data: None,
                error: Some(error),
                response_id,
            } => Ok(ApiResponse::Error { error, response_id }),
            ApiResponseDto { success: false, .. } => Err(EnvelopeValidationError::InvalidError),
        }
    }
}
