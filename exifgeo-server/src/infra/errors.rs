use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use tracing::{debug, error};

use exifgeo_core::{ExtractError, UploadPolicy, ValidationError};

pub type AppResult<T> = Result<T, AppError>;

/// Error returned from handlers, rendered as `{"detail": message}`.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, message)
    }

    /// Map a failure while reading the multipart body. Bodies cut off by
    /// the request size limit are reported like any other oversized upload.
    pub fn from_multipart(err: MultipartError, policy: &UploadPolicy) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ValidationError::TooLarge {
                limit: policy.max_bytes(),
            }
            .into();
        }
        debug!(error = %err, "malformed multipart body");
        Self::bad_request(format!("Invalid multipart upload: {}", err.body_text()))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "detail": self.message }));

        (self.status, body).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::UnsupportedType { .. } => {
                Self::bad_request(err.to_string())
            }
            ValidationError::TooLarge { .. } => {
                Self::payload_too_large(err.to_string())
            }
            ValidationError::Io(ref source) => {
                error!(error = ?source, "failed to inspect upload");
                Self::internal(err.to_string())
            }
        }
    }
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::InvalidImage { .. } => {
                debug!(error = ?err, "upload is not a readable EXIF image");
                Self::bad_request(err.to_string())
            }
            ExtractError::NoGpsData | ExtractError::IncompleteGpsData => {
                Self::not_found(err.to_string())
            }
            ExtractError::MalformedRational { .. }
            | ExtractError::MalformedExifData { .. } => {
                error!(error = %err, "malformed GPS metadata");
                Self::internal(err.to_string())
            }
        }
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::new(
            rejection.status(),
            format!("Invalid multipart upload: {}", rejection.body_text()),
        )
    }
}

#[cfg(test)]
mod tests {
    use exifgeo_core::{FieldError, gps::GpsField};

    use super::*;

    #[test]
    fn validation_errors_map_to_client_statuses() {
        let err = AppError::from(ValidationError::UnsupportedType {
            allowed: ".jpg, .jpeg".into(),
        });
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = AppError::from(ValidationError::TooLarge { limit: 5 << 20 });
        assert_eq!(err.status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.message, "File too large. Maximum size is 5.0MB.");
    }

    #[test]
    fn extraction_errors_map_by_kind() {
        let cases = [
            (
                ExtractError::InvalidImage { source: None },
                StatusCode::BAD_REQUEST,
            ),
            (ExtractError::NoGpsData, StatusCode::NOT_FOUND),
            (ExtractError::IncompleteGpsData, StatusCode::NOT_FOUND),
            (
                ExtractError::from(FieldError::ComponentCount {
                    field: GpsField::Latitude,
                    found: 1,
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status, expected);
        }
    }
}
