use thiserror::Error;

use crate::gps::{DmsComponent, GpsField};

/// Rejections raised before an upload's content is read.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid file type. Only {allowed} files are allowed.")]
    UnsupportedType { allowed: String },

    #[error(
        "File too large. Maximum size is {}MB.",
        format_megabytes(.limit)
    )]
    TooLarge { limit: u64 },

    #[error("Failed to inspect uploaded file: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while decoding GPS coordinates from image bytes.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid or corrupted image file. Could not read EXIF data.")]
    InvalidImage {
        #[source]
        source: Option<exif::Error>,
    },

    #[error("No GPS data found in the image's EXIF metadata.")]
    NoGpsData,

    #[error(
        "Incomplete GPS data. Latitude or Longitude tags are missing."
    )]
    IncompleteGpsData,

    #[error(
        "An unexpected error occurred while parsing EXIF data: \
         {field} {component} has a zero denominator"
    )]
    MalformedRational {
        field: GpsField,
        component: DmsComponent,
    },

    #[error(
        "An unexpected error occurred while parsing EXIF data: {source}"
    )]
    MalformedExifData {
        #[source]
        source: FieldError,
    },
}

impl ExtractError {
    pub(crate) fn invalid_image(source: exif::Error) -> Self {
        Self::InvalidImage {
            source: Some(source),
        }
    }
}

impl From<FieldError> for ExtractError {
    fn from(source: FieldError) -> Self {
        Self::MalformedExifData { source }
    }
}

/// A GPS field that is present but cannot be read as the expected type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{field} has unexpected type {found}")]
    UnexpectedType { field: GpsField, found: &'static str },

    #[error("{field} has {found} components, expected 3")]
    ComponentCount { field: GpsField, found: usize },

    #[error("{field} has unrecognized reference {value:?}")]
    UnrecognizedRef { field: GpsField, value: String },
}

/// Renders a byte count in MiB, always with at least one decimal place.
fn format_megabytes(bytes: &u64) -> String {
    let mb = *bytes as f64 / 1024.0 / 1024.0;
    if mb.fract() == 0.0 {
        format!("{mb:.1}")
    } else {
        format!("{mb}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_large_message_names_limit_in_megabytes() {
        let err = ValidationError::TooLarge {
            limit: 5 * 1024 * 1024,
        };
        assert_eq!(err.to_string(), "File too large. Maximum size is 5.0MB.");

        let err = ValidationError::TooLarge {
            limit: 1024 * 1024 + 512 * 1024,
        };
        assert_eq!(err.to_string(), "File too large. Maximum size is 1.5MB.");
    }

    #[test]
    fn malformed_data_message_includes_cause() {
        let err = ExtractError::from(FieldError::ComponentCount {
            field: GpsField::Longitude,
            found: 2,
        });
        assert_eq!(
            err.to_string(),
            "An unexpected error occurred while parsing EXIF data: \
             GPSLongitude has 2 components, expected 3"
        );
    }

    #[test]
    fn zero_denominator_message_names_component() {
        let err = ExtractError::MalformedRational {
            field: GpsField::Latitude,
            component: DmsComponent::Seconds,
        };
        assert!(err.to_string().ends_with("GPSLatitude seconds has a zero denominator"));
    }
}
