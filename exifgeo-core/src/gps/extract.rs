use std::io::Cursor;

use tracing::debug;

use crate::container::validate_jpeg_signature;
use crate::error::ExtractError;

use super::convert::{dms_to_decimal, map_link};
use super::tags::GpsTags;
use super::types::{GpsField, GpsResult};

/// Decode the GPS position embedded in a JPEG's EXIF metadata.
///
/// Runs in a single pass over `bytes` and holds no state between calls.
pub fn extract_gps(bytes: &[u8]) -> Result<GpsResult, ExtractError> {
    validate_jpeg_signature(bytes)
        .map_err(|_| ExtractError::InvalidImage { source: None })?;

    let exif = exif::Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .map_err(ExtractError::invalid_image)?;

    let resolved = GpsTags::from_exif(&exif)?.resolve()?;

    let latitude = dms_to_decimal(
        GpsField::Latitude,
        &resolved.latitude,
        resolved.latitude_ref,
    )?;
    let longitude = dms_to_decimal(
        GpsField::Longitude,
        &resolved.longitude,
        resolved.longitude_ref,
    )?;

    debug!(
        latitude,
        longitude,
        latitude_ref = %resolved.latitude_ref,
        longitude_ref = %resolved.longitude_ref,
        "decoded GPS position"
    );

    Ok(GpsResult {
        latitude,
        longitude,
        map_link: map_link(latitude, longitude),
    })
}
