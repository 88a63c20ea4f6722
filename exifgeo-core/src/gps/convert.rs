use crate::error::ExtractError;

use super::types::{CoordinateRef, DmsComponent, DmsValue, GpsField};

pub const MAP_LINK_BASE: &str = "https://www.google.com/maps?q=";

/// Convert a DMS magnitude and its hemisphere reference to signed decimal
/// degrees.
///
/// Every rational is divided in floating point; a zero denominator yields
/// [`ExtractError::MalformedRational`] attributed to `field`. The result is
/// not clamped to the latitude/longitude range.
pub fn dms_to_decimal(
    field: GpsField,
    dms: &DmsValue,
    reference: CoordinateRef,
) -> Result<f64, ExtractError> {
    let mut parts = [0.0_f64; 3];
    for (slot, (component, rational)) in
        parts.iter_mut().zip(dms.components())
    {
        *slot = rational.to_f64().ok_or(ExtractError::MalformedRational {
            field,
            component,
        })?;
    }
    let [degrees, minutes, seconds] = parts;

    let decimal = degrees + minutes / 60.0 + seconds / 3600.0;
    Ok(if reference.is_negative() {
        -decimal
    } else {
        decimal
    })
}

/// Google Maps link for a coordinate pair.
///
/// `f64`'s `Display` never switches to exponent notation, so the query
/// string always carries plain decimals.
pub fn map_link(latitude: f64, longitude: f64) -> String {
    format!("{MAP_LINK_BASE}{latitude},{longitude}")
}
