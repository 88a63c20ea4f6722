//! # exifgeo core
//!
//! Upload validation and EXIF GPS extraction for the exifgeo service.
//!
//! ## Overview
//!
//! The crate provides the two pieces the `/upload` endpoint is built from:
//!
//! - **Upload validation**: [`upload::UploadPolicy`] checks the declared
//!   filename extension and the byte size of an upload before its content is
//!   buffered.
//! - **GPS extraction**: [`gps::extract_gps`] parses the EXIF container of a
//!   JPEG, decodes the four GPS location fields and converts them to signed
//!   decimal degrees.
//!
//! Both are pure with respect to cross-request state and can be called
//! concurrently on disjoint inputs.
//!
//! ## Feature Flags
//!
//! - `test-utils`: exposes [`testing::ExifJpegBuilder`], a synthetic EXIF
//!   JPEG builder used by integration tests.
//!
//! ## Examples
//!
//! ```no_run
//! use exifgeo_core::{gps::extract_gps, upload::UploadPolicy};
//!
//! fn locate(name: &str, bytes: &[u8]) -> Result<String, Box<dyn std::error::Error>> {
//!     UploadPolicy::default().validate(Some(name), bytes.len() as u64)?;
//!     let result = extract_gps(bytes)?;
//!     Ok(result.map_link)
//! }
//! ```

pub mod api;
pub mod container;
pub mod error;
pub mod gps;
pub mod upload;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use error::{ExtractError, FieldError, ValidationError};
pub use gps::{
    CoordinateRef, DmsValue, GpsResult, RationalPair, dms_to_decimal,
    extract_gps,
};
pub use upload::{UploadPolicy, UploadedImage};
