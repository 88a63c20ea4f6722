//! # exifgeo server
//!
//! HTTP front end for [`exifgeo_core`]: a single `POST /upload` endpoint that
//! accepts a JPEG as multipart field `file` and answers with the decimal GPS
//! position found in its EXIF metadata.
//!
//! Failures are rendered as `{"detail": "<message>"}` with a status that
//! reflects the kind of failure (400 for bad input, 404 for missing GPS
//! data, 413 for oversized uploads, 500 for malformed metadata).

pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;
pub use routes::create_app;
