//! Upload validation ahead of EXIF parsing.
//!
//! Checks run in order of cost: the declared filename extension first (no
//! I/O), then the byte size. Size checks never need the content itself, so
//! oversized uploads are rejected before they are buffered.

mod policy;

pub use policy::{
    DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_MAX_UPLOAD_BYTES, UploadPolicy,
    measure_stream,
};

/// An upload that passed validation, held for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}
