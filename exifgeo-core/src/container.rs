//! Container sniffing ahead of EXIF parsing.
//!
//! The EXIF reader accepts several container formats (JPEG, PNG, TIFF,
//! HEIF, WebP). Uploads are restricted to JPEG, so the start-of-image
//! signature is checked before the bytes are handed to the reader.

use tracing::debug;

/// JPEG start-of-image marker followed by the first marker prefix.
const JPEG_SIGNATURE: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Why a buffer was not accepted as a JPEG container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Buffer is too small to contain a JPEG header
    TooSmall,
    /// Buffer does not start with the JPEG signature
    NotJpeg,
}

/// Check the JPEG magic bytes at the start of `data`.
pub fn validate_jpeg_signature(data: &[u8]) -> Result<(), InvalidReason> {
    if data.len() < JPEG_SIGNATURE.len() {
        return Err(InvalidReason::TooSmall);
    }

    if data[..JPEG_SIGNATURE.len()] == JPEG_SIGNATURE {
        return Ok(());
    }

    debug!(
        "Rejected non-JPEG upload, first 8 bytes: {:02X?}",
        &data[..8.min(data.len())]
    );
    Err(InvalidReason::NotJpeg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_jpeg_magic() {
        let jpeg_header = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        assert_eq!(validate_jpeg_signature(&jpeg_header), Ok(()));
    }

    #[test]
    fn test_accepts_bare_signature() {
        assert_eq!(validate_jpeg_signature(&[0xFF, 0xD8, 0xFF]), Ok(()));
    }

    #[test]
    fn test_rejects_png_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(
            validate_jpeg_signature(&png_header),
            Err(InvalidReason::NotJpeg)
        );
    }

    #[test]
    fn test_rejects_too_small() {
        assert_eq!(
            validate_jpeg_signature(&[0xFF, 0xD8]),
            Err(InvalidReason::TooSmall)
        );
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(validate_jpeg_signature(&[]), Err(InvalidReason::TooSmall));
    }
}
