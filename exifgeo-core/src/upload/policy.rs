use std::io::{self, Seek, SeekFrom};

use tracing::debug;

use crate::error::ValidationError;

/// 5 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 2] = [".jpg", ".jpeg"];

/// Extension allow-list and size ceiling applied to every upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    allowed_extensions: Vec<String>,
    max_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_MAX_UPLOAD_BYTES)
    }
}

impl UploadPolicy {
    /// Extensions are normalized to lowercase with a leading dot.
    pub fn new<I, S>(allowed_extensions: I, max_bytes: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for extension in allowed_extensions {
            let extension = normalize_extension(extension.as_ref());
            if !extension.is_empty() && !normalized.contains(&extension) {
                normalized.push(extension);
            }
        }

        Self {
            allowed_extensions: normalized,
            max_bytes,
        }
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Run both checks, extension first.
    pub fn validate(
        &self,
        filename: Option<&str>,
        size_bytes: u64,
    ) -> Result<(), ValidationError> {
        self.check_extension(filename)?;
        self.check_size(size_bytes)
    }

    pub fn check_extension(
        &self,
        filename: Option<&str>,
    ) -> Result<(), ValidationError> {
        let accepted = filename
            .map(str::to_lowercase)
            .is_some_and(|name| {
                self.allowed_extensions
                    .iter()
                    .any(|extension| name.ends_with(extension.as_str()))
            });

        if accepted {
            Ok(())
        } else {
            debug!(filename = ?filename, "rejected upload extension");
            Err(ValidationError::UnsupportedType {
                allowed: self.allowed_extensions.join(", "),
            })
        }
    }

    pub fn check_size(&self, size_bytes: u64) -> Result<(), ValidationError> {
        if size_bytes > self.max_bytes {
            return Err(ValidationError::TooLarge {
                limit: self.max_bytes,
            });
        }
        Ok(())
    }

    /// Validate a seekable upload without reading its content.
    ///
    /// Returns the measured size; `reader` is left at offset 0 for the
    /// subsequent full read.
    pub fn validate_stream<R: Seek>(
        &self,
        filename: Option<&str>,
        reader: &mut R,
    ) -> Result<u64, ValidationError> {
        self.check_extension(filename)?;
        let size = measure_stream(reader)?;
        self.check_size(size)?;
        Ok(size)
    }
}

/// Length of a seekable stream, measured by seeking to its end.
///
/// The position is reset to the start afterwards.
pub fn measure_stream<R: Seek>(reader: &mut R) -> io::Result<u64> {
    let size = reader.seek(SeekFrom::End(0))?;
    reader.rewind()?;
    Ok(size)
}

pub(crate) fn normalize_extension(raw: &str) -> String {
    let trimmed = raw.trim().to_lowercase();
    if trimmed.is_empty() || trimmed.starts_with('.') {
        trimmed
    } else {
        format!(".{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use super::*;

    #[test]
    fn accepts_jpeg_extensions_case_insensitively() {
        let policy = UploadPolicy::default();
        for name in ["a.jpg", "b.JPG", "c.jpeg", "d.JPEG", "e.JpEg", ".jpg"] {
            assert!(policy.check_extension(Some(name)).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_other_or_missing_extensions() {
        let policy = UploadPolicy::default();
        for name in [
            "photo.png",
            "photo.jpg.png",
            "photo",
            "photojpg",
            "photo.jpe",
            "photo.gif",
            "",
        ] {
            assert!(
                matches!(
                    policy.check_extension(Some(name)),
                    Err(ValidationError::UnsupportedType { .. })
                ),
                "{name}"
            );
        }
        assert!(matches!(
            policy.check_extension(None),
            Err(ValidationError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn unsupported_type_message_lists_extensions() {
        let err = UploadPolicy::default()
            .check_extension(Some("x.bmp"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid file type. Only .jpg, .jpeg files are allowed."
        );
    }

    #[test]
    fn size_ceiling_is_inclusive() {
        let policy = UploadPolicy::default();
        assert!(policy.check_size(0).is_ok());
        assert!(policy.check_size(DEFAULT_MAX_UPLOAD_BYTES).is_ok());
        for size in [
            DEFAULT_MAX_UPLOAD_BYTES + 1,
            6 * 1024 * 1024,
            u64::MAX,
        ] {
            assert!(matches!(
                policy.check_size(size),
                Err(ValidationError::TooLarge {
                    limit: DEFAULT_MAX_UPLOAD_BYTES
                })
            ));
        }
    }

    #[test]
    fn extension_is_checked_before_size() {
        let policy = UploadPolicy::default();
        let err = policy
            .validate(Some("huge.png"), DEFAULT_MAX_UPLOAD_BYTES * 4)
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedType { .. }));
    }

    #[test]
    fn measure_stream_rewinds_to_start() {
        let mut cursor = Cursor::new(b"0123456789".to_vec());
        cursor.set_position(4);

        assert_eq!(measure_stream(&mut cursor).unwrap(), 10);
        assert_eq!(cursor.position(), 0);

        let mut contents = String::new();
        cursor.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "0123456789");
    }

    #[test]
    fn validate_stream_rejects_oversized_without_reading() {
        let policy = UploadPolicy::new([".jpg"], 8);
        let mut cursor = Cursor::new(vec![0u8; 9]);
        let err = policy
            .validate_stream(Some("big.jpg"), &mut cursor)
            .unwrap_err();
        assert!(matches!(err, ValidationError::TooLarge { limit: 8 }));

        let mut cursor = Cursor::new(vec![0u8; 8]);
        assert_eq!(
            policy.validate_stream(Some("ok.jpg"), &mut cursor).unwrap(),
            8
        );
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn new_normalizes_extensions() {
        let policy = UploadPolicy::new(["JPG", " .Jpeg ", ".jpg", ""], 1);
        assert_eq!(policy.allowed_extensions(), [".jpg", ".jpeg"]);
    }
}
