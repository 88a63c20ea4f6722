/// Route definitions shared by the server and its tests.
pub const UPLOAD: &str = "/upload";

/// Multipart form field that carries the uploaded image.
pub const UPLOAD_FIELD: &str = "file";
