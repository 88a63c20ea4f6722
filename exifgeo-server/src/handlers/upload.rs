use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use tracing::{info, warn};

use exifgeo_core::{
    GpsResult, UploadPolicy, UploadedImage, api::routes::UPLOAD_FIELD,
    extract_gps,
};

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

/// Accept one JPEG in the `file` field and return its GPS position.
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<GpsResult>> {
    let mut multipart = multipart?;
    let upload = read_upload(&mut multipart, state.policy()).await?;

    let UploadedImage { filename, bytes } = upload;
    let size = bytes.len();
    let result = tokio::task::spawn_blocking(move || extract_gps(&bytes))
        .await
        .map_err(|err| {
            AppError::internal(format!("EXIF extraction task failed: {err}"))
        })?
        .inspect_err(|err| {
            info!(filename = %filename, size, reason = %err, "no usable GPS position");
        })?;

    info!(
        filename = %filename,
        size,
        latitude = result.latitude,
        longitude = result.longitude,
        "extracted GPS position"
    );

    Ok(Json(result))
}

/// Stream the `file` field into memory, enforcing the extension before the
/// first byte is read and the size ceiling after every chunk.
async fn read_upload(
    multipart: &mut Multipart,
    policy: &UploadPolicy,
) -> AppResult<UploadedImage> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::from_multipart(err, policy))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_owned);
        if let Err(err) = policy.check_extension(filename.as_deref()) {
            warn!(filename = ?filename, "rejected upload with unsupported type");
            return Err(err.into());
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|err| AppError::from_multipart(err, policy))?
        {
            let total = (bytes.len() + chunk.len()) as u64;
            if let Err(err) = policy.check_size(total) {
                warn!(
                    filename = ?filename,
                    received = total,
                    limit = policy.max_bytes(),
                    "rejected oversized upload"
                );
                return Err(err.into());
            }
            bytes.extend_from_slice(&chunk);
        }

        return Ok(UploadedImage::new(filename.unwrap_or_default(), bytes));
    }

    Err(AppError::bad_request(format!(
        "No file uploaded. Expected a multipart field named \"{UPLOAD_FIELD}\"."
    )))
}
