#![allow(dead_code)]

use anyhow::{Result, anyhow};
use axum::Router;
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use exifgeo_core::{api::routes::UPLOAD_FIELD, testing::ExifJpegBuilder};
use exifgeo_server::{AppState, create_app, infra::config::Config};

pub const EMPIRE_STATE_LAT: [(u32, u32); 3] =
    [(40, 1), (44, 1), (5436, 100)];
pub const EMPIRE_STATE_LON: [(u32, u32); 3] =
    [(73, 1), (59, 1), (1104, 100)];

pub fn build_router(config: Config) -> Router {
    create_app(AppState::new(config))
}

pub fn build_test_server(config: Config) -> Result<TestServer> {
    TestServer::builder()
        .mock_transport()
        .build(build_router(config))
        .map_err(|err| anyhow!(err.to_string()))
}

pub fn default_test_server() -> Result<TestServer> {
    build_test_server(Config::default())
}

/// JPEG with the Empire State Building's coordinates.
pub fn geotagged_jpeg() -> Vec<u8> {
    ExifJpegBuilder::new()
        .latitude(EMPIRE_STATE_LAT, "N")
        .longitude(EMPIRE_STATE_LON, "W")
        .build()
}

pub fn file_form(bytes: Vec<u8>, filename: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        UPLOAD_FIELD,
        Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_type("image/jpeg"),
    )
}
