use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::post,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use exifgeo_core::api::routes;

use crate::{
    handlers,
    infra::{app_state::AppState, config::CorsConfig},
};

/// Room for multipart boundaries and part headers on top of the file itself.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the application router with its middleware stack.
pub fn create_app(state: AppState) -> Router {
    let body_limit = usize::try_from(state.policy().max_bytes())
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let cors = cors_layer(&state.config().cors);

    Router::new()
        .route(routes::UPLOAD, post(handlers::upload_image))
        .layer(DefaultBodyLimit::max(body_limit))
        // Outer to inner: CORS, then tracing.
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS policy for the trusted frontend origin.
///
/// Request headers are mirrored from the preflight because a literal `*`
/// cannot be combined with credentials.
pub fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let allow_origin = if cors.is_wildcard() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> =
            HeaderValue::from_str(&cors.allowed_origin)
                .inspect_err(|_| {
                    warn!(
                        origin = %cors.allowed_origin,
                        "ignoring unparseable CORS origin"
                    )
                })
                .into_iter()
                .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::list([Method::POST]))
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(cors.allow_credentials && !cors.is_wildcard())
}
