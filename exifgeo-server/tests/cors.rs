use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use exifgeo_core::api::routes::UPLOAD;
use exifgeo_server::infra::config::{Config, CorsConfig};
use tower::ServiceExt;

mod support;
use support::build_router;

const FRONTEND: &str = "http://localhost:3000";

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri(UPLOAD)
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type,x-trace")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn preflight_from_trusted_origin_is_allowed() {
    let app = build_router(Config::default());

    let response = app.oneshot(preflight(FRONTEND)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        FRONTEND
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
        "content-type,x-trace"
    );
    let methods = headers
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"));
}

#[tokio::test]
async fn preflight_from_untrusted_origin_gets_no_grant() {
    let app = build_router(Config::default());

    let response = app
        .oneshot(preflight("https://evil.example"))
        .await
        .unwrap();

    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}

#[tokio::test]
async fn configured_origin_replaces_default() {
    let mut config = Config::default();
    config.cors = CorsConfig {
        allowed_origin: "https://maps.example".into(),
        allow_credentials: false,
    };
    let app = build_router(config);

    let response = app
        .clone()
        .oneshot(preflight("https://maps.example"))
        .await
        .unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "https://maps.example"
    );
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .is_none()
    );

    let response = app.oneshot(preflight(FRONTEND)).await.unwrap();
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}

#[tokio::test]
async fn error_responses_carry_cors_headers() {
    let app = build_router(Config::default());
    let request = Request::builder()
        .method(Method::POST)
        .uri(UPLOAD)
        .header(header::ORIGIN, FRONTEND)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        FRONTEND
    );
}
