use axum::body::Body;
use axum::http::Request;
use moneta_server::config::Config;
use moneta_server::{api, build_state};
use tempfile::tempdir;
use tower::ServiceExt;

fn cleanup_env() {
    for key in ["MONETA_DB_PATH", "MONETA_HMAC_SECRET", "MONETA_SESSION_HMAC_SECRET"] {
        std::env::remove_var(key);
    }
}

#[tokio::test]
async fn healthz_and_readyz_are_unauthenticated() {
    let tmp = tempdir().unwrap();
    std::env::set_var("MONETA_DB_PATH", tmp.path().join("test.db"));

    let config = Config::from_env();
    let state = build_state(&config).await.unwrap();
    let app = api::app_router(state, &config);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = app
        .oneshot(Request::builder().uri("/readyz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    cleanup_env();
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let tmp = tempdir().unwrap();
    std::env::set_var("MONETA_DB_PATH", tmp.path().join("test.db"));

    let config = Config::from_env();
    let state = build_state(&config).await.unwrap();
    let app = api::app_router(state, &config);

    let response = app
        .oneshot(Request::builder().uri("/nonexistent").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    cleanup_env();
}
