//! Route composition (spec §6.1): every domain gets its own module exporting
//! a `router()`, mirroring the teacher's per-domain split; this module wires
//! them together, nests the wallet surface under `SessionGate`, and layers
//! the cross-cutting HTTP concerns the teacher's monolithic `api.rs`
//! applies at the top.

pub mod brokerage;
pub mod deposit;
pub mod metals;
pub mod misc;
pub mod real_estate;
pub mod wallet;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::middleware;
use axum::routing::get;
use axum::{Json, Router};
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::GlobalKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config::Config;
use crate::main_lib::AppState;
use crate::session_mw::require_session;

async fn healthz() -> &'static str {
    "ok"
}

async fn readyz() -> &'static str {
    "ok"
}

#[derive(OpenApi)]
#[openapi(paths(), tags((name = "moneta-server")))]
struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    // One shared, process-wide limit rather than per-client: the server sits
    // behind a single-writer SQLite pool (spec §5.1), so the bottleneck being
    // protected is the write path itself, not any one caller. A per-peer-IP
    // extractor would also need `ConnectInfo`, which `axum::serve` doesn't
    // provide without extra wiring this service has no other use for.
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.write_rate_limit_per_sec as u64)
            .burst_size(config.write_rate_limit_burst)
            .key_extractor(GlobalKeyExtractor)
            .finish()
            .expect("static governor configuration is valid"),
    );

    let wallet_routes = Router::new()
        .merge(wallet::router())
        .merge(deposit::router())
        .merge(brokerage::router())
        .merge(metals::router())
        .merge(real_estate::router())
        .merge(misc::router())
        .layer(GovernorLayer::new(governor_conf))
        .layer(middleware::from_fn_with_state(state.clone(), require_session));

    let openapi = ApiDoc::openapi();

    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .merge(wallet_routes)
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .fallback(|| async { (StatusCode::NOT_FOUND, "not found") })
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout.max(Duration::from_secs(1))))
        .layer(TraceLayer::new_for_http())
}
