// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{
    add_points_handler, create_project_handler, dashboard_handler, get_loyalty_handler,
    get_project_handler, health_handler, integrations_handler, list_projects_handler,
    list_sensors_handler, list_users_handler, metrics_handler, not_found_handler,
    predictions_handler, submit_reading_handler,
};
use super::middleware::{
    access_log, cors_layer, panic_response, request_id_layers, track_metrics,
    with_security_headers,
};
use super::rate_limit::{rate_limit, RateLimiter};
use crate::config::AppConfig;
use crate::store::Store;
use crate::utils::jitter::{JitterSource, SystemJitter};
use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<Store>,
    pub jitter: Arc<dyn JitterSource>,
    pub limiter: Arc<RateLimiter>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: AppConfig, store: Store, jitter: Arc<dyn JitterSource>) -> Self {
        let limiter = RateLimiter::new(config.rate_limit.clone());
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            jitter,
            limiter: Arc::new(limiter),
            started_at: Instant::now(),
        }
    }

    /// Production wiring: seeded store and OS randomness.
    pub fn seeded(config: AppConfig) -> Self {
        Self::new(config, Store::seeded(), Arc::new(SystemJitter::new()))
    }

    pub fn uptime_seconds(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();
    let (set_request_id, propagate_request_id) = request_id_layers();

    // Unsupported methods on known paths get the same 404 envelope as unknown paths
    let app = Router::new()
        .route("/health", get(health_handler).fallback(not_found_handler))
        .route("/metrics", get(metrics_handler).fallback(not_found_handler))
        .route(
            "/api/v1/dashboard",
            get(dashboard_handler).fallback(not_found_handler),
        )
        .route(
            "/api/v1/projects",
            get(list_projects_handler)
                .post(create_project_handler)
                .fallback(not_found_handler),
        )
        .route(
            "/api/v1/projects/:id",
            get(get_project_handler).fallback(not_found_handler),
        )
        .route(
            "/api/v1/iot/sensors",
            get(list_sensors_handler)
                .post(submit_reading_handler)
                .fallback(not_found_handler),
        )
        // Static segment; takes precedence over the :user_id capture
        .route(
            "/api/v1/loyalty/add",
            post(add_points_handler).fallback(not_found_handler),
        )
        .route(
            "/api/v1/loyalty/:user_id",
            get(get_loyalty_handler).fallback(not_found_handler),
        )
        .route(
            "/api/v1/analytics/predictions",
            get(predictions_handler).fallback(not_found_handler),
        )
        .route(
            "/api/v1/users",
            get(list_users_handler).fallback(not_found_handler),
        )
        .route(
            "/api/v1/integrations/status",
            get(integrations_handler).fallback(not_found_handler),
        )
        .fallback(not_found_handler)
        .layer(CatchPanicLayer::custom(panic_response(
            config.environment.is_development(),
        )))
        .layer(from_fn_with_state(state.clone(), rate_limit))
        .layer(from_fn(track_metrics))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.server.body_limit_bytes));

    let app = if config.performance.enable_compression {
        app.layer(CompressionLayer::new().gzip(true).deflate(true))
    } else {
        app
    };

    let app = with_security_headers(app.layer(cors_layer(&config.cors)));

    let app = if config.logging.access_log {
        app.layer(from_fn(access_log))
    } else {
        app
    };

    app.layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state)
}
