use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_user_auth, security_headers_middleware, trace_id,
};
use crate::routes::{auth, chat, devices, health, owners, rentals};
use shared::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
}

pub fn create_app(config: Config, pool: PgPool) -> anyhow::Result<Router> {
    let config = Arc::new(config);

    // One RSA key parse at startup; handlers and middleware share the config.
    let jwt = Arc::new(
        JwtConfig::with_leeway(
            &config.jwt.private_key,
            &config.jwt.public_key,
            config.jwt.access_token_expiry_secs,
            config.jwt.refresh_token_expiry_secs,
            config.jwt.leeway_secs,
        )
        .map_err(|e| anyhow::anyhow!("Failed to initialize JWT config: {}", e))?,
    );

    let state = AppState {
        pool,
        config: config.clone(),
        jwt,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Protected routes (require a valid access token). Ownership and
    // participancy checks happen inside the handlers.
    let protected_routes = Router::new()
        // Identity
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/profile", get(auth::profile))
        // Device registry
        .route("/api/v1/devices", post(devices::create_device))
        .route("/api/v1/devices", get(devices::list_own_devices))
        .route("/api/v1/devices/:device_id", get(devices::get_device))
        .route("/api/v1/devices/:device_id", put(devices::update_device))
        .route("/api/v1/devices/:device_id", delete(devices::delete_device))
        // Booking engine
        .route("/api/v1/rent/:device_id", post(rentals::create_rental_request))
        .route("/api/v1/my-rentals", get(rentals::list_my_rentals))
        .route("/api/v1/manage-requests", get(rentals::list_managed_requests))
        .route(
            "/api/v1/manage-requests/:request_id/:action",
            post(rentals::decide_request),
        )
        // Chat channel
        .route("/api/v1/requests/:request_id/chat", get(chat::list_messages))
        .route("/api/v1/requests/:request_id/chat", post(chat::post_message))
        // Owner public profile
        .route("/api/v1/owners/:owner_id", get(owners::owner_profile))
        // Auth runs before any of the above
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/public-devices", get(devices::list_public_devices))
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Ok(Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state))
}
