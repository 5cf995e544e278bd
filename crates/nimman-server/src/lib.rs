//! Nimman Web Server
//!
//! Axum-based REST API serving shop records, derived insights and reports
//! to the dashboard front-end.
//!
//! Security features:
//! - Optional API key authentication (every route except health)
//! - Restrictive CORS policy
//! - Security headers on every response
//! - Sanitized error responses

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, warn};

use nimman_core::{DataRange, DataStore, InsightEngine};

mod handlers;

/// Authorization header for API key auth
const AUTHORIZATION_HEADER: &str = "authorization";

/// Routes reachable without credentials
const PUBLIC_PATHS: &[&str] = &["/api/health"];

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// API keys accepted as "Bearer <key>" in the Authorization header
    /// (empty = no authentication)
    pub api_keys: Vec<String>,
}

impl ServerConfig {
    /// Read `NIMMAN_API_KEYS` and `NIMMAN_ALLOWED_ORIGINS` (comma-separated)
    pub fn from_env() -> Self {
        Self {
            allowed_origins: parse_list(&std::env::var("NIMMAN_ALLOWED_ORIGINS").unwrap_or_default()),
            api_keys: parse_list(&std::env::var("NIMMAN_API_KEYS").unwrap_or_default()),
        }
    }

    pub fn require_auth(&self) -> bool {
        !self.api_keys.is_empty()
    }
}

/// Split a comma-separated setting, dropping blanks
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Shared application state
pub struct AppState {
    pub store: DataStore,
    pub engine: InsightEngine,
    /// Range used by report requests without `?range=`
    pub default_range: DataRange,
    pub config: ServerConfig,
}

/// Authentication middleware - validates API keys when any are configured
///
/// Keys are compared using constant-time comparison to prevent timing attacks.
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.require_auth() || PUBLIC_PATHS.contains(&request.uri().path()) {
        return next.run(request).await;
    }

    let api_key_valid = request
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|key| validate_api_key(key.trim(), &state.config.api_keys))
        .unwrap_or(false);

    if api_key_valid {
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "Unauthorized request - no valid API key");
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "Authentication required"
        })),
    )
        .into_response()
}

/// Validate an API key against the configured keys using constant-time comparison
fn validate_api_key(provided: &str, valid_keys: &[String]) -> bool {
    use subtle::ConstantTimeEq;

    let provided_bytes = provided.as_bytes();

    // Every key is checked so timing doesn't reveal which one matched
    let mut matched = false;
    for key in valid_keys {
        let key_bytes = key.as_bytes();
        if provided_bytes.len() == key_bytes.len() && bool::from(provided_bytes.ct_eq(key_bytes)) {
            matched = true;
        }
    }
    matched
}

/// Create the application router
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let config = state.config.clone();
    let state = Arc::new(state);

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/refresh", post(handlers::refresh))
        // Shops
        .route("/shops", get(handlers::list_shops))
        .route("/shops/:name", get(handlers::get_shop))
        .route("/shops/:name/insights", get(handlers::get_shop_insights))
        .route("/shops/:name/report", get(handlers::get_shop_report));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    // CSP: same-origin scripts, inline styles for the chart bundle
    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' blob: data:; font-src 'self'; connect-src 'self'; frame-ancestors 'none'"
    );

    let mut app = Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    // Serve the dashboard bundle if a directory is provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server
pub async fn serve_with_config(
    state: AppState,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
) -> anyhow::Result<()> {
    if !state.config.require_auth() {
        warn!("No API keys configured - API is open to anyone who can reach it");
    }

    let snapshot = state.store.snapshot();
    info!(
        source = %state.store.source().describe(),
        shops = snapshot.len(),
        "Serving shop data"
    );

    let app = create_router(state, static_dir);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unprocessable(msg: &str) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<nimman_core::Error> for AppError {
    fn from(err: nimman_core::Error) -> Self {
        use nimman_core::Error;

        let message = err.to_string();
        match err {
            Error::NotFound(_) => Self::not_found(&message),
            Error::AmbiguousShop { .. } => Self::bad_request(&message),
            // Bad shop data: the record (or the refreshed file) cannot be analyzed
            Error::Validation(_)
            | Error::EmptyAspectSet(_)
            | Error::MissingAspect { .. }
            | Error::Csv(_)
            | Error::Json(_)
            | Error::Toml(_)
            | Error::Yaml(_)
            | Error::Import(_)
            | Error::UnsupportedFormat(_) => Self::unprocessable(&message),
            Error::Io(_) | Error::Config(_) => Self::from(anyhow::Error::from(err)),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
