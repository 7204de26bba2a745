//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (CORS, tracing, request ID)
//! - Bind server to listener
//! - Dispatch requests to the route table
//! - Relay requests to the upstream API
//! - Observability (metrics, correlation IDs)

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{ProxyConfig, UpstreamConfig};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::http::response::{self, RelayError};
use crate::lifecycle::shutdown::wait as wait_for_shutdown;
use crate::observability::metrics;
use crate::routing::{RouteError, RouteMatch, Router as ProxyRouter};
use crate::upstream::{redact, UpstreamClient, UpstreamError};

/// Body served on `GET /`.
pub const ROOT_MESSAGE: &str = "TMDB Proxy is running!";

/// Failure to assemble the server from its configuration.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Route table error: {0}")]
    Routes(#[from] RouteError),

    #[error("Upstream client error: {0}")]
    Upstream(#[from] UpstreamError),
}

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub router: Arc<ProxyRouter>,
    pub upstream: Arc<UpstreamClient>,
    pub upstream_config: Arc<UpstreamConfig>,
}

/// HTTP server for the gateway.
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let proxy_router = Arc::new(ProxyRouter::new()?);
        let upstream = Arc::new(UpstreamClient::new(&config.upstream)?);

        let state = AppState {
            router: proxy_router,
            upstream,
            upstream_config: Arc::new(config.upstream.clone()),
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/", get(root_handler))
            .route("/{*path}", get(relay_handler))
            .with_state(state)
            .layer(propagate_request_id_layer())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The configured router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn root_handler() -> Json<Value> {
    Json(json!({ "message": ROOT_MESSAGE }))
}

/// Main relay handler.
/// Looks up the route, builds the upstream request and relays the answer.
async fn relay_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id();
    let path = request.uri().path().to_string();
    let inbound: Vec<(String, String)> =
        url::form_urlencoded::parse(request.uri().query().unwrap_or("").as_bytes())
            .into_owned()
            .collect();

    // 1. Match Route
    let matched = match state.router.match_path(&path) {
        Some(m) => m,
        None => {
            tracing::warn!(request_id = %request_id, path = %path, "No route matched");
            let response = RelayError::NotFound { path }.into_response();
            metrics::record_request("none", response.status().as_u16(), start_time);
            return response;
        }
    };

    // 2. Relay
    let route = matched.route.name;
    let response = match forward(&state, &matched, &inbound, &request_id).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    };

    metrics::record_request(route, response.status().as_u16(), start_time);
    response
}

async fn forward(
    state: &AppState,
    matched: &RouteMatch<'_>,
    inbound: &[(String, String)],
    request_id: &str,
) -> Result<Response, RelayError> {
    let route = matched.route;
    let config = &state.upstream_config;

    let query = route.params.query_pairs(inbound, &config.language, config.page)?;
    let url = state.upstream.build_url(&matched.upstream_segments(), &query);

    tracing::debug!(
        request_id = %request_id,
        route = route.name,
        upstream = %redact(&url),
        "Relaying request"
    );

    let upstream = state.upstream.get(url).await.map_err(|source| {
        tracing::error!(
            request_id = %request_id,
            route = route.name,
            error = %response::error_chain(&source),
            "Upstream error"
        );
        metrics::record_upstream_error(route.name);
        RelayError::Upstream {
            message: route.failure,
            source,
        }
    })?;

    if !upstream.status.is_success() {
        tracing::warn!(
            request_id = %request_id,
            route = route.name,
            status = %upstream.status,
            "Upstream returned non-success status"
        );
    }

    Ok(response::relay(upstream))
}
