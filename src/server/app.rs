//! Reference userdata backend.
//!
//! # Responsibilities
//! - Serve the namespaced resource API (`/api/userdata/...`)
//! - Install the inbound normalizer ahead of route dispatch
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Bind server to listener with graceful shutdown
//!
//! The store is an in-memory map keyed by the decoded file path. Wildcard
//! captures carry the restored literal separators, so a workflow saved as
//! `workflows/my/graph.json` is one entry, not a directory tree.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Request, State},
    http::{HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router, ServiceExt,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower::Layer;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::codec::EscapeScheme;
use crate::config::RelayConfig;
use crate::lifecycle::ShutdownHandle;
use crate::observability::metrics;
use crate::server::normalizer::UnescapeLayer;

/// Application state injected into handlers.
#[derive(Clone, Default)]
pub struct AppState {
    store: Arc<RwLock<HashMap<String, Bytes>>>,
}

/// Request ID generator (UUID v4).
#[derive(Clone, Copy)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// HTTP server for the userdata backend.
pub struct UserdataServer {
    config: RelayConfig,
    state: AppState,
}

impl UserdataServer {
    /// Create a new server with the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config,
            state: AppState::default(),
        }
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/api/userdata", get(list_userdata))
            .route(
                "/api/userdata/{*file}",
                get(fetch_userdata).post(store_userdata).delete(remove_userdata),
            )
            .with_state(self.state.clone())
            .layer(middleware::from_fn(track_requests))
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.config.listener.request_timeout_secs,
            )))
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(self.config.listener.max_body_bytes))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// The normalizer wraps the finished router so paths are restored
    /// before any routing decision.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownHandle) -> Result<(), std::io::Error> {
        let scheme = EscapeScheme::new(&self.config.escape.namespace, &self.config.escape.marker);
        for rule in scheme.rules() {
            tracing::debug!(
                pattern = %rule.pattern,
                replacement = %rule.replacement,
                "escape rule active"
            );
        }

        let app = UnescapeLayer::new(scheme).layer(self.build_router());

        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "userdata backend starting");

        axum::serve(listener, ServiceExt::<axum::extract::Request>::into_make_service(app))
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::info!("userdata backend stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

async fn track_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let start = Instant::now();
    let response = next.run(req).await;
    metrics::record_request(method.as_str(), response.status().as_u16(), start);
    response
}

async fn health() -> &'static str {
    "ok"
}

async fn list_userdata(State(state): State<AppState>) -> Json<Vec<String>> {
    let store = state.store.read().await;
    let mut names: Vec<String> = store.keys().cloned().collect();
    names.sort();
    Json(names)
}

async fn fetch_userdata(State(state): State<AppState>, Path(file): Path<String>) -> Response {
    match state.store.read().await.get(&file) {
        Some(data) => data.clone().into_response(),
        None => (StatusCode::NOT_FOUND, "no such file").into_response(),
    }
}

async fn store_userdata(
    State(state): State<AppState>,
    Path(file): Path<String>,
    body: Bytes,
) -> StatusCode {
    tracing::debug!(file = %file, bytes = body.len(), "storing userdata");
    match state.store.write().await.insert(file, body) {
        Some(_) => StatusCode::OK,
        None => StatusCode::CREATED,
    }
}

async fn remove_userdata(State(state): State<AppState>, Path(file): Path<String>) -> StatusCode {
    match state.store.write().await.remove(&file) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}
