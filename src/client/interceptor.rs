//! Client-side escape layer.
//!
//! Wraps an outbound HTTP client service and rewrites qualifying request
//! targets before they leave the process. Install once when building the
//! client stack; every request on that stack is then inspected.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::{Request, Uri};
use tower::{Layer, Service};

use crate::codec::EscapeScheme;
use crate::config::EscapeConfig;
use crate::observability::metrics;

/// Layer that applies [`EscapeService`] to an outbound client service.
#[derive(Debug, Clone)]
pub struct EscapeLayer {
    scheme: Arc<EscapeScheme>,
    api_markers: Arc<[String]>,
}

impl EscapeLayer {
    /// Build a layer from an explicit scheme and eligibility markers.
    pub fn new(scheme: EscapeScheme, api_markers: Vec<String>) -> Self {
        Self {
            scheme: Arc::new(scheme),
            api_markers: api_markers.into(),
        }
    }

    /// Build a layer from configuration.
    pub fn from_config(config: &EscapeConfig) -> Self {
        Self::new(
            EscapeScheme::new(&config.namespace, &config.marker),
            config.api_markers.clone(),
        )
    }
}

impl<S> Layer<S> for EscapeLayer {
    type Service = EscapeService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        EscapeService {
            inner,
            scheme: self.scheme.clone(),
            api_markers: self.api_markers.clone(),
        }
    }
}

/// Service that escapes reserved namespace separators in outbound targets.
///
/// Method, headers, body and extensions are forwarded untouched; only the
/// URI may be substituted. Response, error and future types are the inner
/// service's own, so in-flight concurrency is unaffected.
#[derive(Debug, Clone)]
pub struct EscapeService<S> {
    inner: S,
    scheme: Arc<EscapeScheme>,
    api_markers: Arc<[String]>,
}

impl<S, B> Service<Request<B>> for EscapeService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        if let Some(escaped) = escape_target(req.uri(), &self.scheme, &self.api_markers) {
            tracing::debug!(
                original = %req.uri(),
                rewritten = %escaped,
                "escaped outbound target"
            );
            metrics::record_rewrite("outbound");
            *req.uri_mut() = escaped;
        }
        self.inner.call(req)
    }
}

/// Compute the escaped URI, or `None` when the request must pass through.
///
/// Pass-through covers: targets without a path (authority-form and other
/// opaque shapes), targets that do not address the namespaced API, targets
/// the scheme leaves unchanged, and rewritten targets that fail to
/// re-assemble into a valid URI.
fn escape_target(uri: &Uri, scheme: &EscapeScheme, api_markers: &[String]) -> Option<Uri> {
    let target = uri.path_and_query()?.as_str();
    if !api_markers.iter().any(|m| target.contains(m.as_str())) {
        return None;
    }

    let escaped = scheme.encode(target);
    if escaped == target {
        return None;
    }

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(escaped.parse().ok()?);
    Uri::from_parts(parts).ok()
}
