//! Inbound path normalizer.
//!
//! Restores marker-bearing request paths to their literal form ahead of
//! route dispatch. Runs for every request; anything without the marker
//! form passes through untouched, which also makes a second application a
//! no-op.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::{Request, Uri};
use tower::{Layer, Service};

use crate::codec::EscapeScheme;
use crate::config::EscapeConfig;
use crate::observability::metrics;

/// Layer that applies [`UnescapeService`] around a router.
#[derive(Debug, Clone)]
pub struct UnescapeLayer {
    scheme: Arc<EscapeScheme>,
}

impl UnescapeLayer {
    pub fn new(scheme: EscapeScheme) -> Self {
        Self {
            scheme: Arc::new(scheme),
        }
    }

    /// Build a layer from configuration.
    pub fn from_config(config: &EscapeConfig) -> Self {
        Self::new(EscapeScheme::new(&config.namespace, &config.marker))
    }
}

impl<S> Layer<S> for UnescapeLayer {
    type Service = UnescapeService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        UnescapeService {
            inner,
            scheme: self.scheme.clone(),
        }
    }
}

/// Service that restores literal separators in inbound request paths.
///
/// A marker without its namespace context is left alone; whatever the
/// substitution produces is handed to the router without validation, and
/// handlers own rejecting filenames they consider invalid.
#[derive(Debug, Clone)]
pub struct UnescapeService<S> {
    inner: S,
    scheme: Arc<EscapeScheme>,
}

impl<S, B> Service<Request<B>> for UnescapeService<S>
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
        if let Some(restored) = unescape_target(req.uri(), &self.scheme) {
            tracing::debug!(
                received = %req.uri(),
                restored = %restored,
                "restored inbound path"
            );
            metrics::record_rewrite("inbound");
            *req.uri_mut() = restored;
        }
        self.inner.call(req)
    }
}

/// Compute the restored URI, or `None` when the request passes through.
fn unescape_target(uri: &Uri, scheme: &EscapeScheme) -> Option<Uri> {
    let target = uri.path_and_query()?.as_str();
    if !scheme.is_encoded(target) {
        return None;
    }

    let restored = scheme.decode(target);
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(restored.parse().ok()?);
    Uri::from_parts(parts).ok()
}
