//! Ready-made outbound client stack.

use axum::body::Body;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use tower::Layer;

use crate::client::interceptor::{EscapeLayer, EscapeService};
use crate::config::EscapeConfig;

/// An escape-layered hyper client.
pub type EscapedClient = EscapeService<Client<HttpConnector, Body>>;

/// Build the outbound client stack with the escape layer installed.
///
/// Build once per process and share by cloning. Further layers stack on
/// top without touching the rewrite.
pub fn escaped_client(config: &EscapeConfig) -> EscapedClient {
    let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
    EscapeLayer::from_config(config).layer(client)
}
