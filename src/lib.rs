//! Path-Escaping Relay Library
//!
//! Carries slash-bearing filenames across reverse proxies that collapse
//! URL-encoded separators. The codec rewrites the reserved namespace prefix
//! into a marker form on the way out of the client; the backend restores it
//! before route dispatch, so handlers only ever observe literal paths.

pub mod client;
pub mod codec;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod server;

pub use client::EscapeLayer;
pub use codec::EscapeScheme;
pub use config::RelayConfig;
pub use lifecycle::Shutdown;
pub use server::{UnescapeLayer, UserdataServer};
