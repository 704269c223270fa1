//! Backend-side integration.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → normalizer.rs (restore literal path, BEFORE routing)
//!     → app.rs (Axum router, middleware, handlers)
//!     → handlers observe decoded paths only
//! ```
//!
//! # Design Decisions
//! - The normalizer wraps the whole router rather than being added with
//!   `Router::layer`, which would run after route matching
//! - Handlers stay unaware a rewrite happened; the marker form never
//!   reaches application code

pub mod app;
pub mod normalizer;

pub use app::{AppState, UserdataServer};
pub use normalizer::{UnescapeLayer, UnescapeService};
