//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! layers and handlers produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (rewrite and request counters)
//!
//! Consumers:
//!     → Log aggregation (stdout, JSON optional)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Rewrite decisions are logged at debug level with original and
//!   rewritten targets; logging never gates the rewrite itself
//! - Metric updates are cheap counter increments and are no-ops when no
//!   recorder is installed

pub mod logging;
pub mod metrics;
