//! Outbound request interception.
//!
//! # Data Flow
//! ```text
//! caller builds request
//!     → EscapeService (eligibility check, encode path+query)
//!     → inner client service (hyper, or any tower stack)
//!     → intermediary proxy (sees no separator worth normalizing)
//! ```
//!
//! # Design Decisions
//! - Implemented as a tower Layer so it composes with retry/timeout/trace
//!   layers on the same client stack instead of patching a global
//! - Always delegates; the wrapper adds no failure mode of its own
//! - Targets it cannot confidently rewrite pass through unmodified

pub mod interceptor;
pub mod stack;

pub use interceptor::{EscapeLayer, EscapeService};
pub use stack::{escaped_client, EscapedClient};
