//! Path escape codec.
//!
//! # Data Flow
//! ```text
//! Outbound (client side):
//!     "/api/userdata/workflows%2Fname.json"
//!     → rules.rs (ordered literal substitutions)
//!     → "/api/userdata/workflows__SLASH__name.json"
//!
//! Inbound (backend side, after the intermediary):
//!     "/api/userdata/workflows__SLASH__name.json"
//!     → scheme.rs decode (single substitution)
//!     → "/api/userdata/workflows/name.json"
//! ```
//!
//! # Design Decisions
//! - Pure string transforms, total over all inputs; unmatched input is the
//!   identity case
//! - Encode matches three surface forms of the separator (literal `/`,
//!   `%2F`, `%252F`) because the encoding depth at the point of
//!   interception depends on the proxy deployment
//! - Decode matches only the marker form, which makes it idempotent
//! - No regex; literal substring scans keep matching O(n) and predictable

pub mod rules;
pub mod scheme;

pub use rules::RewriteRule;
pub use scheme::EscapeScheme;
