//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → consumed at startup by the layers and the backend
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so a missing config file still yields a
//!   working relay with the documented constants
//! - Constants are fixed at startup; there is no runtime mutation or
//!   reload path
//! - Validation separates syntactic (serde) from semantic checks and
//!   reports every problem, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{EscapeConfig, ListenerConfig, ObservabilityConfig, RelayConfig};
pub use validation::{validate_config, ValidationError};
