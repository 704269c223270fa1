//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup: load config → init logging/metrics → bind listener → serve
//! Shutdown: Ctrl+C or trigger() → handles resolve → serve drains → exit
//! ```

pub mod shutdown;

pub use shutdown::{Shutdown, ShutdownHandle};
