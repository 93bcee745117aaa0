//! Logging setup.
//!
//! Everything in the workspace logs through the `log` facade; this module only
//! installs the backend (`env_logger` natively, the browser console on wasm).

mod init;

pub use init::{init_logging, LoggingConfig};
