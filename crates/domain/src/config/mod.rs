//! Configuration module for HopZero
//!
//! - `root`: main configuration, file loading and CLI overrides
//! - `lookup`: retry, timeout, cache and SOA settings
//! - `logging`: log level and log file
//! - `errors`: configuration errors

pub mod errors;
pub mod logging;
pub mod lookup;
pub mod root;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use lookup::LookupConfig;
pub use root::{CliOverrides, Config};
