//! Logging setup around the `log` facade with an `env_logger` backend.

mod init;

pub use init::{init_logging, LoggingConfig};
