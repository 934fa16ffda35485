//! Logger bootstrap for viewer binaries.

mod init;

pub use init::{LoggingConfig, init_logging};
