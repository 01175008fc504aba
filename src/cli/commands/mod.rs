//! CLI command implementations.

pub mod check;
pub mod init_config;
pub mod validate;
