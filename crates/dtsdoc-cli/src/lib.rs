//! dtsdoc CLI - Markdown API documentation from TypeScript declaration files.
//!
//! The binary walks declaration directories, merges declaration fragments
//! within each source file and writes one page per exported API through the
//! [`dtsdoc`] library.
//!
//! - [`cli`] - argument definitions
//! - [`config`] - layered configuration (defaults, file, environment, flags)
//! - [`commands`] - the generate command
//! - [`error`] - CLI error types and diagnostic reporting
//! - [`logger`] - tracing setup
//! - [`ui`] - colored status lines

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result, ResultExt};
