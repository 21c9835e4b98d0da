//! Logging setup for the dtsdoc CLI.
//!
//! The library logs through `tracing`: one `debug!` per extracted file and
//! written page, one `info!` per documented source file. This module installs the
//! subscriber that prints them.
//!
//! ```rust,no_run
//! use dtsdoc_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("Starting generation");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used with `--verbose`.
pub const VERBOSE_FILTER: &str = "dtsdoc=debug,dtsdoc_cli=debug";
/// Filter used with `--quiet`.
pub const QUIET_FILTER: &str = "dtsdoc=error,dtsdoc_cli=error";
/// Filter used when neither flag nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "dtsdoc=info,dtsdoc_cli=info";

/// Initialize the tracing subscriber.
///
/// The level is chosen in this order:
/// 1. `--verbose`: debug
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. info
///
/// Call once, before anything is logged.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize logger with a custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}
