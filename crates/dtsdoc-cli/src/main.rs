//! dtsdoc - API documentation for TypeScript declaration files.
//!
//! Parses arguments, sets up logging, resolves configuration and runs the
//! generator.

use clap::Parser;
use dtsdoc_cli::{cli, commands, config::DocsConfig, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = DocsConfig::load(&args)
        .and_then(|config| commands::execute(&config, args.quiet))
        .map(|_| ());

    // Convert CLI errors to miette diagnostics for reporting
    result.map_err(error::cli_error_to_miette)
}
