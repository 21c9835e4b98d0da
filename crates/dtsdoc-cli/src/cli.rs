//! Command-line interface definition.
//!
//! Every documentation option is optional here so that values from
//! `dtsdoc.config.json` and `DTSDOC_*` variables survive when a flag is not
//! given. Defaults live in [`crate::config::DocsConfig::default_config`].

use clap::{Parser, ValueEnum};
use dtsdoc::OutputFormat;
use std::path::PathBuf;

/// dtsdoc - API documentation for TypeScript declaration files
#[derive(Parser, Debug)]
#[command(
    name = "dtsdoc",
    version,
    about = "Generate Markdown API documentation from TypeScript declaration files",
    long_about = "dtsdoc walks directories of TypeScript declaration files, merges the\n\
                  declarations that share a name and writes one Markdown page per\n\
                  exported API, mirroring the source tree under the output directory."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Files or directories to document [default: ./types/api/]
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Directory output paths are computed relative to [default: ./types/api]
    #[arg(long, value_name = "DIR")]
    pub base: Option<PathBuf>,

    /// Root of the generated documentation [default: ../../docs/apis]
    #[arg(short, long = "out", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Entry name to skip during traversal (repeatable, replaces the defaults)
    #[arg(long, value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Document symbols tagged `@internal`
    #[arg(long)]
    pub include_internal: bool,

    /// Path to a config file [default: ./dtsdoc.config.json if present]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Output format accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// One Markdown page per exported API
    Markdown,
    /// One JSON dump of the merged declarations per source file
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["dtsdoc"]).unwrap();
        assert!(cli.paths.is_empty());
        assert!(cli.base.is_none());
        assert!(cli.out_dir.is_none());
        assert!(cli.format.is_none());
        assert!(!cli.include_internal);
    }

    #[test]
    fn test_all_options() {
        let cli = Cli::try_parse_from([
            "dtsdoc",
            "--base",
            "types",
            "--out",
            "site/apis",
            "--exclude",
            "legacy",
            "--exclude",
            "dist",
            "--format",
            "json",
            "--include-internal",
            "types/api/device",
            "types/api/network",
        ])
        .unwrap();

        assert_eq!(cli.base, Some(PathBuf::from("types")));
        assert_eq!(cli.out_dir, Some(PathBuf::from("site/apis")));
        assert_eq!(cli.exclude, ["legacy", "dist"]);
        assert_eq!(cli.format, Some(FormatArg::Json));
        assert!(cli.include_internal);
        assert_eq!(
            cli.paths,
            [PathBuf::from("types/api/device"), PathBuf::from("types/api/network")]
        );
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["dtsdoc", "--verbose", "--quiet"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["dtsdoc", "--format", "html"]).is_err());
    }

    #[test]
    fn test_format_conversion() {
        assert_eq!(OutputFormat::from(FormatArg::Markdown), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from(FormatArg::Json), OutputFormat::Json);
    }
}
