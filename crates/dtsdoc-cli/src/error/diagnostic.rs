//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use dtsdoc::DocsError;
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Docs(e) => docs_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert DocsError to miette Report
pub fn docs_error_to_miette(err: DocsError) -> Report {
    match err {
        DocsError::Parse { path, message } => miette::miette!(
            help = "Only TypeScript and JavaScript sources are parsed; exclude the file with --exclude",
            "Failed to parse {}\n{}",
            path.display(),
            message
        ),
        DocsError::Io { path, error } => miette::miette!(
            help = "Check that the path exists and the output directory is writable",
            "I/O error at {}: {}",
            path.display(),
            error
        ),
        other => miette::miette!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_error_mentions_file() {
        let report = cli_error_to_miette(CliError::Docs(DocsError::Parse {
            path: PathBuf::from("types/api/broken.d.ts"),
            message: "Expected `{`".to_string(),
        }));
        let msg = report.to_string();
        assert!(msg.contains("types/api/broken.d.ts"));
        assert!(msg.contains("Expected `{`"));
    }

    #[test]
    fn test_other_errors_keep_their_message() {
        let report = cli_error_to_miette(CliError::FileNotFound(PathBuf::from("types/api")));
        assert_eq!(report.to_string(), "File not found: types/api");
    }
}
