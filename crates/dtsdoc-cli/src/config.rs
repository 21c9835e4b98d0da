//! Layered configuration for the generate command.
//!
//! Priority: CLI args > environment variables > config file > defaults.

use crate::cli::Cli;
use crate::error::{ConfigError, Result};
use dtsdoc::{default_platforms, DocsOptions, OutputFormat, Platform, DEFAULT_EXCLUDES};
use figment::{
    providers::{Env, Format as _, Json, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file picked up from the working directory.
pub const CONFIG_FILE_NAME: &str = "dtsdoc.config.json";

/// Prefix of configuration environment variables (`DTSDOC_OUT_DIR`, ...).
pub const ENV_PREFIX: &str = "DTSDOC_";

/// Resolved settings of a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocsConfig {
    /// Directory output paths are computed relative to.
    pub base: PathBuf,
    /// Root of the generated documentation.
    pub out_dir: PathBuf,
    /// Files or directories to document.
    pub paths: Vec<PathBuf>,
    /// Entry names skipped during traversal.
    pub exclude: Vec<String>,
    /// Output format.
    pub format: OutputFormat,
    /// Document `@internal` symbols too.
    pub include_internal: bool,
    /// Support-matrix columns, in order.
    pub platforms: Vec<Platform>,
}

/// Values given on the command line. Absent flags are left out so they do
/// not shadow lower layers.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    base: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    out_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    paths: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    exclude: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<OutputFormat>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    include_internal: bool,
}

impl DocsConfig {
    /// Load configuration, looking for `dtsdoc.config.json` in the current directory.
    pub fn load(args: &Cli) -> Result<Self> {
        Self::load_from(args, Path::new("."))
    }

    /// Load configuration, looking for the default config file in `dir`.
    ///
    /// An explicit `--config` path must exist; the default file is optional.
    pub fn load_from(args: &Cli, dir: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default_config()));

        let config_file = match &args.config {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::NotFound(path.clone()).into());
            }
            Some(path) => Some(path.clone()),
            None => {
                let default_path = dir.join(CONFIG_FILE_NAME);
                default_path.is_file().then_some(default_path)
            }
        };

        if let Some(path) = config_file {
            tracing::debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Json::file(path));
        }

        figment = figment.merge(env_provider());
        figment = figment.merge(Serialized::defaults(CliOverrides::from(args)));

        let config: Self = figment.extract().map_err(|e| ConfigError::InvalidValue {
            field: "configuration".to_string(),
            value: e.to_string(),
            hint: format!("Check {CONFIG_FILE_NAME} syntax and {ENV_PREFIX}* variables"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults matching the conventional `types/api` to `docs/apis` layout.
    pub fn default_config() -> Self {
        Self {
            base: PathBuf::from("./types/api"),
            out_dir: PathBuf::from("../../docs/apis"),
            paths: vec![PathBuf::from("./types/api/")],
            exclude: DEFAULT_EXCLUDES.iter().map(|name| name.to_string()).collect(),
            format: OutputFormat::Markdown,
            include_internal: false,
            platforms: default_platforms(),
        }
    }

    /// Reject configurations that cannot produce output.
    pub fn validate(&self) -> Result<()> {
        if self.paths.is_empty() {
            return Err(ConfigError::MissingField {
                field: "paths".to_string(),
                hint: "Pass at least one file or directory, or set \"paths\" in the config file"
                    .to_string(),
            }
            .into());
        }
        if let Some(platform) = self.platforms.iter().find(|platform| platform.name.is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "platforms".to_string(),
                value: platform.label.clone(),
                hint: "Every platform needs the id used in @supported tags".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Options for [`dtsdoc::generate`].
    pub fn to_options(&self) -> DocsOptions {
        DocsOptions {
            base: self.base.clone(),
            out_dir: self.out_dir.clone(),
            paths: self.paths.clone(),
            exclude: self.exclude.clone(),
            platforms: self.platforms.clone(),
            format: self.format,
            include_internal: self.include_internal,
        }
    }
}

impl From<&Cli> for CliOverrides {
    fn from(args: &Cli) -> Self {
        Self {
            base: args.base.clone(),
            out_dir: args.out_dir.clone(),
            paths: args.paths.clone(),
            exclude: args.exclude.clone(),
            format: args.format.map(Into::into),
            include_internal: args.include_internal,
        }
    }
}

/// `DTSDOC_OUT_DIR` and `DTSDOC_INCLUDE_INTERNAL` map onto the camelCase keys.
///
/// figment lowercases keys after `map` unless told otherwise, which would
/// turn `outDir` back into `outdir`.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).lowercase(false).map(|key| {
        let key = key.as_str().to_ascii_lowercase();
        match key.as_str() {
            "out_dir" => "outDir".to_string(),
            "include_internal" => "includeInternal".to_string(),
            _ => key,
        }
        .into()
    })
}
