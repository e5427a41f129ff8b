use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::cmd::OutputFormat;

pub const CONFIG_ENV: &str = "KSCOPE_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KscopeConfig {
    pub log_level: String,
    pub output: OutputFormat,
    pub pretty: bool,
}

impl Default for KscopeConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            output: OutputFormat::Standard,
            pretty: false,
        }
    }
}

impl KscopeConfig {
    pub fn from_yaml(contents: &str) -> anyhow::Result<Self> {
        // an empty file parses as null
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yml::from_str(contents).context("Failed to parse configuration")
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

        Self::from_yaml(&contents)
            .with_context(|| format!("Invalid configuration file {}", path.display()))
    }
}

/// Loads the configuration from `path`, or from $KSCOPE_CONFIG when no path
/// is given. Without either the defaults apply.
pub fn load(path: Option<&Path>) -> anyhow::Result<KscopeConfig> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

    match path {
        Some(path) => KscopeConfig::from_file(&path),
        None => Ok(KscopeConfig::default()),
    }
}
