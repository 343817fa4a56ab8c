//! `finexpert.toml` settings.
//!
//! ```toml
//! [logging]
//! level = "info"
//! file = "finexpert.log"
//!
//! [tax]
//! brackets = "brackets.csv"
//! standard_deductions = "deductions.csv"
//! ```
//!
//! Every key is optional. Command-line flags take precedence over the file.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use finexpert_core::TaxTable;
use finexpert_data::TaxTableLoader;
use serde::Deserialize;
use tracing::{debug, info};

/// File read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "finexpert.toml";

/// Filter used when neither `RUST_LOG`, `--log-level` nor the file set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub logging: LoggingConfig,
    pub tax: TaxConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Any `EnvFilter` directive.
    pub level: Option<String>,
    /// Log file, appended to.
    pub file: Option<PathBuf>,
}

/// CSV files replacing the built-in tax table, each independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaxConfig {
    pub brackets: Option<PathBuf>,
    pub standard_deductions: Option<PathBuf>,
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    /// Reads the configuration.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`]
    /// in the working directory is used if present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file '{}'", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in config file '{}'", path.display()))
    }

    /// Configured log filter directive, or [`DEFAULT_LOG_LEVEL`].
    /// `RUST_LOG` still overrides it when logging starts.
    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// The built-in tax table with any configured CSV files swapped in.
    pub fn tax_table(&self) -> Result<TaxTable> {
        let mut table = TaxTable::builtin();

        if let Some(path) = &self.tax.brackets {
            let file = File::open(path)
                .with_context(|| format!("cannot open brackets file '{}'", path.display()))?;
            let brackets = TaxTableLoader::load_brackets(file)
                .with_context(|| format!("in brackets file '{}'", path.display()))?;
            info!(path = %path.display(), count = brackets.len(), "using tax brackets from file");
            table = table.with_brackets(brackets);
        }

        if let Some(path) = &self.tax.standard_deductions {
            let file = File::open(path).with_context(|| {
                format!("cannot open standard deductions file '{}'", path.display())
            })?;
            let deductions = TaxTableLoader::load_standard_deductions(file)
                .with_context(|| format!("in standard deductions file '{}'", path.display()))?;
            info!(path = %path.display(), count = deductions.len(), "using standard deductions from file");
            table = table.with_standard_deductions(deductions);
        }

        debug!(brackets = table.brackets().len(), "tax table ready");
        Ok(table)
    }
}
