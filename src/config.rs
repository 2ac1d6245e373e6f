//! Configuration file support for recon-dashboard.
//!
//! Provides YAML-based configuration through `recon-dashboard.config.yml`
//! files, including the schema, file loading and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::analysis::policies::{ExtractionRule, GroupingRule};
use crate::application::dto::AnalysisOptions;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "recon-dashboard.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub api_base: Option<String>,
    pub key_file: Option<PathBuf>,
    pub format: Option<String>,
    pub max_depth: Option<usize>,
    pub ignored_fields: Option<Vec<String>>,
    pub chart_ignored_fields: Option<Vec<String>>,
    pub excluded_prefixes: Option<Vec<String>>,
    pub normalization_rules: Option<Vec<ExtractionRule>>,
    pub grouping_rules: Option<Vec<GroupingRule>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Analysis tunables; anything not set keeps the built-in default
    pub fn analysis_options(&self) -> AnalysisOptions {
        let defaults = AnalysisOptions::default();
        AnalysisOptions {
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            ignored_fields: self.ignored_fields.clone(),
            chart_ignored_fields: self.chart_ignored_fields.clone(),
            excluded_prefixes: self.excluded_prefixes.clone().unwrap_or_default(),
            normalization_rules: self.normalization_rules.clone(),
            grouping_rules: self.grouping_rules.clone(),
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);
    log::debug!("loaded config from {}", path.display());

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.max_depth == Some(0) {
        bail!(
            "Invalid config: max_depth must be at least 1.\n\n\
             💡 Hint: Remove the key to use the default of 64."
        );
    }

    if let Some(ref format) = config.format {
        if format.parse::<crate::application::dto::OutputFormat>().is_err() {
            bail!(
                "Invalid config: unknown format '{}'.\n\n\
                 💡 Hint: Use one of table, markdown or json.",
                format
            );
        }
    }

    if let Some(ref api_base) = config.api_base {
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            bail!(
                "Invalid config: api_base must be an http(s) URL, got '{}'.",
                api_base
            );
        }
    }

    for (i, rule) in config.normalization_rules.iter().flatten().enumerate() {
        if let ExtractionRule::Field { name, .. } = rule {
            if name.trim().is_empty() {
                bail!(
                    "Invalid config: normalization_rules[{}].name must not be empty.",
                    i
                );
            }
        }
    }

    Ok(())
}

fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        log::warn!("Unknown config field '{}' will be ignored.", key);
    }
}
