// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Implements the 3-tier configuration loading system:
//! 1. TOML file (base values)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{ConfigError, ConfigResult, LogFormat, NeatFnConfig};

/// File name searched for by [`find_config_file`]
pub const CONFIG_FILE_NAME: &str = "neatfn_configuration.toml";

const CONFIG_PATH_ENV_VAR: &str = "NEATFN_CONFIG_PATH";

/// Find the configuration file
///
/// Search order:
/// 1. `NEATFN_CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV_VAR) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by {} not found: {}",
            CONFIG_PATH_ENV_VAR,
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        search_paths.extend(cwd.ancestors().skip(1).take(5).map(|dir| dir.join(CONFIG_FILE_NAME)));
    }

    if let Some(found) = search_paths.iter().find(|path| path.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "Configuration file '{}' not found in any of these locations:\n{}\n\nSet {} to specify a custom location.",
        CONFIG_FILE_NAME, search_list, CONFIG_PATH_ENV_VAR
    )))
}

/// Load configuration from a TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, the file is searched for.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if the config file is not found or contains invalid TOML.
/// Names are not checked here; see [`crate::validate_config`].
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<NeatFnConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let config = load_config_from_str(&content, cli_args)?;

    debug!(target: "neatfn-config", "Loaded configuration from {}", config_file.display());
    Ok(config)
}

/// Parse TOML content and apply environment and CLI overrides
pub fn load_config_from_str(
    content: &str,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<NeatFnConfig> {
    let mut config: NeatFnConfig = toml::from_str(content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `NEATFN_ACTIVATION_DEFAULT` -> `activation.default`
/// - `NEATFN_ACTIVATION_OPTIONS` -> `activation.options` (comma or space separated)
/// - `NEATFN_LOG_LEVEL` -> `logging.level`
/// - `NEATFN_LOG_FORMAT` -> `logging.format`
pub fn apply_environment_overrides(config: &mut NeatFnConfig) {
    let overrides: HashMap<String, String> = [
        ("activation_default", "NEATFN_ACTIVATION_DEFAULT"),
        ("activation_options", "NEATFN_ACTIVATION_OPTIONS"),
        ("log_level", "NEATFN_LOG_LEVEL"),
        ("log_format", "NEATFN_LOG_FORMAT"),
    ]
    .into_iter()
    .filter_map(|(key, var)| env::var(var).ok().map(|value| (key.to_string(), value)))
    .collect();

    apply_cli_overrides(config, &overrides);
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - Map of CLI arguments, e.g. `{"activation_default": "tanh", "log_level": "debug"}`
pub fn apply_cli_overrides(config: &mut NeatFnConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("activation_default") {
        config.activation.default = value.trim().to_string();
    }
    if let Some(value) = cli_args.get("activation_options") {
        config.activation.options = split_option_list(value);
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.trim().to_string();
    }
    if let Some(value) = cli_args.get("log_format") {
        match value.parse::<LogFormat>() {
            Ok(format) => config.logging.format = format,
            Err(e) => warn!(target: "neatfn-config", "Ignoring log_format override: {}", e),
        }
    }
}

/// Split an option list on commas and whitespace outside parentheses
///
/// `"relu, multiparam_elu(0.1, 0.2) tanh"` yields
/// `["relu", "multiparam_elu(0.1, 0.2)", "tanh"]`.
pub fn split_option_list(value: &str) -> Vec<String> {
    let mut options = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in value.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => flush_option(&mut current, &mut options),
            c if c.is_whitespace() && depth == 0 => flush_option(&mut current, &mut options),
            c => current.push(c),
        }
    }
    flush_option(&mut current, &mut options);
    options
}

fn flush_option(current: &mut String, options: &mut Vec<String>) {
    if !current.is_empty() {
        options.push(std::mem::take(current));
    }
}
