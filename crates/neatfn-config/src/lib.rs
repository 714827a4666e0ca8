// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neatfn Configuration
//!
//! Loads the function-selection settings of a genome configuration:
//! - TOML file parsing (`neatfn_configuration.toml`)
//! - Environment variable overrides (`NEATFN_*`)
//! - CLI argument overrides
//! - Validation of every configured name against a [`FunctionRegistry`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use neatfn_config::{load_config, resolve_activation_functions};
//! use neatfn_registry::FunctionRegistry;
//!
//! let config = load_config(None, None).expect("Failed to load config");
//! let registry = FunctionRegistry::new().expect("Builtin functions rejected");
//! let functions = resolve_activation_functions(&config, &registry).expect("Invalid activations");
//! println!("{} activation option(s)", functions.options.len());
//! ```
//!
//! [`FunctionRegistry`]: neatfn_registry::FunctionRegistry

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config, load_config_from_str,
    split_option_list, CONFIG_FILE_NAME,
};
pub use types::*;
pub use validation::{resolve_activation_functions, validate_config, ConfigValidationError, ResolvedFunctions};

use neatfn_registry::FunctionError;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Function resolution failed: {0}")]
    Function(#[from] FunctionError),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
