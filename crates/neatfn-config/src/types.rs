// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Structs map to sections of `neatfn_configuration.toml`:
//!
//! ```toml
//! [activation]
//! default = "multiparam_relu(0.5)"
//! options = ["sigmoid", "relu", "multiparam_relu(0.5)"]
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```

use serde::{Deserialize, Serialize};

pub use neatfn_observability::{LogFormat, LoggingConfig};

/// `default` value that leaves the choice among options to the caller
pub const RANDOM_CHOICE: &str = "random";

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NeatFnConfig {
    pub activation: FunctionSelectionConfig,
    pub logging: LoggingConfig,
}

/// Which functions a genome may use for one category
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FunctionSelectionConfig {
    /// Function given to new nodes: a name, a spec string, or `random`
    pub default: String,
    /// Functions mutation may switch a node to (names or spec strings)
    pub options: Vec<String>,
}

impl Default for FunctionSelectionConfig {
    fn default() -> Self {
        Self {
            default: "sigmoid".to_string(),
            options: vec!["sigmoid".to_string()],
        }
    }
}

impl FunctionSelectionConfig {
    pub fn new(default: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            default: default.into(),
            options,
        }
    }

    pub fn is_random_default(&self) -> bool {
        self.default.trim().eq_ignore_ascii_case(RANDOM_CHOICE)
    }
}
