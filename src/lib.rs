// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neatfn - Evolvable Function Registry
//!
//! Lets NEAT genomes reference activation functions by name, including
//! functions with evolved parameters that mutate per node like connection
//! weights.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! neatfn = "0.1"  # Default: registry + config + observability
//! ```
//!
//! ## Feature Flags
//!
//! - **`config`** (default): TOML function-selection config (`neatfn-config`)
//! - **`observability`** (default): logging setup (`neatfn-observability`)
//! - **`file-logging`**: JSON log files with rotation
//!
//! ## Usage
//!
//! ```rust
//! use neatfn::prelude::*;
//!
//! let mut registry = FunctionRegistry::new()?;
//! registry.register_activation("plus", |x: f64| (x + 1.0).abs())?;
//!
//! let activations = registry.activations();
//! assert!(activations.is_valid("plus"));
//!
//! // Evolved parameters are bound from a spec string
//! let elu = activations.bind_from_spec("multiparam_elu(0.5, -0.25)")?;
//! assert_eq!(elu.call(1.0), 1.0);
//! assert_eq!(elu.to_string(), "multiparam_elu(0.5, -0.25)");
//! # Ok::<(), FunctionError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: neatfn-registry                            │
//! │  (builtins, templates, spec parser, binder, facade)     │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Infrastructure: neatfn-config, neatfn-observability    │
//! │  (function selection, validation, logging)              │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use neatfn_registry as registry;

// Re-export infrastructure
#[cfg(feature = "config")]
pub use neatfn_config as config;

#[cfg(feature = "observability")]
pub use neatfn_observability as observability;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::registry::{
        parse_function_spec, Callable, EvolvedFunction, FunctionError, FunctionRegistry, FunctionResult,
        FunctionSet, FunctionSpec, IntoCallable, MultiParamTemplate, NodeFunction, ParamSpec, SimpleFunction,
        ACTIVATION,
    };

    #[cfg(feature = "config")]
    pub use crate::config::{load_config, resolve_activation_functions, validate_config, NeatFnConfig};

    #[cfg(feature = "observability")]
    pub use crate::observability::{init_logging, parse_debug_flags, LoggingConfig};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        use crate::prelude::*;
        let registry = FunctionRegistry::new().unwrap();
        assert!(registry.activations().is_valid("sigmoid"));
    }
}
