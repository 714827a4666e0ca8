// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Checks every configured function name or spec against a registry, and
//! resolves the validated selection into ready-to-call node functions.

use neatfn_observability::is_valid_level;
use neatfn_registry::{parse_function_spec, FunctionRegistry, FunctionSet, NodeFunction};
use tracing::debug;

use crate::{ConfigError, ConfigResult, FunctionSelectionConfig, NeatFnConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    EmptyOptions { section: String },
    InvalidFunction { section: String, spec: String, reason: String },
    DefaultNotInOptions { section: String, default: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyOptions { section } => {
                write!(f, "{}.options must list at least one function", section)
            }
            Self::InvalidFunction { section, spec, reason } => {
                write!(f, "Invalid {} function '{}': {}", section, spec, reason)
            }
            Self::DefaultNotInOptions { section, default } => {
                write!(
                    f,
                    "{}.default '{}' is neither 'random' nor one of {}.options",
                    section, default, section
                )
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Functions resolved from one selection section
#[derive(Debug, Clone)]
pub struct ResolvedFunctions {
    /// `None` when the default is `random`
    pub default: Option<NodeFunction>,
    pub options: Vec<NodeFunction>,
}

/// Validate the complete configuration
///
/// Checks for:
/// - Non-empty option lists
/// - Option and default specs that parse and resolve in the registry
/// - A default that is `random` or one of the options
/// - A known log level
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &NeatFnConfig, registry: &FunctionRegistry) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_selection(&config.activation, &registry.activations(), &mut errors);
    validate_logging(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

/// Validate `config`, then resolve the activation selection
///
/// # Errors
///
/// Any error from [`validate_config`].
pub fn resolve_activation_functions(
    config: &NeatFnConfig,
    registry: &FunctionRegistry,
) -> ConfigResult<ResolvedFunctions> {
    validate_config(config, registry)?;
    let resolved = resolve_selection(&config.activation, &registry.activations())?;
    debug!(
        target: "neatfn-config",
        "Resolved {} activation option(s), default {}",
        resolved.options.len(),
        resolved
            .default
            .as_ref()
            .map_or_else(|| "random".to_string(), ToString::to_string)
    );
    Ok(resolved)
}

fn resolve_selection(selection: &FunctionSelectionConfig, set: &FunctionSet<'_>) -> ConfigResult<ResolvedFunctions> {
    let options = selection
        .options
        .iter()
        .map(|spec| set.resolve(spec))
        .collect::<Result<Vec<_>, _>>()?;

    let default = if selection.is_random_default() {
        None
    } else {
        Some(set.resolve(&selection.default)?)
    };

    Ok(ResolvedFunctions { default, options })
}

fn validate_selection(
    selection: &FunctionSelectionConfig,
    set: &FunctionSet<'_>,
    errors: &mut Vec<ConfigValidationError>,
) {
    let section = set.category();

    if selection.options.is_empty() {
        errors.push(ConfigValidationError::EmptyOptions {
            section: section.to_string(),
        });
    }

    for spec in &selection.options {
        if let Err(e) = set.resolve(spec) {
            errors.push(ConfigValidationError::InvalidFunction {
                section: section.to_string(),
                spec: spec.clone(),
                reason: e.to_string(),
            });
        }
    }

    if selection.is_random_default() {
        return;
    }

    let default = match parse_function_spec(&selection.default) {
        Ok(parsed) => parsed,
        Err(e) => {
            errors.push(ConfigValidationError::InvalidFunction {
                section: section.to_string(),
                spec: selection.default.clone(),
                reason: e.to_string(),
            });
            return;
        }
    };

    let listed = selection
        .options
        .iter()
        .filter_map(|spec| parse_function_spec(spec).ok())
        .any(|option| option == default);
    if !listed {
        errors.push(ConfigValidationError::DefaultNotInOptions {
            section: section.to_string(),
            default: selection.default.clone(),
        });
    }
}

fn validate_logging(config: &NeatFnConfig, errors: &mut Vec<ConfigValidationError>) {
    if !is_valid_level(&config.logging.level) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("'{}' is not one of trace, debug, info, warn, error", config.logging.level),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(default: &str, options: &[&str]) -> NeatFnConfig {
        NeatFnConfig {
            activation: FunctionSelectionConfig::new(default, options.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }

    fn messages(result: ConfigResult<()>) -> String {
        match result {
            Err(ConfigError::ValidationError(message)) => message,
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let registry = FunctionRegistry::new().unwrap();
        assert!(validate_config(&NeatFnConfig::default(), &registry).is_ok());
    }

    #[test]
    fn test_spec_options_are_valid() {
        let registry = FunctionRegistry::new().unwrap();
        let config = config(
            "multiparam_relu( 0.5 )",
            &["sigmoid", "multiparam_relu(0.5)", "multiparam_elu", "clamped_tanh_step(-1)"],
        );
        assert!(validate_config(&config, &registry).is_ok());
    }

    #[test]
    fn test_unknown_and_malformed_options() {
        let registry = FunctionRegistry::new().unwrap();
        let config = config("random", &["sigmoid", "foo", "multiparam_relu(0.5, 0.5)", "relu("]);
        let message = messages(validate_config(&config, &registry));
        assert!(message.contains("'foo'"));
        assert!(message.contains("takes 1 evolved parameter(s), got 2"));
        assert!(message.contains("Malformed function spec 'relu('"));
        assert_eq!(message.lines().count(), 4);
    }

    #[test]
    fn test_empty_options() {
        let registry = FunctionRegistry::new().unwrap();
        let message = messages(validate_config(&config("random", &[]), &registry));
        assert!(message.contains("activation.options must list at least one function"));
    }

    #[test]
    fn test_default_not_in_options() {
        let registry = FunctionRegistry::new().unwrap();
        let message = messages(validate_config(&config("tanh", &["sigmoid"]), &registry));
        assert!(message.contains("activation.default 'tanh'"));

        let message = messages(validate_config(&config("multiparam_relu(0.1)", &["multiparam_relu(0.2)"]), &registry));
        assert!(message.contains("is neither 'random'"));
    }

    #[test]
    fn test_invalid_log_level() {
        let registry = FunctionRegistry::new().unwrap();
        let mut config = NeatFnConfig::default();
        config.logging.level = "chatty".to_string();
        let message = messages(validate_config(&config, &registry));
        assert!(message.contains("logging.level"));
    }

    #[test]
    fn test_user_registered_function_validates() {
        let mut registry = FunctionRegistry::new().unwrap();
        registry.register_activation("plus", |x: f64| (x + 1.0).abs()).unwrap();
        assert!(validate_config(&config("plus", &["plus"]), &registry).is_ok());
    }

    #[test]
    fn test_resolve_activation_functions() {
        let registry = FunctionRegistry::new().unwrap();
        let config = config("multiparam_relu(-1)", &["relu", "multiparam_relu(-1)"]);
        let resolved = resolve_activation_functions(&config, &registry).unwrap();

        assert_eq!(resolved.options.len(), 2);
        assert!(!resolved.options[0].is_evolved());
        assert!(resolved.options[1].is_evolved());

        let default = resolved.default.unwrap();
        assert_eq!(default.call(-2.0), 2.0);
    }

    #[test]
    fn test_resolve_random_default() {
        let registry = FunctionRegistry::new().unwrap();
        let resolved = resolve_activation_functions(&config("random", &["tanh"]), &registry).unwrap();
        assert!(resolved.default.is_none());
        assert_eq!(resolved.options[0].call(0.0), 0.0);
    }

    #[test]
    fn test_resolve_rejects_invalid_config() {
        let registry = FunctionRegistry::new().unwrap();
        let result = resolve_activation_functions(&config("random", &["foo"]), &registry);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
