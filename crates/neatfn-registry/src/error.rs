// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Error types for function registration, lookup and binding.

Every failure is raised synchronously at the call that triggered it. The
registry never retries and never falls back to another function.
*/

use thiserror::Error;

/// Result type for registry operations
pub type FunctionResult<T> = Result<T, FunctionError>;

/// Error types for registry operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FunctionError {
    /// Registration key is not a valid name token (e.g. `1.0`)
    #[error("Invalid function name '{name}': expected an identifier ([A-Za-z_][A-Za-z0-9_]*)")]
    InvalidIdentifier { name: String },

    /// Callable accepts the wrong number of positional inputs
    #[error("Invalid signature for '{name}': expected {expected} positional input(s), {actual}")]
    InvalidSignature {
        name: String,
        expected: usize,
        actual: ArityDescription,
    },

    #[error("Unknown {category} function: '{name}'")]
    UnknownFunction { category: String, name: String },

    #[error("Function '{name}' takes {expected} evolved parameter(s), got {actual}")]
    ParameterCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Malformed function spec '{spec}': {reason}")]
    MalformedSpec { spec: String, reason: String },

    #[error("Duplicate {category} function: '{name}' is already registered")]
    DuplicateFunction { category: String, name: String },

    #[error("Invalid parameter spec for '{name}': {reason}")]
    InvalidParamSpec { name: String, reason: String },

    #[error("Invalid value {value} for evolved parameter {index} of '{name}': must be finite")]
    InvalidParameterValue {
        name: String,
        index: usize,
        value: f64,
    },
}

/// What the validator found when it introspected a rejected callable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArityDescription {
    Accepts(usize),
    Undetermined,
}

impl std::fmt::Display for ArityDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArityDescription::Accepts(n) => write!(f, "callable accepts {}", n),
            ArityDescription::Undetermined => write!(f, "callable arity cannot be determined"),
        }
    }
}

impl FunctionError {
    /// True for failures caused by a name that resolves to nothing
    pub fn is_lookup_error(&self) -> bool {
        matches!(self, FunctionError::UnknownFunction { .. })
    }

    /// True for failures caused by a callable or parameter list of the wrong shape
    pub fn is_signature_error(&self) -> bool {
        matches!(
            self,
            FunctionError::InvalidSignature { .. } | FunctionError::ParameterCountMismatch { .. }
        )
    }

    pub(crate) fn malformed(spec: &str, reason: impl Into<String>) -> Self {
        FunctionError::MalformedSpec {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown(category: &str, name: &str) -> Self {
        FunctionError::UnknownFunction {
            category: category.to_string(),
            name: name.to_string(),
        }
    }
}
