// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Multi-parameter function templates.

A template is the immutable description of an evolvable function: the
underlying callable plus the metadata of each evolved parameter. Bounds are
carried for the mutation operator and are not enforced here.
*/

use serde::{Deserialize, Serialize};

use crate::error::{FunctionError, FunctionResult};
use crate::signature::Callable;

/// Metadata for one evolved parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub min_value: f64,
    pub max_value: f64,
    /// Placeholder value used when a template is bound without explicit values
    pub default_value: f64,
}

impl ParamSpec {
    /// Create a spec whose default is the midpoint of its bounds
    pub fn new(name: impl Into<String>, min_value: f64, max_value: f64) -> Self {
        Self::with_default(name, min_value, max_value, (min_value + max_value) / 2.0)
    }

    pub fn with_default(
        name: impl Into<String>,
        min_value: f64,
        max_value: f64,
        default_value: f64,
    ) -> Self {
        Self {
            name: name.into(),
            min_value,
            max_value,
            default_value,
        }
    }

    pub(crate) fn validate(&self, function: &str) -> FunctionResult<()> {
        let invalid = |reason: String| FunctionError::InvalidParamSpec {
            name: function.to_string(),
            reason,
        };

        if !(self.min_value.is_finite() && self.max_value.is_finite() && self.default_value.is_finite()) {
            return Err(invalid(format!("parameter '{}' has a non-finite bound or default", self.name)));
        }
        if self.min_value > self.max_value {
            return Err(invalid(format!(
                "parameter '{}' has min_value {} > max_value {}",
                self.name, self.min_value, self.max_value
            )));
        }
        if self.default_value < self.min_value || self.default_value > self.max_value {
            return Err(invalid(format!(
                "parameter '{}' default {} is outside [{}, {}]",
                self.name, self.default_value, self.min_value, self.max_value
            )));
        }
        Ok(())
    }
}

/// Immutable, named description of a multi-parameter function
#[derive(Debug, Clone)]
pub struct MultiParamTemplate {
    name: String,
    category: String,
    param_specs: Vec<ParamSpec>,
    callable: Callable,
}

impl MultiParamTemplate {
    /// Build a template. Arity and spec validation happen in the library.
    pub(crate) fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        callable: Callable,
        param_specs: Vec<ParamSpec>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            param_specs,
            callable,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn evolved_param_count(&self) -> usize {
        self.param_specs.len()
    }

    pub fn param_specs(&self) -> &[ParamSpec] {
        &self.param_specs
    }

    /// Names of the evolved parameters, in call order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.param_specs.iter().map(|spec| spec.name.as_str())
    }

    /// Default value of every evolved parameter, in call order
    pub fn default_values(&self) -> Vec<f64> {
        self.param_specs.iter().map(|spec| spec.default_value).collect()
    }

    /// Positional arity of the underlying callable: main input plus parameters
    pub fn positional_arity(&self) -> usize {
        1 + self.evolved_param_count()
    }

    pub fn callable(&self) -> &Callable {
        &self.callable
    }

    /// Evaluate the underlying function at `(x, params...)`.
    ///
    /// # Errors
    /// `ParameterCountMismatch` if `params.len()` differs from the evolved
    /// parameter count.
    pub fn evaluate(&self, x: f64, params: &[f64]) -> FunctionResult<f64> {
        if params.len() != self.evolved_param_count() {
            return Err(FunctionError::ParameterCountMismatch {
                name: self.name.clone(),
                expected: self.evolved_param_count(),
                actual: params.len(),
            });
        }
        Ok(self.callable.invoke(x, params))
    }
}
