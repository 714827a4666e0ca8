// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Binding of multi-parameter templates to concrete parameter values.

A bound [`EvolvedFunction`] is what a genome node carries: it is
immutable, cheap to clone, and behaves as a one-input function.
*/

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{FunctionError, FunctionResult};
use crate::multiparam_library::MultiParameterLibrary;
use crate::spec_parser::{parse_function_spec, write_spec, FunctionSpec};
use crate::template::MultiParamTemplate;

/// A template paired with one value per evolved parameter
#[derive(Debug, Clone)]
pub struct EvolvedFunction {
    template: Arc<MultiParamTemplate>,
    params: Vec<f64>,
}

impl EvolvedFunction {
    /// Pair `template` with `params`.
    ///
    /// # Errors
    /// - `ParameterCountMismatch` if `params.len()` differs from the template's count
    /// - `InvalidParameterValue` if a value is NaN or infinite
    pub fn new(template: Arc<MultiParamTemplate>, params: Vec<f64>) -> FunctionResult<Self> {
        if params.len() != template.evolved_param_count() {
            return Err(FunctionError::ParameterCountMismatch {
                name: template.name().to_string(),
                expected: template.evolved_param_count(),
                actual: params.len(),
            });
        }
        if let Some((index, &value)) = params.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(FunctionError::InvalidParameterValue {
                name: template.name().to_string(),
                index,
                value,
            });
        }
        Ok(Self { template, params })
    }

    /// Pair `template` with its declared default values
    pub fn with_defaults(template: Arc<MultiParamTemplate>) -> Self {
        let params = template.default_values();
        Self { template, params }
    }

    /// Evaluate at `x` with the bound parameter values
    #[inline]
    pub fn call(&self, x: f64) -> f64 {
        self.template.callable().invoke(x, &self.params)
    }

    pub fn name(&self) -> &str {
        self.template.name()
    }

    pub fn template(&self) -> &Arc<MultiParamTemplate> {
        &self.template
    }

    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Arity of the underlying template, not of the bound call
    pub fn positional_arity(&self) -> usize {
        self.template.positional_arity()
    }

    /// Same function with different parameter values
    pub fn with_params(&self, params: Vec<f64>) -> FunctionResult<Self> {
        Self::new(Arc::clone(&self.template), params)
    }

    pub fn to_spec(&self) -> FunctionSpec {
        FunctionSpec::new(self.template.name(), self.params.clone())
    }
}

impl PartialEq for EvolvedFunction {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.template, &other.template) && self.params == other.params
    }
}

impl fmt::Display for EvolvedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_spec(f, self.template.name(), &self.params)
    }
}

/// Bind `(category, name)` to its default parameter values.
///
/// # Errors
/// `UnknownFunction` if no template is registered under the name.
pub fn bind(library: &MultiParameterLibrary, category: &str, name: &str) -> FunctionResult<EvolvedFunction> {
    let template = library.get_template(category, name)?;
    Ok(EvolvedFunction::with_defaults(Arc::clone(template)))
}

/// Bind `(category, name)` to explicit parameter values
pub fn bind_with_values(
    library: &MultiParameterLibrary,
    category: &str,
    name: &str,
    values: Vec<f64>,
) -> FunctionResult<EvolvedFunction> {
    let template = library.get_template(category, name)?;
    EvolvedFunction::new(Arc::clone(template), values)
}

/// Parse `spec` and bind the named template.
///
/// A bare name (or one whose values are omitted) uses the template's
/// defaults.
///
/// # Errors
/// - `MalformedSpec` if the spec does not parse
/// - `UnknownFunction` if the name has no template in `category`
/// - `ParameterCountMismatch` if a non-empty value list has the wrong length
pub fn bind_from_spec(library: &MultiParameterLibrary, category: &str, spec: &str) -> FunctionResult<EvolvedFunction> {
    let parsed = parse_function_spec(spec)?;
    let template = library.get_template(category, &parsed.name)?;

    let bound = if parsed.is_bare() {
        EvolvedFunction::with_defaults(Arc::clone(template))
    } else {
        EvolvedFunction::new(Arc::clone(template), parsed.values)?
    };

    debug!(target: "neatfn-registry", "Bound {} function {}", category, bound);
    Ok(bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::ParamSpec;
    use crate::ACTIVATION;

    fn library() -> MultiParameterLibrary {
        MultiParameterLibrary::with_builtins().unwrap()
    }

    #[test]
    fn test_bind_defaults() {
        let library = library();
        let relu = bind(&library, ACTIVATION, "multiparam_relu").unwrap();
        assert_eq!(relu.params(), &[0.0]);
        assert_eq!(relu.call(-2.0), 0.0);
        assert_eq!(relu.positional_arity(), 2);

        let elu = bind(&library, ACTIVATION, "multiparam_elu").unwrap();
        assert_eq!(elu.params().len(), 2);
    }

    #[test]
    fn test_bind_with_values() {
        let library = library();
        let relu = bind_with_values(&library, ACTIVATION, "multiparam_relu", vec![-1.0]).unwrap();
        assert_eq!(relu.call(-1.0), 1.0);
        assert_eq!(relu.call(1.0), 1.0);

        let err = bind_with_values(&library, ACTIVATION, "multiparam_relu", vec![]).unwrap_err();
        assert_eq!(
            err,
            FunctionError::ParameterCountMismatch {
                name: "multiparam_relu".to_string(),
                expected: 1,
                actual: 0,
            }
        );

        let err = bind_with_values(&library, ACTIVATION, "multiparam_relu", vec![f64::NAN]).unwrap_err();
        assert!(matches!(err, FunctionError::InvalidParameterValue { index: 0, .. }));
    }

    #[test]
    fn test_bind_from_spec() {
        let library = library();
        let f = bind_from_spec(&library, ACTIVATION, "clamped_tanh_step(-1)").unwrap();
        assert_eq!(f.call(0.5), 1.0);
        assert_eq!(f.to_string(), "clamped_tanh_step(-1.0)");

        let f = bind_from_spec(&library, ACTIVATION, "multiparam_sigmoid").unwrap();
        assert_eq!(f.call(0.0), 0.5);
    }

    #[test]
    fn test_bind_from_spec_errors() {
        let library = library();

        let err = bind_from_spec(&library, ACTIVATION, "foo(0.5)").unwrap_err();
        assert!(err.is_lookup_error());

        let err = bind_from_spec(&library, ACTIVATION, "multiparam_relu(0.5,0.5,0.5)").unwrap_err();
        assert_eq!(
            err,
            FunctionError::ParameterCountMismatch {
                name: "multiparam_relu".to_string(),
                expected: 1,
                actual: 3,
            }
        );

        let err = bind_from_spec(&library, ACTIVATION, "multiparam_relu(").unwrap_err();
        assert!(matches!(err, FunctionError::MalformedSpec { .. }));

        let err = bind_from_spec(&library, ACTIVATION, "multi)param_relu(0.5)").unwrap_err();
        assert!(matches!(err, FunctionError::MalformedSpec { .. }));

        let err = bind_from_spec(&library, "output", "multiparam_relu(0.5)").unwrap_err();
        assert!(err.is_lookup_error());
    }

    #[test]
    fn test_two_parameter_round_trip() {
        let mut library = MultiParameterLibrary::new();
        let kernel = |x: f64, a: f64, b: f64| a * x + b;
        library
            .register_template(
                ACTIVATION,
                "affine",
                kernel,
                2,
                vec![ParamSpec::new("a", -2.0, 2.0), ParamSpec::new("b", -1.0, 1.0)],
            )
            .unwrap();

        let bound = bind_from_spec(&library, ACTIVATION, "affine(1.5, -0.25)").unwrap();
        for x in [-2.0, 0.0, 0.75, 3.0] {
            assert_eq!(bound.call(x), kernel(x, 1.5, -0.25));
        }

        let reparsed = bind_from_spec(&library, ACTIVATION, &bound.to_string()).unwrap();
        assert_eq!(reparsed, bound);
    }

    #[test]
    fn test_with_params_shares_template() {
        let library = library();
        let base = bind(&library, ACTIVATION, "hat_gauss").unwrap();
        let moved = base.with_params(vec![1.0]).unwrap();
        assert!(Arc::ptr_eq(base.template(), moved.template()));
        assert_ne!(base, moved);
        assert_eq!(moved.call(0.5), 0.5);
        assert_eq!(moved.to_spec(), FunctionSpec::new("hat_gauss", vec![1.0]));
    }
}
