// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-category view over both libraries.

use std::fmt;
use std::sync::Arc;

use crate::binder::{self, EvolvedFunction};
use crate::error::FunctionResult;
use crate::multiparam_library::MultiParameterLibrary;
use crate::simple_library::{SimpleFunction, SimpleFunctionLibrary};
use crate::spec_parser::parse_function_spec;
use crate::template::MultiParamTemplate;

/// A function ready to be stored on a genome node
#[derive(Debug, Clone)]
pub enum NodeFunction {
    Simple(SimpleFunction),
    Evolved(EvolvedFunction),
}

impl NodeFunction {
    #[inline]
    pub fn call(&self, x: f64) -> f64 {
        match self {
            NodeFunction::Simple(f) => f.call(x),
            NodeFunction::Evolved(f) => f.call(x),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            NodeFunction::Simple(f) => f.name(),
            NodeFunction::Evolved(f) => f.name(),
        }
    }

    pub fn is_evolved(&self) -> bool {
        matches!(self, NodeFunction::Evolved(_))
    }

    pub fn as_evolved(&self) -> Option<&EvolvedFunction> {
        match self {
            NodeFunction::Evolved(f) => Some(f),
            NodeFunction::Simple(_) => None,
        }
    }
}

impl fmt::Display for NodeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeFunction::Simple(func) => fmt::Display::fmt(func, f),
            NodeFunction::Evolved(func) => fmt::Display::fmt(func, f),
        }
    }
}

/// Read view of one category (e.g. the activation function set).
///
/// Both simple functions and templates are scoped to this set's category.
#[derive(Debug, Clone, Copy)]
pub struct FunctionSet<'a> {
    category: &'a str,
    simple: &'a SimpleFunctionLibrary,
    multiparam: &'a MultiParameterLibrary,
}

impl<'a> FunctionSet<'a> {
    pub(crate) fn new(
        category: &'a str,
        simple: &'a SimpleFunctionLibrary,
        multiparam: &'a MultiParameterLibrary,
    ) -> Self {
        Self {
            category,
            simple,
            multiparam,
        }
    }

    pub fn category(&self) -> &'a str {
        self.category
    }

    /// Simple function by name. Bare multi-parameter names return `None`.
    pub fn get(&self, name: &str) -> Option<&'a SimpleFunction> {
        self.simple.get(self.category, name)
    }

    /// True if `name` is a simple function or a template in this category
    pub fn is_valid(&self, name: &str) -> bool {
        self.simple.is_valid(self.category, name) || self.multiparam.is_valid(self.category, name)
    }

    pub fn is_multiparam(&self, name: &str) -> bool {
        self.multiparam.is_valid(self.category, name)
    }

    pub fn get_template(&self, name: &str) -> FunctionResult<&'a Arc<MultiParamTemplate>> {
        self.multiparam.get_template(self.category, name)
    }

    pub fn bind(&self, name: &str) -> FunctionResult<EvolvedFunction> {
        binder::bind(self.multiparam, self.category, name)
    }

    pub fn bind_with_values(&self, name: &str, values: Vec<f64>) -> FunctionResult<EvolvedFunction> {
        binder::bind_with_values(self.multiparam, self.category, name, values)
    }

    pub fn bind_from_spec(&self, spec: &str) -> FunctionResult<EvolvedFunction> {
        binder::bind_from_spec(self.multiparam, self.category, spec)
    }

    /// Resolve a configuration entry to a node function.
    ///
    /// A bare simple name resolves to [`NodeFunction::Simple`]; everything
    /// else is bound as a template.
    pub fn resolve(&self, spec: &str) -> FunctionResult<NodeFunction> {
        let parsed = parse_function_spec(spec)?;
        if parsed.is_bare() {
            if let Some(simple) = self.simple.get(self.category, &parsed.name) {
                return Ok(NodeFunction::Simple(simple.clone()));
            }
        }
        self.bind_from_spec(spec).map(NodeFunction::Evolved)
    }

    /// Every valid name in this set, simple names first, each group sorted
    pub fn names(&self) -> Vec<&'a str> {
        let mut names = self.simple.names(self.category);
        names.extend(self.multiparam.names(self.category));
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FunctionError;
    use crate::template::ParamSpec;
    use crate::ACTIVATION;

    #[test]
    fn test_is_valid_across_libraries() {
        let simple = SimpleFunctionLibrary::with_builtins();
        let multiparam = MultiParameterLibrary::with_builtins().unwrap();
        let set = FunctionSet::new(ACTIVATION, &simple, &multiparam);

        assert!(set.is_valid("sigmoid"));
        assert!(set.is_valid("multiparam_relu"));
        assert!(!set.is_valid("foo"));
        assert!(!set.is_valid("SIGMOID"));
        assert!(set.is_multiparam("hat_gauss"));
        assert!(!set.is_multiparam("hat"));
    }

    #[test]
    fn test_get_does_not_auto_bind() {
        let simple = SimpleFunctionLibrary::with_builtins();
        let multiparam = MultiParameterLibrary::with_builtins().unwrap();
        let set = FunctionSet::new(ACTIVATION, &simple, &multiparam);

        assert!(set.get("tanh").is_some());
        assert!(set.get("multiparam_relu").is_none());
        assert!(set.get("foo").is_none());
    }

    #[test]
    fn test_resolve() {
        let simple = SimpleFunctionLibrary::with_builtins();
        let multiparam = MultiParameterLibrary::with_builtins().unwrap();
        let set = FunctionSet::new(ACTIVATION, &simple, &multiparam);

        let relu = set.resolve("relu").unwrap();
        assert!(!relu.is_evolved());
        assert_eq!(relu.call(-1.0), 0.0);
        assert_eq!(relu.to_string(), "relu");

        let mp = set.resolve(" multiparam_relu(-1) ").unwrap();
        assert!(mp.is_evolved());
        assert_eq!(mp.call(-1.0), 1.0);
        assert_eq!(mp.as_evolved().unwrap().params(), &[-1.0]);

        let bare = set.resolve("multiparam_relu").unwrap();
        assert_eq!(bare.to_string(), "multiparam_relu(0.0)");

        assert!(set.resolve("foo").unwrap_err().is_lookup_error());
        // A simple name with values is not a template
        assert!(matches!(
            set.resolve("relu(0.5)"),
            Err(FunctionError::UnknownFunction { .. })
        ));
    }

    #[test]
    fn test_names() {
        let simple = SimpleFunctionLibrary::with_builtins();
        let multiparam = MultiParameterLibrary::with_builtins().unwrap();
        let set = FunctionSet::new(ACTIVATION, &simple, &multiparam);
        let names = set.names();
        assert_eq!(names.len(), simple.names(ACTIVATION).len() + multiparam.names(ACTIVATION).len());
        assert!(names.iter().all(|name| set.is_valid(name)));
    }

    #[test]
    fn test_other_category_sees_no_activations() {
        let mut simple = SimpleFunctionLibrary::with_builtins();
        let mut multiparam = MultiParameterLibrary::with_builtins().unwrap();
        simple.register("output", "plus", |x: f64| (x + 1.0).abs()).unwrap();
        multiparam
            .register_template("output", "shift", |x: f64, a: f64| x + a, 1, vec![ParamSpec::new("a", -1.0, 1.0)])
            .unwrap();

        let output = FunctionSet::new("output", &simple, &multiparam);
        assert!(!output.is_valid("sigmoid"));
        assert!(output.get("relu").is_none());
        assert!(output.resolve("relu").unwrap_err().is_lookup_error());
        assert_eq!(output.names(), vec!["plus", "shift"]);
        assert!(output.resolve("plus").is_ok());

        let activations = FunctionSet::new(ACTIVATION, &simple, &multiparam);
        assert!(!activations.is_valid("plus"));
        assert!(!activations.is_valid("shift"));
    }
}
