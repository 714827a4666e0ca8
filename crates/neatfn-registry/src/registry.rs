// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Function registry owning both libraries.

Built once per configuration session, extended during setup through
`&mut self`, then shared read-only (it is `Send + Sync`).

# Example
```
use neatfn_registry::{FunctionError, FunctionRegistry};

let mut registry = FunctionRegistry::new()?;
registry.register_activation("double", |x: f64| 2.0 * x)?;

let activations = registry.activations();
assert!(activations.is_valid("double"));
assert!(activations.is_valid("multiparam_relu"));

let relu = activations.bind_from_spec("multiparam_relu(-1)")?;
assert_eq!(relu.call(-2.0), 2.0);
# Ok::<(), FunctionError>(())
```
*/

use std::sync::Arc;

use tracing::info;

use crate::error::FunctionResult;
use crate::function_set::FunctionSet;
use crate::multiparam_library::MultiParameterLibrary;
use crate::signature::IntoCallable;
use crate::simple_library::SimpleFunctionLibrary;
use crate::template::{MultiParamTemplate, ParamSpec};
use crate::ACTIVATION;

/// Owner of every simple function and template
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    simple: SimpleFunctionLibrary,
    multiparam: MultiParameterLibrary,
}

impl FunctionRegistry {
    /// Registry populated with every builtin activation
    ///
    /// # Errors
    /// Any error raised while registering a builtin template.
    pub fn new() -> FunctionResult<Self> {
        let simple = SimpleFunctionLibrary::with_builtins();
        let multiparam = MultiParameterLibrary::with_builtins()?;

        info!(
            target: "neatfn-registry",
            "Function registry initialized: {} simple, {} multi-parameter activation(s)",
            simple.names(ACTIVATION).len(),
            multiparam.names(ACTIVATION).len()
        );
        Ok(Self { simple, multiparam })
    }

    /// Registry without builtins
    pub fn empty() -> Self {
        Self {
            simple: SimpleFunctionLibrary::new(),
            multiparam: MultiParameterLibrary::new(),
        }
    }

    /// Register a one-input function in `category`.
    ///
    /// The name is visible only from that category's function set.
    pub fn register<M>(&mut self, category: &str, name: &str, func: impl IntoCallable<M>) -> FunctionResult<()> {
        self.simple.register(category, name, func)
    }

    pub fn register_activation<M>(&mut self, name: &str, func: impl IntoCallable<M>) -> FunctionResult<()> {
        self.register(ACTIVATION, name, func)
    }

    /// Register a multi-parameter template. See
    /// [`MultiParameterLibrary::register_template`].
    pub fn register_template<M>(
        &mut self,
        category: &str,
        name: &str,
        func: impl IntoCallable<M>,
        evolved_param_count: usize,
        param_specs: Vec<ParamSpec>,
    ) -> FunctionResult<Arc<MultiParamTemplate>> {
        self.multiparam
            .register_template(category, name, func, evolved_param_count, param_specs)
    }

    pub fn function_set<'a>(&'a self, category: &'a str) -> FunctionSet<'a> {
        FunctionSet::new(category, &self.simple, &self.multiparam)
    }

    pub fn activations(&self) -> FunctionSet<'_> {
        self.function_set(ACTIVATION)
    }

    pub fn simple_library(&self) -> &SimpleFunctionLibrary {
        &self.simple
    }

    pub fn multiparam_library(&self) -> &MultiParameterLibrary {
        &self.multiparam
    }
}
