// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Multi-parameter function templates, partitioned by category.

Categories are open string keys created on first registration; the same
name may exist independently in two categories.
*/

use std::sync::Arc;

use ahash::AHashMap;
use tracing::debug;

use crate::activations::{Kernel, MULTIPARAM_ACTIVATIONS};
use crate::error::{FunctionError, FunctionResult};
use crate::signature::{validate_arity, validate_identifier, IntoCallable};
use crate::template::{MultiParamTemplate, ParamSpec};
use crate::ACTIVATION;

type CategoryTemplates = AHashMap<String, Arc<MultiParamTemplate>>;

/// Mapping (category, name) -> template
#[derive(Debug, Clone, Default)]
pub struct MultiParameterLibrary {
    categories: AHashMap<String, CategoryTemplates>,
}

impl MultiParameterLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library holding every builtin multi-parameter activation
    pub fn with_builtins() -> FunctionResult<Self> {
        let mut library = Self::new();
        for builtin in MULTIPARAM_ACTIVATIONS {
            let specs = builtin.param_specs();
            let count = specs.len();
            match builtin.kernel {
                Kernel::One(f) => library.register_template(ACTIVATION, builtin.name, f, count, specs)?,
                Kernel::Two(f) => library.register_template(ACTIVATION, builtin.name, f, count, specs)?,
            };
        }
        Ok(library)
    }

    /// Register a template under `(category, name)`.
    ///
    /// Checks run in order: identifier, arity (`1 + evolved_param_count`),
    /// parameter specs, uniqueness.
    ///
    /// # Errors
    /// - `InvalidIdentifier` if `name` is not an identifier token
    /// - `InvalidSignature` if the callable's arity is not `1 + evolved_param_count`
    /// - `InvalidParamSpec` if the specs do not describe `evolved_param_count` parameters
    /// - `DuplicateFunction` if the name is already taken in `category`
    pub fn register_template<M>(
        &mut self,
        category: &str,
        name: &str,
        func: impl IntoCallable<M>,
        evolved_param_count: usize,
        param_specs: Vec<ParamSpec>,
    ) -> FunctionResult<Arc<MultiParamTemplate>> {
        validate_identifier(name)?;

        let callable = func.into_callable();
        validate_arity(name, &callable, 1 + evolved_param_count)?;

        if param_specs.len() != evolved_param_count {
            return Err(FunctionError::InvalidParamSpec {
                name: name.to_string(),
                reason: format!(
                    "{} parameter spec(s) given for {} evolved parameter(s)",
                    param_specs.len(),
                    evolved_param_count
                ),
            });
        }
        for spec in &param_specs {
            spec.validate(name)?;
        }

        if self.is_valid(category, name) {
            return Err(FunctionError::DuplicateFunction {
                category: category.to_string(),
                name: name.to_string(),
            });
        }

        let template = Arc::new(MultiParamTemplate::new(name, category, callable, param_specs));
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(name.to_string(), Arc::clone(&template));

        debug!(
            target: "neatfn-registry",
            "Registered {} template '{}' with {} evolved parameter(s)",
            category,
            name,
            evolved_param_count
        );
        Ok(template)
    }

    /// Look up a template.
    ///
    /// # Errors
    /// `UnknownFunction` if nothing is registered under `(category, name)`.
    pub fn get_template(&self, category: &str, name: &str) -> FunctionResult<&Arc<MultiParamTemplate>> {
        self.categories
            .get(category)
            .and_then(|templates| templates.get(name))
            .ok_or_else(|| FunctionError::unknown(category, name))
    }

    pub fn is_valid(&self, category: &str, name: &str) -> bool {
        self.categories
            .get(category)
            .is_some_and(|templates| templates.contains_key(name))
    }

    /// Template names in `category`, sorted
    pub fn names(&self, category: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .categories
            .get(category)
            .map(|templates| templates.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    /// Categories with at least one template, sorted
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.categories.keys().map(String::as_str).collect();
        categories.sort_unstable();
        categories
    }
}
