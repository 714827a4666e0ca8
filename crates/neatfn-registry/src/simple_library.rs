// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Library of one-input functions without evolved parameters.

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use tracing::{debug, warn};

use crate::activations::SIMPLE_ACTIVATIONS;
use crate::error::{ArityDescription, FunctionError, FunctionResult};
use crate::signature::{positional_arity, validate_identifier, IntoCallable};
use crate::ACTIVATION;

type ScalarFn = dyn Fn(f64) -> f64 + Send + Sync;

/// A named one-input function
#[derive(Clone)]
pub struct SimpleFunction {
    name: Arc<str>,
    func: Arc<ScalarFn>,
}

impl SimpleFunction {
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn call(&self, x: f64) -> f64 {
        (self.func)(x)
    }
}

impl fmt::Debug for SimpleFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleFunction").field("name", &self.name).finish()
    }
}

impl fmt::Display for SimpleFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

type CategoryFunctions = AHashMap<String, SimpleFunction>;

/// Mapping (category, name) -> one-input function
#[derive(Debug, Clone, Default)]
pub struct SimpleFunctionLibrary {
    categories: AHashMap<String, CategoryFunctions>,
}

impl SimpleFunctionLibrary {
    /// Empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Library holding every builtin simple activation
    pub fn with_builtins() -> Self {
        let mut library = Self::new();
        for &(name, func) in SIMPLE_ACTIVATIONS {
            library.insert(ACTIVATION, name, Arc::new(func));
        }
        library
    }

    pub fn get(&self, category: &str, name: &str) -> Option<&SimpleFunction> {
        self.categories.get(category).and_then(|functions| functions.get(name))
    }

    pub fn is_valid(&self, category: &str, name: &str) -> bool {
        self.get(category, name).is_some()
    }

    /// Register a one-input function under `(category, name)`.
    ///
    /// Re-registering an existing name in the same category replaces it.
    ///
    /// # Errors
    /// - `InvalidIdentifier` if `name` is not an identifier token
    /// - `InvalidSignature` if the function does not take exactly one input
    pub fn register<M>(&mut self, category: &str, name: &str, func: impl IntoCallable<M>) -> FunctionResult<()> {
        validate_identifier(name)?;

        let callable = func.into_callable();
        let arity = positional_arity(name, &callable)?;
        let unary = callable
            .into_unary()
            .ok_or_else(|| FunctionError::InvalidSignature {
                name: name.to_string(),
                expected: 1,
                actual: ArityDescription::Accepts(arity),
            })?;

        if self.insert(category, name, unary).is_some() {
            warn!(target: "neatfn-registry", "Replaced simple {} function '{}'", category, name);
        } else {
            debug!(target: "neatfn-registry", "Registered simple {} function '{}'", category, name);
        }
        Ok(())
    }

    /// Names registered in `category`, sorted
    pub fn names(&self, category: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .categories
            .get(category)
            .map(|functions| functions.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    /// Categories with at least one function, sorted
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.categories.keys().map(String::as_str).collect();
        categories.sort_unstable();
        categories
    }

    /// Number of functions across every category
    pub fn len(&self) -> usize {
        self.categories.values().map(|functions| functions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&mut self, category: &str, name: &str, func: Arc<ScalarFn>) -> Option<SimpleFunction> {
        let entry = SimpleFunction {
            name: Arc::from(name),
            func,
        };
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(name.to_string(), entry)
    }
}
