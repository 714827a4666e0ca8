// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# NeatFn Function Registry

Lets genomes reference activation functions by name, including functions
with **evolved parameters**: per-node scalars that the evolutionary algorithm
mutates like connection weights.

Functions are partitioned by category. Builtins live under [`ACTIVATION`];
any other category key is created by registering into it, and sees none of
the activation names. Every registered function maps a scalar signal to a
scalar, so list-reducing node aggregations are not held here.

## Components

```text
SimpleFunctionLibrary     (category, name) -> f(x)
MultiParameterLibrary     (category, name) -> template f(x, p1..pN) + param specs
spec_parser               "name(v1, v2)" -> FunctionSpec
binder                    template + values -> EvolvedFunction (g(x) = f(x, v1..vN))
FunctionSet               per-category view: is_valid / get / bind / resolve
FunctionRegistry          owns both libraries, populated with builtins
```

## Lifecycle

The registry is built and extended once per configuration session, then
shared read-only. Every read path takes `&self` and is lock-free.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

pub mod activations;
pub mod binder;
pub mod error;
pub mod function_set;
pub mod multiparam_library;
pub mod registry;
pub mod signature;
pub mod simple_library;
pub mod spec_parser;
pub mod template;

pub use binder::EvolvedFunction;
pub use error::{ArityDescription, FunctionError, FunctionResult};
pub use function_set::{FunctionSet, NodeFunction};
pub use multiparam_library::MultiParameterLibrary;
pub use registry::FunctionRegistry;
pub use signature::{positional_arity, validate_arity, validate_identifier, Callable, IntoCallable};
pub use simple_library::{SimpleFunction, SimpleFunctionLibrary};
pub use spec_parser::{parse_function_spec, FunctionSpec};
pub use template::{MultiParamTemplate, ParamSpec};

/// Category key of node activation functions
pub const ACTIVATION: &str = "activation";

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
