// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Builtin Activation Functions
//!
//! Numeric definitions of every builtin activation. Genomes depend on these
//! producing reproducible outputs, so their constants are part of the
//! registry contract.
//!
//! ## Adding a New Builtin
//!
//! 1. Add the function to `simple.rs` or `multiparam.rs`
//! 2. Add it to `SIMPLE_ACTIVATIONS` or `MULTIPARAM_ACTIVATIONS`
//! 3. Add tests with literal values

pub mod multiparam;
pub mod simple;

pub use multiparam::*;
pub use simple::*;
