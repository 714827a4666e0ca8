// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Function Spec Parser
//!
//! Parses the textual form genomes use to reference a function:
//!
//! ```text
//! spec := name | name '(' number (',' number)* ')'
//! ```
//!
//! Whitespace around the spec and around tokens is ignored. The parser is
//! purely syntactic; it never checks whether the name is registered.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FunctionError, FunctionResult};

/// A parsed function reference: name plus evolved-parameter values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub name: String,
    #[serde(default)]
    pub values: Vec<f64>,
}

impl FunctionSpec {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// True for a bare name with no parameter list
    pub fn is_bare(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for FunctionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_spec(f, &self.name, &self.values)
    }
}

impl FromStr for FunctionSpec {
    type Err = FunctionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_function_spec(s)
    }
}

/// Render `name` or `name(v1, v2, ...)`; shared with bound instances
pub(crate) fn write_spec(f: &mut fmt::Formatter<'_>, name: &str, values: &[f64]) -> fmt::Result {
    f.write_str(name)?;
    if values.is_empty() {
        return Ok(());
    }
    f.write_str("(")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        // `{:?}` keeps the shortest repr that parses back to the same f64
        write!(f, "{:?}", value)?;
    }
    f.write_str(")")
}

/// Parse `name` or `name(v1, v2, ...)`.
///
/// # Errors
/// `MalformedSpec` for an empty spec or name, unbalanced, nested or
/// trailing parentheses, an empty value list, or a value that is not a
/// finite number.
pub fn parse_function_spec(spec: &str) -> FunctionResult<FunctionSpec> {
    let trimmed = spec.trim();
    if trimmed.is_empty() {
        return Err(FunctionError::malformed(spec, "empty spec"));
    }

    let Some(open) = trimmed.find('(') else {
        if trimmed.contains(')') {
            return Err(FunctionError::malformed(spec, "unbalanced parentheses"));
        }
        if trimmed.contains(',') {
            return Err(FunctionError::malformed(spec, "values must be inside parentheses"));
        }
        return Ok(FunctionSpec::new(trimmed, Vec::new()));
    };

    let name = trimmed[..open].trim_end();
    if name.is_empty() {
        return Err(FunctionError::malformed(spec, "missing function name"));
    }
    if name.contains(')') {
        return Err(FunctionError::malformed(spec, "unbalanced parentheses"));
    }
    if name.contains(',') {
        return Err(FunctionError::malformed(spec, "function name contains ','"));
    }

    let rest = &trimmed[open + 1..];
    let Some(close) = rest.find(')') else {
        return Err(FunctionError::malformed(spec, "unbalanced parentheses"));
    };
    let body = &rest[..close];
    if body.contains('(') {
        return Err(FunctionError::malformed(spec, "nested parentheses"));
    }
    if !rest[close + 1..].is_empty() {
        return Err(FunctionError::malformed(spec, "unexpected text after ')'"));
    }
    if body.trim().is_empty() {
        return Err(FunctionError::malformed(spec, "empty parameter list"));
    }

    let values = body
        .split(',')
        .map(|token| parse_value(spec, token.trim()))
        .collect::<FunctionResult<Vec<f64>>>()?;

    Ok(FunctionSpec::new(name, values))
}

fn parse_value(spec: &str, token: &str) -> FunctionResult<f64> {
    if token.is_empty() {
        return Err(FunctionError::malformed(spec, "empty parameter value"));
    }
    let value: f64 = token
        .parse()
        .map_err(|_| FunctionError::malformed(spec, format!("'{}' is not a number", token)))?;
    if !value.is_finite() {
        return Err(FunctionError::malformed(spec, format!("'{}' is not a finite number", token)));
    }
    Ok(value)
}
