// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Signature Validation
//!
//! Registered functions carry an explicit, declared arity: the number of
//! positional `f64` inputs they accept (main signal first, then evolved
//! parameters). Closures and fn items get their arity from their compile-time
//! signature through [`IntoCallable`]; slice functions must declare it.
//!
//! ```text
//! |x| ...                  -> Unary       arity 1
//! |x, a| ...               -> Binary      arity 2
//! Callable::declared(3, f) -> Declared    arity 3
//! Callable::variadic(f)    -> Variadic    arity undetermined (rejected)
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::{ArityDescription, FunctionError, FunctionResult};

type NullaryFn = dyn Fn() -> f64 + Send + Sync;
type UnaryFn = dyn Fn(f64) -> f64 + Send + Sync;
type BinaryFn = dyn Fn(f64, f64) -> f64 + Send + Sync;
type TernaryFn = dyn Fn(f64, f64, f64) -> f64 + Send + Sync;
type QuaternaryFn = dyn Fn(f64, f64, f64, f64) -> f64 + Send + Sync;
type SliceFn = dyn Fn(&[f64]) -> f64 + Send + Sync;

/// Largest argument list evaluated without a heap allocation
const INLINE_ARGS: usize = 8;

/// A type-erased numeric function together with its declared arity
#[derive(Clone)]
pub enum Callable {
    Nullary(Arc<NullaryFn>),
    Unary(Arc<UnaryFn>),
    Binary(Arc<BinaryFn>),
    Ternary(Arc<TernaryFn>),
    Quaternary(Arc<QuaternaryFn>),
    /// Slice function with an explicitly declared arity
    Declared { arity: usize, func: Arc<SliceFn> },
    /// Slice function that accepts any number of inputs
    Variadic(Arc<SliceFn>),
}

impl Callable {
    /// Wrap a slice function that declares how many inputs it reads
    pub fn declared<F>(arity: usize, func: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Callable::Declared {
            arity,
            func: Arc::new(func),
        }
    }

    /// Wrap a slice function without a declared arity
    pub fn variadic<F>(func: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Callable::Variadic(Arc::new(func))
    }

    /// Declared arity, or `None` when it cannot be determined
    pub fn arity(&self) -> Option<usize> {
        match self {
            Callable::Nullary(_) => Some(0),
            Callable::Unary(_) => Some(1),
            Callable::Binary(_) => Some(2),
            Callable::Ternary(_) => Some(3),
            Callable::Quaternary(_) => Some(4),
            Callable::Declared { arity, .. } => Some(*arity),
            Callable::Variadic(_) => None,
        }
    }

    /// Evaluate with the main input `x` followed by `params`.
    ///
    /// Callers guarantee `1 + params.len()` matches the arity; the registry
    /// checks this once at registration and bind time.
    pub fn invoke(&self, x: f64, params: &[f64]) -> f64 {
        match self {
            Callable::Nullary(f) => f(),
            Callable::Unary(f) => f(x),
            Callable::Binary(f) => f(x, params[0]),
            Callable::Ternary(f) => f(x, params[0], params[1]),
            Callable::Quaternary(f) => f(x, params[0], params[1], params[2]),
            Callable::Declared { func, .. } | Callable::Variadic(func) => {
                let len = params.len() + 1;
                if len <= INLINE_ARGS {
                    let mut args = [0.0; INLINE_ARGS];
                    args[0] = x;
                    args[1..len].copy_from_slice(params);
                    func(&args[..len])
                } else {
                    let mut args = Vec::with_capacity(len);
                    args.push(x);
                    args.extend_from_slice(params);
                    func(&args)
                }
            }
        }
    }

    /// Narrow to a one-input function, if the arity allows it
    pub(crate) fn into_unary(self) -> Option<Arc<UnaryFn>> {
        match self {
            Callable::Unary(f) => Some(f),
            Callable::Declared { arity: 1, func } => Some(Arc::new(move |x| func(&[x]))),
            _ => None,
        }
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arity() {
            Some(n) => write!(f, "Callable(arity={})", n),
            None => write!(f, "Callable(variadic)"),
        }
    }
}

/// Conversion from closures and fn items into a [`Callable`].
///
/// `Marker` only disambiguates the blanket impls (one per arity); callers
/// never name it. Closures need annotated argument types (`|x: f64| ...`).
pub trait IntoCallable<Marker> {
    fn into_callable(self) -> Callable;
}

impl IntoCallable<Callable> for Callable {
    fn into_callable(self) -> Callable {
        self
    }
}

impl<F> IntoCallable<fn() -> f64> for F
where
    F: Fn() -> f64 + Send + Sync + 'static,
{
    fn into_callable(self) -> Callable {
        Callable::Nullary(Arc::new(self))
    }
}

impl<F> IntoCallable<fn(f64) -> f64> for F
where
    F: Fn(f64) -> f64 + Send + Sync + 'static,
{
    fn into_callable(self) -> Callable {
        Callable::Unary(Arc::new(self))
    }
}

impl<F> IntoCallable<fn(f64, f64) -> f64> for F
where
    F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
{
    fn into_callable(self) -> Callable {
        Callable::Binary(Arc::new(self))
    }
}

impl<F> IntoCallable<fn(f64, f64, f64) -> f64> for F
where
    F: Fn(f64, f64, f64) -> f64 + Send + Sync + 'static,
{
    fn into_callable(self) -> Callable {
        Callable::Ternary(Arc::new(self))
    }
}

impl<F> IntoCallable<fn(f64, f64, f64, f64) -> f64> for F
where
    F: Fn(f64, f64, f64, f64) -> f64 + Send + Sync + 'static,
{
    fn into_callable(self) -> Callable {
        Callable::Quaternary(Arc::new(self))
    }
}

/// Report the positional arity of a callable.
///
/// # Errors
/// `InvalidSignature` when the callable does not declare its arity.
pub fn positional_arity(name: &str, callable: &Callable) -> FunctionResult<usize> {
    callable.arity().ok_or_else(|| FunctionError::InvalidSignature {
        name: name.to_string(),
        expected: 1,
        actual: ArityDescription::Undetermined,
    })
}

/// Check that `callable` accepts exactly `expected` positional inputs
pub fn validate_arity(name: &str, callable: &Callable, expected: usize) -> FunctionResult<()> {
    let actual = callable.arity().ok_or_else(|| FunctionError::InvalidSignature {
        name: name.to_string(),
        expected,
        actual: ArityDescription::Undetermined,
    })?;
    if actual != expected {
        return Err(FunctionError::InvalidSignature {
            name: name.to_string(),
            expected,
            actual: ArityDescription::Accepts(actual),
        });
    }
    Ok(())
}

/// Check that `name` is an identifier token: `[A-Za-z_][A-Za-z0-9_]*`
pub fn validate_identifier(name: &str) -> FunctionResult<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(FunctionError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}
