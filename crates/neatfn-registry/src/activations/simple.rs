// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Simple Activation Functions
//!
//! One-input activation functions with no evolved parameters. Inputs to
//! transcendental calls are clamped so every function is total over the
//! finite reals.
//!
//! ```text
//! sigmoid(x)  = 1 / (1 + e^-z),        z = clamp(5x, ±60)
//! tanh(x)     = tanh(z),               z = clamp(2.5x, ±60)
//! gauss(x)    = e^(-5z²),              z = clamp(x, ±3.4)
//! softplus(x) = 0.2 · ln(1 + e^z),     z = clamp(5x, ±60)
//! ```

use super::multiparam::{scaled_expanded_log_activation, scaled_log1p_activation};

/// Bound applied to exponent arguments before `exp`
pub(crate) const EXP_CLAMP: f64 = 60.0;

#[inline]
pub(crate) fn clamp_exponent(z: f64) -> f64 {
    z.clamp(-EXP_CLAMP, EXP_CLAMP)
}

/// Sign used by the odd log-family functions: `+1` for `x >= 0` (and `-0.0`)
#[inline]
pub(crate) fn odd_sign(x: f64) -> f64 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

pub fn sigmoid_activation(x: f64) -> f64 {
    let z = clamp_exponent(5.0 * x);
    1.0 / (1.0 + (-z).exp())
}

pub fn tanh_activation(x: f64) -> f64 {
    clamp_exponent(2.5 * x).tanh()
}

pub fn sin_activation(x: f64) -> f64 {
    clamp_exponent(5.0 * x).sin()
}

pub fn gauss_activation(x: f64) -> f64 {
    let z = x.clamp(-3.4, 3.4);
    (-5.0 * z * z).exp()
}

pub fn relu_activation(x: f64) -> f64 {
    if x > 0.0 {
        x
    } else {
        0.0
    }
}

pub fn softplus_activation(x: f64) -> f64 {
    let z = clamp_exponent(5.0 * x);
    0.2 * z.exp().ln_1p()
}

pub fn identity_activation(x: f64) -> f64 {
    x
}

pub fn clamped_activation(x: f64) -> f64 {
    x.clamp(-1.0, 1.0)
}

/// `1/x`, with `0` wherever the reciprocal is undefined or overflows
pub fn inv_activation(x: f64) -> f64 {
    if x == 0.0 {
        return 0.0;
    }
    let y = 1.0 / x;
    if y.is_finite() {
        y
    } else {
        0.0
    }
}

pub fn log_activation(x: f64) -> f64 {
    x.max(1e-7).ln()
}

/// Odd, base-2 logarithm of `2x`: `±1` at `±1`, zero at `±0.5`, `-13` at zero
pub fn expanded_log_activation(x: f64) -> f64 {
    scaled_expanded_log_activation(x, 1.0)
}

/// Odd `ln(1 + 2|x|)` shifted down by one: `-1` at zero
pub fn skewed_log1p_activation(x: f64) -> f64 {
    odd_sign(x) * ((2.0 * x.abs()).min(f64::MAX).ln_1p() - 1.0)
}

/// Odd `log1p` with a steeper slope near zero
pub fn log1p_activation(x: f64) -> f64 {
    scaled_log1p_activation(x, 0.5)
}

pub fn exp_activation(x: f64) -> f64 {
    clamp_exponent(x).exp()
}

pub fn abs_activation(x: f64) -> f64 {
    x.abs()
}

pub fn hat_activation(x: f64) -> f64 {
    (1.0 - x.abs()).max(0.0)
}

pub fn square_activation(x: f64) -> f64 {
    x * x
}

pub fn cube_activation(x: f64) -> f64 {
    x * x * x
}

/// Builtin simple activations, in registration order
pub const SIMPLE_ACTIVATIONS: &[(&str, fn(f64) -> f64)] = &[
    ("sigmoid", sigmoid_activation),
    ("tanh", tanh_activation),
    ("sin", sin_activation),
    ("gauss", gauss_activation),
    ("relu", relu_activation),
    ("softplus", softplus_activation),
    ("identity", identity_activation),
    ("clamped", clamped_activation),
    ("inv", inv_activation),
    ("log", log_activation),
    ("expanded_log", expanded_log_activation),
    ("skewed_log1p", skewed_log1p_activation),
    ("log1p", log1p_activation),
    ("exp", exp_activation),
    ("abs", abs_activation),
    ("hat", hat_activation),
    ("square", square_activation),
    ("cube", cube_activation),
];
