// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Multi-Parameter Activation Functions
//!
//! Activation functions whose shape is controlled by one or two evolved
//! parameters. Most are blends of simple activations, so that the boundary
//! values of a parameter reproduce a named simple function exactly:
//!
//! ```text
//! multiparam_relu(x, a):       a = 1 identity, a = 0 relu, a = -1 abs
//! clamped_tanh_step(x, a):     a = 1 clamped,  a = 0 tanh, a = -1 step
//! hat_gauss(x, a):             a = 1 hat,      a = 0 gauss
//! scaled_expanded_log(x, a):   a = 1 expanded_log
//! scaled_log1p(x, a):          a = 0.5 log1p
//! ```

use super::simple::{
    clamp_exponent, clamped_activation, gauss_activation, hat_activation, odd_sign,
    softplus_activation, tanh_activation,
};
use crate::template::ParamSpec;

/// Floor applied before the base-2 log in `scaled_expanded_log` (log2 = -13)
const EXPANDED_LOG_FLOOR: f64 = 1.0 / 8192.0;

/// Sign step: `1` above zero, `-1` below, `0` at zero
fn step(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// `x` for positive input, `a·x` otherwise
pub fn multiparam_relu_activation(x: f64, a: f64) -> f64 {
    if x > 0.0 {
        x
    } else {
        a * x
    }
}

/// ELU-style negative branch whose depth grows with `a + b`, floored at `x`
pub fn multiparam_elu_activation(x: f64, a: f64, b: f64) -> f64 {
    if x >= 0.0 {
        return x;
    }
    let scale = clamp_exponent(a + b).exp();
    let elu = 0.2 * scale * (clamp_exponent(5.0 * x).exp() - 1.0);
    x.max(elu)
}

/// Blend of a leaky relu (weight `a`) and an ELU branch, both leaking by `b`
pub fn weighted_lu_activation(x: f64, a: f64, b: f64) -> f64 {
    a * multiparam_relu_activation(x, b) + (1.0 - a) * multiparam_elu_activation(x, b, 0.0)
}

/// Blend of a leaky relu (weight `a`) and softplus-to-identity (mixed by `b`)
pub fn multiparam_relu_softplus_activation(x: f64, a: f64, b: f64) -> f64 {
    let relu_part = multiparam_relu_activation(x, b - 1.0);
    let softplus_part = (1.0 - b) * softplus_activation(x) + b * x;
    a * relu_part + (1.0 - a) * softplus_part
}

/// Positive `a` blends toward clamped, negative `a` toward a hard step
pub fn clamped_tanh_step_activation(x: f64, a: f64) -> f64 {
    let tanh = tanh_activation(x);
    if a > 0.0 {
        a * clamped_activation(x) + (1.0 - a) * tanh
    } else {
        -a * step(x) + (1.0 + a) * tanh
    }
}

/// `clamped_tanh_step` rescaled onto `[0, 1]`; `a = 0` is the sigmoid
pub fn multiparam_sigmoid_activation(x: f64, a: f64) -> f64 {
    (1.0 + clamped_tanh_step_activation(x, a)) / 2.0
}

pub fn hat_gauss_activation(x: f64, a: f64) -> f64 {
    a * hat_activation(x) + (1.0 - a) * gauss_activation(x)
}

/// `sgn(x) · 2^(1-a) · log2(|x| · 2^a)`, with the log argument floored at `2^-13`
pub fn scaled_expanded_log_activation(x: f64, a: f64) -> f64 {
    let a = clamp_exponent(a);
    let magnitude = (x.abs() * a.exp2()).clamp(EXPANDED_LOG_FLOOR, f64::MAX);
    odd_sign(x) * (1.0 - a).exp2() * magnitude.log2()
}

/// `sgn(x) · e^(0.5-a) · ln(1 + |x| · e^a)`
pub fn scaled_log1p_activation(x: f64, a: f64) -> f64 {
    let a = clamp_exponent(a);
    let magnitude = (x.abs() * a.exp()).min(f64::MAX);
    odd_sign(x) * (0.5 - a).exp() * magnitude.ln_1p()
}

/// Blend (weight `a`) of `clamped_tanh_step(x, b)` and a log1p family member
/// selected by `b`: toward clamped for `b > 0`, toward `scaled_log1p(x, 2)` below
pub fn multiparam_tanh_log1p_activation(x: f64, a: f64, b: f64) -> f64 {
    let log1p = scaled_log1p_activation(x, 0.5);
    let log_part = if b > 0.0 {
        b * clamped_activation(x) + (1.0 - b) * log1p
    } else {
        -b * scaled_log1p_activation(x, 2.0) + (1.0 + b) * log1p
    };
    a * clamped_tanh_step_activation(x, b) + (1.0 - a) * log_part
}

/// Shape of a builtin multi-parameter function
pub(crate) enum Kernel {
    One(fn(f64, f64) -> f64),
    Two(fn(f64, f64, f64) -> f64),
}

/// Builtin multi-parameter activation definition
pub(crate) struct BuiltinTemplate {
    pub name: &'static str,
    pub kernel: Kernel,
    /// (name, min, max, default) per evolved parameter
    pub params: &'static [(&'static str, f64, f64, f64)],
}

impl BuiltinTemplate {
    pub fn param_specs(&self) -> Vec<ParamSpec> {
        self.params
            .iter()
            .map(|&(name, min, max, default)| ParamSpec::with_default(name, min, max, default))
            .collect()
    }
}

pub(crate) const MULTIPARAM_ACTIVATIONS: &[BuiltinTemplate] = &[
    BuiltinTemplate {
        name: "multiparam_relu",
        kernel: Kernel::One(multiparam_relu_activation),
        params: &[("a", -1.0, 1.0, 0.0)],
    },
    BuiltinTemplate {
        name: "multiparam_elu",
        kernel: Kernel::Two(multiparam_elu_activation),
        params: &[("a", -1.0, 1.0, 0.0), ("b", -1.0, 1.0, 0.0)],
    },
    BuiltinTemplate {
        name: "weighted_lu",
        kernel: Kernel::Two(weighted_lu_activation),
        params: &[("a", 0.0, 1.0, 0.5), ("b", -1.0, 1.0, 0.0)],
    },
    BuiltinTemplate {
        name: "multiparam_relu_softplus",
        kernel: Kernel::Two(multiparam_relu_softplus_activation),
        params: &[("a", 0.0, 1.0, 0.5), ("b", 0.0, 1.0, 0.5)],
    },
    BuiltinTemplate {
        name: "clamped_tanh_step",
        kernel: Kernel::One(clamped_tanh_step_activation),
        params: &[("a", -1.0, 1.0, 0.0)],
    },
    BuiltinTemplate {
        name: "multiparam_sigmoid",
        kernel: Kernel::One(multiparam_sigmoid_activation),
        params: &[("a", -1.0, 1.0, 0.0)],
    },
    BuiltinTemplate {
        name: "hat_gauss",
        kernel: Kernel::One(hat_gauss_activation),
        params: &[("a", 0.0, 1.0, 0.5)],
    },
    BuiltinTemplate {
        name: "scaled_expanded_log",
        kernel: Kernel::One(scaled_expanded_log_activation),
        params: &[("a", 0.0, 2.0, 1.0)],
    },
    BuiltinTemplate {
        name: "scaled_log1p",
        kernel: Kernel::One(scaled_log1p_activation),
        params: &[("a", 0.0, 2.0, 0.5)],
    },
    BuiltinTemplate {
        name: "multiparam_tanh_log1p",
        kernel: Kernel::Two(multiparam_tanh_log1p_activation),
        params: &[("a", 0.0, 1.0, 0.5), ("b", -1.0, 1.0, 0.0)],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_almost_equal(a: f64, b: f64) {
        if (a - b).abs() > 1e-6 {
            let rel = (a - b).abs() / a.abs().max(b.abs());
            assert!(rel <= 1e-6, "{} !~= {}", a, b);
        }
    }

    #[test]
    fn test_multiparam_relu() {
        assert_eq!(multiparam_relu_activation(1.0, 1.0), 1.0);
        assert_eq!(multiparam_relu_activation(0.0, 1.0), 0.0);
        assert_eq!(multiparam_relu_activation(-1.0, 1.0), -1.0);
        assert_eq!(multiparam_relu_activation(1.0, 0.0), 1.0);
        assert_eq!(multiparam_relu_activation(0.0, 0.0), 0.0);
        assert_eq!(multiparam_relu_activation(-1.0, 0.0), 0.0);
        assert_eq!(multiparam_relu_activation(1.0, -1.0), 1.0);
        assert_eq!(multiparam_relu_activation(0.0, -1.0), 0.0);
        assert_eq!(multiparam_relu_activation(-1.0, -1.0), 1.0);
    }

    #[test]
    fn test_multiparam_elu_depends_on_sum() {
        assert_almost_equal(multiparam_elu_activation(-1.0, -1.0, -1.0), -0.026884680254211635);
        assert_almost_equal(multiparam_elu_activation(-1.0, 0.0, 0.0), -0.1986524106001829);
        assert_almost_equal(multiparam_elu_activation(-1.0, 1.0, 0.0), -0.5399932379140622);
        assert_eq!(multiparam_elu_activation(-1.0, 1.0, 1.0), -1.0);
        assert_eq!(multiparam_elu_activation(-0.5, 1.0, 1.0), -0.5);
        assert_eq!(multiparam_elu_activation(0.0, 1.0, -1.0), 0.0);
        assert_eq!(multiparam_elu_activation(1.0, -1.0, 1.0), 1.0);
    }

    #[test]
    fn test_weighted_lu() {
        assert_almost_equal(weighted_lu_activation(-1.0, 0.5, -1.0), 0.4634599311005224);
        assert_almost_equal(weighted_lu_activation(-0.5, 0.5, 1.0), -0.49951516683106156);
        assert_eq!(weighted_lu_activation(-1.0, 1.0, -1.0), 1.0);
        assert_eq!(weighted_lu_activation(-0.5, 1.0, 1.0), -0.5);
        assert_eq!(weighted_lu_activation(1.0, 0.0, -1.0), 1.0);
    }

    #[test]
    fn test_multiparam_relu_softplus() {
        assert_almost_equal(multiparam_relu_softplus_activation(-1.0, 0.0, 0.0), 0.0013430696978235935);
        assert_almost_equal(multiparam_relu_softplus_activation(-1.0, 0.5, 0.5), 0.0003357674244559017);
        assert_eq!(multiparam_relu_softplus_activation(-1.0, 0.0, 1.0), -1.0);
        assert_eq!(multiparam_relu_softplus_activation(-1.0, 1.0, 0.5), 0.5);
        assert_eq!(multiparam_relu_softplus_activation(-0.5, 0.5, 1.0), -0.25);
        assert_almost_equal(multiparam_relu_softplus_activation(0.0, 0.0, 0.0), 0.13862943611198905);
        assert_almost_equal(multiparam_relu_softplus_activation(1.0, 0.5, 0.5), 1.000335767424456);
    }

    #[test]
    fn test_clamped_tanh_step() {
        assert_eq!(clamped_tanh_step_activation(2.0, 1.0), 1.0);
        assert_eq!(clamped_tanh_step_activation(2.0, -1.0), 1.0);
        assert_eq!(clamped_tanh_step_activation(0.0, 0.0), 0.0);
        assert_eq!(clamped_tanh_step_activation(-2.0, 1.0), -1.0);
        assert_eq!(clamped_tanh_step_activation(0.5, -1.0), 1.0);
        assert_eq!(clamped_tanh_step_activation(-0.5, -1.0), -1.0);
        assert_eq!(clamped_tanh_step_activation(0.3, 0.0), tanh_activation(0.3));
    }

    #[test]
    fn test_multiparam_sigmoid() {
        assert_eq!(multiparam_sigmoid_activation(1.0, 1.0), 1.0);
        assert_eq!(multiparam_sigmoid_activation(0.0, 0.0), 0.5);
        assert_eq!(multiparam_sigmoid_activation(-1.0, -1.0), 0.0);
        assert_eq!(multiparam_sigmoid_activation(0.5, -1.0), 1.0);
        assert_almost_equal(
            multiparam_sigmoid_activation(0.3, 0.0),
            super::super::simple::sigmoid_activation(0.3),
        );
    }

    #[test]
    fn test_hat_gauss() {
        assert_eq!(hat_gauss_activation(0.0, 0.75), 1.0);
        assert_eq!(hat_gauss_activation(1.0, 1.0), 0.0);
        assert_almost_equal(hat_gauss_activation(-0.5, 0.5), 0.3932523984300951);
        assert_almost_equal(hat_gauss_activation(1.0, 0.0), 0.006737946999085467);
    }

    #[test]
    fn test_scaled_expanded_log() {
        assert_eq!(scaled_expanded_log_activation(1.0, 2.0), 1.0);
        assert!(scaled_expanded_log_activation(0.0, 2.0) <= -6.5);
        assert_almost_equal(scaled_expanded_log_activation(0.0, 1.5), -9.19238815542512);
        assert_almost_equal(scaled_expanded_log_activation(-1.0, 1.5), -1.0606601717798214);
        assert_almost_equal(scaled_expanded_log_activation(1.0, 0.5), 0.7071067811865477);
        assert_eq!(scaled_expanded_log_activation(1.0, 0.0), 0.0);
        assert!(scaled_expanded_log_activation(0.0, 0.0) <= -26.0);
    }

    #[test]
    fn test_scaled_log1p() {
        assert_almost_equal(scaled_log1p_activation(-1.0, 2.0), -0.4745817877281998);
        assert_eq!(scaled_log1p_activation(0.0, 2.0), 0.0);
        assert_almost_equal(scaled_log1p_activation(0.5, 1.0), 0.5205837691459093);
        assert_almost_equal(scaled_log1p_activation(1.0, 0.0), 1.142806500315004);
    }

    #[test]
    fn test_multiparam_tanh_log1p() {
        assert_eq!(multiparam_tanh_log1p_activation(-1.0, 1.0, 1.0), -1.0);
        assert_eq!(multiparam_tanh_log1p_activation(1.0, 0.5, 1.0), 1.0);
        assert_almost_equal(multiparam_tanh_log1p_activation(1.0, 1.0, 0.0), 0.9866142981514303);
        assert_almost_equal(multiparam_tanh_log1p_activation(-1.0, 0.5, -1.0), -0.7372908938640998);
        assert_almost_equal(multiparam_tanh_log1p_activation(1.0, 0.0, -1.0), 0.4745817877281998);
    }

    #[test]
    fn test_extreme_parameters_stay_finite() {
        for x in [-1e300, -1.0, -1e-20, 0.0, 1e-20, 1.0, 1e300] {
            for a in [-1e6, -1.0, 0.0, 1.0, 1e6] {
                assert!(multiparam_elu_activation(x, a, a).is_finite());
                assert!(scaled_expanded_log_activation(x, a).is_finite());
                assert!(scaled_log1p_activation(x, a).is_finite());
            }
        }
    }

    #[test]
    fn test_builtin_defaults_within_bounds() {
        for template in MULTIPARAM_ACTIVATIONS {
            for &(name, min, max, default) in template.params {
                assert!(min <= default && default <= max, "{}.{}", template.name, name);
            }
            let arity = match template.kernel {
                Kernel::One(_) => 1,
                Kernel::Two(_) => 2,
            };
            assert_eq!(arity, template.params.len(), "{}", template.name);
        }
    }
}
