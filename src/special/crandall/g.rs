//**********************************************************************
// This file is part of epstein-rs                                     *
//                                                                     *
// epstein-rs is licensed under the Apache License, Version 2.0 (the   *
// "License"); you may not use this file except in compliance with the *
// License. You may obtain a copy of the License at                    *
//                                                                     *
//     http://www.apache.org/licenses/LICENSE-2.0                      *
//                                                                     *
// Unless required by applicable law or agreed to in writing, software *
// distributed under the License is distributed on an "AS IS" BASIS,   *
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or     *
// implied. See the License for the specific language governing        *
// permissions and limitations under the License.                      *
//                                                                     *
// Copyright 2023 Matthew R. Hennefarth                                *
//**********************************************************************

use std::f64::consts::PI;

use crate::constants::f64::EULER_GAMMA;
use crate::linalg::dot;
use crate::special::gamma::r_gamma;
use crate::special::{gamma_star, ugamma};

/// Epsilon for the cutoff around even integer values of nu, $2^{-30}$.
const EPS: f64 = 9.313_225_746_154_785e-10;

/// Argument below which G is replaced by its limit at the origin, $2^{-62}$.
const G_ARG_MIN: f64 = 2.168_404_344_971_009e-19;

/// Smallest value of $\pi\lambda^2|z|^2$ from which the two-term
/// asymptotic expansion of G carries roughly $10^{-13}$ absolute
/// accuracy, depending on the value of nu. The rows partition the real
/// line; outside every listed range the expansion is never used.
pub(crate) fn arg_bound(nu: f64) -> f64 {
    if (nu - 2.0).abs() < EPS || (nu - 4.0).abs() < EPS {
        return PI * 2.6 * 2.6;
    }
    if nu > 1.6 && nu < 4.4 {
        return PI * 2.99 * 2.99;
    }
    if nu > -3.0 && nu < 8.0 {
        return PI * 3.15 * 3.15;
    }
    if nu > -70.0 && nu < 40.0 {
        return PI * 3.35 * 3.35;
    }
    if nu > -600.0 && nu < 80.0 {
        return PI * 3.5 * 3.5;
    }
    1e16 // do not use the expansion if nu is too big
}

/// Upper Crandall function
/// $$
/// G_\nu(z, \lambda) = \frac{\Gamma(\nu/2, \pi\lambda^2|z|^2)}
/// {(\pi\lambda^2|z|^2)^{\nu/2}}
/// $$
/// with the limit $-2/\nu$ at the origin. `z_arg_bound` is the
/// [arg_bound] threshold for this `nu` above which the asymptotic
/// expansion is used.
pub(crate) fn crandall_g(nu: f64, z: &[f64], prefactor: f64, z_arg_bound: f64) -> f64 {
    let z_argument = PI * prefactor * prefactor * dot(z, z);

    if z_argument < G_ARG_MIN {
        return -2.0 / nu;
    }
    if z_argument > z_arg_bound {
        return (-z_argument).exp() * (2.0 * z_argument + nu - 2.0)
            / (2.0 * z_argument * z_argument);
    }
    ugamma(nu / 2.0, z_argument) / z_argument.powf(nu / 2.0)
}

/// Generic-parameter regularized kernel $-\Gamma(a)\gamma^*(a, w)$;
/// differentiating in $w$ shifts $a$ by one, which the derivative code
/// relies on.
pub(crate) fn g_reg_kernel(a: f64, w: f64) -> f64 {
    -r_gamma(a) * gamma_star(a, w)
}

/// Taylor coefficients of $\Gamma(0, w) + \log w$ around $w = 0$.
const G_REG_TAYLOR: [f64; 10] = [
    -EULER_GAMMA,
    1.0,
    -0.25,
    0.05555555555555555,
    -0.010416666666666666,
    0.0016666666666666668,
    -0.0002314814814814815,
    0.00002834467120181406,
    -3.1001984126984127e-6,
    3.0619243582206544e-7,
];

/// Regularized zero summand in the special case $s = -2k$, i.e.
/// $\nu = d + 2k$ for a non-negative integer $k$:
/// $$
/// \mathrm{arg}^k\left(\Gamma(-k, \mathrm{arg}) +
/// \frac{(-1)^k}{k!}\log\mathrm{arg}\right) - \mathrm{arg}^k\log\lambda^2
/// $$
/// The subtraction of $\mathrm{arg}^k\log\lambda^2$ absorbs the free
/// Ewald parameter.
fn g_reg_nu_equals_dim_plus_2k(s: f64, arg: f64, k: f64, lambda: f64) -> f64 {
    let mut g_reg = 0.0;
    // Taylor expansion if nu = dim and y close to zero.
    let taylor_cutoff = 0.1 * 0.1 * PI;
    if s == 0.0 && arg < taylor_cutoff {
        for (i, c) in G_REG_TAYLOR.iter().enumerate() {
            g_reg += c * arg.powi(i as i32);
        }
    } else if arg == 0.0 {
        g_reg = 1.0 / k;
    } else {
        let sign = if (k as i64) % 2 == 0 { 1.0 } else { -1.0 };
        g_reg = arg.powf(k) * (ugamma(-k, arg) + sign / r_gamma(k + 1.0) * arg.ln());
    }
    g_reg - arg.powf(k) * (lambda * lambda).ln()
}

/// Regularization of the zero summand in the second sum of Crandall's
/// formula, with $s = d - \nu$:
/// $$
/// G^{\mathrm{reg}}_s(z, \lambda) =
/// -\Gamma(s/2)\,\gamma^*(s/2, \pi\lambda^2|z|^2)
/// $$
/// finite for all $z$, with the dedicated expansion of
/// [g_reg_nu_equals_dim_plus_2k] when $s$ is a non-positive even integer.
pub(crate) fn crandall_g_reg(s: f64, z: &[f64], prefactor: f64) -> f64 {
    let z_argument = PI * prefactor * prefactor * dot(z, z);
    let k = -(s / 2.0).round_ties_even();
    if s < 1.0 && s == -2.0 * k {
        return g_reg_nu_equals_dim_plus_2k(s, z_argument, k, prefactor);
    }
    g_reg_kernel(s / 2.0, z_argument)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::f64::SQRT_PI;
    use crate::special::erfc;

    #[test]
    fn test_arg_bound_partition() {
        assert_eq!(arg_bound(2.0), PI * 2.6 * 2.6);
        assert_eq!(arg_bound(4.0), PI * 2.6 * 2.6);
        assert_eq!(arg_bound(3.0), PI * 2.99 * 2.99);
        assert_eq!(arg_bound(-1.0), PI * 3.15 * 3.15);
        assert_eq!(arg_bound(7.9), PI * 3.15 * 3.15);
        assert_eq!(arg_bound(-50.0), PI * 3.35 * 3.35);
        assert_eq!(arg_bound(60.0), PI * 3.5 * 3.5);
        assert_eq!(arg_bound(1000.0), 1e16);
    }

    #[test]
    fn test_crandall_g_closed_forms() {
        // nu = 2: G = Gamma(1, w)/w = exp(-w)/w
        for &r in &[0.3, 0.7, 1.1] {
            let z = [r, 0.0];
            let w = PI * r * r;
            let reference = (-w).exp() / w;
            assert_almost_eq!(
                crandall_g(2.0, &z, 1.0, arg_bound(2.0)) / reference,
                1.0,
                1e-13
            );
        }
        // nu = 1: G = Gamma(1/2, w)/sqrt(w) = sqrt(pi) erfc(sqrt(w))/sqrt(w)
        for &r in &[0.25, 0.9] {
            let z = [r];
            let w = PI * r * r;
            let reference = SQRT_PI * erfc(w.sqrt()) / w.sqrt();
            assert_almost_eq!(
                crandall_g(1.0, &z, 1.0, arg_bound(1.0)) / reference,
                1.0,
                1e-13
            );
        }
    }

    #[test]
    fn test_crandall_g_origin_limit() {
        let z = [0.0, 0.0, 0.0];
        assert_almost_eq!(crandall_g(3.0, &z, 1.0, arg_bound(3.0)), -2.0 / 3.0, 1e-15);
        assert_almost_eq!(crandall_g(-5.0, &z, 2.0, arg_bound(-5.0)), 0.4, 1e-15);
    }

    #[test]
    fn test_crandall_g_asymptotic_continuity() {
        // the two-term expansion and the ugamma branch must agree at the
        // switch-over to the advertised absolute accuracy
        for &nu in &[-2.5, 1.0, 2.0, 3.0, 6.5] {
            let bound = arg_bound(nu);
            let r = (bound / PI).sqrt();
            let below = crandall_g(nu, &[r * 0.999], 1.0, bound);
            let above = crandall_g(nu, &[r * 1.001], 1.0, bound);
            assert!((below - above).abs() < 1e-13);
        }
    }

    #[test]
    fn test_crandall_g_reg_generic() {
        // away from the singular set the regularization is
        // -Gamma(s/2) gammaStar(s/2, w)
        let z = [0.4, 0.3];
        let w = PI * dot(&z, &z);
        for &s in &[1.0, 0.5, -1.0, -3.0, 2.5] {
            let reference = -r_gamma(s / 2.0) * gamma_star(s / 2.0, w);
            assert_almost_eq!(crandall_g_reg(s, &z, 1.0) / reference, 1.0, 1e-14);
        }
    }

    #[test]
    fn test_crandall_g_reg_even_s() {
        // s = 0, small argument: the Taylor table against Gamma(0, w) + log(w)
        // evaluated directly
        for &r in &[0.02, 0.06, 0.09] {
            let arg = PI * r * r;
            let reference = ugamma(0.0, arg) + arg.ln();
            assert_almost_eq!(crandall_g_reg(0.0, &[r], 1.0), reference, 1e-13);
        }
        // s = 0 at the origin: -EulerGamma
        assert_almost_eq!(crandall_g_reg(0.0, &[0.0, 0.0], 1.0), -EULER_GAMMA, 1e-15);
        // s = -2k at the origin: 1/k
        assert_almost_eq!(crandall_g_reg(-2.0, &[0.0, 0.0], 1.0), 1.0, 1e-15);
        assert_almost_eq!(crandall_g_reg(-6.0, &[0.0], 1.0), 1.0 / 3.0, 1e-15);
    }

    #[test]
    fn test_crandall_g_reg_lambda_absorption() {
        // before the log(lambda^2) subtraction the even-s regularization
        // depends on (z, lambda) only through arg = pi lambda^2 |z|^2
        let z1 = [0.2, 0.1];
        let (l1, l2) = (1.0, 1.7);
        let z2 = [z1[0] * l1 / l2, z1[1] * l1 / l2];
        for &s in &[0.0, -2.0, -4.0] {
            let k = (-s / 2.0) as i32;
            let arg = PI * l1 * l1 * dot(&z1, &z1);
            let u1 = crandall_g_reg(s, &z1, l1) + arg.powi(k) * (l1 * l1).ln();
            let u2 = crandall_g_reg(s, &z2, l2) + arg.powi(k) * (l2 * l2).ln();
            assert_almost_eq!(u1, u2, 1e-13);
        }
    }
}
