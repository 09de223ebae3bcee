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

//! Multi-index derivatives of the Crandall functions.
//!
//! With $f_s(w) = \Gamma(s, w)w^{-s}$ one has $f_s'(w) = -f_{s+1}(w)$, so
//! every $w$-derivative of $G_\nu$ is again a Crandall function at
//! exponent $\nu + 2$; the chain rule over $w = \pi\lambda^2|z|^2$ then
//! reduces $\partial^\alpha G_\nu$ to the [polynomial_p] tableau. The
//! regularized kernel satisfies the analogous shift through
//! $\partial_w \gamma^*(a, w) = -a\,\gamma^*(a + 1, w)$.

use std::f64::consts::PI;

use crate::constants::f64::EULER_GAMMA;
use crate::linalg::dot;
use super::g::g_reg_kernel;
use super::poly::half_indices;
use crate::special::crandall::{
    arg_bound, crandall_g, crandall_g_reg, log_l_der, polynomial_p, polynomial_y_der,
};
use crate::special::tools::{advance_multi_index, factorial, mult_abs, mult_binomial};

/// Below this value of $\pi\lambda^2|z|^2$ the even-s regularized
/// derivative switches to the entire Taylor series.
const SERIES_ARG_BOUND: f64 = 3.0;

/// Exact multi-index derivative $\partial_z^\alpha G_\nu(z, \lambda)$:
/// $$
/// \partial^\alpha G_\nu = \sum_{2\beta \leq \alpha}
/// (-1)^m (\pi\lambda^2)^m P_{\alpha\beta}(z)\, G_{\nu + 2m}(z, \lambda),
/// \qquad m = |\alpha| - |\beta|.
/// $$
/// `z_arg_bound` is the asymptotic threshold for the base exponent; the
/// shifted exponents look up their own.
pub(crate) fn crandall_g_der(
    nu: f64,
    z: &[f64],
    prefactor: f64,
    z_arg_bound: f64,
    alpha: &[u32],
    alpha_abs: u32,
) -> f64 {
    if alpha_abs == 0 {
        return crandall_g(nu, z, prefactor, z_arg_bound);
    }
    let c = PI * prefactor * prefactor;
    let bounds = half_indices(alpha);
    let mut beta = vec![0u32; z.len()];
    let mut sum = 0.0;
    loop {
        let m = alpha_abs - mult_abs(&beta);
        let nu_shifted = nu + 2.0 * m as f64;
        let g = crandall_g(nu_shifted, z, prefactor, arg_bound(nu_shifted));
        let sign = if m % 2 == 0 { 1.0 } else { -1.0 };
        sum += sign * c.powi(m as i32) * polynomial_p(z, alpha, &beta) * g;
        if !advance_multi_index(&mut beta, &bounds) {
            break;
        }
    }
    sum
}

/// Taylor coefficients of the entire function
/// $$
/// \Phi_k(w) = w^k\,\Gamma(-k, w) + \frac{(-1)^k}{k!}\,w^k\log w
/// $$
/// around $w = 0$, up to `n_terms` coefficients.
fn phi_taylor(k: u32, n_terms: usize) -> Vec<f64> {
    let ck = if k % 2 == 0 { 1.0 } else { -1.0 } / factorial(k);
    let mut a = vec![0.0; n_terms];
    // w^k (E_1(w) + log w) = w^k (-EulerGamma + sum (-1)^{n+1} w^n/(n n!))
    if (k as usize) < n_terms {
        a[k as usize] += ck * (-EULER_GAMMA);
    }
    let mut n_fac = 1.0;
    for n in 1..n_terms {
        n_fac *= n as f64;
        let idx = k as usize + n;
        if idx >= n_terms {
            break;
        }
        let sign = if (n + 1) % 2 == 0 { 1.0 } else { -1.0 };
        a[idx] += ck * sign / (n as f64 * n_fac);
    }
    // minus e^{-w} sum_{p=0}^{k-1} (-1)^{k-1-p} (k-1-p)! w^p
    for p in 0..k as usize {
        let q_p =
            if (k as usize - 1 - p) % 2 == 0 { 1.0 } else { -1.0 } * factorial(k - 1 - p as u32);
        let mut m_fac = 1.0;
        for m in 0..n_terms - p {
            if m > 0 {
                m_fac *= m as f64;
            }
            let sign = if m % 2 == 0 { 1.0 } else { -1.0 };
            a[p + m] -= ck * q_p * sign / m_fac;
        }
    }
    a
}

/// Exact multi-index derivative
/// $\partial_z^\alpha G^{\mathrm{reg}}_s(z, \lambda)$.
///
/// For generic $s$ the $\gamma^*$ shift gives the same tableau as
/// [crandall_g_der] over the regularized kernel. For $s = -2k$ the
/// entire part is either expanded in its Taylor series (small argument)
/// or split into the unregularized derivative plus the Leibniz expansion
/// of $(-1)^k/k!\ \partial^\alpha(w^k \log w)$; in both branches the
/// $\log\lambda^2$ absorption is differentiated explicitly.
pub(crate) fn crandall_g_reg_der(
    s: f64,
    z: &[f64],
    prefactor: f64,
    alpha: &[u32],
    alpha_abs: u32,
) -> f64 {
    if alpha_abs == 0 {
        return crandall_g_reg(s, z, prefactor);
    }
    let c = PI * prefactor * prefactor;
    let arg = c * dot(z, z);
    let k = -(s / 2.0).round_ties_even();
    if s < 1.0 && s == -2.0 * k {
        let k = k as u32;
        let log_lambda_sq = (prefactor * prefactor).ln();
        if arg < SERIES_ARG_BOUND {
            let n_terms = k as usize + alpha_abs as usize / 2 + 40;
            let coeffs = phi_taylor(k, n_terms);
            let mut res = 0.0;
            let mut c_pow = 1.0;
            for (n, a_n) in coeffs.iter().enumerate() {
                res += a_n * c_pow * polynomial_y_der(n as u32, z, alpha, alpha_abs);
                c_pow *= c;
            }
            res -= log_lambda_sq * c.powi(k as i32) * polynomial_y_der(k, z, alpha, alpha_abs);
            return res;
        }
        let ck = if k % 2 == 0 { 1.0 } else { -1.0 } / factorial(k);
        let g_part = crandall_g_der(s, z, prefactor, arg_bound(s), alpha, alpha_abs);
        // partial^alpha (w^k log w) through Leibniz over w^k = c^k |z|^{2k}
        // and log w = log c + log|z|^2
        let mut leibniz = c.ln() * polynomial_y_der(k, z, alpha, alpha_abs);
        let mut gamma_idx = vec![0u32; z.len()];
        loop {
            let gamma_abs = mult_abs(&gamma_idx);
            let rest: Vec<u32> = alpha
                .iter()
                .zip(&gamma_idx)
                .map(|(&a, &g)| a - g)
                .collect();
            leibniz += mult_binomial(alpha, &gamma_idx)
                * polynomial_y_der(k, z, &gamma_idx, gamma_abs)
                * log_l_der(z, &rest, alpha_abs - gamma_abs);
            if !advance_multi_index(&mut gamma_idx, alpha) {
                break;
            }
        }
        return g_part + ck * c.powi(k as i32) * leibniz
            - log_lambda_sq * c.powi(k as i32) * polynomial_y_der(k, z, alpha, alpha_abs);
    }
    // generic s: shift the gamma* parameter through the tableau
    let bounds = half_indices(alpha);
    let mut beta = vec![0u32; z.len()];
    let mut sum = 0.0;
    loop {
        let m = alpha_abs - mult_abs(&beta);
        let sign = if m % 2 == 0 { 1.0 } else { -1.0 };
        sum += sign
            * c.powi(m as i32)
            * polynomial_p(z, alpha, &beta)
            * g_reg_kernel(s / 2.0 + m as f64, arg);
        if !advance_multi_index(&mut beta, &bounds) {
            break;
        }
    }
    sum
}
