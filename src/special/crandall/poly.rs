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

//! Scalar polynomials behind the multi-index derivatives of the Crandall
//! functions.
//!
//! Every derivative of a radial function $f(|z|^2)$ expands as
//! $$
//! \partial^\alpha f(|z|^2) = \sum_{2\beta \leq \alpha}
//! P_{\alpha\beta}(z)\, f^{(|\alpha| - |\beta|)}(|z|^2)
//! $$
//! where the sum runs over multi-indices $\beta$ with
//! $2\beta_i \leq \alpha_i$ and $P_{\alpha\beta}$ is the polynomial of
//! [polynomial_p]. The $|z|^{2k}$ and $\log|z|^2$ derivatives needed by
//! the regularized kernel follow from the same expansion.

use crate::linalg::dot;
use crate::special::tools::{advance_multi_index, factorial, mult_abs};

/// The coefficient polynomial of the radial chain rule,
/// $$
/// P_{\alpha\beta}(z) = \prod_i
/// \frac{\alpha_i!}{\beta_i!\,(\alpha_i - 2\beta_i)!}\,(2z_i)^{\alpha_i - 2\beta_i}
/// $$
/// defined for $2\beta \leq \alpha$ componentwise.
pub(crate) fn polynomial_p(z: &[f64], alpha: &[u32], beta: &[u32]) -> f64 {
    let mut r = 1.0;
    for i in 0..z.len() {
        let (a, b) = (alpha[i], beta[i]);
        debug_assert!(2 * b <= a);
        r *= factorial(a) / (factorial(b) * factorial(a - 2 * b))
            * (2.0 * z[i]).powi((a - 2 * b) as i32);
    }
    r
}

/// The coefficient polynomial of the $\log|z|^2$ expansion,
/// $$
/// L_{\alpha\beta}(z) = (-1)^{|\alpha| - |\beta| - 1}
/// (|\alpha| - |\beta| - 1)!\,P_{\alpha\beta}(z)
/// $$
/// for $|\alpha| \geq 1$.
pub(crate) fn polynomial_l(z: &[f64], alpha: &[u32], beta: &[u32]) -> f64 {
    let m = mult_abs(alpha) - mult_abs(beta);
    let sign = if (m - 1) % 2 == 0 { 1.0 } else { -1.0 };
    sign * factorial(m - 1) * polynomial_p(z, alpha, beta)
}

/// Upper bounds $\lfloor\alpha_i/2\rfloor$ of the $\beta$ iteration with
/// $2\beta \leq \alpha$.
pub(crate) fn half_indices(alpha: &[u32]) -> Vec<u32> {
    alpha.iter().map(|&a| a / 2).collect()
}

/// $\partial^\alpha |z|^{2k}$ in closed form,
/// $$
/// \partial^\alpha Y_k(z) = \sum_{2\beta \leq \alpha,\ m \leq k}
/// \frac{k!}{(k - m)!}\,P_{\alpha\beta}(z)\,|z|^{2(k - m)},
/// \qquad m = |\alpha| - |\beta|.
/// $$
pub(crate) fn polynomial_y_der(k: u32, z: &[f64], alpha: &[u32], alpha_abs: u32) -> f64 {
    let z_squared = dot(z, z);
    if alpha_abs == 0 {
        return z_squared.powi(k as i32);
    }
    let bounds = half_indices(alpha);
    let mut beta = vec![0u32; z.len()];
    let mut sum = 0.0;
    loop {
        let m = alpha_abs - mult_abs(&beta);
        if m <= k {
            let mut falling = 1.0;
            for j in 0..m {
                falling *= (k - j) as f64;
            }
            sum += falling * polynomial_p(z, alpha, &beta) * z_squared.powi((k - m) as i32);
        }
        if !advance_multi_index(&mut beta, &bounds) {
            break;
        }
    }
    sum
}

/// $\partial^\alpha \log|z|^2$ in closed form,
/// $$
/// \partial^\alpha L(z) = \sum_{2\beta \leq \alpha}
/// L_{\alpha\beta}(z)\,|z|^{-2(|\alpha| - |\beta|)}
/// $$
/// for $|\alpha| \geq 1$, and $\log|z|^2$ itself at $\alpha = 0$.
pub(crate) fn log_l_der(z: &[f64], alpha: &[u32], alpha_abs: u32) -> f64 {
    let z_squared = dot(z, z);
    if alpha_abs == 0 {
        return z_squared.ln();
    }
    let bounds = half_indices(alpha);
    let mut beta = vec![0u32; z.len()];
    let mut sum = 0.0;
    loop {
        let m = alpha_abs - mult_abs(&beta);
        sum += polynomial_l(z, alpha, &beta) * z_squared.powi(-(m as i32));
        if !advance_multi_index(&mut beta, &bounds) {
            break;
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::special::tools::{mult_fac, mult_pow};

    #[test]
    fn test_polynomial_p_low_orders() {
        let z = [0.3, -0.7];
        // alpha = 0: empty product
        assert_eq!(polynomial_p(&z, &[0, 0], &[0, 0]), 1.0);
        // alpha = e_1, beta = 0: 2 z_1
        assert_eq!(polynomial_p(&z, &[1, 0], &[0, 0]), 2.0 * z[0]);
        // alpha = 2 e_1: beta = 0 gives (2 z_1)^2, beta = e_1 gives 2
        assert_eq!(polynomial_p(&z, &[2, 0], &[0, 0]), 4.0 * z[0] * z[0]);
        assert_eq!(polynomial_p(&z, &[2, 0], &[1, 0]), 2.0);
        // mixed index factorizes
        assert_eq!(
            polynomial_p(&z, &[2, 1], &[1, 0]),
            2.0 * 2.0 * z[1]
        );
    }

    #[test]
    fn test_polynomial_l_prefactor() {
        let z = [0.4, 0.2];
        // m = 1: +0! P, m = 2: -1! P, m = 3: +2! P
        assert_eq!(
            polynomial_l(&z, &[1, 0], &[0, 0]),
            polynomial_p(&z, &[1, 0], &[0, 0])
        );
        assert_eq!(
            polynomial_l(&z, &[2, 0], &[0, 0]),
            -polynomial_p(&z, &[2, 0], &[0, 0])
        );
        assert_eq!(
            polynomial_l(&z, &[3, 0], &[0, 0]),
            2.0 * polynomial_p(&z, &[3, 0], &[0, 0])
        );
    }

    #[test]
    fn test_polynomial_y_der_hand_expanded() {
        let z = [0.6, -0.2];
        let zz = dot(&z, &z);
        // d/dz1 |z|^4 = 4 z1 |z|^2
        assert_almost_eq!(
            polynomial_y_der(2, &z, &[1, 0], 1),
            4.0 * z[0] * zz,
            1e-15
        );
        // d^2/dz1^2 |z|^4 = 8 z1^2 + 4 |z|^2
        assert_almost_eq!(
            polynomial_y_der(2, &z, &[2, 0], 2),
            8.0 * z[0] * z[0] + 4.0 * zz,
            1e-15
        );
        // d^2/dz1 dz2 |z|^4 = 8 z1 z2
        assert_almost_eq!(
            polynomial_y_der(2, &z, &[1, 1], 2),
            8.0 * z[0] * z[1],
            1e-15
        );
        // derivatives of order above 2k vanish
        assert_eq!(polynomial_y_der(1, &z, &[3, 0], 3), 0.0);
        assert_eq!(polynomial_y_der(0, &z, &[0, 1], 1), 0.0);
    }

    #[test]
    fn test_log_l_der_hand_expanded() {
        let z = [0.8, 0.5];
        let zz = dot(&z, &z);
        // d/dz1 log|z|^2 = 2 z1/|z|^2
        assert_almost_eq!(log_l_der(&z, &[1, 0], 1), 2.0 * z[0] / zz, 1e-15);
        // d^2/dz1^2 log|z|^2 = 2/|z|^2 - 4 z1^2/|z|^4
        assert_almost_eq!(
            log_l_der(&z, &[2, 0], 2),
            2.0 / zz - 4.0 * z[0] * z[0] / (zz * zz),
            1e-15
        );
        // d^2/dz1 dz2 log|z|^2 = -4 z1 z2/|z|^4
        assert_almost_eq!(
            log_l_der(&z, &[1, 1], 2),
            -4.0 * z[0] * z[1] / (zz * zz),
            1e-15
        );
    }

    #[test]
    fn test_y_der_taylor_identity() {
        // |z + h|^{2k} reconstructed from the full derivative tableau
        let k = 3u32;
        let z = [0.5, -0.3];
        let h = [0.01, 0.02];
        let order = [2 * k, 2 * k];
        let mut alpha = [0u32, 0];
        let mut taylor = 0.0;
        loop {
            let alpha_abs = mult_abs(&alpha);
            taylor += mult_pow(&alpha, &h) / mult_fac(&alpha)
                * polynomial_y_der(k, &z, &alpha, alpha_abs);
            if !advance_multi_index(&mut alpha, &order) {
                break;
            }
        }
        let shifted = [z[0] + h[0], z[1] + h[1]];
        let exact = dot(&shifted, &shifted).powi(k as i32);
        assert_almost_eq!(taylor / exact, 1.0, 1e-14);
    }

    #[test]
    fn test_log_l_der_taylor_identity() {
        // log|z + h|^2 reconstructed from derivatives up to order 8
        let z = [0.9, 0.4];
        let h = [0.008, -0.006];
        let order = [8u32, 8];
        let mut alpha = [0u32, 0];
        let mut taylor = 0.0;
        loop {
            let alpha_abs = mult_abs(&alpha);
            taylor += mult_pow(&alpha, &h) / mult_fac(&alpha)
                * log_l_der(&z, &alpha, alpha_abs);
            if !advance_multi_index(&mut alpha, &order) {
                break;
            }
        }
        let shifted = [z[0] + h[0], z[1] + h[1]];
        let exact = dot(&shifted, &shifted).ln();
        assert_almost_eq!(taylor, exact, 1e-14);
    }
}
