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

//! The (regularized) Epstein zeta function and the derivatives of the
//! set zeta function.
//!
//! For a lattice $\Lambda = A\mathbb{Z}^d$ the Epstein zeta function is
//! $$
//! Z_{\nu}(A; x, y) = \sum_{z \in \Lambda,\, z \neq x}
//! \frac{e^{-2\pi i y\cdot z}}{|z - x|^{\nu}}
//! $$
//! extended to all real $\nu$ by analytic continuation. All evaluations
//! go through Crandall's decomposition into two exponentially convergent
//! lattice sums.
//!
//! # References
//! - Crandall, R., Unified algorithms for polylogarithm, L-series, and
//!   zeta variants. Algorithmic Reflections: Selected Works. PSIpress
//!   (2012).

mod cell;
mod ewald;

use num_complex::Complex64;

use ewald::{epstein_zeta_internal, Variant};

fn check_arguments(dim: usize, a: &[f64], x: &[f64], y: &[f64]) {
    assert!(dim >= 1, "dimension must be at least 1");
    assert_eq!(a.len(), dim * dim, "lattice matrix must be dim x dim");
    assert_eq!(x.len(), dim, "x must have length dim");
    assert_eq!(y.len(), dim, "y must have length dim");
}

/// Epstein zeta function $Z_{\nu}(A; x, y)$.
///
/// `a` is the row-major $d \times d$ lattice generator; `x` and `y` are
/// the real-space and Fourier-space shifts. At the pole $\nu = d$ with
/// $y$ on the dual lattice the function returns `NaN + NaN i`; a
/// singular generator does the same.
///
/// # Examples
/// The Madelung constant of the cubic rock salt structure:
/// ```
/// use epstein_rs::special::epstein_zeta;
/// let a = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
/// let madelung = epstein_zeta(1.0, 3, &a, &[0.0; 3], &[0.5; 3]);
/// assert!((madelung.re + 1.7475645946331822).abs() < 1e-13);
/// ```
pub fn epstein_zeta(nu: f64, dim: usize, a: &[f64], x: &[f64], y: &[f64]) -> Complex64 {
    check_arguments(dim, a, x, y);
    epstein_zeta_internal(nu, dim, a, x, y, 1.0, Variant::Plain, &vec![0; dim])
}

/// Regularized Epstein zeta function.
///
/// Subtracts the $y \to 0$ singularity analytically, so the value stays
/// finite when $\nu \geq d$ and $y$ crosses the dual lattice; see
/// [epstein_zeta] for the parameter conventions.
pub fn epstein_zeta_reg(nu: f64, dim: usize, a: &[f64], x: &[f64], y: &[f64]) -> Complex64 {
    check_arguments(dim, a, x, y);
    epstein_zeta_internal(nu, dim, a, x, y, 1.0, Variant::Regularized, &vec![0; dim])
}

/// Multi-index derivative $\partial_y^\alpha$ of the set zeta function
/// $e^{2\pi i x\cdot y} Z_{\nu}(A; x, y)$.
///
/// Reduces to $e^{2\pi i x\cdot y}\,$[epstein_zeta] when $|\alpha| = 0$.
pub fn set_zeta_der(
    nu: f64,
    dim: usize,
    a: &[f64],
    x: &[f64],
    y: &[f64],
    alpha: &[u32],
) -> Complex64 {
    check_arguments(dim, a, x, y);
    assert_eq!(alpha.len(), dim, "alpha must have length dim");
    epstein_zeta_internal(nu, dim, a, x, y, 1.0, Variant::Derivative, alpha)
}

/// Multi-index derivative $\partial_y^\alpha$ of the regularized Epstein
/// zeta function.
///
/// Falls back to [epstein_zeta_reg] when $|\alpha| = 0$.
pub fn epstein_zeta_reg_der(
    nu: f64,
    dim: usize,
    a: &[f64],
    x: &[f64],
    y: &[f64],
    alpha: &[u32],
) -> Complex64 {
    check_arguments(dim, a, x, y);
    assert_eq!(alpha.len(), dim, "alpha must have length dim");
    epstein_zeta_internal(nu, dim, a, x, y, 1.0, Variant::RegularizedDerivative, alpha)
}
