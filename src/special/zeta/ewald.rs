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

//! The Ewald dispatcher: assembles the real-space and reciprocal-space
//! sums of Crandall's formula and applies the scaling corrections.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::linalg::{dot, equals, lu_invert, matvec_int, transpose};
use crate::special::crandall::{
    arg_bound, crandall_g, crandall_g_der, crandall_g_reg, crandall_g_reg_der, polynomial_y_der,
};
use crate::special::gamma::r_gamma;
use crate::special::tools::mult_abs;
use crate::special::zeta::cell::{cutoffs, vector_proj};

/// Epsilon for the cutoff around nu = dimension, $2^{-30}$.
const EPS: f64 = 9.313_225_746_154_785e-10;

/// Epsilon for the cutoff around y = 0.
const EPS_ZERO_Y: f64 = 1e-64;

/// The four evaluation branches of the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Variant {
    /// The Epstein zeta function itself.
    Plain,
    /// The regularized Epstein zeta function.
    Regularized,
    /// Multi-index derivative of the set zeta function.
    Derivative,
    /// Multi-index derivative of the regularized function.
    RegularizedDerivative,
}

/// Kahan compensated accumulator over complex summands; one compensation
/// word per real and imaginary part.
#[derive(Default)]
struct KahanSum {
    sum: Complex64,
    compensation: Complex64,
}

impl KahanSum {
    fn add(&mut self, value: Complex64) {
        let y = value - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }
}

/// Cuboid enumeration state: mixed-radix decoding of a linear index into
/// the counting vector in $[-c_k, c_k]^d$.
struct Cuboid {
    total_summands: i64,
    strides: Vec<i64>,
    widths: Vec<i64>,
}

impl Cuboid {
    fn new(cutoffs: &[i64]) -> Self {
        let mut total_summands = 1;
        let mut strides = Vec::with_capacity(cutoffs.len());
        let mut widths = Vec::with_capacity(cutoffs.len());
        for &c in cutoffs {
            strides.push(total_summands);
            widths.push(2 * c + 1);
            total_summands *= 2 * c + 1;
        }
        Cuboid {
            total_summands,
            strides,
            widths,
        }
    }

    fn decode(&self, n: i64, cutoffs: &[i64], zv: &mut [i64]) {
        for k in 0..zv.len() {
            zv[k] = (n / self.strides[k]) % self.widths[k] - cutoffs[k];
        }
    }
}

/// First sum in Crandall's formula,
/// $$
/// \sum_{z \in A\mathbb{Z}^d} e^{-2\pi i y\cdot z}\,
/// G_\nu\!\left(\frac{z - x}{\lambda^{-1}}\right)
/// $$
/// over the cuboid given by `cutoffs`, Kahan-summed.
#[allow(clippy::too_many_arguments)]
fn sum_real(
    nu: f64,
    dim: usize,
    lambda: f64,
    m: &[f64],
    x: &[f64],
    y: &[f64],
    cutoffs: &[i64],
    z_arg_bound: f64,
) -> Complex64 {
    let cuboid = Cuboid::new(cutoffs);
    let mut zv = vec![0i64; dim];
    let mut lv = vec![0.0; dim];
    let mut acc = KahanSum::default();
    for n in 0..cuboid.total_summands {
        cuboid.decode(n, cutoffs, &mut zv);
        matvec_int(dim, m, &zv, &mut lv);
        let rot = Complex64::cis(-2.0 * PI * dot(&lv, y));
        for (l, xi) in lv.iter_mut().zip(x) {
            *l -= xi;
        }
        acc.add(rot * crandall_g(nu, &lv, 1.0 / lambda, z_arg_bound));
    }
    acc.sum
}

/// Derivative of the first sum: every summand carries the monomial
/// $(-2\pi i(z - x))^\alpha$ in front of G.
#[allow(clippy::too_many_arguments)]
fn sum_real_der(
    nu: f64,
    dim: usize,
    lambda: f64,
    m: &[f64],
    x: &[f64],
    y: &[f64],
    cutoffs: &[i64],
    z_arg_bound: f64,
    alpha: &[u32],
) -> Complex64 {
    let cuboid = Cuboid::new(cutoffs);
    let mut zv = vec![0i64; dim];
    let mut lv = vec![0.0; dim];
    let mut acc = KahanSum::default();
    for n in 0..cuboid.total_summands {
        cuboid.decode(n, cutoffs, &mut zv);
        matvec_int(dim, m, &zv, &mut lv);
        let rot = Complex64::cis(-2.0 * PI * dot(&lv, y));
        for (l, xi) in lv.iter_mut().zip(x) {
            *l -= xi;
        }
        let mut mon = Complex64::new(1.0, 0.0);
        for (l, &a) in lv.iter().zip(alpha) {
            if a > 0 {
                mon *= (Complex64::new(0.0, -2.0 * PI) * l).powi(a as i32);
            }
        }
        acc.add(rot * mon * crandall_g(nu, &lv, 1.0 / lambda, z_arg_bound));
    }
    acc.sum
}

/// Second sum in Crandall's formula,
/// $$
/// \sum_{k \in A^{-T}\mathbb{Z}^d \setminus \{0\}}
/// e^{-2\pi i x\cdot(k + y)}\, G_{d-\nu}(\lambda(k + y))
/// $$
/// skipping the zero index, Kahan-summed.
#[allow(clippy::too_many_arguments)]
fn sum_fourier(
    nu: f64,
    dim: usize,
    lambda: f64,
    m_invt: &[f64],
    x: &[f64],
    y: &[f64],
    cutoffs: &[i64],
    z_arg_bound: f64,
) -> Complex64 {
    let cuboid = Cuboid::new(cutoffs);
    let zero_index = (cuboid.total_summands - 1) / 2;
    let mut zv = vec![0i64; dim];
    let mut lv = vec![0.0; dim];
    let mut acc = KahanSum::default();
    for n in (0..zero_index).chain(zero_index + 1..cuboid.total_summands) {
        cuboid.decode(n, cutoffs, &mut zv);
        matvec_int(dim, m_invt, &zv, &mut lv);
        for (l, yi) in lv.iter_mut().zip(y) {
            *l += yi;
        }
        let rot = Complex64::cis(-2.0 * PI * dot(&lv, x));
        acc.add(rot * crandall_g(dim as f64 - nu, &lv, lambda, z_arg_bound));
    }
    acc.sum
}

/// Derivative of the second sum: G is replaced by its multi-index
/// derivative at every lattice point.
#[allow(clippy::too_many_arguments)]
fn sum_fourier_der(
    nu: f64,
    dim: usize,
    lambda: f64,
    m_invt: &[f64],
    x: &[f64],
    y: &[f64],
    cutoffs: &[i64],
    z_arg_bound: f64,
    alpha: &[u32],
    alpha_abs: u32,
) -> Complex64 {
    let cuboid = Cuboid::new(cutoffs);
    let zero_index = (cuboid.total_summands - 1) / 2;
    let mut zv = vec![0i64; dim];
    let mut lv = vec![0.0; dim];
    let mut acc = KahanSum::default();
    for n in (0..zero_index).chain(zero_index + 1..cuboid.total_summands) {
        cuboid.decode(n, cutoffs, &mut zv);
        matvec_int(dim, m_invt, &zv, &mut lv);
        for (l, yi) in lv.iter_mut().zip(y) {
            *l += yi;
        }
        let rot = Complex64::cis(-2.0 * PI * dot(&lv, x));
        acc.add(rot * crandall_g_der(dim as f64 - nu, &lv, lambda, z_arg_bound, alpha, alpha_abs));
    }
    acc.sum
}

/// The Ewald dispatcher behind every public entry point.
///
/// Rescales the generator to unit determinant, projects the shifts into
/// their elementary cells, assembles the two sums with the zero-summand
/// treatment of the selected `variant`, and undoes the rescale
/// afterwards, including the $\log\mu^2$ correction of the regularized
/// branches at $\nu = d + 2k$.
#[allow(clippy::too_many_arguments)]
pub(crate) fn epstein_zeta_internal(
    nu: f64,
    dim: usize,
    m: &[f64],
    x: &[f64],
    y: &[f64],
    lambda: f64,
    variant: Variant,
    alpha: &[u32],
) -> Complex64 {
    let alpha_abs = mult_abs(alpha);
    // early return for 0th derivative special cases
    if variant == Variant::Derivative && alpha_abs == 0 {
        return Complex64::cis(2.0 * PI * dot(x, y))
            * epstein_zeta_internal(nu, dim, m, x, y, 1.0, Variant::Plain, alpha);
    }
    if variant == Variant::RegularizedDerivative && alpha_abs == 0 {
        return epstein_zeta_internal(nu, dim, m, x, y, 1.0, Variant::Regularized, alpha);
    }

    // 1. transform: compute determinant and Fourier-transformed matrix,
    // scale both of them
    let mut m_copy = m.to_vec();
    let mut m_real = m.to_vec();
    let mut m_fourier = vec![0.0; dim * dim];
    let is_diagonal =
        (0..dim).all(|i| (0..dim).all(|j| i == j || m[(dim * i) + j] == 0.0));
    let det = match lu_invert(dim, &mut m_copy, &mut m_fourier) {
        Some(det) => det,
        None => return Complex64::new(f64::NAN, f64::NAN),
    };
    transpose(dim, &mut m_fourier);
    let vol = det.abs();
    let ms = vol.powf(-1.0 / dim as f64);
    for v in m_real.iter_mut() {
        *v *= ms;
    }
    for v in m_fourier.iter_mut() {
        *v /= ms;
    }
    let x_t1: Vec<f64> = x.iter().map(|&v| v * ms).collect();
    let y_t1: Vec<f64> = y.iter().map(|&v| v / ms).collect();
    // 2. transform: get x and y into their respective elementary cells
    let x_t2 = vector_proj(dim, &m_real, &m_fourier, &x_t1);
    let y_t2 = vector_proj(dim, &m_fourier, &m_real, &y_t1);
    let (cutoffs_real, cutoffs_fourier) = cutoffs(dim, &m_real, &m_fourier, is_diagonal);

    let dim_f = dim as f64;
    let mut res;
    if nu < 1.0
        && ((nu / 2.0) - (nu / 2.0).round_ties_even()).abs() < EPS
        && matches!(variant, Variant::Plain | Variant::Regularized)
    {
        // non-positive even integer nu: the trivial zeros
        res = if dot(&x_t2, &x_t2) == 0.0 && nu == 0.0 {
            -Complex64::cis(-2.0 * PI * dot(&x_t1, &y_t2))
        } else {
            Complex64::new(0.0, 0.0)
        };
    } else if (nu - dim_f).abs() < EPS
        && dot(&y_t2, &y_t2) < EPS_ZERO_Y
        && variant == Variant::Plain
    {
        // the pole of the unregularized function
        res = Complex64::new(f64::NAN, f64::NAN);
    } else {
        let z_arg_bound = arg_bound(nu);
        let z_arg_bound_reci = arg_bound(dim_f - nu);
        let s1;
        let mut s2;
        let vx: Vec<f64> = x_t1.iter().zip(&x_t2).map(|(a, b)| a - b).collect();
        let mut xfactor = Complex64::cis(-2.0 * PI * dot(&vx, &y_t1));
        match variant {
            Variant::Plain => {
                let nc = crandall_g(dim_f - nu, &y_t2, lambda, z_arg_bound_reci)
                    * Complex64::cis(-2.0 * PI * dot(&x_t2, &y_t2));
                s1 = sum_real(
                    nu, dim, lambda, &m_real, &x_t2, &y_t2, &cutoffs_real, z_arg_bound,
                );
                s2 = sum_fourier(
                    nu,
                    dim,
                    lambda,
                    &m_fourier,
                    &x_t2,
                    &y_t2,
                    &cutoffs_fourier,
                    z_arg_bound_reci,
                ) + nc;
            }
            Variant::Regularized => {
                let nc = Complex64::from(crandall_g_reg(dim_f - nu, &y_t1, lambda));
                let rot = Complex64::cis(2.0 * PI * dot(&x_t1, &y_t1));
                s2 = sum_fourier(
                    nu,
                    dim,
                    lambda,
                    &m_fourier,
                    &x_t1,
                    &y_t2,
                    &cutoffs_fourier,
                    z_arg_bound_reci,
                );
                // correct the wrong zero summand in the regularized sum
                if !equals(&y_t1, &y_t2) {
                    s2 += crandall_g(dim_f - nu, &y_t2, lambda, z_arg_bound_reci)
                        * Complex64::cis(-2.0 * PI * dot(&x_t1, &y_t2))
                        - crandall_g(dim_f - nu, &y_t1, lambda, z_arg_bound_reci)
                            * Complex64::cis(-2.0 * PI * dot(&x_t1, &y_t1));
                }
                s2 = s2 * rot + nc;
                s1 = sum_real(
                    nu, dim, lambda, &m_real, &x_t2, &y_t2, &cutoffs_real, z_arg_bound,
                ) * rot
                    * xfactor;
                xfactor = Complex64::new(1.0, 0.0);
            }
            Variant::Derivative => {
                let rot = Complex64::cis(2.0 * PI * dot(&x_t1, &y_t1));
                let nc = if equals(&y_t1, &y_t2) {
                    Complex64::from(crandall_g_der(
                        dim_f - nu,
                        &y_t1,
                        lambda,
                        z_arg_bound_reci,
                        alpha,
                        alpha_abs,
                    ))
                } else {
                    crandall_g_der(dim_f - nu, &y_t2, lambda, z_arg_bound_reci, alpha, alpha_abs)
                        * Complex64::cis(-2.0 * PI * dot(&y_t2, &x_t1))
                        * rot
                };
                s2 = sum_fourier_der(
                    nu,
                    dim,
                    lambda,
                    &m_fourier,
                    &x_t1,
                    &y_t2,
                    &cutoffs_fourier,
                    z_arg_bound_reci,
                    alpha,
                    alpha_abs,
                );
                s2 = (s2 * rot + nc) * lambda.powi(alpha_abs as i32);
                s1 = sum_real_der(
                    nu,
                    dim,
                    lambda,
                    &m_real,
                    &x_t2,
                    &y_t2,
                    &cutoffs_real,
                    z_arg_bound,
                    alpha,
                ) * rot
                    * xfactor;
                xfactor = Complex64::from(ms.powi(alpha_abs as i32).recip());
            }
            Variant::RegularizedDerivative => {
                let rot = Complex64::cis(2.0 * PI * dot(&x_t1, &y_t1));
                let nc =
                    Complex64::from(crandall_g_reg_der(dim_f - nu, &y_t1, lambda, alpha, alpha_abs));
                s2 = sum_fourier_der(
                    nu,
                    dim,
                    lambda,
                    &m_fourier,
                    &x_t1,
                    &y_t2,
                    &cutoffs_fourier,
                    z_arg_bound_reci,
                    alpha,
                    alpha_abs,
                );
                if !equals(&y_t1, &y_t2) {
                    s2 += crandall_g_der(
                        dim_f - nu,
                        &y_t2,
                        lambda,
                        z_arg_bound_reci,
                        alpha,
                        alpha_abs,
                    ) * Complex64::cis(-2.0 * PI * dot(&x_t1, &y_t2))
                        - crandall_g_der(
                            dim_f - nu,
                            &y_t1,
                            lambda,
                            z_arg_bound_reci,
                            alpha,
                            alpha_abs,
                        ) * Complex64::cis(-2.0 * PI * dot(&x_t1, &y_t1));
                }
                s2 = (s2 * rot + nc) * lambda.powi(alpha_abs as i32);
                s1 = sum_real_der(
                    nu,
                    dim,
                    lambda,
                    &m_real,
                    &x_t2,
                    &y_t2,
                    &cutoffs_real,
                    z_arg_bound,
                    alpha,
                ) * rot
                    * xfactor;
                xfactor = Complex64::from(ms.powi(alpha_abs as i32).recip());
            }
        }
        res = xfactor * (lambda * lambda / PI).powf(-nu / 2.0) / r_gamma(nu / 2.0)
            * (s1 + s2 * lambda.powi(dim as i32));
    }
    res *= ms.powf(nu);
    // apply correction to the matrix scaling if nu = d + 2k
    let k = (((nu - dim_f) / 2.0).round_ties_even()).max(0.0);
    if matches!(
        variant,
        Variant::Regularized | Variant::RegularizedDerivative
    ) && nu == dim_f + 2.0 * k
    {
        if k == 0.0 {
            if variant == Variant::Regularized {
                res += PI.powf(dim_f / 2.0) / r_gamma(dim_f / 2.0) * (ms * ms).ln() / vol;
            }
            // the correction is constant in y, so its derivative vanishes
        } else {
            let sign = if (k as i64 + 1) % 2 == 0 { 1.0 } else { -1.0 };
            let y_power = match variant {
                Variant::Regularized => dot(y, y).powi(k as i32),
                _ => polynomial_y_der(k as u32, y, alpha, alpha_abs),
            };
            res -= PI.powf(2.0 * k + dim_f / 2.0) / r_gamma(k + dim_f / 2.0) * sign
                / r_gamma(k + 1.0)
                * y_power
                * (ms * ms).ln()
                / vol;
        }
    }
    res
}
