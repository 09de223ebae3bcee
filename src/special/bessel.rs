//**********************************************************************
// This file is part of epstein-rs                                     *
// Copyright 2023 Matthew R. Hennefarth                                *
//**********************************************************************

//! The incomplete Bessel function of the lattice-sum literature.

use std::f64::consts::PI;

use crate::linalg::dot;
use crate::special::crandall::{arg_bound, crandall_g};
use crate::special::gamma::r_gamma;
use crate::special::{gamma_star, ugamma};

/// Incomplete Bessel function
/// $$
/// \mathcal{G}_\nu(k, r) = 2\int_0^1 t^{-\nu - 1}
/// e^{-\pi k^2/t^2} e^{-\pi r^2 t^2}\,dt
/// $$
/// evaluated through a Crandall-function series close to the origin and
/// a three-term recursive rational scheme away from it. The
/// parameter-reflection path onto the modified Bessel function of the
/// second kind is not implemented.
pub fn incomplete_bessel_g(nu: f64, k: &[f64], r: &[f64]) -> f64 {
    let eps = 1e-32;

    let s = -nu / 2.0;
    let x = PI * dot(k, k);
    let y = PI * dot(r, r);

    // vanishing arguments
    if x + y < eps {
        return s;
    }

    // vanishing first argument
    if x < eps {
        // lower Crandall function
        return r_gamma(s) * gamma_star(s, y);
    }

    // vanishing second argument
    if y < eps {
        return crandall_g(nu, k, 1.0, arg_bound(nu));
    }

    // choose the series expansion close to the origin
    if x + y < 1.5 {
        let mut result = x.powf(s) * ugamma(-s, x);
        let mut fact = 1.0;
        for j in 1..=20 {
            fact *= j as f64;
            result += x.powf(s + j as f64) * ugamma(-s - j as f64, x) * (-y).powi(j) / fact;
        }
        return result;
    }

    // recursive algorithm away from the origin

    // numerators
    let mut n1 = 0.0;
    let mut n2 = 0.0;
    let mut n3 = 1.0;

    // denominators
    let mut d1 = 0.0;
    let mut d2 = (x + y).exp();
    let mut d3 = (x - y + s + 1.0) * d2;

    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for j in 2..=100 {
        let jf = j as f64;
        numerator = ((x - y + s + 1.0 + 2.0 * (jf - 1.0)) * n3
            + (2.0 * y - s - (jf - 1.0)) * n2
            - y * n1)
            / jf;
        denominator = ((x - y + s + 1.0 + 2.0 * (jf - 1.0)) * d3
            + ((2.0 * y - s - (jf - 1.0)) * d2 - y * d1))
            / jf;

        n1 = n2;
        n2 = n3;
        n3 = numerator;

        d1 = d2;
        d2 = d3;
        d3 = denominator;
    }
    numerator / denominator
}
