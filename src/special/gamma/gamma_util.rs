//**********************************************************************
// This file is part of epstein-rs                                     *
// Copyright 2023 Matthew R. Hennefarth                                *
//**********************************************************************

use crate::constants::f64::SQRT_TAU;

/// Evaluate an $n$-degree polynomial at a specific value $x$.
///
/// Evaluates an $n$-degree polynomial where the coefficients are in
/// reversed order. That is if $\text{coeffs}\[i\] = c_i$, then evaluate
/// $$
/// c_0x^n + c_1x^{n-1} + \ldots + c_n
/// $$
pub(crate) fn eval_poly(x: f64, coeffs: &[f64]) -> f64 {
    match coeffs.len() {
        0 => 0.0,
        1 => coeffs[0],
        _ => coeffs[1..]
            .iter()
            .fold(coeffs[0], |result, &c| (result * x) + c),
    }
}

/// Coefficients are
/// $$
/// \frac{B_{2n}}{2n(2n-1)}
/// $$
/// where $B_{2n}$ is the $2n$th Bernoulli number, in reversed order for
/// [eval_poly] in $1/x^2$.
const LNGAMMA_STIRLING_COEFFS: [f64; 8] = [
    -2.955065359477124183e-2,
    6.4102564102564102564e-3,
    -1.9175269175269175269e-3,
    8.4175084175084175084e-4,
    -5.952380952380952381e-4,
    7.9365079365079365079e-4,
    -2.7777777777777777778e-3,
    8.3333333333333333333e-2,
];

/// Stirling approximation of the Gamma function,
/// $$
/// \Gamma(x) \approx \sqrt{\frac{2\pi}{x}}\left(\frac{x}{e}\right)^x
/// \exp\left(\frac{1}{12x} - \frac{1}{360x^3} + \ldots\right)
/// $$
/// valid for large positive $x$.
pub(crate) fn gamma_stirling_series(x: f64) -> f64 {
    let series = eval_poly(x.recip().powi(2), &LNGAMMA_STIRLING_COEFFS) / x;
    let prefactor = (x / std::f64::consts::E).powf(x);
    SQRT_TAU / x.sqrt() * prefactor * series.exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRECISION: f64 = 1E-14;

    #[test]
    fn test_eval_poly() {
        assert_eq!(eval_poly(1.0, &[1.0, 1.0]), 2.0);
        assert_eq!(eval_poly(0.0, &[1.0, 1.0]), 1.0);
        assert_eq!(eval_poly(2.0, &[1.0, 1.0]), 3.0);

        for i in 0..10 {
            let i = i as f64;
            for j in 0..10 {
                let j = j as f64;
                assert_eq!(eval_poly(i, &[j]), j);
                assert_eq!(eval_poly(i, &[0.0, j]), j);
                assert_eq!(eval_poly(i, &[0.0, 0.0, j]), j);
            }
        }
        assert_almost_eq!(
            eval_poly(72.2, &[-6.42, 5.111219, 0.12]),
            -33097.2827882,
            PRECISION
        );

        assert_almost_eq!(
            eval_poly(-6.124, &[0.615, -2.801, 0.837, -4.701, 7.357]),
            1575.84328434321037,
            PRECISION
        );
    }

    #[test]
    fn test_gamma_stirling_series() {
        // Gamma(34) = 33!
        assert_almost_eq!(
            gamma_stirling_series(34.0) / 8.68331761881188649551819440128e36,
            1.0,
            1e-13
        );
        // Gamma(33.5) = sqrt(pi) * prod_{k=0}^{32} (k + 1/2)
        let g: f64 = crate::constants::f64::SQRT_PI
            * (0..33).map(|k| k as f64 + 0.5).product::<f64>();
        assert_almost_eq!(gamma_stirling_series(33.5) / g, 1.0, 1e-13);
    }
}
