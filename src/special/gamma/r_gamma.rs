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

use crate::special::gamma::{eval_poly, gamma_stirling_series};

const MIN_TO_USE_STIRLING: f64 = 33.0;

const P: [f64; 7] = [
    1.60119522476751861407E-4,
    1.19135147006586384913E-3,
    1.04213797561761569935E-2,
    4.76367800457137231464E-2,
    2.07448227648435975150E-1,
    4.94214826801497100753E-1,
    9.99999999999999996796E-1,
];
const Q: [f64; 8] = [
    -2.31581873324120129819E-5,
    5.39605580493303397842E-4,
    -4.45641913851797240494E-3,
    1.18139785222060435552E-2,
    3.58236398605498653373E-2,
    -2.34591795718243348568E-1,
    7.14304917030273074085E-2,
    1.00000000000000000320E0,
];

const MIN_USE_SMALL: f64 = 1.0E-9;

/// Value of the Gamma function when |x| < `MIN_USE_SMALL`
#[inline(always)]
fn r_gamma_small(x: f64) -> f64 {
    (x + 0.5772156649015329 * x * x).recip()
}

/// Implementation of `gamma()` for real-valued inputs.
/// $$
/// \Gamma(x) = \int^{\infty}_0 t^{x-1}e^{-t}dt
/// $$
///
/// The implementation is loosely based on the [cephes implementation].
/// For large $x > 33$ the Stirling series is used; negative arguments go
/// through the reflection formula
/// $$
/// \Gamma(-x)\Gamma(x) = -\frac{\pi}{x\sin(\pi x)}
/// $$
/// and otherwise the value is moved into the interval $(2,3)$ where two
/// rational functions of degree 6 and 7 approximate the Gamma function.
///
/// [cephes implementation]: https://github.com/scipy/scipy/blob/main/scipy/special/cephes/gamma.c
pub(crate) fn r_gamma(x: f64) -> f64 {
    // Gamma function has poles at the non-positive integers
    if x <= 0.0 && x == x.floor() {
        return f64::NAN;
    }
    if !x.is_finite() {
        return x;
    }

    if x.is_sign_negative() {
        let q = -x;
        let p = q.floor();
        let mut z = q - p;
        if z > 0.5 {
            z = 1.0 - z;
        }
        let s = q * (PI * z).sin();
        let r = PI / (s.abs() * r_gamma(q));
        // sign alternates with the parity of floor(-x)
        return if (p as i64) % 2 == 0 { -r } else { r };
    }

    if x > MIN_TO_USE_STIRLING {
        return gamma_stirling_series(x);
    }

    if x < MIN_USE_SMALL {
        return r_gamma_small(x);
    }

    let mut x = x;
    let mut z = 1.0;

    while x >= 3.0 {
        x -= 1.0;
        z *= x;
    }
    while x < 2.0 {
        z /= x;
        x += 1.0;
    }

    if x == 2.0 {
        return z;
    }

    x -= 2.0;
    let p = eval_poly(x, &P);
    let q = eval_poly(x, &Q);

    z * p / q
}
