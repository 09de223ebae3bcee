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

//! Various important mathematical constants.
//!
//! Extends the standard library constants with quantities the gamma and
//! zeta kernels need.
//!
//! - $\sqrt{\pi}$
//! - $\sqrt{\tau}$
//! - $\gamma$ (Euler-Mascheroni)

pub mod f64 {
    //! Extended mathematical constants for the `f64` double-precision
    //! floating point type.

    /// $\sqrt{\pi}$
    ///
    /// Value taken from OEIS: [A002161]
    ///
    /// [A002161]: https://oeis.org/A002161
    pub const SQRT_PI: f64 = 1.77245385090551602729816748334_f64;

    /// $\sqrt{2\pi} = \sqrt{\tau}$
    ///
    /// Value taken from OEIS: [A019727]
    ///
    /// [A019727]: https://oeis.org/A019727
    pub const SQRT_TAU: f64 = 2.50662827463100050241576528481_f64;

    /// Euler-Mascheroni constant $\gamma$
    ///
    /// Value taken from OEIS: [A001620]
    ///
    /// [A001620]: https://oeis.org/A001620
    pub const EULER_GAMMA: f64 = 0.57721566490153286060651209008_f64;
}
