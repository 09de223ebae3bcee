#![warn(missing_docs)]

//! Epstein zeta functions for arbitrary-dimensional real lattices.
//!
//! The crate evaluates the Epstein zeta function, its regularization, and
//! multi-index derivatives of the set zeta function through Crandall's
//! dual-lattice decomposition. See [`special`] for the public entry points.

fn is_close<T>(x: T, y: T, epsilon: T) -> bool
where
    T: num_traits::Float,
{
    if x.is_finite() {
        return (x - y).abs() < epsilon;
    }
    if x.is_infinite() {
        return x == y;
    }
    // NaN != Nan apparently
    x.is_nan() && y.is_nan()
}

macro_rules! assert_almost_eq {
    ($a:expr, $b:expr, $prec:expr) => {
        if !$crate::is_close($a, $b, $prec) {
            panic!(
                "assertion failed: `abs(left - right) < {:e}`, (left:
`{}`, right: `{}`)",
                $prec, $a, $b
            );
        }
    };
}

pub mod constants;
mod linalg;
pub mod special;
