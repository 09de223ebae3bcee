//**********************************************************************
// This file is part of epstein-rs                                     *
// Copyright 2023 Matthew R. Hennefarth                                *
//**********************************************************************

//! Minimal linear algebra for the lattice transforms.
//!
//! Square matrices are stored row-major in flat slices of length
//! `dim * dim`; no tolerance checks beyond the ones documented here are
//! performed.

/// Minimal distance of two vector elements considered unequal, $2^{-32}$.
const EPS: f64 = 2.328_306_436_538_696e-10;

/// Euclidean dot product of two vectors.
pub(crate) fn dot(v1: &[f64], v2: &[f64]) -> f64 {
    v1.iter().zip(v2).map(|(a, b)| a * b).sum()
}

/// Matrix times integer vector, written into `res`.
pub(crate) fn matvec_int(dim: usize, m: &[f64], v: &[i64], res: &mut [f64]) {
    for i in 0..dim {
        res[i] = 0.0;
        for j in 0..dim {
            res[i] += m[i * dim + j] * v[j] as f64;
        }
    }
}

/// Square matrix transpose in place.
pub(crate) fn transpose(dim: usize, m: &mut [f64]) {
    for i in 0..dim {
        for j in 0..i {
            m.swap(dim * i + j, dim * j + i);
        }
    }
}

/// Componentwise equality of two vectors up to $2^{-32}$.
pub(crate) fn equals(v1: &[f64], v2: &[f64]) -> bool {
    v1.iter().zip(v2).all(|(a, b)| (a - b).abs() < EPS)
}

/// Whether every component of `v` is within $2^{-32}$ of zero.
pub(crate) fn equals_zero(v: &[f64]) -> bool {
    v.iter().all(|a| a.abs() < EPS)
}

/// Invert a square matrix through an LU decomposition with row pivoting.
///
/// `m` is overwritten by its LU factors; the inverse is written into
/// `inv`. Returns the determinant of the factored matrix up to the sign
/// of the row permutation, or `None` if an exact-zero pivot is hit. No
/// pivot tolerance is applied beyond that: the caller guarantees a
/// well-conditioned matrix.
pub(crate) fn lu_invert(dim: usize, m: &mut [f64], inv: &mut [f64]) -> Option<f64> {
    let mut p: Vec<usize> = (0..dim).collect();
    for i in 0..dim {
        // column pivot search
        let mut r = i;
        for j in (i + 1)..dim {
            if m[i * dim + j].abs() > m[i * dim + r].abs() {
                r = j;
            }
        }
        if i != r {
            p.swap(i, r);
            for k in 0..dim {
                m.swap(i * dim + k, r * dim + k);
            }
        }
        if m[i * dim + i] == 0.0 {
            return None;
        }
        // standard LU decomposition
        for k in (i + 1)..dim {
            m[k * dim + i] /= m[i * dim + i];
            for j in (i + 1)..dim {
                m[k * dim + j] -= m[k * dim + i] * m[i * dim + j];
            }
        }
    }
    let mut y = vec![0.0; dim];
    for i in 0..dim {
        // solve L y = e_p[i]
        for yj in y.iter_mut().take(p[i]) {
            *yj = 0.0;
        }
        y[p[i]] = 1.0;
        for k in (p[i] + 1)..dim {
            y[k] = 0.0;
            for j in p[i]..k {
                y[k] -= m[k * dim + j] * y[j];
            }
        }
        // solve U x = y
        for j in (0..dim).rev() {
            inv[j * dim + i] = y[j];
            for k in (j + 1)..dim {
                inv[j * dim + i] -= m[j * dim + k] * inv[k * dim + i];
            }
            inv[j * dim + i] /= m[j * dim + j];
        }
    }
    Some((0..dim).map(|k| m[k * dim + k]).product())
}

/// Infinity norm (maximum absolute row sum) of a square matrix.
pub(crate) fn inf_norm(dim: usize, m: &[f64]) -> f64 {
    (0..dim)
        .map(|i| (0..dim).map(|j| m[i * dim + j].abs()).sum())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dot() {
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
        assert_eq!(dot(&[0.5], &[-0.5]), -0.25);
        assert_eq!(dot(&[], &[]), 0.0);
    }

    #[test]
    fn test_matvec_int() {
        let m = [1.0, 2.0, 3.0, 4.0];
        let mut res = [0.0; 2];
        matvec_int(2, &m, &[1, -1], &mut res);
        assert_eq!(res, [-1.0, -1.0]);
        matvec_int(2, &m, &[0, 2], &mut res);
        assert_eq!(res, [4.0, 8.0]);
    }

    #[test]
    fn test_transpose() {
        let mut m = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        transpose(3, &mut m);
        assert_eq!(m, [1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.0]);
    }

    #[test]
    fn test_equals() {
        assert!(equals(&[1.0, 2.0], &[1.0, 2.0 + 1e-11]));
        assert!(!equals(&[1.0, 2.0], &[1.0, 2.0 + 1e-9]));
        assert!(equals_zero(&[1e-11, -1e-11]));
        assert!(!equals_zero(&[1e-9]));
    }

    #[test]
    fn test_lu_invert() {
        // inverse of [[3/2, 1/5], [1/4, 1]] is 20/29 [[1, -1/5], [-1/4, 3/2]]
        let mut m = [1.5, 0.2, 0.25, 1.0];
        let mut inv = [0.0; 4];
        let det = lu_invert(2, &mut m, &mut inv).unwrap();
        assert_relative_eq!(det.abs(), 29.0 / 20.0, max_relative = 1e-14);
        let expected = [20.0 / 29.0, -4.0 / 29.0, -5.0 / 29.0, 30.0 / 29.0];
        for (a, b) in inv.iter().zip(&expected) {
            assert_relative_eq!(a, b, max_relative = 1e-14);
        }
    }

    #[test]
    fn test_lu_invert_permutation() {
        let mut m = [0.0, 1.0, 1.0, 0.0];
        let mut inv = [0.0; 4];
        let det = lu_invert(2, &mut m, &mut inv).unwrap();
        assert_eq!(det.abs(), 1.0);
        assert_eq!(inv, [0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_lu_invert_3d() {
        let a = [2.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 2.0];
        let mut m = a;
        let mut inv = [0.0; 9];
        let det = lu_invert(3, &mut m, &mut inv).unwrap();
        assert_relative_eq!(det.abs(), 8.0, max_relative = 1e-14);
        // A * A^-1 = I
        for i in 0..3 {
            for j in 0..3 {
                let mut s = 0.0;
                for k in 0..3 {
                    s += a[i * 3 + k] * inv[k * 3 + j];
                }
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_almost_eq!(s, expected, 1e-14);
            }
        }
    }

    #[test]
    fn test_lu_invert_singular() {
        let mut m = [1.0, 2.0, 2.0, 4.0];
        let mut inv = [0.0; 4];
        assert!(lu_invert(2, &mut m, &mut inv).is_none());
    }

    #[test]
    fn test_inf_norm() {
        assert_eq!(inf_norm(2, &[1.0, -2.0, 3.0, 0.5]), 3.5);
        assert_eq!(inf_norm(1, &[-4.0]), 4.0);
    }
}
