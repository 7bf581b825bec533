//! Dense kernels on top of `faer::Mat` and plain slices.
//!
//! This module implements the core traits for `faer::Mat<T>` acting on `[T]`
//! and provides the handful of dense combinations the matrix translators need
//! (`M·α + K`, `M·α`, `b + M·w − K·x`). Row loops are distributed with Rayon
//! when the `rayon` feature is enabled.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)
//! - [num-traits crate documentation](https://docs.rs/num-traits)

use crate::core::traits::{InnerProduct, MatVec, Scalar};
use crate::error::TdError;
use faer::Mat;

/// Implements matrix-vector multiplication for `faer::Mat` over slices.
///
/// Computes `y = A * x` where `A` is a dense matrix, `x` and `y` are vectors.
impl<T: Scalar> MatVec<[T]> for Mat<T> {
    fn matvec(&self, x: &[T], y: &mut [T]) {
        assert_eq!(self.nrows(), y.len(), "Output vector y has incorrect length");
        assert_eq!(self.ncols(), x.len(), "Input vector x has incorrect length");
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            y.par_iter_mut().enumerate().for_each(|(i, yi)| {
                *yi = (0..self.ncols()).fold(T::zero(), |acc, j| acc + self[(i, j)] * x[j]);
            });
        }
        #[cfg(not(feature = "rayon"))]
        {
            for (i, yi) in y.iter_mut().enumerate() {
                *yi = (0..self.ncols()).fold(T::zero(), |acc, j| acc + self[(i, j)] * x[j]);
            }
        }
    }
}

/// Implements inner product and norm for slices, with optional Rayon parallelism.
impl<T: Scalar> InnerProduct<[T]> for () {
    type Scalar = T;
    /// Computes the dot product of two vectors: `x^T y`.
    fn dot(&self, x: &[T], y: &[T]) -> T {
        assert_eq!(x.len(), y.len(), "Vectors must have the same length");
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            x.par_iter()
                .zip(y.par_iter())
                .map(|(xi, yi)| *xi * *yi)
                .reduce(|| T::zero(), |acc, v| acc + v)
        }
        #[cfg(not(feature = "rayon"))]
        {
            x.iter()
                .zip(y.iter())
                .map(|(xi, yi)| *xi * *yi)
                .fold(T::zero(), |acc, v| acc + v)
        }
    }
    /// Computes the Euclidean norm of a vector: `||x||_2`.
    fn norm(&self, x: &[T]) -> T {
        self.dot(x, x).sqrt()
    }
}

/// An `n × n` matrix of zeros.
pub fn zeros<T: Scalar>(n: usize) -> Mat<T> {
    Mat::from_fn(n, n, |_, _| T::zero())
}

/// Checks that `m` is square and returns its order.
pub fn square_order<T>(what: &'static str, m: &Mat<T>) -> Result<usize, TdError> {
    if m.nrows() != m.ncols() {
        return Err(TdError::DimensionMismatch {
            what,
            expected: m.nrows(),
            found: m.ncols(),
        });
    }
    Ok(m.nrows())
}

/// Checks that a matrix is `n × n`.
pub fn check_square<T>(what: &'static str, m: &Mat<T>, n: usize) -> Result<(), TdError> {
    let order = square_order(what, m)?;
    if order != n {
        return Err(TdError::DimensionMismatch {
            what,
            expected: n,
            found: order,
        });
    }
    Ok(())
}

/// Checks that a vector has length `n`.
pub fn check_len<T>(what: &'static str, v: &[T], n: usize) -> Result<(), TdError> {
    if v.len() != n {
        return Err(TdError::DimensionMismatch {
            what,
            expected: n,
            found: v.len(),
        });
    }
    Ok(())
}

/// Computes `M·α + K`, or `M·α` when `k` is `None`.
pub fn scaled_sum<T: Scalar>(m: &Mat<T>, alpha: T, k: Option<&Mat<T>>) -> Mat<T> {
    match k {
        Some(k) => Mat::from_fn(m.nrows(), m.ncols(), |i, j| m[(i, j)] * alpha + k[(i, j)]),
        None => Mat::from_fn(m.nrows(), m.ncols(), |i, j| m[(i, j)] * alpha),
    }
}

/// Computes `y ← y + s·A·x`.
pub fn add_scaled_matvec<T: Scalar>(a: &Mat<T>, s: T, x: &[T], y: &mut [T]) {
    let mut ax = vec![T::zero(); a.nrows()];
    a.matvec(x, &mut ax);
    for (yi, axi) in y.iter_mut().zip(ax) {
        *yi = *yi + s * axi;
    }
}
