//! Core linear-algebra traits for timedisc.

use num_traits::Float;
use std::fmt::Debug;

/// Scalar type usable for all matrices and vectors in the crate.
pub trait Scalar: Float + Debug + Send + Sync + 'static {}

impl<T: Float + Debug + Send + Sync + 'static> Scalar for T {}

/// Matrix–vector product: y ← A x.
pub trait MatVec<V: ?Sized> {
    /// Compute y = A · x.
    fn matvec(&self, x: &V, y: &mut V);
}

/// Inner products & norms.
pub trait InnerProduct<V: ?Sized> {
    /// Associated scalar type.
    type Scalar: Copy + PartialOrd;
    /// Compute dot(x, y).
    fn dot(&self, x: &V, y: &V) -> Self::Scalar;
    /// Compute ‖x‖₂.
    fn norm(&self, x: &V) -> Self::Scalar;
}
