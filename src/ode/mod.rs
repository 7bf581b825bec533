//! Equation contract for spatially discretized first-order ODE systems.
//!
//! An ODE system is given in the form
//!
//! ```text
//!   M(t, x) · dx/dt + K(t, x) · x = b(t, x)
//! ```
//!
//! where `M` is the mass matrix, `K` the stiffness (conductance) matrix and `b`
//! the load vector. The equation writes these into caller-owned buffers, so
//! the adapters in [`crate::system`] can reuse their storage across iterations.

use crate::core::Scalar;
use faer::Mat;

/// A first-order implicit ODE usable with Picard iteration.
pub trait FirstOrderImplicitOde<T: Scalar> {
    /// Number of unknowns `n`; `M` and `K` are `n × n`, `b` has length `n`.
    fn matrix_size(&self) -> usize;

    /// Whether `M`, `K` and `b` are independent of `x`.
    fn is_linear(&self) -> bool;

    /// Assembles `M`, `K` and `b` at time `t` and state `x`.
    ///
    /// The buffers arrive sized `n × n`, `n × n` and `n` and hold stale values
    /// from the previous call; implementations must overwrite every entry.
    fn assemble(&self, t: T, x: &[T], m: &mut Mat<T>, k: &mut Mat<T>, b: &mut [T]);
}

/// A first-order implicit ODE that additionally provides an analytic Jacobian.
pub trait FirstOrderImplicitOdeNewton<T: Scalar>: FirstOrderImplicitOde<T> {
    /// Assembles `Jac = d(M·ẋ + K·x − b)/dx` at time `t` and state `x`.
    ///
    /// `dxdot_dx` is the sensitivity of the discretized time derivative to the
    /// new state (the current-step weight), `dx_dx` the sensitivity of the
    /// evaluation point to the new state (zero for explicit schemes).
    fn assemble_jacobian(&self, t: T, x: &[T], dxdot_dx: T, dx_dx: T, jac: &mut Mat<T>);
}
