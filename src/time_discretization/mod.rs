//! Time-discretization schemes for first-order ODE systems.
//!
//! This module defines the `TimeDiscretization` trait and includes the backward
//! Euler, forward Euler and BDF schemes. A scheme approximates the time
//! derivative at the current step as
//!
//! ```text
//!   dx/dt ≈ α · x_new − w
//! ```
//!
//! where `α` is the current-step weight and `w` the weighted old state. The
//! scheme also decides at which state the spatial operator is evaluated.

use crate::config::options::SchemeType;
use crate::core::Scalar;
use crate::error::TdError;
use faer::Mat;

/// The two families of schemes the matrix translators distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeDiscKind {
    /// Operator evaluated at the new state (backward Euler, BDF, ...).
    Implicit,
    /// Operator evaluated at the previous state (forward Euler).
    ForwardExplicit,
}

/// A time-discretization scheme and its history state.
pub trait TimeDiscretization<T: Scalar> {
    /// Family tag used for the one-time translator dispatch.
    fn kind(&self) -> TimeDiscKind;

    /// Short scheme name for diagnostics.
    fn name(&self) -> &'static str;

    /// Sets the initial time and state, discarding any history.
    fn set_initial_state(&mut self, t0: T, x0: &[T]);

    /// Prepares the step ending at time `t` with increment `delta_t`.
    fn next_timestep(&mut self, t: T, delta_t: T) -> Result<(), TdError>;

    /// Records the converged solution `x` at time `t` as history.
    fn push_state(&mut self, t: T, x: &[T]) -> Result<(), TdError>;

    /// Time at which the spatial operator is evaluated.
    fn current_time(&self) -> T;

    /// Current time increment.
    fn current_time_increment(&self) -> T;

    /// `α = d(dx/dt)/dx_new` of the active scheme.
    fn current_x_weight(&self) -> T;

    /// State at which the spatial operator is evaluated.
    fn current_x<'a>(&'a self, x_new: &'a [T]) -> &'a [T];

    /// History contribution `w` of the time derivative.
    ///
    /// Empty until both an initial state and a time step are set.
    fn weighted_old_x(&self) -> &[T];

    /// Whether the scheme by itself yields a linear system.
    fn is_linear_time_disc(&self) -> bool;

    /// `d(x_curr)/dx_new`: one when the operator sees the new state.
    fn dx_dx(&self) -> T {
        T::one()
    }

    /// Correction applied to a freshly assembled Jacobian.
    fn adjust_matrix(&self, _jac: &mut Mat<T>) {}

    /// Undiscounted previous state, for forward-explicit schemes only.
    fn x_old(&self) -> Option<&[T]> {
        None
    }
}

pub mod backward_euler;
pub mod bdf;
pub mod forward_euler;

pub use backward_euler::BackwardEuler;
pub use bdf::BackwardDifferentiationFormula;
pub use forward_euler::ForwardEuler;

/// Builds the boxed scheme selected by `scheme`.
pub fn create_time_discretization<T: Scalar>(
    scheme: &SchemeType,
) -> Result<Box<dyn TimeDiscretization<T>>, TdError> {
    log::debug!("creating time discretization {:?}", scheme);
    match *scheme {
        SchemeType::BackwardEuler => Ok(Box::new(BackwardEuler::new())),
        SchemeType::ForwardEuler => Ok(Box::new(ForwardEuler::new())),
        SchemeType::Bdf { order } => Ok(Box::new(BackwardDifferentiationFormula::new(order)?)),
    }
}

/// Validates a time increment before a scheme stores it.
pub(crate) fn check_time_step<T: Scalar>(delta_t: T) -> Result<(), TdError> {
    if delta_t > T::zero() && delta_t.is_finite() {
        Ok(())
    } else {
        Err(TdError::InvalidTimeStep(delta_t.to_f64().unwrap_or(f64::NAN)))
    }
}

/// `α` of the current step, or `NotInitialized` before the first `next_timestep`.
pub(crate) fn checked_x_weight<T: Scalar>(td: &dyn TimeDiscretization<T>) -> Result<T, TdError> {
    let alpha = td.current_x_weight();
    if !(td.current_time_increment() > T::zero()) || !alpha.is_finite() {
        return Err(TdError::NotInitialized("time step (call next_timestep)"));
    }
    Ok(alpha)
}

/// Checks that a pushed state matches the dimension of the stored history.
pub(crate) fn check_state_len<T>(expected: usize, x: &[T]) -> Result<(), TdError> {
    if expected != 0 && expected != x.len() {
        return Err(TdError::DimensionMismatch {
            what: "pushed state",
            expected,
            found: x.len(),
        });
    }
    Ok(())
}
