// Forward (explicit) Euler scheme

use crate::core::Scalar;
use crate::error::TdError;
use crate::time_discretization::{TimeDiscKind, TimeDiscretization, check_state_len, check_time_step};

/// Forward Euler: `dx/dt ≈ (x_new − x_old) / Δt`, operator at `(t_old, x_old)`.
///
/// Because the spatial operator only sees the previous state, the resulting
/// system is linear in `x_new` whatever the equation.
#[derive(Debug, Clone)]
pub struct ForwardEuler<T> {
    t: T,
    t_old: T,
    delta_t: T,
    x_old: Vec<T>,
    weighted_old_x: Vec<T>,
}

impl<T: Scalar> ForwardEuler<T> {
    /// new with empty state; user must call `set_initial_state` and `next_timestep`.
    pub fn new() -> Self {
        Self {
            t: T::zero(),
            t_old: T::zero(),
            delta_t: T::zero(),
            x_old: Vec::new(),
            weighted_old_x: Vec::new(),
        }
    }

    /// Time of the target step, as opposed to the evaluation time.
    pub fn target_time(&self) -> T {
        self.t
    }

    fn refresh_weighted_old_x(&mut self) {
        self.weighted_old_x.clear();
        if self.delta_t > T::zero() {
            let dt = self.delta_t;
            self.weighted_old_x.extend(self.x_old.iter().map(|&x| x / dt));
        }
    }
}

impl<T: Scalar> Default for ForwardEuler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> TimeDiscretization<T> for ForwardEuler<T> {
    fn kind(&self) -> TimeDiscKind {
        TimeDiscKind::ForwardExplicit
    }

    fn name(&self) -> &'static str {
        "forward_euler"
    }

    fn set_initial_state(&mut self, t0: T, x0: &[T]) {
        self.t = t0;
        self.t_old = t0;
        self.x_old = x0.to_vec();
        self.refresh_weighted_old_x();
    }

    fn next_timestep(&mut self, t: T, delta_t: T) -> Result<(), TdError> {
        check_time_step(delta_t)?;
        self.t = t;
        self.t_old = t - delta_t;
        self.delta_t = delta_t;
        self.refresh_weighted_old_x();
        Ok(())
    }

    fn push_state(&mut self, _t: T, x: &[T]) -> Result<(), TdError> {
        check_state_len(self.x_old.len(), x)?;
        self.x_old.clear();
        self.x_old.extend_from_slice(x);
        self.refresh_weighted_old_x();
        Ok(())
    }

    fn current_time(&self) -> T {
        self.t_old
    }

    fn current_time_increment(&self) -> T {
        self.delta_t
    }

    fn current_x_weight(&self) -> T {
        T::one() / self.delta_t
    }

    fn current_x<'a>(&'a self, _x_new: &'a [T]) -> &'a [T] {
        &self.x_old
    }

    fn weighted_old_x(&self) -> &[T] {
        &self.weighted_old_x
    }

    fn is_linear_time_disc(&self) -> bool {
        true
    }

    fn dx_dx(&self) -> T {
        T::zero()
    }

    fn x_old(&self) -> Option<&[T]> {
        Some(&self.x_old)
    }
}
