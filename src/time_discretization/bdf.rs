//! Backward differentiation formulas (BDF) of orders one to six.
//!
//! BDF(k) approximates the time derivative from the new state and the last
//! `k` converged states:
//!
//! ```text
//!   dx/dt ≈ (c₀ · x_new − Σᵢ cᵢ · x_{n−k+i}) / Δt
//! ```
//!
//! Until `k` states are available the scheme runs at the highest order the
//! history supports, so the first step is always backward Euler. The
//! coefficients assume a constant time increment over the history window; a
//! changed increment drops the history to the newest state and the order ramps
//! up again.
//!
//! # References
//! - Hairer, E., Wanner, G. (1996). Solving Ordinary Differential Equations II. Springer.

use std::collections::VecDeque;

use crate::core::Scalar;
use crate::error::TdError;
use crate::time_discretization::{TimeDiscKind, TimeDiscretization, check_state_len, check_time_step};

/// Highest supported order.
pub const MAX_ORDER: usize = 6;

// Row k-1 holds [c₀, c₁ … c_k]; c₁ multiplies the oldest state, c_k the newest.
const COEFFS: [&[f64]; MAX_ORDER] = [
    &[1.0, 1.0],
    &[1.5, -0.5, 2.0],
    &[11.0 / 6.0, 1.0 / 3.0, -1.5, 3.0],
    &[25.0 / 12.0, -0.25, 4.0 / 3.0, -3.0, 4.0],
    &[137.0 / 60.0, 0.2, -1.25, 10.0 / 3.0, -5.0, 5.0],
    &[147.0 / 60.0, -1.0 / 6.0, 1.2, -3.75, 20.0 / 3.0, -7.5, 6.0],
];

/// Variable-history BDF scheme.
#[derive(Debug, Clone)]
pub struct BackwardDifferentiationFormula<T> {
    order: usize,
    t: T,
    delta_t: T,
    xs_old: VecDeque<Vec<T>>,
    weighted_old_x: Vec<T>,
}

impl<T: Scalar> BackwardDifferentiationFormula<T> {
    /// Creates a BDF scheme of the given maximum order (1–6).
    pub fn new(order: usize) -> Result<Self, TdError> {
        if !(1..=MAX_ORDER).contains(&order) {
            return Err(TdError::InvalidOption(format!(
                "BDF order must be between 1 and {MAX_ORDER}, got {order}"
            )));
        }
        Ok(Self {
            order,
            t: T::zero(),
            delta_t: T::zero(),
            xs_old: VecDeque::with_capacity(order),
            weighted_old_x: Vec::new(),
        })
    }

    /// Maximum order requested at construction.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Order used for the current step, limited by the available history.
    pub fn effective_order(&self) -> usize {
        self.xs_old.len().min(self.order).max(1)
    }

    fn coeff(&self, idx: usize) -> T {
        T::from(COEFFS[self.effective_order() - 1][idx]).unwrap_or_else(T::nan)
    }

    fn refresh_weighted_old_x(&mut self) {
        self.weighted_old_x.clear();
        if self.delta_t <= T::zero() || self.xs_old.is_empty() {
            return;
        }
        let k = self.effective_order();
        let n = self.xs_old[0].len();
        let first = self.xs_old.len() - k;
        let mut w = vec![T::zero(); n];
        for i in 0..k {
            let c = self.coeff(1 + i);
            for (wj, &xj) in w.iter_mut().zip(&self.xs_old[first + i]) {
                *wj = *wj + c * xj;
            }
        }
        let dt = self.delta_t;
        self.weighted_old_x.extend(w.into_iter().map(|v| v / dt));
    }
}

impl<T: Scalar> TimeDiscretization<T> for BackwardDifferentiationFormula<T> {
    fn kind(&self) -> TimeDiscKind {
        TimeDiscKind::Implicit
    }

    fn name(&self) -> &'static str {
        "bdf"
    }

    fn set_initial_state(&mut self, t0: T, x0: &[T]) {
        self.t = t0;
        self.xs_old.clear();
        self.xs_old.push_back(x0.to_vec());
        self.refresh_weighted_old_x();
    }

    fn next_timestep(&mut self, t: T, delta_t: T) -> Result<(), TdError> {
        check_time_step(delta_t)?;
        let tol = T::epsilon().sqrt() * delta_t;
        if self.xs_old.len() > 1 && (delta_t - self.delta_t).abs() > tol {
            log::warn!(
                "bdf time step changed from {:?} to {:?}; restarting at order 1",
                self.delta_t,
                delta_t
            );
            while self.xs_old.len() > 1 {
                self.xs_old.pop_front();
            }
        }
        self.t = t;
        self.delta_t = delta_t;
        self.refresh_weighted_old_x();
        Ok(())
    }

    fn push_state(&mut self, _t: T, x: &[T]) -> Result<(), TdError> {
        check_state_len(self.xs_old.back().map_or(0, Vec::len), x)?;
        if self.xs_old.len() == self.order {
            // Reuse the oldest buffer for the newest state.
            if let Some(mut oldest) = self.xs_old.pop_front() {
                oldest.clear();
                oldest.extend_from_slice(x);
                self.xs_old.push_back(oldest);
            }
        } else {
            self.xs_old.push_back(x.to_vec());
        }
        log::debug!("bdf history holds {} states (order {})", self.xs_old.len(), self.effective_order());
        self.refresh_weighted_old_x();
        Ok(())
    }

    fn current_time(&self) -> T {
        self.t
    }

    fn current_time_increment(&self) -> T {
        self.delta_t
    }

    fn current_x_weight(&self) -> T {
        self.coeff(0) / self.delta_t
    }

    fn current_x<'a>(&'a self, x_new: &'a [T]) -> &'a [T] {
        x_new
    }

    fn weighted_old_x(&self) -> &[T] {
        &self.weighted_old_x
    }

    fn is_linear_time_disc(&self) -> bool {
        false
    }
}
