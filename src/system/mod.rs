//! Time-discretized ODE systems exposed to nonlinear solvers.
//!
//! This module defines the two solver-facing contracts and their adapters:
//!
//! - [`NonlinearSystemNewton`], implemented by [`TimeDiscretizedNewtonSystem`]:
//!   residual and Jacobian for Newton-Raphson iteration.
//! - [`NonlinearSystemPicard`], implemented by [`TimeDiscretizedPicardSystem`]:
//!   the linear system `A·x = rhs` re-solved at each Picard iteration.
//!
//! Each adapter borrows an equation and a time discretization, binds the
//! matching matrix translator once at construction and owns its scratch
//! matrices. The driver must assemble before reading the corresponding
//! quantity; borrowing the time discretization mutably through an adapter
//! discards everything assembled so far.

use crate::core::Scalar;
use crate::core::wrappers::{check_len, check_square, zeros};
use crate::error::TdError;
use crate::ode::FirstOrderImplicitOde;
use crate::time_discretization::{TimeDiscretization, checked_x_weight};
use faer::Mat;

pub mod newton;
pub mod picard;

pub use newton::TimeDiscretizedNewtonSystem;
pub use picard::TimeDiscretizedPicardSystem;

/// Newton-Raphson view of a nonlinear system.
pub trait NonlinearSystemNewton<T: Scalar> {
    /// Assembles the equation matrices needed by [`Self::get_residual`].
    fn assemble_residual_newton(&mut self, x_new: &[T]) -> Result<(), TdError>;
    /// Assembles the Jacobian returned by [`Self::get_jacobian`].
    fn assemble_jacobian(&mut self, x_new: &[T]) -> Result<(), TdError>;
    /// Residual at `x_new` from the last residual assembly.
    fn get_residual(&self, x_new: &[T]) -> Result<Vec<T>, TdError>;
    /// Jacobian from the last Jacobian assembly.
    fn get_jacobian(&self) -> Result<Mat<T>, TdError>;
    /// Whether one linear solve is enough.
    fn is_linear(&self) -> bool;
}

/// Picard (fixed-point) view of a nonlinear system.
pub trait NonlinearSystemPicard<T: Scalar> {
    /// Assembles the equation matrices at `x_new`.
    fn assemble_matrices_picard(&mut self, x_new: &[T]) -> Result<(), TdError>;
    /// Coefficient matrix of `A·x = rhs`.
    fn get_a(&self) -> Result<Mat<T>, TdError>;
    /// Right-hand side of `A·x = rhs`.
    fn get_rhs(&self) -> Result<Vec<T>, TdError>;
    /// Whether one linear solve is enough.
    fn is_linear(&self) -> bool;
}

/// Read access to the equation matrices last assembled by an adapter.
pub trait ParabolicEquation<T> {
    /// `(M, K, b)`
    fn matrices(&self) -> (&Mat<T>, &Mat<T>, &[T]);
}

/// Adapter-owned storage for `M`, `K` and `b`, sized once.
#[derive(Debug, Clone)]
pub struct EquationMatrices<T> {
    m: Mat<T>,
    k: Mat<T>,
    b: Vec<T>,
    assembled: bool,
}

impl<T: Scalar> EquationMatrices<T> {
    /// Zeroed storage for a system with `n` unknowns.
    pub fn new(n: usize) -> Self {
        Self {
            m: zeros(n),
            k: zeros(n),
            b: vec![T::zero(); n],
            assembled: false,
        }
    }

    /// Number of unknowns.
    pub fn size(&self) -> usize {
        self.b.len()
    }

    /// Whether the buffers hold an assembly that has not been invalidated.
    pub fn is_assembled(&self) -> bool {
        self.assembled
    }

    /// Marks the buffers stale.
    pub fn invalidate(&mut self) {
        self.assembled = false;
    }

    /// Assembles `(M, K, b)` at the scheme's evaluation point for `x_new`.
    pub fn assemble<E>(&mut self, ode: &E, td: &dyn TimeDiscretization<T>, x_new: &[T]) -> Result<(), TdError>
    where
        E: FirstOrderImplicitOde<T> + ?Sized,
    {
        self.assembled = false;
        let n = self.size();
        let (t, x_curr) = resolve_state(td, x_new, n)?;
        ode.assemble(t, x_curr, &mut self.m, &mut self.k, &mut self.b);
        let shapes = check_square("assembled M", &self.m, n)
            .and_then(|_| check_square("assembled K", &self.k, n))
            .and_then(|_| check_len("assembled b", &self.b, n));
        if let Err(e) = shapes {
            // the next assembly must see n × n buffers again
            self.m = zeros(n);
            self.k = zeros(n);
            return Err(e);
        }
        self.assembled = true;
        Ok(())
    }

    /// `(M, K, b)` if assembled, `NotAssembled(what)` otherwise.
    pub fn get(&self, what: &'static str) -> Result<(&Mat<T>, &Mat<T>, &[T]), TdError> {
        if !self.assembled {
            log::warn!("{what} requested before the equation matrices were assembled");
            return Err(TdError::NotAssembled(what));
        }
        Ok((&self.m, &self.k, &self.b))
    }
}

impl<T> ParabolicEquation<T> for EquationMatrices<T> {
    fn matrices(&self) -> (&Mat<T>, &Mat<T>, &[T]) {
        (&self.m, &self.k, &self.b)
    }
}

/// Resolves the evaluation time and state for `x_new`, checking dimensions
/// and that a time step has been set.
pub(crate) fn resolve_state<'a, T: Scalar>(
    td: &'a dyn TimeDiscretization<T>,
    x_new: &'a [T],
    n: usize,
) -> Result<(T, &'a [T]), TdError> {
    check_len("x_new", x_new, n)?;
    checked_x_weight(td)?;
    let x_curr = td.current_x(x_new);
    if x_curr.is_empty() && n != 0 {
        return Err(TdError::NotInitialized("evaluation state (set an initial state)"));
    }
    check_len("x_curr", x_curr, n)?;
    Ok((td.current_time(), x_curr))
}

