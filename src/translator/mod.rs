//! Matrix translators: from `(M, K, b)` and a scheme to solver-facing quantities.
//!
//! A translator is stateless. Every call receives the time discretization it
//! is bound to and reads `α`, the weighted old state and the evaluation point
//! from it. Two variants exist:
//!
//! - [`GeneralTranslator`]: `A = M·α + K`, `rhs = b + M·w`.
//! - [`ForwardEulerTranslator`]: `A = M·α`, `rhs = b + M·w − K·x_old`.
//!
//! Both share the residual `r = M·(α·x_new − w) + K·x_curr − b` and pass the
//! Jacobian through unchanged. [`create_matrix_translator`] picks the variant
//! once, from the scheme's [`TimeDiscKind`].

use crate::core::Scalar;
use crate::core::wrappers::{add_scaled_matvec, check_len, check_square, square_order};
use crate::error::TdError;
use crate::time_discretization::{TimeDiscKind, TimeDiscretization, checked_x_weight};
use faer::Mat;

/// Identifies a translator variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslatorKind {
    General,
    ForwardEuler,
}

/// Converts equation matrices into the quantities a nonlinear solver needs.
pub trait MatrixTranslator<T: Scalar> {
    /// Variant tag.
    fn kind(&self) -> TranslatorKind;

    /// Coefficient matrix `A` of the linearized system `A·x = rhs`.
    fn get_a(&self, td: &dyn TimeDiscretization<T>, m: &Mat<T>, k: &Mat<T>) -> Result<Mat<T>, TdError>;

    /// Right-hand side of `A·x = rhs`.
    fn get_rhs(
        &self,
        td: &dyn TimeDiscretization<T>,
        m: &Mat<T>,
        k: &Mat<T>,
        b: &[T],
    ) -> Result<Vec<T>, TdError>;

    /// Residual `r = M·ẋ + K·x_curr − b` with `ẋ = α·x_new − w`.
    fn get_residual(
        &self,
        td: &dyn TimeDiscretization<T>,
        m: &Mat<T>,
        k: &Mat<T>,
        b: &[T],
        x_new: &[T],
    ) -> Result<Vec<T>, TdError> {
        let n = check_system(m, k, b)?;
        check_len("x_new", x_new, n)?;
        let alpha = checked_x_weight(td)?;
        let x_curr = td.current_x(x_new);
        let weighted_old_x = weighted_old_x(td, n)?;
        check_len("x_curr", x_curr, n)?;

        let x_dot: Vec<T> = x_new
            .iter()
            .zip(weighted_old_x)
            .map(|(&x, &w)| alpha * x - w)
            .collect();

        let mut r: Vec<T> = b.iter().map(|&bi| -bi).collect();
        add_scaled_matvec(m, T::one(), &x_dot, &mut r);
        add_scaled_matvec(k, T::one(), x_curr, &mut r);
        Ok(r)
    }

    /// Post-processes an assembled Jacobian; identity for both variants.
    fn get_jacobian(&self, jac: Mat<T>) -> Mat<T> {
        jac
    }
}

pub mod forward_euler;
pub mod general;

pub use forward_euler::ForwardEulerTranslator;
pub use general::GeneralTranslator;

/// Selects the translator matching the scheme `td`.
///
/// Fails when a forward-explicit scheme does not expose its previous state.
pub fn create_matrix_translator<T: Scalar>(
    td: &dyn TimeDiscretization<T>,
) -> Result<Box<dyn MatrixTranslator<T>>, TdError> {
    let translator: Box<dyn MatrixTranslator<T>> = match td.kind() {
        TimeDiscKind::ForwardExplicit => {
            if td.x_old().is_none() {
                return Err(TdError::Unsupported(
                    "forward-explicit scheme without access to the previous state",
                ));
            }
            Box::new(ForwardEulerTranslator)
        }
        TimeDiscKind::Implicit => Box::new(GeneralTranslator),
    };
    log::debug!("bound {:?} translator to scheme {}", translator.kind(), td.name());
    Ok(translator)
}

/// Checks that `M` and `K` are both `n × n`; returns `n`.
pub fn check_matrices<T>(m: &Mat<T>, k: &Mat<T>) -> Result<usize, TdError> {
    let n = square_order("M", m)?;
    check_square("K", k, n)?;
    Ok(n)
}

/// Checks that `M` and `K` are `n × n` and `b` has length `n`; returns `n`.
pub fn check_system<T>(m: &Mat<T>, k: &Mat<T>, b: &[T]) -> Result<usize, TdError> {
    let n = check_matrices(m, k)?;
    check_len("b", b, n)?;
    Ok(n)
}

/// The scheme's weighted old state, checked against the system size.
pub(crate) fn weighted_old_x<'a, T: Scalar>(
    td: &'a dyn TimeDiscretization<T>,
    n: usize,
) -> Result<&'a [T], TdError> {
    let w = td.weighted_old_x();
    if w.is_empty() && n != 0 {
        return Err(TdError::NotInitialized("weighted old state (set an initial state and a time step)"));
    }
    check_len("weighted old state", w, n)?;
    Ok(w)
}
