// Translator for forward-explicit schemes

use crate::core::Scalar;
use crate::core::wrappers::{add_scaled_matvec, check_len, scaled_sum};
use crate::error::TdError;
use crate::time_discretization::{TimeDiscretization, checked_x_weight};
use crate::translator::{MatrixTranslator, TranslatorKind, check_matrices, check_system, weighted_old_x};
use faer::Mat;

/// Translator for schemes that evaluate the operator at the previous state.
///
/// The stiffness term moves to the right-hand side, leaving only the mass
/// matrix in `A`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardEulerTranslator;

impl<T: Scalar> MatrixTranslator<T> for ForwardEulerTranslator {
    fn kind(&self) -> TranslatorKind {
        TranslatorKind::ForwardEuler
    }

    /// `A = M·α`
    fn get_a(&self, td: &dyn TimeDiscretization<T>, m: &Mat<T>, k: &Mat<T>) -> Result<Mat<T>, TdError> {
        check_matrices(m, k)?;
        Ok(scaled_sum(m, checked_x_weight(td)?, None))
    }

    /// `rhs = b + M·w − K·x_old`
    fn get_rhs(
        &self,
        td: &dyn TimeDiscretization<T>,
        m: &Mat<T>,
        k: &Mat<T>,
        b: &[T],
    ) -> Result<Vec<T>, TdError> {
        let n = check_system(m, k, b)?;
        let w = weighted_old_x(td, n)?;
        let x_old = td
            .x_old()
            .ok_or(TdError::Unsupported("forward Euler translator bound to a scheme without previous state"))?;
        check_len("x_old", x_old, n)?;
        let mut rhs = b.to_vec();
        add_scaled_matvec(m, T::one(), w, &mut rhs);
        add_scaled_matvec(k, -T::one(), x_old, &mut rhs);
        Ok(rhs)
    }
}
