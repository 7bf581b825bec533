// General translator for implicit schemes

use crate::core::Scalar;
use crate::core::wrappers::{add_scaled_matvec, scaled_sum};
use crate::error::TdError;
use crate::time_discretization::{TimeDiscretization, checked_x_weight};
use crate::translator::{MatrixTranslator, TranslatorKind, check_matrices, check_system, weighted_old_x};
use faer::Mat;

/// Translator for schemes that evaluate the operator at the new state.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralTranslator;

impl<T: Scalar> MatrixTranslator<T> for GeneralTranslator {
    fn kind(&self) -> TranslatorKind {
        TranslatorKind::General
    }

    /// `A = M·α + K`
    fn get_a(&self, td: &dyn TimeDiscretization<T>, m: &Mat<T>, k: &Mat<T>) -> Result<Mat<T>, TdError> {
        check_matrices(m, k)?;
        Ok(scaled_sum(m, checked_x_weight(td)?, Some(k)))
    }

    /// `rhs = b + M·w`
    fn get_rhs(
        &self,
        td: &dyn TimeDiscretization<T>,
        m: &Mat<T>,
        k: &Mat<T>,
        b: &[T],
    ) -> Result<Vec<T>, TdError> {
        let n = check_system(m, k, b)?;
        let w = weighted_old_x(td, n)?;
        let mut rhs = b.to_vec();
        add_scaled_matvec(m, T::one(), w, &mut rhs);
        Ok(rhs)
    }
}
