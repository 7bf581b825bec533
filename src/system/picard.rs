// Picard adapter for time-discretized ODE systems

use crate::core::Scalar;
use crate::error::TdError;
use crate::ode::FirstOrderImplicitOde;
use crate::system::{EquationMatrices, NonlinearSystemPicard, ParabolicEquation};
use crate::time_discretization::TimeDiscretization;
use crate::translator::{MatrixTranslator, TranslatorKind, create_matrix_translator};
use faer::Mat;

/// Time-discretized ODE system in Picard form.
///
/// Each iteration assembles `(M, K, b)` at the latest iterate and hands the
/// driver the linear system `A·x = rhs`. No Jacobian is ever formed.
pub struct TimeDiscretizedPicardSystem<'a, T: Scalar, E: ?Sized> {
    ode: &'a E,
    time_disc: &'a mut dyn TimeDiscretization<T>,
    translator: Box<dyn MatrixTranslator<T>>,
    matrices: EquationMatrices<T>,
}

impl<'a, T, E> TimeDiscretizedPicardSystem<'a, T, E>
where
    T: Scalar,
    E: FirstOrderImplicitOde<T> + ?Sized,
{
    /// Binds `ode` and `time_disc`, selecting the matrix translator once.
    pub fn new(ode: &'a E, time_disc: &'a mut dyn TimeDiscretization<T>) -> Result<Self, TdError> {
        let n = ode.matrix_size();
        let translator = create_matrix_translator(&*time_disc)?;
        log::debug!("picard system: {} unknowns, scheme {}", n, time_disc.name());
        Ok(Self {
            ode,
            time_disc,
            translator,
            matrices: EquationMatrices::new(n),
        })
    }

    /// Number of unknowns.
    pub fn matrix_size(&self) -> usize {
        self.matrices.size()
    }

    /// Variant of the bound translator.
    pub fn translator_kind(&self) -> TranslatorKind {
        self.translator.kind()
    }

    /// The bound time discretization.
    pub fn time_discretization(&self) -> &dyn TimeDiscretization<T> {
        &*self.time_disc
    }

    /// Mutable access for advancing time; invalidates the assembled matrices.
    pub fn time_discretization_mut(&mut self) -> &mut (dyn TimeDiscretization<T> + 'a) {
        self.matrices.invalidate();
        &mut *self.time_disc
    }
}

impl<'a, T, E> NonlinearSystemPicard<T> for TimeDiscretizedPicardSystem<'a, T, E>
where
    T: Scalar,
    E: FirstOrderImplicitOde<T> + ?Sized,
{
    fn assemble_matrices_picard(&mut self, x_new: &[T]) -> Result<(), TdError> {
        self.matrices.assemble(self.ode, &*self.time_disc, x_new)?;
        log::debug!(
            "assembled M, K, b at t = {}",
            self.time_disc.current_time().to_f64().unwrap_or(f64::NAN)
        );
        Ok(())
    }

    fn get_a(&self) -> Result<Mat<T>, TdError> {
        let (m, k, _) = self.matrices.get("A")?;
        self.translator.get_a(&*self.time_disc, m, k)
    }

    fn get_rhs(&self) -> Result<Vec<T>, TdError> {
        let (m, k, b) = self.matrices.get("rhs")?;
        self.translator.get_rhs(&*self.time_disc, m, k, b)
    }

    fn is_linear(&self) -> bool {
        self.time_disc.is_linear_time_disc() || self.ode.is_linear()
    }
}

impl<'a, T: Scalar, E: ?Sized> ParabolicEquation<T> for TimeDiscretizedPicardSystem<'a, T, E> {
    fn matrices(&self) -> (&Mat<T>, &Mat<T>, &[T]) {
        self.matrices.matrices()
    }
}
