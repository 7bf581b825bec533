//! Newton-Raphson adapter for time-discretized ODE systems.
//!
//! Per iteration the driver calls, in either order,
//! [`assemble_residual_newton`](NonlinearSystemNewton::assemble_residual_newton) and
//! [`assemble_jacobian`](NonlinearSystemNewton::assemble_jacobian), then reads
//! the residual and Jacobian and solves `Jac · Δx = −r`.

use crate::core::wrappers::{check_square, zeros};
use crate::core::{InnerProduct, Scalar};
use crate::error::TdError;
use crate::ode::FirstOrderImplicitOdeNewton;
use crate::system::{EquationMatrices, NonlinearSystemNewton, ParabolicEquation, resolve_state};
use crate::time_discretization::{TimeDiscretization, checked_x_weight};
use crate::translator::{MatrixTranslator, TranslatorKind, create_matrix_translator};
use faer::Mat;

/// Time-discretized ODE system in Newton form.
pub struct TimeDiscretizedNewtonSystem<'a, T: Scalar, E: ?Sized> {
    ode: &'a E,
    time_disc: &'a mut dyn TimeDiscretization<T>,
    translator: Box<dyn MatrixTranslator<T>>,
    matrices: EquationMatrices<T>,
    jac: Mat<T>,
    jacobian_assembled: bool,
}

impl<'a, T, E> TimeDiscretizedNewtonSystem<'a, T, E>
where
    T: Scalar,
    E: FirstOrderImplicitOdeNewton<T> + ?Sized,
{
    /// Binds `ode` and `time_disc`, selecting the matrix translator once.
    pub fn new(ode: &'a E, time_disc: &'a mut dyn TimeDiscretization<T>) -> Result<Self, TdError> {
        let n = ode.matrix_size();
        let translator = create_matrix_translator(&*time_disc)?;
        log::debug!("newton system: {} unknowns, scheme {}", n, time_disc.name());
        Ok(Self {
            ode,
            time_disc,
            translator,
            matrices: EquationMatrices::new(n),
            jac: zeros(n),
            jacobian_assembled: false,
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

    /// Mutable access for advancing time; invalidates all assembled data.
    pub fn time_discretization_mut(&mut self) -> &mut (dyn TimeDiscretization<T> + 'a) {
        self.matrices.invalidate();
        self.jacobian_assembled = false;
        &mut *self.time_disc
    }
}

impl<'a, T, E> NonlinearSystemNewton<T> for TimeDiscretizedNewtonSystem<'a, T, E>
where
    T: Scalar,
    E: FirstOrderImplicitOdeNewton<T> + ?Sized,
{
    fn assemble_residual_newton(&mut self, x_new: &[T]) -> Result<(), TdError> {
        self.matrices.assemble(self.ode, &*self.time_disc, x_new)?;
        log::debug!(
            "assembled M, K, b at t = {}",
            self.time_disc.current_time().to_f64().unwrap_or(f64::NAN)
        );
        Ok(())
    }

    fn assemble_jacobian(&mut self, x_new: &[T]) -> Result<(), TdError> {
        self.jacobian_assembled = false;
        let n = self.matrix_size();
        let td: &dyn TimeDiscretization<T> = &*self.time_disc;
        let (t, x_curr) = resolve_state(td, x_new, n)?;
        let dxdot_dx = checked_x_weight(td)?;
        self.ode.assemble_jacobian(t, x_curr, dxdot_dx, td.dx_dx(), &mut self.jac);
        if let Err(e) = check_square("assembled Jacobian", &self.jac, n) {
            self.jac = zeros(n);
            return Err(e);
        }
        td.adjust_matrix(&mut self.jac);
        self.jacobian_assembled = true;
        log::debug!("assembled Jacobian at t = {}", t.to_f64().unwrap_or(f64::NAN));
        Ok(())
    }

    fn get_residual(&self, x_new: &[T]) -> Result<Vec<T>, TdError> {
        let (m, k, b) = self.matrices.get("residual")?;
        let r = self.translator.get_residual(&*self.time_disc, m, k, b, x_new)?;
        if log::log_enabled!(log::Level::Trace) {
            let ip = ();
            log::trace!("residual norm {:?}", ip.norm(&r[..]));
        }
        Ok(r)
    }

    fn get_jacobian(&self) -> Result<Mat<T>, TdError> {
        if !self.jacobian_assembled {
            log::warn!("Jacobian requested before assembly");
            return Err(TdError::NotAssembled("jacobian"));
        }
        Ok(self.translator.get_jacobian(self.jac.clone()))
    }

    fn is_linear(&self) -> bool {
        self.time_disc.is_linear_time_disc() || self.ode.is_linear()
    }
}

impl<'a, T: Scalar, E: ?Sized> ParabolicEquation<T> for TimeDiscretizedNewtonSystem<'a, T, E> {
    fn matrices(&self) -> (&Mat<T>, &Mat<T>, &[T]) {
        self.matrices.matrices()
    }
}
