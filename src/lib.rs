//! timedisc: time-discretized ODE systems for Newton and Picard solvers over Faer
//!
//! This crate turns a spatially discretized first-order ODE system
//! `M·ẋ + K·x = b` and a time-discretization scheme into the algebraic objects
//! a nonlinear solver consumes at every iteration: the residual and Jacobian
//! for Newton-Raphson, or the linear system `A·x = rhs` for Picard iteration.

pub mod config;
pub mod core;
pub mod error;
pub mod ode;
pub mod system;
pub mod time_discretization;
pub mod translator;

// Re-exports for convenience
pub use crate::config::{NonlinearSolverTag, SchemeType, TimeDiscOptions};
pub use crate::core::{InnerProduct, MatVec, Scalar};
pub use crate::error::TdError;
pub use crate::ode::{FirstOrderImplicitOde, FirstOrderImplicitOdeNewton};
pub use crate::system::{
    EquationMatrices, NonlinearSystemNewton, NonlinearSystemPicard, ParabolicEquation,
    TimeDiscretizedNewtonSystem, TimeDiscretizedPicardSystem,
};
pub use crate::time_discretization::{
    BackwardDifferentiationFormula, BackwardEuler, ForwardEuler, TimeDiscKind, TimeDiscretization,
    create_time_discretization,
};
pub use crate::translator::{
    ForwardEulerTranslator, GeneralTranslator, MatrixTranslator, TranslatorKind, create_matrix_translator,
};
