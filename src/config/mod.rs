//! Configuration of schemes and solver contracts.

pub mod options;

pub use options::{NonlinearSolverTag, SchemeType, TimeDiscOptions};
