//! Core traits and dense kernels shared by translators and adapters.

pub mod traits;
pub mod wrappers;

pub use traits::{InnerProduct, MatVec, Scalar};
