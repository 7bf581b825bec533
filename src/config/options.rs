//! Command-line or API options for time discretization.
//!
//! This module provides the `TimeDiscOptions` struct, which selects the
//! time-discretization scheme and the nonlinear-solver strategy a simulation
//! runs with. Both selections parse from short names so they can come from
//! command-line arguments or project files: `backward_euler`, `forward_euler`
//! and `bdf1` … `bdf6` for the scheme, `newton` and `picard` for the solver.

use std::fmt;
use std::str::FromStr;

use crate::error::TdError;

/// Time-discretization scheme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeType {
    BackwardEuler,
    ForwardEuler,
    /// Backward differentiation formula with maximum order 1–6.
    Bdf { order: usize },
}

impl FromStr for SchemeType {
    type Err = TdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "backward_euler" | "be" => Ok(SchemeType::BackwardEuler),
            "forward_euler" | "fe" => Ok(SchemeType::ForwardEuler),
            _ => {
                let order = name
                    .strip_prefix("bdf")
                    .and_then(|o| o.parse::<usize>().ok())
                    .ok_or_else(|| TdError::InvalidOption(format!("unknown time discretization `{s}`")))?;
                Ok(SchemeType::Bdf { order })
            }
        }
    }
}

impl fmt::Display for SchemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemeType::BackwardEuler => write!(f, "backward_euler"),
            SchemeType::ForwardEuler => write!(f, "forward_euler"),
            SchemeType::Bdf { order } => write!(f, "bdf{order}"),
        }
    }
}

/// Which solver-facing contract the system is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonlinearSolverTag {
    Newton,
    Picard,
}

impl FromStr for NonlinearSolverTag {
    type Err = TdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newton" => Ok(NonlinearSolverTag::Newton),
            "picard" => Ok(NonlinearSolverTag::Picard),
            _ => Err(TdError::InvalidOption(format!("unknown nonlinear solver `{s}`"))),
        }
    }
}

/// Time-discretization options.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeDiscOptions {
    /// Scheme (backward_euler, forward_euler, bdfN)
    pub scheme: SchemeType,

    /// Nonlinear solver the system is exposed to (newton, picard)
    pub solver: NonlinearSolverTag,

    /// Start time
    pub t0: f64,

    /// Constant time increment
    pub delta_t: f64,
}

impl Default for TimeDiscOptions {
    fn default() -> Self {
        Self {
            scheme: SchemeType::BackwardEuler,
            solver: NonlinearSolverTag::Newton,
            t0: 0.0,
            delta_t: 1.0,
        }
    }
}

impl TimeDiscOptions {
    /// Parses `key=value` pairs (`scheme`, `solver`, `t0`, `dt`) over the defaults.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, TdError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut opts = Self::default();
        for (key, value) in pairs {
            match key.trim() {
                "scheme" => opts.scheme = value.parse()?,
                "solver" => opts.solver = value.parse()?,
                "t0" => opts.t0 = parse_f64(key, value)?,
                "dt" => opts.delta_t = parse_f64(key, value)?,
                other => return Err(TdError::InvalidOption(format!("unknown key `{other}`"))),
            }
        }
        if !(opts.delta_t > 0.0 && opts.delta_t.is_finite()) {
            return Err(TdError::InvalidTimeStep(opts.delta_t));
        }
        Ok(opts)
    }
}

fn parse_f64(key: &str, value: &str) -> Result<f64, TdError> {
    value
        .trim()
        .parse()
        .map_err(|_| TdError::InvalidOption(format!("`{key}` expects a number, got `{value}`")))
}
