//! Shared fixtures for the integration tests: model ODEs, a fixed-weight
//! scheme, dense direct solves and minimal Newton/Picard drivers.

#![allow(dead_code)]

use faer::Mat;
use faer::linalg::solvers::SolveCore;
use rand::Rng;
use timedisc::{
    FirstOrderImplicitOde, FirstOrderImplicitOdeNewton, NonlinearSystemNewton, NonlinearSystemPicard, TdError,
    TimeDiscKind, TimeDiscretization, TimeDiscretizedNewtonSystem, TimeDiscretizedPicardSystem,
};

/// Solves `A·x = b` with Faer's full-pivoting LU.
pub fn solve_dense(a: &Mat<f64>, b: &[f64]) -> Vec<f64> {
    let mut x = b.to_vec();
    let n = x.len();
    let lu = faer::linalg::solvers::FullPivLu::new(a.as_ref());
    let x_mat = faer::MatMut::from_column_major_slice_mut(&mut x, n, 1);
    lu.solve_in_place_with_conj(faer::Conj::No, x_mat);
    x
}

pub fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Random `n × n` matrix with `shift` added to the diagonal.
pub fn random_matrix(n: usize, shift: f64) -> Mat<f64> {
    let mut rng = rand::thread_rng();
    let data: Vec<f64> = (0..n * n).map(|_| rng.r#gen()).collect();
    Mat::from_fn(n, n, |i, j| data[j * n + i] + if i == j { shift } else { 0.0 })
}

pub fn random_vector(n: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.r#gen::<f64>() - 0.5).collect()
}

pub fn scalar(v: f64) -> Mat<f64> {
    Mat::from_fn(1, 1, |_, _| v)
}

/// A scheme with directly prescribed weights, for checking translator formulas.
pub struct FixedScheme {
    pub kind: TimeDiscKind,
    pub t: f64,
    pub alpha: f64,
    pub weighted_old_x: Vec<f64>,
    pub x_old: Vec<f64>,
    /// Factor applied to the Jacobian diagonal by `adjust_matrix`.
    pub jacobian_diag_scale: Option<f64>,
}

impl FixedScheme {
    pub fn implicit(alpha: f64, weighted_old_x: Vec<f64>) -> Self {
        Self {
            kind: TimeDiscKind::Implicit,
            t: 0.0,
            alpha,
            weighted_old_x,
            x_old: Vec::new(),
            jacobian_diag_scale: None,
        }
    }

    pub fn forward(alpha: f64, weighted_old_x: Vec<f64>, x_old: Vec<f64>) -> Self {
        Self {
            kind: TimeDiscKind::ForwardExplicit,
            t: 0.0,
            alpha,
            weighted_old_x,
            x_old,
            jacobian_diag_scale: None,
        }
    }

    pub fn with_jacobian_diag_scale(mut self, scale: f64) -> Self {
        self.jacobian_diag_scale = Some(scale);
        self
    }
}

impl TimeDiscretization<f64> for FixedScheme {
    fn kind(&self) -> TimeDiscKind {
        self.kind
    }
    fn name(&self) -> &'static str {
        "fixed"
    }
    fn set_initial_state(&mut self, t0: f64, x0: &[f64]) {
        self.t = t0;
        self.x_old = x0.to_vec();
    }
    fn next_timestep(&mut self, t: f64, _delta_t: f64) -> Result<(), TdError> {
        self.t = t;
        Ok(())
    }
    fn push_state(&mut self, _t: f64, x: &[f64]) -> Result<(), TdError> {
        self.x_old = x.to_vec();
        Ok(())
    }
    fn current_time(&self) -> f64 {
        self.t
    }
    fn current_time_increment(&self) -> f64 {
        1.0 / self.alpha
    }
    fn current_x_weight(&self) -> f64 {
        self.alpha
    }
    fn current_x<'a>(&'a self, x_new: &'a [f64]) -> &'a [f64] {
        match self.kind {
            TimeDiscKind::Implicit => x_new,
            TimeDiscKind::ForwardExplicit => &self.x_old,
        }
    }
    fn weighted_old_x(&self) -> &[f64] {
        &self.weighted_old_x
    }
    fn is_linear_time_disc(&self) -> bool {
        self.kind == TimeDiscKind::ForwardExplicit
    }
    fn dx_dx(&self) -> f64 {
        match self.kind {
            TimeDiscKind::Implicit => 1.0,
            TimeDiscKind::ForwardExplicit => 0.0,
        }
    }
    fn adjust_matrix(&self, jac: &mut Mat<f64>) {
        if let Some(scale) = self.jacobian_diag_scale {
            for i in 0..jac.nrows().min(jac.ncols()) {
                jac[(i, i)] *= scale;
            }
        }
    }
    fn x_old(&self) -> Option<&[f64]> {
        match self.kind {
            TimeDiscKind::Implicit => None,
            TimeDiscKind::ForwardExplicit => Some(&self.x_old),
        }
    }
}

/// Constant-coefficient linear ODE `M·ẋ + K·x = b`.
pub struct LinearOde {
    pub m: Mat<f64>,
    pub k: Mat<f64>,
    pub b: Vec<f64>,
}

impl LinearOde {
    /// Harmonic oscillator `x₁' = −x₂`, `x₂' = x₁`: from (1, 0) the exact
    /// solution is (cos t, sin t).
    pub fn oscillator() -> Self {
        Self {
            m: Mat::from_fn(2, 2, |i, j| if i == j { 1.0 } else { 0.0 }),
            k: Mat::from_fn(2, 2, |i, j| match (i, j) {
                (0, 1) => 1.0,
                (1, 0) => -1.0,
                _ => 0.0,
            }),
            b: vec![0.0, 0.0],
        }
    }
}

impl FirstOrderImplicitOde<f64> for LinearOde {
    fn matrix_size(&self) -> usize {
        self.b.len()
    }
    fn is_linear(&self) -> bool {
        true
    }
    fn assemble(&self, _t: f64, _x: &[f64], m: &mut Mat<f64>, k: &mut Mat<f64>, b: &mut [f64]) {
        m.clone_from(&self.m);
        k.clone_from(&self.k);
        b.copy_from_slice(&self.b);
    }
}

impl FirstOrderImplicitOdeNewton<f64> for LinearOde {
    fn assemble_jacobian(&self, _t: f64, _x: &[f64], dxdot_dx: f64, dx_dx: f64, jac: &mut Mat<f64>) {
        let n = self.b.len();
        for i in 0..n {
            for j in 0..n {
                jac[(i, j)] = self.m[(i, j)] * dxdot_dx + self.k[(i, j)] * dx_dx;
            }
        }
    }
}

/// `ẋ = −x²` as `M = 1`, `K = x`, `b = 0`; exact solution `1 / (t + 1/x₀)`.
pub struct QuadraticDecay;

impl QuadraticDecay {
    pub fn exact(t: f64, x0: f64) -> f64 {
        1.0 / (t + 1.0 / x0)
    }
}

impl FirstOrderImplicitOde<f64> for QuadraticDecay {
    fn matrix_size(&self) -> usize {
        1
    }
    fn is_linear(&self) -> bool {
        false
    }
    fn assemble(&self, _t: f64, x: &[f64], m: &mut Mat<f64>, k: &mut Mat<f64>, b: &mut [f64]) {
        m[(0, 0)] = 1.0;
        k[(0, 0)] = x[0];
        b[0] = 0.0;
    }
}

impl FirstOrderImplicitOdeNewton<f64> for QuadraticDecay {
    fn assemble_jacobian(&self, _t: f64, x: &[f64], dxdot_dx: f64, dx_dx: f64, jac: &mut Mat<f64>) {
        jac[(0, 0)] = dxdot_dx + 2.0 * x[0] * dx_dx;
    }
}

/// Newton iteration on `sys`; returns the number of iterations.
pub fn newton_solve<S: NonlinearSystemNewton<f64>>(sys: &mut S, x: &mut Vec<f64>, tol: f64, max_iter: usize) -> usize {
    for it in 1..=max_iter {
        sys.assemble_residual_newton(x).unwrap();
        sys.assemble_jacobian(x).unwrap();
        let r = sys.get_residual(x).unwrap();
        let jac = sys.get_jacobian().unwrap();
        let minus_r: Vec<f64> = r.iter().map(|v| -v).collect();
        let dx = solve_dense(&jac, &minus_r);
        for (xi, d) in x.iter_mut().zip(&dx) {
            *xi += d;
        }
        if sys.is_linear() || norm(&dx) < tol {
            return it;
        }
    }
    panic!("Newton did not converge in {max_iter} iterations");
}

/// Picard iteration on `sys`; returns the number of iterations.
pub fn picard_solve<S: NonlinearSystemPicard<f64>>(sys: &mut S, x: &mut Vec<f64>, tol: f64, max_iter: usize) -> usize {
    for it in 1..=max_iter {
        sys.assemble_matrices_picard(x).unwrap();
        let a = sys.get_a().unwrap();
        let rhs = sys.get_rhs().unwrap();
        let x_new = solve_dense(&a, &rhs);
        let change: Vec<f64> = x_new.iter().zip(x.iter()).map(|(a, b)| a - b).collect();
        *x = x_new;
        if sys.is_linear() || norm(&change) < tol {
            return it;
        }
    }
    panic!("Picard did not converge in {max_iter} iterations");
}

/// Integrates `steps` constant steps of size `dt` with Newton; returns the final state.
pub fn run_newton<E>(ode: &E, td: &mut dyn TimeDiscretization<f64>, x0: &[f64], dt: f64, steps: usize) -> Vec<f64>
where
    E: FirstOrderImplicitOdeNewton<f64>,
{
    td.set_initial_state(0.0, x0);
    let mut x = x0.to_vec();
    let mut sys = TimeDiscretizedNewtonSystem::new(ode, td).unwrap();
    for step in 1..=steps {
        let t = step as f64 * dt;
        sys.time_discretization_mut().next_timestep(t, dt).unwrap();
        newton_solve(&mut sys, &mut x, 1e-12, 50);
        sys.time_discretization_mut().push_state(t, &x).unwrap();
    }
    x
}

/// Integrates `steps` constant steps of size `dt` with Picard; returns the final state.
pub fn run_picard<E>(ode: &E, td: &mut dyn TimeDiscretization<f64>, x0: &[f64], dt: f64, steps: usize) -> Vec<f64>
where
    E: FirstOrderImplicitOde<f64>,
{
    td.set_initial_state(0.0, x0);
    let mut x = x0.to_vec();
    let mut sys = TimeDiscretizedPicardSystem::new(ode, td).unwrap();
    for step in 1..=steps {
        let t = step as f64 * dt;
        sys.time_discretization_mut().next_timestep(t, dt).unwrap();
        picard_solve(&mut sys, &mut x, 1e-12, 200);
        sys.time_discretization_mut().push_state(t, &x).unwrap();
    }
    x
}
