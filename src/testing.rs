//! Testing functions and utilities useful for benchmarking, debugging and
//! smoke testing.
//!
//! [`Sphere`] is recommended for first tests. [`LeastSquaresLine`] has
//! infinitely many minimizers and is useful for checking which one a method
//! selects.
//!
//! # References
//!
//! \[1\] [A Literature Survey of Benchmark Functions For Global Optimization
//! Problems](https://arxiv.org/abs/1308.4008)

#![allow(unused)]

use std::error::Error as StdError;

use nalgebra::{DVector, Dyn, OVector};
use thiserror::Error;

use crate::core::{Differentiable, Function, Problem, StepError, StepRule};

/// Extension of the [`Function`] trait that provides additional information
/// that is useful for testing step rules and hooks.
pub trait TestFunction: Function<Field = f64> {
    /// Standard initial values for the function. Using the same initial
    /// values is essential for fair comparison of methods.
    fn initials(&self) -> Vec<OVector<f64, Dyn>>;

    /// A set of global optima (if known and finite). This is mostly just for
    /// information, for example to know how close a method got even if it
    /// failed. For testing if a given point is global optimum,
    /// [`TestFunction::is_optimum`] should be used.
    fn optima(&self) -> Vec<OVector<f64, Dyn>> {
        Vec::new()
    }

    /// Test if given point is a global optimum of the function, given the
    /// tolerance `eps`.
    fn is_optimum(&self, x: &OVector<f64, Dyn>, eps: f64) -> bool;
}

/// [Sphere function](https://en.wikipedia.org/wiki/Test_functions_for_optimization)
/// \[1\].
///
/// The simplest convex function `f(x) = Σ xᵢ²` with the minimum at the
/// origin. Its gradient is 2-Lipschitz.
///
/// # References
///
/// \[1\] [A Literature Survey of Benchmark Functions For Global Optimization
/// Problems](https://arxiv.org/abs/1308.4008)
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    n: usize,
}

impl Sphere {
    /// Initializes the function with given dimension.
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "n must be greater than zero");
        Self { n }
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Problem for Sphere {
    type Field = f64;
}

impl Function for Sphere {
    fn apply(&self, x: &OVector<f64, Dyn>) -> f64 {
        x.norm_squared()
    }
}

impl Differentiable for Sphere {
    fn gradient(&self, x: &OVector<f64, Dyn>, grad: &mut OVector<f64, Dyn>) {
        grad.copy_from(&(x * 2.0));
    }
}

impl TestFunction for Sphere {
    fn initials(&self) -> Vec<OVector<f64, Dyn>> {
        let init = DVector::from_iterator(
            self.n,
            (0..self.n).map(|i| if i % 2 == 0 { 10.0 } else { -10.0 }),
        );

        vec![init]
    }

    fn optima(&self) -> Vec<OVector<f64, Dyn>> {
        vec![DVector::zeros(self.n)]
    }

    fn is_optimum(&self, x: &OVector<f64, Dyn>, eps: f64) -> bool {
        self.apply(x).abs() <= eps
    }
}

/// Sphere function shifted to have the minimum in given center,
/// `f(x) = Σ (xᵢ - cᵢ)²`.
#[derive(Debug, Clone)]
pub struct ShiftedSphere {
    center: OVector<f64, Dyn>,
}

impl ShiftedSphere {
    /// Initializes the function with given center.
    pub fn new(center: Vec<f64>) -> Self {
        assert!(!center.is_empty(), "empty center");
        Self {
            center: DVector::from_vec(center),
        }
    }
}

impl Problem for ShiftedSphere {
    type Field = f64;
}

impl Function for ShiftedSphere {
    fn apply(&self, x: &OVector<f64, Dyn>) -> f64 {
        (x - &self.center).norm_squared()
    }
}

impl Differentiable for ShiftedSphere {
    fn gradient(&self, x: &OVector<f64, Dyn>, grad: &mut OVector<f64, Dyn>) {
        grad.copy_from(&((x - &self.center) * 2.0));
    }
}

impl TestFunction for ShiftedSphere {
    fn initials(&self) -> Vec<OVector<f64, Dyn>> {
        let n = self.center.nrows();
        vec![
            DVector::zeros(n),
            self.center.map(|ci| ci + 10.0),
            self.center.map(|ci| -5.0 * ci),
        ]
    }

    fn optima(&self) -> Vec<OVector<f64, Dyn>> {
        vec![self.center.clone()]
    }

    fn is_optimum(&self, x: &OVector<f64, Dyn>, eps: f64) -> bool {
        self.apply(x) <= eps
    }
}

/// Least squares with a single equation, `f(x) = (aᵀx - b)²`.
///
/// The minimizers form the hyperplane `aᵀx = b`, so the function is convex
/// but not strictly convex. Gradient descent started in *x₀* converges to the
/// minimizer nearest to *x₀*, which is given by
/// [`nearest_optimum`](LeastSquaresLine::nearest_optimum).
#[derive(Debug, Clone)]
pub struct LeastSquaresLine {
    a: OVector<f64, Dyn>,
    b: f64,
}

impl LeastSquaresLine {
    /// Initializes the function with given coefficients and right-hand side.
    pub fn new(a: Vec<f64>, b: f64) -> Self {
        assert!(
            a.iter().any(|ai| *ai != 0.0),
            "coefficients must not be all zero"
        );
        Self {
            a: DVector::from_vec(a),
            b,
        }
    }

    /// Returns the minimizer nearest to given point, that is, the projection
    /// of the point onto the hyperplane of minimizers.
    pub fn nearest_optimum(&self, x: &OVector<f64, Dyn>) -> OVector<f64, Dyn> {
        let residual = self.residual(x);
        x - &self.a * (residual / self.a.norm_squared())
    }

    fn residual(&self, x: &OVector<f64, Dyn>) -> f64 {
        self.a.dot(x) - self.b
    }
}

impl Problem for LeastSquaresLine {
    type Field = f64;
}

impl Function for LeastSquaresLine {
    fn apply(&self, x: &OVector<f64, Dyn>) -> f64 {
        self.residual(x).powi(2)
    }
}

impl Differentiable for LeastSquaresLine {
    fn gradient(&self, x: &OVector<f64, Dyn>, grad: &mut OVector<f64, Dyn>) {
        grad.copy_from(&(&self.a * (2.0 * self.residual(x))));
    }
}

impl TestFunction for LeastSquaresLine {
    fn initials(&self) -> Vec<OVector<f64, Dyn>> {
        let n = self.a.nrows();
        vec![
            DVector::from_element(n, 10.0),
            DVector::from_iterator(n, (0..n).map(|i| (i as f64) * -3.0)),
        ]
    }

    fn is_optimum(&self, x: &OVector<f64, Dyn>, eps: f64) -> bool {
        self.apply(x) <= eps
    }
}

/// Error when [`descend`] fails.
#[derive(Debug, Error)]
pub enum TestingError<E: StdError + 'static> {
    /// Error of the step rule used.
    #[error("{0}")]
    Inner(#[from] E),
    /// The process did not terminate.
    #[error("step rule did not terminate")]
    Termination,
}

/// A simple loop iterating the step rule that can be used in tests. It stops
/// when the change of the iterate is not greater than `tolerance`.
pub fn descend<F: Differentiable, R: StepRule<F>>(
    f: &F,
    mut rule: R,
    mut x: OVector<F::Field, Dyn>,
    step_size: F::Field,
    max_iters: usize,
    tolerance: F::Field,
) -> Result<OVector<F::Field, Dyn>, TestingError<StepError>> {
    let mut grad = x.clone_owned();
    let mut iter = 0;

    loop {
        let x_prev = x.clone_owned();
        rule.next_step(f, step_size, &mut x, &mut grad)?;

        if (&x - &x_prev).norm() <= tolerance {
            return Ok(x);
        }

        if iter == max_iters {
            return Err(TestingError::Termination);
        } else {
            iter += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use nalgebra::dvector;

    #[test]
    fn sphere_optimum() {
        let f = Sphere::new(3);
        for x in f.optima() {
            assert!(f.is_optimum(&x, 0.0));
        }
        assert!(!f.is_optimum(&f.initials()[0], 1e-6));
    }

    #[test]
    fn gradients() {
        let x = dvector![1.0, -2.0];
        let mut grad = dvector![0.0, 0.0];

        Sphere::new(2).gradient(&x, &mut grad);
        assert_eq!(grad, dvector![2.0, -4.0]);

        ShiftedSphere::new(vec![1.0, 1.0]).gradient(&x, &mut grad);
        assert_eq!(grad, dvector![0.0, -6.0]);

        // (x₁ + x₂ - 2)² at (1, -2) has residual -3.
        LeastSquaresLine::new(vec![1.0, 1.0], 2.0).gradient(&x, &mut grad);
        assert_eq!(grad, dvector![-6.0, -6.0]);
    }

    #[test]
    fn nearest_optimum() {
        let f = LeastSquaresLine::new(vec![1.0, 1.0], 2.0);
        let y = f.nearest_optimum(&dvector![10.0, -4.0]);

        assert_abs_diff_eq!(y, dvector![8.0, -6.0], epsilon = 1e-12);
        assert!(f.is_optimum(&y, 1e-20));
    }
}
