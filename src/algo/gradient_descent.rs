//! Gradient descent.
//!
//! [Gradient descent](https://en.wikipedia.org/wiki/Gradient_descent) takes a
//! step of fixed size in the direction of the negative gradient:
//!
//! ```text
//! x_{k+1} = x_k - η ∇f(x_k)
//! ```
//!
//! For a convex function with *L*-Lipschitz gradient and step size *η < 2/L*,
//! the sequence of function values is non-increasing.
//!
//! # References
//!
//! \[1\] [Numerical
//! Optimization](https://link.springer.com/book/10.1007/978-0-387-40065-5)
//!
//! \[2\] [Convex Optimization: Algorithms and
//! Complexity](https://arxiv.org/abs/1405.4980)

use log::debug;
use nalgebra::{convert, ComplexField, Dyn, OVector};

use crate::core::{Differentiable, StepError, StepRule};

/// Gradient descent step rule. See [module](self) documentation for more
/// details.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradientDescent(());

impl GradientDescent {
    /// Initializes gradient descent.
    pub fn new() -> Self {
        Self(())
    }
}

impl<F: Differentiable> StepRule<F> for GradientDescent {
    const NAME: &'static str = "Gradient descent";

    fn next_step(
        &mut self,
        f: &F,
        step_size: F::Field,
        x: &mut OVector<F::Field, Dyn>,
        grad: &mut OVector<F::Field, Dyn>,
    ) -> Result<(), StepError> {
        f.gradient(x, grad);

        if grad.iter().any(|gi| !gi.is_finite()) {
            debug!("gradient has invalid values: {:?}", grad.as_slice());
            return Err(StepError::InvalidGradient);
        }

        // x = x - η ∇f(x)
        x.axpy(-step_size, grad, convert(1.0));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::core::{objective, Function};
    use crate::testing::*;

    use approx::assert_abs_diff_eq;
    use nalgebra::dvector;

    #[test]
    fn single_step() {
        let f = Sphere::new(2);
        let mut x = dvector![100.0, 50.0];
        let mut grad = dvector![0.0, 0.0];

        GradientDescent::new()
            .next_step(&f, 0.1, &mut x, &mut grad)
            .unwrap();

        assert_abs_diff_eq!(x, dvector![80.0, 40.0], epsilon = 1e-12);
        assert_abs_diff_eq!(grad, dvector![200.0, 100.0], epsilon = 1e-12);
    }

    #[test]
    fn sphere() {
        let f = Sphere::new(4);
        let eps = 1e-10;

        for x in f.initials() {
            let x = descend(&f, GradientDescent::new(), x, 0.1, 500, eps).unwrap();
            assert!(f.is_optimum(&x, 1e-6));
        }
    }

    #[test]
    fn shifted_sphere() {
        let f = ShiftedSphere::new(vec![1.0, -2.0, 3.0]);
        let eps = 1e-12;

        for x in f.initials() {
            let x = descend(&f, GradientDescent::new(), x, 0.25, 500, eps).unwrap();
            assert_abs_diff_eq!(x, dvector![1.0, -2.0, 3.0], epsilon = 1e-8);
        }
    }

    #[test]
    fn monotone_descent() {
        // L = 2 for the sphere, any step size below 1 is stable.
        let f = Sphere::new(3);

        for step_size in [0.05, 0.3, 0.9] {
            let mut x = dvector![3.0, -7.0, 12.0];
            let mut grad = x.clone();
            let mut rule = GradientDescent::new();
            let mut fx = f.apply(&x);

            for _ in 0..100 {
                rule.next_step(&f, step_size, &mut x, &mut grad).unwrap();
                let fx_next = f.apply(&x);
                assert!(fx_next <= fx, "{} > {}", fx_next, fx);
                fx = fx_next;
            }
        }
    }

    #[test]
    fn least_squares_selects_nearest_minimizer() {
        // Plain gradient descent on a consistent least squares problem stays in
        // the affine subspace of the initial point.
        let f = LeastSquaresLine::new(vec![1.0, 1.0], 2.0);
        let x = descend(&f, GradientDescent::new(), dvector![100.0, 50.0], 0.1, 500, 1e-12).unwrap();

        assert_abs_diff_eq!(x, f.nearest_optimum(&dvector![100.0, 50.0]), epsilon = 1e-8);
    }

    #[test]
    fn invalid_gradient() {
        let f = objective(
            |x: &OVector<f64, Dyn>| x[0].ln(),
            |x: &OVector<f64, Dyn>, grad: &mut OVector<f64, Dyn>| grad[0] = 1.0 / x[0],
        );

        let mut x = dvector![0.0];
        let mut grad = dvector![0.0];

        assert_eq!(
            GradientDescent::new().next_step(&f, 0.1, &mut x, &mut grad),
            Err(StepError::InvalidGradient)
        );
        // The point is left untouched.
        assert_eq!(x, dvector![0.0]);
    }
}
