//! Projected gradient descent.
//!
//! Projected gradient descent minimizes a function over a constraint set *C*
//! by taking a [gradient descent](super::gradient_descent) step and projecting
//! the result back onto *C*:
//!
//! ```text
//! y_k     = x_k - η ∇f(x_k)
//! x_{k+1} = P_C(y_k)
//! ```
//!
//! The projection is any [`Projection`] operator. Every iterate after the first
//! step lies in the constraint set. If both the function and the set are
//! convex, the method enjoys the same monotonic descent as gradient descent
//! restricted to the set.
//!
//! # References
//!
//! \[1\] [Nonlinear
//! Programming](http://www.athenasc.com/nonlinbook.html)
//!
//! \[2\] [Convex Optimization: Algorithms and
//! Complexity](https://arxiv.org/abs/1405.4980)

use getset::Getters;
use nalgebra::{Dyn, OVector};

use super::gradient_descent::GradientDescent;
use crate::core::{ConfigError, Differentiable, StepError, StepRule};
use crate::projection::Projection;

/// Projected gradient descent step rule. See [module](self) documentation for
/// more details.
#[derive(Debug, Clone, Getters)]
pub struct ProjectedGradientDescent<P> {
    descent: GradientDescent,
    /// Projection onto the constraint set.
    #[getset(get = "pub")]
    projection: P,
}

impl<P> ProjectedGradientDescent<P> {
    /// Initializes projected gradient descent with given projection.
    ///
    /// The projection takes only the point as its input. Parameters of the
    /// constraint set must be bound in the operator beforehand.
    pub fn new(projection: P) -> Self {
        Self {
            descent: GradientDescent::new(),
            projection,
        }
    }
}

impl<F, P> StepRule<F> for ProjectedGradientDescent<P>
where
    F: Differentiable,
    P: Projection<F::Field>,
{
    const NAME: &'static str = "Projected gradient descent";

    fn next_step(
        &mut self,
        f: &F,
        step_size: F::Field,
        x: &mut OVector<F::Field, Dyn>,
        grad: &mut OVector<F::Field, Dyn>,
    ) -> Result<(), StepError> {
        self.descent.next_step(f, step_size, x, grad)?;

        let projected = self.projection.project(x);

        if projected.nrows() != x.nrows() {
            return Err(ConfigError::DimensionMismatch {
                what: "projection output",
                expected: x.nrows(),
                found: projected.nrows(),
            }
            .into());
        }

        *x = projected;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::projection::{from_fn, SigmaSimplex, SparseSimplex};
    use crate::testing::*;

    use approx::assert_abs_diff_eq;
    use nalgebra::dvector;

    #[test]
    fn sphere_on_unit_simplex() {
        let f = Sphere::new(2);
        let rule = ProjectedGradientDescent::new(SigmaSimplex::new(1.0));

        let x = descend(&f, rule, dvector![100.0, 50.0], 0.1, 1000, 1e-12).unwrap();
        assert_abs_diff_eq!(x, dvector![0.5, 0.5], epsilon = 1e-4);
    }

    #[test]
    fn first_step_is_feasible() {
        let f = Sphere::new(2);
        let mut rule = ProjectedGradientDescent::new(SigmaSimplex::new(1.0));
        let mut x = dvector![100.0, 50.0];
        let mut grad = x.clone();

        rule.next_step(&f, 0.1, &mut x, &mut grad).unwrap();

        assert_abs_diff_eq!(x, dvector![1.0, 0.0], epsilon = 1e-12);
    }

    #[test]
    fn shifted_sphere_on_simplex() {
        // The center lies outside the simplex, the solution is its projection.
        let f = ShiftedSphere::new(vec![1.0, 0.4, -0.3]);
        let rule = ProjectedGradientDescent::new(SigmaSimplex::new(1.0));

        let x = descend(&f, rule, dvector![0.0, 0.0, 5.0], 0.25, 1000, 1e-12).unwrap();
        assert_abs_diff_eq!(x, dvector![0.8, 0.2, 0.0], epsilon = 1e-8);
    }

    #[test]
    fn sparse_simplex() {
        let f = ShiftedSphere::new(vec![0.9, 0.1, 0.8]);
        let rule = ProjectedGradientDescent::new(SparseSimplex::new(1, 1.0));

        let x = descend(&f, rule, dvector![0.2, 0.5, 0.3], 0.25, 1000, 1e-12).unwrap();
        assert_eq!(x.iter().filter(|xi| **xi != 0.0).count(), 1);
        assert_abs_diff_eq!(x.sum(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn projection_closure() {
        let f = ShiftedSphere::new(vec![2.0, -2.0]);
        let nonnegative = from_fn(|x: &OVector<f64, Dyn>| x.map(|xi| xi.max(0.0)));
        let rule = ProjectedGradientDescent::new(nonnegative);

        let x = descend(&f, rule, dvector![-1.0, 1.0], 0.25, 1000, 1e-12).unwrap();
        assert_abs_diff_eq!(x, dvector![2.0, 0.0], epsilon = 1e-8);
    }

    #[test]
    fn projection_dimension_mismatch() {
        let f = Sphere::new(2);
        let truncate = from_fn(|x: &OVector<f64, Dyn>| x.rows(0, 1).into_owned());
        let mut rule = ProjectedGradientDescent::new(truncate);
        let mut x = dvector![1.0, 1.0];
        let mut grad = x.clone();

        assert_eq!(
            rule.next_step(&f, 0.1, &mut x, &mut grad),
            Err(StepError::Config(ConfigError::DimensionMismatch {
                what: "projection output",
                expected: 2,
                found: 1,
            }))
        );
    }
}
