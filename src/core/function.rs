use std::marker::PhantomData;

use nalgebra::{Dyn, OVector, RealField};

use super::base::Problem;

/// Definition of an objective function.
///
/// ## Defining a function
///
/// A function is any type that implements [`Function`] and [`Problem`] traits.
/// Gradient-based step rules additionally require [`Differentiable`].
///
/// ```rust
/// use kotva::nalgebra as na;
/// use kotva::{Differentiable, Function, Problem};
/// use na::{Dyn, OVector};
///
/// struct Rosenbrock {
///     a: f64,
///     b: f64,
/// }
///
/// impl Problem for Rosenbrock {
///     type Field = f64;
/// }
///
/// impl Function for Rosenbrock {
///     fn apply(&self, x: &OVector<f64, Dyn>) -> f64 {
///         (self.a - x[0]).powi(2) + self.b * (x[1] - x[0].powi(2)).powi(2)
///     }
/// }
///
/// impl Differentiable for Rosenbrock {
///     fn gradient(&self, x: &OVector<f64, Dyn>, grad: &mut OVector<f64, Dyn>) {
///         grad[0] = -2.0 * (self.a - x[0]) - 4.0 * self.b * x[0] * (x[1] - x[0].powi(2));
///         grad[1] = 2.0 * self.b * (x[1] - x[0].powi(2));
///     }
/// }
/// ```
pub trait Function: Problem {
    /// Calculates the function value in given point.
    fn apply(&self, x: &OVector<Self::Field, Dyn>) -> Self::Field;
}

/// Function with a gradient supplied by the user.
///
/// There is no differentiation machinery in kotva. The gradient is either
/// written by hand or obtained from an external differentiation library.
pub trait Differentiable: Function {
    /// Calculates the gradient of the function in given point and stores it in
    /// `grad`, which has the same dimension as `x`.
    fn gradient(&self, x: &OVector<Self::Field, Dyn>, grad: &mut OVector<Self::Field, Dyn>);
}

/// Objective defined by a pair of closures. See [`objective`].
#[derive(Clone)]
pub struct FnObjective<T, V, G> {
    value: V,
    gradient: G,
    _phantom: PhantomData<fn() -> T>,
}

/// Creates an objective from closures for the value and the gradient.
///
/// ```rust
/// use kotva::objective;
/// use kotva::nalgebra::{DVector, Dyn, OVector};
///
/// let sphere = objective(
///     |x: &OVector<f64, Dyn>| x.norm_squared(),
///     |x: &OVector<f64, Dyn>, grad: &mut OVector<f64, Dyn>| grad.copy_from(&(x * 2.0)),
/// );
/// # use kotva::Function;
/// # let x = DVector::from_vec(vec![1.0, 2.0]);
/// # assert_eq!(sphere.apply(&x), 5.0);
/// ```
pub fn objective<T, V, G>(value: V, gradient: G) -> FnObjective<T, V, G>
where
    T: RealField + Copy,
    V: Fn(&OVector<T, Dyn>) -> T,
    G: Fn(&OVector<T, Dyn>, &mut OVector<T, Dyn>),
{
    FnObjective {
        value,
        gradient,
        _phantom: PhantomData,
    }
}

impl<T, V, G> Problem for FnObjective<T, V, G>
where
    T: RealField + Copy,
{
    type Field = T;
}

impl<T, V, G> Function for FnObjective<T, V, G>
where
    T: RealField + Copy,
    V: Fn(&OVector<T, Dyn>) -> T,
{
    fn apply(&self, x: &OVector<T, Dyn>) -> T {
        (self.value)(x)
    }
}

impl<T, V, G> Differentiable for FnObjective<T, V, G>
where
    T: RealField + Copy,
    V: Fn(&OVector<T, Dyn>) -> T,
    G: Fn(&OVector<T, Dyn>, &mut OVector<T, Dyn>),
{
    fn gradient(&self, x: &OVector<T, Dyn>, grad: &mut OVector<T, Dyn>) {
        (self.gradient)(x, grad)
    }
}
