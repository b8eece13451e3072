use nalgebra::{Dyn, OVector};
use thiserror::Error;

use super::{error::ConfigError, function::Differentiable};

/// Error while computing the next step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// The gradient contains an invalid value (NaN, positive or negative
    /// infinity).
    #[error("invalid gradient value encountered")]
    InvalidGradient,
    /// An operator used by the step rule is not configured properly.
    #[error("{0}")]
    Config(#[from] ConfigError),
}

/// Interface of a step rule.
///
/// A step rule defines how the iterate advances in one iteration. It has no
/// notion of termination, which is entirely driven by
/// [hooks](crate::core::Hook).
///
/// ## Implementing a step rule
///
/// Here is a normalized gradient descent, which always moves by the step size
/// in the direction of the negative gradient.
///
/// ```rust
/// use kotva::nalgebra as na;
/// use kotva::{Differentiable, StepError, StepRule};
/// use na::{Dyn, OVector};
///
/// #[derive(Clone)]
/// struct NormalizedGradientDescent;
///
/// impl<F: Differentiable> StepRule<F> for NormalizedGradientDescent {
///     const NAME: &'static str = "Normalized gradient descent";
///
///     fn next_step(
///         &mut self,
///         f: &F,
///         step_size: F::Field,
///         x: &mut OVector<F::Field, Dyn>,
///         grad: &mut OVector<F::Field, Dyn>,
///     ) -> Result<(), StepError> {
///         f.gradient(x, grad);
///
///         let norm = grad.norm();
///         if norm > na::convert(0.0) {
///             x.axpy(-step_size / norm, grad, na::convert(1.0));
///         }
///
///         Ok(())
///     }
/// }
/// ```
pub trait StepRule<F: Differentiable> {
    /// Name of the step rule.
    const NAME: &'static str;

    /// Computes the next step.
    ///
    /// The value of `x` is the current point. After the method returns, `x`
    /// should hold the next point and `grad` the gradient evaluated in the
    /// *original* point. Both vectors have the dimension of the iterate.
    fn next_step(
        &mut self,
        f: &F,
        step_size: F::Field,
        x: &mut OVector<F::Field, Dyn>,
        grad: &mut OVector<F::Field, Dyn>,
    ) -> Result<(), StepError>;
}
