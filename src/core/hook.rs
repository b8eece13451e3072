use dyn_clone::DynClone;
use nalgebra::{Dyn, OVector, RealField};

use super::{context::Context, error::ConfigError};

/// Interface of a hook.
///
/// A hook is a unit of behavior injected into the optimization loop. What the
/// hook is able to do is given by its *capabilities*, which the driver queries
/// explicitly through [`as_stopping_condition`](Hook::as_stopping_condition)
/// and [`as_after_iteration`](Hook::as_after_iteration). A hook may have
/// either of the capabilities, both of them or none.
///
/// In every iteration, the driver first applies all hooks with
/// [`AfterIteration`] capability in the order in which they were given to the
/// state, each receiving the output of the previous one. Then it asks the
/// hooks with [`StoppingCondition`] capability, again in order, and stops the
/// run on the first one that says so. Reordering hooks thus changes the
/// semantics.
///
/// Hooks are cloned together with the state (see
/// [`minimize`](crate::driver::minimize)), so they must implement [`Clone`].
///
/// ## Implementing a hook
///
/// Here is a hook that clamps every coordinate of the iterate to be at most
/// one, which is a projection onto a box.
///
/// ```rust
/// use kotva::nalgebra as na;
/// use kotva::{AfterIteration, Hook, IterState};
/// use na::{Dyn, OVector};
///
/// #[derive(Clone)]
/// struct ClampToOne;
///
/// impl Hook<f64> for ClampToOne {
///     fn name(&self) -> &str {
///         "ClampToOne"
///     }
///
///     fn as_after_iteration(&mut self) -> Option<&mut dyn AfterIteration<f64>> {
///         Some(self)
///     }
/// }
///
/// impl AfterIteration<f64> for ClampToOne {
///     fn run_after_iteration(&mut self, state: &IterState<'_, f64>) -> OVector<f64, Dyn> {
///         state.x().map(|xi| xi.min(1.0))
///     }
/// }
/// ```
pub trait Hook<T: RealField + Copy>: DynClone {
    /// Name of the hook, used for logging and error reporting.
    fn name(&self) -> &str;

    /// Returns the stopping condition capability if the hook supports it.
    fn as_stopping_condition(&mut self) -> Option<&mut dyn StoppingCondition<T>> {
        None
    }

    /// Returns the post-iteration transform capability if the hook supports
    /// it.
    fn as_after_iteration(&mut self) -> Option<&mut dyn AfterIteration<T>> {
        None
    }

    /// Checks that the hook is usable for iterates of given dimension. Called
    /// once at the start of every run.
    fn validate(&self, dim: usize) -> Result<(), ConfigError> {
        let _ = dim;
        Ok(())
    }
}

dyn_clone::clone_trait_object!(<T> Hook<T> where T: RealField + Copy);

/// Capability of a hook to stop the optimization run.
pub trait StoppingCondition<T: RealField + Copy> {
    /// Decides whether the run should stop after the current iteration.
    ///
    /// It is evaluated after all post-iteration transforms were applied, so
    /// `state` holds the final iterate of the iteration and its function
    /// value.
    fn is_stopping_condition(&mut self, state: &IterState<'_, T>, ctx: &Context<T>) -> bool;
}

/// Capability of a hook to transform the iterate after each step.
pub trait AfterIteration<T: RealField + Copy> {
    /// Computes the replacement of the current iterate.
    ///
    /// The returned vector must have the same dimension as the iterate.
    /// Returning a clone of [`IterState::x`] leaves the iterate unchanged.
    fn run_after_iteration(&mut self, state: &IterState<'_, T>) -> OVector<T, Dyn>;
}

/// State of the current iteration as seen by hooks.
#[derive(Debug, Clone, Copy)]
pub struct IterState<'a, T: RealField + Copy> {
    pub(crate) x: &'a OVector<T, Dyn>,
    pub(crate) x_prev: &'a OVector<T, Dyn>,
    pub(crate) gradient: &'a OVector<T, Dyn>,
    pub(crate) fx: Option<T>,
    pub(crate) iter: usize,
    pub(crate) step_size: T,
}

impl<'a, T: RealField + Copy> IterState<'a, T> {
    /// Returns reference to the current point.
    ///
    /// For post-iteration transforms, this is the output of the step rule
    /// (or of the previous transform).
    pub fn x(&self) -> &'a OVector<T, Dyn> {
        self.x
    }

    /// Returns reference to the point from which the step was taken.
    pub fn x_prev(&self) -> &'a OVector<T, Dyn> {
        self.x_prev
    }

    /// Returns reference to the gradient evaluated in [`x_prev`](IterState::x_prev).
    pub fn gradient(&self) -> &'a OVector<T, Dyn> {
        self.gradient
    }

    /// Returns the function value in the current point.
    ///
    /// The value is not known yet while post-iteration transforms are running,
    /// in which case `None` is returned. For stopping conditions, it is always
    /// available.
    pub fn fx(&self) -> Option<T> {
        self.fx
    }

    /// Returns the number of iterations performed including the current one.
    pub fn iter(&self) -> usize {
        self.iter
    }

    /// Returns the step size.
    pub fn step_size(&self) -> T {
        self.step_size
    }

    /// Returns the norm of the difference between the current and the previous
    /// point.
    pub fn change(&self) -> T {
        (self.x - self.x_prev).norm()
    }
}
