use std::fmt;

use getset::{CopyGetters, Getters};
use nalgebra::{convert, Dyn, OVector, RealField};

use super::{error::ConfigError, hook::Hook};
use crate::algo::{GradientDescent, ProjectedGradientDescent};
use crate::projection::Projection;

/// State of an optimization run.
///
/// The state holds the current iterate, the iteration counter, the step size,
/// the step rule (gradient descent by default) and the ordered sequence of
/// hooks. It is created using the [`StateBuilder`]:
///
/// ```rust
/// use kotva::hooks::StopAfterIterations;
/// use kotva::State;
///
/// let state = State::builder()
///     .with_initial(vec![100.0, 50.0])
///     .with_step_size(0.1)
///     .with_hook(StopAfterIterations::new(100))
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(state.dim(), 2);
/// assert_eq!(state.iter(), 0);
/// ```
///
/// A state is exclusively owned by one run at a time. Use
/// [`minimize_mut`](crate::driver::minimize_mut) to run the optimization on
/// the state in place or [`minimize`](crate::driver::minimize) to run it on a
/// copy.
#[derive(Clone, Getters, CopyGetters)]
pub struct State<T: RealField + Copy, R = GradientDescent> {
    /// Current point.
    #[getset(get = "pub")]
    x: OVector<T, Dyn>,
    /// Point before the last iteration.
    #[getset(get = "pub")]
    x_prev: OVector<T, Dyn>,
    /// Gradient evaluated in the point before the last iteration.
    #[getset(get = "pub")]
    gradient: OVector<T, Dyn>,
    /// Function value in the current point, if it was evaluated already.
    #[getset(get_copy = "pub")]
    fx: Option<T>,
    /// Number of iterations performed.
    #[getset(get_copy = "pub")]
    iter: usize,
    /// Step size.
    #[getset(get_copy = "pub")]
    step_size: T,
    /// Step rule.
    #[getset(get = "pub")]
    rule: R,
    hooks: Vec<Box<dyn Hook<T>>>,
}

impl<T: RealField + Copy> State<T, GradientDescent> {
    /// Returns the builder for the state.
    pub fn builder() -> StateBuilder<T, GradientDescent> {
        StateBuilder::new()
    }
}

impl<T: RealField + Copy, R> State<T, R> {
    /// Returns the dimension of the iterate.
    pub fn dim(&self) -> usize {
        self.x.nrows()
    }

    /// Returns the ordered sequence of hooks.
    pub fn hooks(&self) -> &[Box<dyn Hook<T>>] {
        &self.hooks
    }

    /// Appends a hook to the end of the sequence.
    pub fn push_hook<H: Hook<T> + 'static>(&mut self, hook: H) {
        self.hooks.push(Box::new(hook));
    }

    /// Sets the step size.
    pub fn set_step_size(&mut self, step_size: T) -> Result<(), ConfigError> {
        self.step_size = validate_step_size(step_size)?;
        Ok(())
    }

    /// Determines whether any hook supports stopping the run.
    pub(crate) fn has_stopping_condition(&mut self) -> bool {
        self.hooks
            .iter_mut()
            .any(|hook| hook.as_stopping_condition().is_some())
    }

    pub(crate) fn parts_mut(&mut self) -> StateParts<'_, T, R> {
        StateParts {
            x: &mut self.x,
            x_prev: &mut self.x_prev,
            gradient: &mut self.gradient,
            fx: &mut self.fx,
            iter: &mut self.iter,
            step_size: self.step_size,
            rule: &mut self.rule,
            hooks: &mut self.hooks,
        }
    }
}

/// Disjoint mutable borrows of the state fields for the driver.
pub(crate) struct StateParts<'a, T: RealField + Copy, R> {
    pub x: &'a mut OVector<T, Dyn>,
    pub x_prev: &'a mut OVector<T, Dyn>,
    pub gradient: &'a mut OVector<T, Dyn>,
    pub fx: &'a mut Option<T>,
    pub iter: &'a mut usize,
    pub step_size: T,
    pub rule: &'a mut R,
    pub hooks: &'a mut Vec<Box<dyn Hook<T>>>,
}

impl<T: RealField + Copy, R> fmt::Debug for State<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("x", &self.x.as_slice())
            .field("fx", &self.fx)
            .field("iter", &self.iter)
            .field("step_size", &self.step_size)
            .field(
                "hooks",
                &self.hooks.iter().map(|hook| hook.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Builder for the [`State`].
pub struct StateBuilder<T: RealField + Copy, R> {
    x0: Option<Vec<T>>,
    step_size: Option<T>,
    hooks: Vec<Box<dyn Hook<T>>>,
    rule: R,
}

impl<T: RealField + Copy> StateBuilder<T, GradientDescent> {
    /// Initializes the builder with gradient descent as the step rule and no
    /// hooks.
    pub fn new() -> Self {
        Self {
            x0: None,
            step_size: None,
            hooks: Vec::new(),
            rule: GradientDescent::new(),
        }
    }
}

impl<T: RealField + Copy> Default for StateBuilder<T, GradientDescent> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RealField + Copy, R> StateBuilder<T, R> {
    /// Sets the initial point from which the iterative process starts.
    /// Required.
    pub fn with_initial(mut self, x0: Vec<T>) -> Self {
        self.x0 = Some(x0);
        self
    }

    /// Sets the step size. Required, must be positive and finite.
    pub fn with_step_size(mut self, step_size: T) -> Self {
        self.step_size = Some(step_size);
        self
    }

    /// Appends a hook to the end of the sequence.
    pub fn with_hook<H: Hook<T> + 'static>(mut self, hook: H) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Appends already boxed hooks to the end of the sequence.
    pub fn with_hooks<I>(mut self, hooks: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Hook<T>>>,
    {
        self.hooks.extend(hooks);
        self
    }

    /// Sets specific step rule to be used.
    pub fn with_rule<R2>(self, rule: R2) -> StateBuilder<T, R2> {
        StateBuilder {
            x0: self.x0,
            step_size: self.step_size,
            hooks: self.hooks,
            rule,
        }
    }

    /// Uses [projected gradient descent](ProjectedGradientDescent) with given
    /// projection as the step rule.
    ///
    /// The projection takes only the point. Any additional parameters (such as
    /// the simplex size) are bound when constructing the operator.
    pub fn with_projection<P: Projection<T>>(
        self,
        projection: P,
    ) -> StateBuilder<T, ProjectedGradientDescent<P>> {
        self.with_rule(ProjectedGradientDescent::new(projection))
    }

    /// Builds the [`State`].
    ///
    /// Hooks are not required at this point, they can be added later by
    /// [`State::push_hook`]. The presence of a stopping condition is checked
    /// when the run starts.
    pub fn build(self) -> Result<State<T, R>, ConfigError> {
        let x0 = self.x0.ok_or(ConfigError::MissingOption("x"))?;
        let step_size = self
            .step_size
            .ok_or(ConfigError::MissingOption("step size"))?;
        let step_size = validate_step_size(step_size)?;

        if x0.is_empty() {
            return Err(ConfigError::EmptyIterate);
        }

        if x0.iter().any(|xi| !xi.is_finite()) {
            return Err(ConfigError::InvalidInitial);
        }

        let x = OVector::<T, Dyn>::from_vec(x0);
        let x_prev = x.clone_owned();
        let gradient = OVector::<T, Dyn>::zeros(x.nrows());

        Ok(State {
            x,
            x_prev,
            gradient,
            fx: None,
            iter: 0,
            step_size,
            rule: self.rule,
            hooks: self.hooks,
        })
    }
}

fn validate_step_size<T: RealField + Copy>(step_size: T) -> Result<T, ConfigError> {
    if step_size.is_finite() && step_size > convert(0.0) {
        Ok(step_size)
    } else {
        Err(ConfigError::InvalidStepSize)
    }
}
