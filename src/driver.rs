//! High-level API for running the optimization.
//!
//! The drivers take an objective function and a [`State`] and iterate the
//! step rule of the state until one of its hooks stops the run. Each iteration
//! consists of
//!
//! 1. the step of the [step rule](crate::core::StepRule),
//! 2. all post-iteration transforms in the order of hooks, each applied to the
//!    output of the previous one,
//! 3. evaluation of the objective function in the new iterate,
//! 4. all stopping conditions in the order of hooks, the first satisfied one
//!    stopping the run.
//!
//! The simplest use is to run the optimization in place:
//!
//! ```rust
//! use kotva::hooks::StopWhenChangeLess;
//! use kotva::nalgebra::{Dyn, OVector};
//! use kotva::{minimize_mut, objective, State};
//!
//! // f(x) = x₁² + x₂²
//! let f = objective(
//!     |x: &OVector<f64, Dyn>| x.norm_squared(),
//!     |x: &OVector<f64, Dyn>, grad: &mut OVector<f64, Dyn>| grad.copy_from(&(x * 2.0)),
//! );
//!
//! let mut state = State::builder()
//!     .with_initial(vec![100.0, 50.0])
//!     .with_step_size(0.1)
//!     .with_hook(StopWhenChangeLess::new(1e-9))
//!     .build()
//!     .expect("valid configuration");
//!
//! let solution = minimize_mut(&f, &mut state).expect("optimization error");
//! assert!(solution.fx() < 1e-12);
//! ```
//!
//! If the initial state should be kept, use [`minimize`] which runs on a copy
//! and returns it. Stopping conditions that need additional data (such as a
//! target point) get it from the [`Context`] passed to [`minimize_mut_with`]
//! or [`minimize_with`].
//!
//! The run must include a hook with stopping condition capability, otherwise
//! [`ConfigError::NoStoppingCondition`] is returned before any iteration. Note
//! that the run always performs at least one iteration, even if the state was
//! already stopped by a previous run.

use log::{debug, trace};
use nalgebra::{ComplexField, Dyn, OVector, RealField};

use crate::core::{
    ConfigError, Context, Differentiable, Error, Hook, IterState, State, StepError, StepRule,
};

/// Runs the optimization on the state in place.
///
/// On success, the state holds the final iterate. On error, the state is left
/// as it was at the point of failure.
pub fn minimize_mut<'s, F, R>(
    f: &F,
    state: &'s mut State<F::Field, R>,
) -> Result<Solution<'s, F::Field>, Error>
where
    F: Differentiable,
    R: StepRule<F>,
{
    minimize_mut_with(f, state, &Context::new())
}

/// Runs the optimization on the state in place, passing given context to the
/// stopping conditions.
pub fn minimize_mut_with<'s, F, R>(
    f: &F,
    state: &'s mut State<F::Field, R>,
    ctx: &Context<F::Field>,
) -> Result<Solution<'s, F::Field>, Error>
where
    F: Differentiable,
    R: StepRule<F>,
{
    let fx = run(f, state, ctx)?;

    Ok(Solution {
        x: state.x(),
        fx,
        iter: state.iter(),
    })
}

/// Runs the optimization on a copy of the state and returns the final state.
///
/// The given state, including the internal state of its hooks, is left
/// untouched.
pub fn minimize<F, R>(f: &F, state: &State<F::Field, R>) -> Result<State<F::Field, R>, Error>
where
    F: Differentiable,
    R: StepRule<F> + Clone,
{
    minimize_with(f, state, &Context::new())
}

/// Runs the optimization on a copy of the state, passing given context to the
/// stopping conditions, and returns the final state.
pub fn minimize_with<F, R>(
    f: &F,
    state: &State<F::Field, R>,
    ctx: &Context<F::Field>,
) -> Result<State<F::Field, R>, Error>
where
    F: Differentiable,
    R: StepRule<F> + Clone,
{
    let mut state = state.clone();
    run(f, &mut state, ctx)?;
    Ok(state)
}

/// Result of a successful run.
#[derive(Debug, Clone, Copy)]
pub struct Solution<'a, T: RealField + Copy> {
    x: &'a OVector<T, Dyn>,
    fx: T,
    iter: usize,
}

impl<'a, T: RealField + Copy> Solution<'a, T> {
    /// Returns reference to the final point.
    pub fn x(&self) -> &'a OVector<T, Dyn> {
        self.x
    }

    /// Returns the function value in the final point.
    pub fn fx(&self) -> T {
        self.fx
    }

    /// Returns the total number of iterations performed on the state.
    pub fn iter(&self) -> usize {
        self.iter
    }
}

fn run<F, R>(
    f: &F,
    state: &mut State<F::Field, R>,
    ctx: &Context<F::Field>,
) -> Result<F::Field, Error>
where
    F: Differentiable,
    R: StepRule<F>,
{
    if !state.has_stopping_condition() {
        return Err(ConfigError::NoStoppingCondition.into());
    }

    let dim = state.dim();
    state
        .hooks()
        .iter()
        .try_for_each(|hook| hook.validate(dim))?;

    debug!(
        "{}: start in iteration {} from {:?} with hooks {:?}",
        R::NAME,
        state.iter(),
        state.x().as_slice(),
        state.hooks().iter().map(|hook| hook.name()).collect::<Vec<_>>()
    );

    let parts = state.parts_mut();

    loop {
        let iter = *parts.iter + 1;

        parts.x_prev.copy_from(&*parts.x);
        *parts.fx = None;

        parts
            .rule
            .next_step(f, parts.step_size, parts.x, parts.gradient)
            .map_err(|error| match error {
                StepError::InvalidGradient => Error::InvalidGradient { iter },
                StepError::Config(error) => Error::Config(error),
            })?;

        if parts.x.iter().any(|xi| !xi.is_finite()) {
            debug!(
                "{} produced invalid iterate: {:?}",
                R::NAME,
                parts.x.as_slice()
            );
            return Err(Error::InvalidStep { iter });
        }

        *parts.iter = iter;

        for hook in parts.hooks.iter_mut() {
            let y = match hook.as_after_iteration() {
                Some(transform) => {
                    let view = IterState {
                        x: &*parts.x,
                        x_prev: &*parts.x_prev,
                        gradient: &*parts.gradient,
                        fx: None,
                        iter,
                        step_size: parts.step_size,
                    };
                    transform.run_after_iteration(&view)
                }
                None => continue,
            };

            check_transformed(&**hook, &y, dim, iter)?;
            trace!("{} transformed the iterate to {:?}", hook.name(), y.as_slice());

            *parts.x = y;
        }

        let fx = f.apply(&*parts.x);

        if !fx.is_finite() {
            debug!("invalid function value in iteration {}: {}", iter, fx);
            return Err(Error::InvalidValue { iter });
        }

        *parts.fx = Some(fx);

        debug!("iteration {}: fx = {}", iter, fx);

        let view = IterState {
            x: &*parts.x,
            x_prev: &*parts.x_prev,
            gradient: &*parts.gradient,
            fx: Some(fx),
            iter,
            step_size: parts.step_size,
        };

        if let Some(name) = first_stopping(parts.hooks.as_mut_slice(), &view, ctx) {
            debug!("{}: stopped by {} in iteration {}", R::NAME, name, iter);
            return Ok(fx);
        }
    }
}

fn check_transformed<T: RealField + Copy>(
    hook: &dyn Hook<T>,
    y: &OVector<T, Dyn>,
    dim: usize,
    iter: usize,
) -> Result<(), Error> {
    if y.nrows() != dim {
        return Err(ConfigError::DimensionMismatch {
            what: "hook output",
            expected: dim,
            found: y.nrows(),
        }
        .into());
    }

    if y.iter().any(|yi| !yi.is_finite()) {
        debug!("{} produced invalid iterate: {:?}", hook.name(), y.as_slice());
        return Err(Error::InvalidIterate {
            hook: hook.name().to_string(),
            iter,
        });
    }

    Ok(())
}

fn first_stopping<'h, T: RealField + Copy>(
    hooks: &'h mut [Box<dyn Hook<T>>],
    view: &IterState<'_, T>,
    ctx: &Context<T>,
) -> Option<&'h str> {
    let index = hooks.iter_mut().position(|hook| {
        let stop = hook
            .as_stopping_condition()
            .map_or(false, |condition| condition.is_stopping_condition(view, ctx));

        if stop {
            trace!("stopping condition of {} satisfied", hook.name());
        }

        stop
    })?;

    Some(hooks[index].name())
}
