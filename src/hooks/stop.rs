//! Stopping conditions.
//!
//! A run terminates only when one of its hooks says so. A caller that wants a
//! bound on the number of iterations must therefore include
//! [`StopAfterIterations`] (or an equivalent condition) in the hooks. When
//! multiple stopping conditions are present, the first one in the order of
//! hooks that is satisfied stops the run.

use getset::CopyGetters;
use nalgebra::RealField;

use crate::core::{Context, Hook, IterState, StoppingCondition};

/// Stopping condition given by a predicate of the iteration state and the run
/// context.
///
/// ```rust
/// use kotva::hooks::StopWhen;
/// use kotva::{Context, IterState};
///
/// // Stop when the iterate is close to a target point given in the context.
/// let near_target = StopWhen::new(|state: &IterState<f64>, ctx: &Context<f64>| {
///     let z = ctx.point("z").expect("target point in context");
///     (state.x() - z).norm() < 1e-4
/// });
/// ```
#[derive(Clone)]
pub struct StopWhen<P> {
    predicate: P,
}

impl<P> StopWhen<P> {
    /// Wraps the predicate into a stopping condition hook.
    pub fn new<T>(predicate: P) -> Self
    where
        T: RealField + Copy,
        P: FnMut(&IterState<'_, T>, &Context<T>) -> bool,
    {
        Self { predicate }
    }
}

impl<T, P> Hook<T> for StopWhen<P>
where
    T: RealField + Copy,
    P: FnMut(&IterState<'_, T>, &Context<T>) -> bool + Clone,
{
    fn name(&self) -> &str {
        "StopWhen"
    }

    fn as_stopping_condition(&mut self) -> Option<&mut dyn StoppingCondition<T>> {
        Some(self)
    }
}

impl<T, P> StoppingCondition<T> for StopWhen<P>
where
    T: RealField + Copy,
    P: FnMut(&IterState<'_, T>, &Context<T>) -> bool,
{
    fn is_stopping_condition(&mut self, state: &IterState<'_, T>, ctx: &Context<T>) -> bool {
        (self.predicate)(state, ctx)
    }
}

/// Stops the run after given number of iterations.
#[derive(Debug, Clone, Copy, CopyGetters)]
pub struct StopAfterIterations {
    /// Maximum number of iterations.
    #[getset(get_copy = "pub")]
    max_iters: usize,
}

impl StopAfterIterations {
    /// Creates the condition with given maximum number of iterations.
    pub fn new(max_iters: usize) -> Self {
        Self { max_iters }
    }
}

impl<T: RealField + Copy> Hook<T> for StopAfterIterations {
    fn name(&self) -> &str {
        "StopAfterIterations"
    }

    fn as_stopping_condition(&mut self) -> Option<&mut dyn StoppingCondition<T>> {
        Some(self)
    }
}

impl<T: RealField + Copy> StoppingCondition<T> for StopAfterIterations {
    fn is_stopping_condition(&mut self, state: &IterState<'_, T>, _: &Context<T>) -> bool {
        state.iter() >= self.max_iters
    }
}

/// Stops the run when the norm of the change of the iterate in one iteration
/// drops below given tolerance.
#[derive(Debug, Clone, Copy, CopyGetters)]
pub struct StopWhenChangeLess<T: RealField + Copy> {
    /// Tolerance for the change.
    #[getset(get_copy = "pub")]
    tolerance: T,
}

impl<T: RealField + Copy> StopWhenChangeLess<T> {
    /// Creates the condition with given tolerance.
    pub fn new(tolerance: T) -> Self {
        Self { tolerance }
    }
}

impl<T: RealField + Copy> Hook<T> for StopWhenChangeLess<T> {
    fn name(&self) -> &str {
        "StopWhenChangeLess"
    }

    fn as_stopping_condition(&mut self) -> Option<&mut dyn StoppingCondition<T>> {
        Some(self)
    }
}

impl<T: RealField + Copy> StoppingCondition<T> for StopWhenChangeLess<T> {
    fn is_stopping_condition(&mut self, state: &IterState<'_, T>, _: &Context<T>) -> bool {
        state.change() < self.tolerance
    }
}

/// Stops the run when the norm of the gradient drops below given tolerance.
///
/// The gradient is the one evaluated by the step rule, that is, in the point
/// from which the last step was taken.
#[derive(Debug, Clone, Copy, CopyGetters)]
pub struct StopWhenGradientNormLess<T: RealField + Copy> {
    /// Tolerance for the gradient norm.
    #[getset(get_copy = "pub")]
    tolerance: T,
}

impl<T: RealField + Copy> StopWhenGradientNormLess<T> {
    /// Creates the condition with given tolerance.
    pub fn new(tolerance: T) -> Self {
        Self { tolerance }
    }
}

impl<T: RealField + Copy> Hook<T> for StopWhenGradientNormLess<T> {
    fn name(&self) -> &str {
        "StopWhenGradientNormLess"
    }

    fn as_stopping_condition(&mut self) -> Option<&mut dyn StoppingCondition<T>> {
        Some(self)
    }
}

impl<T: RealField + Copy> StoppingCondition<T> for StopWhenGradientNormLess<T> {
    fn is_stopping_condition(&mut self, state: &IterState<'_, T>, _: &Context<T>) -> bool {
        state.gradient().norm() < self.tolerance
    }
}
