//! Halpern iteration.
//!
//! # References
//!
//! \[1\] [Fixed points of nonexpanding maps](https://doi.org/10.1090/S0002-9904-1967-11864-0)
//!
//! \[2\] [Strong convergence of an iterative method for nonexpansive and
//! accretive operators](https://doi.org/10.1016/j.jmaa.2005.12.066)

use getset::Getters;
use log::trace;
use nalgebra::{convert, Dyn, OVector, RealField};
use num_traits::One;

use crate::core::{AfterIteration, ConfigError, Hook, IterState};

/// Anchors the iterates to a fixed point using Halpern iteration.
///
/// Let *T* be the step rule mapping and *x₀* the anchor. The hook replaces the
/// output of the step rule `T(xₖ)` by
///
/// ```text
/// xₖ₊₁ = λₖ₊₁ x₀ + (1 - λₖ₊₁) T(xₖ)
/// ```
///
/// where *λ* is the schedule. For a nonexpansive *T* and a schedule with
/// `λₖ → 0`, `Σ λₖ = ∞` and `Σ |λₖ₊₁ - λₖ| < ∞` (for example `λₖ = 1/k`), the
/// iterates converge to the fixed point of *T* nearest to the anchor.
///
/// The hook keeps its own counter of applications, which starts at one and is
/// independent of the iteration counter of the run. Use
/// [`reset`](HalpernIteration::reset) to start the schedule over.
///
/// ```rust
/// use kotva::hooks::HalpernIteration;
///
/// // λₖ = 1/(k + 1)
/// let halpern = HalpernIteration::new(vec![10.0, 10.0], |k| 1.0 / (k as f64 + 1.0));
/// assert_eq!(halpern.k(), 0);
/// ```
#[derive(Debug, Clone, Getters)]
pub struct HalpernIteration<T: RealField + Copy, L> {
    /// The anchor point.
    #[getset(get = "pub")]
    anchor: OVector<T, Dyn>,
    schedule: L,
    k: usize,
}

impl<T, L> HalpernIteration<T, L>
where
    T: RealField + Copy,
    L: Fn(usize) -> T,
{
    /// Creates the hook with given anchor and schedule *λ*.
    ///
    /// The schedule is evaluated for `k = 1, 2, ...` and its values are
    /// expected to lie in `[0, 1]`, which is not checked.
    pub fn new(anchor: Vec<T>, schedule: L) -> Self {
        Self {
            anchor: OVector::<T, Dyn>::from_vec(anchor),
            schedule,
            k: 0,
        }
    }

    /// Returns the number of transforms applied since the creation or the
    /// last reset.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Restarts the schedule, so that the next transform uses `λ₁`.
    pub fn reset(&mut self) {
        self.k = 0;
    }
}

impl<T: RealField + Copy> HalpernIteration<T, fn(usize) -> T> {
    /// Creates the hook with given anchor and the [harmonic](harmonic)
    /// schedule `λₖ = 1/k`.
    pub fn harmonic(anchor: Vec<T>) -> Self {
        Self::new(anchor, harmonic::<T>)
    }
}

/// The harmonic schedule `λₖ = 1/k`.
///
/// Note that `λ₁ = 1`, so the first transformed iterate is the anchor itself.
pub fn harmonic<T: RealField + Copy>(k: usize) -> T {
    <T as One>::one() / convert(k as f64)
}

impl<T, L> Hook<T> for HalpernIteration<T, L>
where
    T: RealField + Copy,
    L: Fn(usize) -> T + Clone,
{
    fn name(&self) -> &str {
        "HalpernIteration"
    }

    fn as_after_iteration(&mut self) -> Option<&mut dyn AfterIteration<T>> {
        Some(self)
    }

    fn validate(&self, dim: usize) -> Result<(), ConfigError> {
        if self.anchor.nrows() == dim {
            Ok(())
        } else {
            Err(ConfigError::DimensionMismatch {
                what: "anchor",
                expected: dim,
                found: self.anchor.nrows(),
            })
        }
    }
}

impl<T, L> AfterIteration<T> for HalpernIteration<T, L>
where
    T: RealField + Copy,
    L: Fn(usize) -> T,
{
    fn run_after_iteration(&mut self, state: &IterState<'_, T>) -> OVector<T, Dyn> {
        self.k += 1;
        let lambda = (self.schedule)(self.k);
        trace!("halpern k = {}, lambda = {}", self.k, lambda);

        let one: T = One::one();
        let mut x = state.x() * (one - lambda);
        x.axpy(lambda, &self.anchor, one);
        x
    }
}
