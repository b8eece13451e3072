//! Projection operators onto constraint sets.
//!
//! A projection maps any point to the nearest point (in the Euclidean norm) of
//! a constraint set, called feasible set. Projections are pure functions,
//! total over the whole space and idempotent on the feasible set.
//!
//! The operators are used by
//! [projected gradient descent](crate::algo::ProjectedGradientDescent), which
//! passes only the point to them. Parameters of the set are therefore bound at
//! construction of the operator value:
//!
//! ```rust
//! use kotva::nalgebra::dvector;
//! use kotva::projection::{Projection, SigmaSimplex};
//!
//! let simplex = SigmaSimplex::new(2.0);
//! let y = simplex.project(&dvector![3.0, 1.0, -1.0]);
//!
//! assert_eq!(y, dvector![2.0, 0.0, 0.0]);
//! ```
//!
//! Arbitrary closures can be turned into projections using [`from_fn`].
//!
//! * [`SigmaSimplex`] ([`sigma_simplex`]) -- scaled probability simplex.
//! * [`SparseSimplex`] ([`gssp`]) -- sparse scaled simplex.
//! * [`Sparse`] ([`hard_threshold`]) -- vectors with limited number of
//!   non-zero coordinates.
//! * [`GroupSparse`] ([`group_hard_threshold`]) -- vectors with limited number
//!   of active groups of coordinates.
//!
//! Whenever the selection of coordinates (or groups) is ambiguous due to equal
//! values, the lowest index wins, so every operator is a well-defined
//! function.

use nalgebra::{Dyn, OVector, RealField};

mod simplex;
mod sparse;

pub use simplex::*;
pub use sparse::*;

/// Interface of a projection operator.
pub trait Projection<T: RealField + Copy> {
    /// Projects given point onto the feasible set.
    ///
    /// The output must have the same dimension as the input.
    fn project(&self, x: &OVector<T, Dyn>) -> OVector<T, Dyn>;
}

/// Projection defined by a closure. See [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FromFn<F>(F);

/// Creates a projection from a closure.
///
/// This is useful for simple sets or for binding additional parameters of
/// projection functions.
///
/// ```rust
/// use kotva::nalgebra::{dvector, Dyn, OVector};
/// use kotva::projection::{from_fn, gssp, Projection};
///
/// let sparse_simplex = from_fn(|x: &OVector<f64, Dyn>| gssp(x, 2, 1.0));
/// let y = sparse_simplex.project(&dvector![0.1, 0.9, 0.7]);
///
/// assert_eq!(y.iter().filter(|yi| **yi > 0.0).count(), 2);
/// ```
pub fn from_fn<T, F>(f: F) -> FromFn<F>
where
    T: RealField + Copy,
    F: Fn(&OVector<T, Dyn>) -> OVector<T, Dyn>,
{
    FromFn(f)
}

impl<T, F> Projection<T> for FromFn<F>
where
    T: RealField + Copy,
    F: Fn(&OVector<T, Dyn>) -> OVector<T, Dyn>,
{
    fn project(&self, x: &OVector<T, Dyn>) -> OVector<T, Dyn> {
        (self.0)(x)
    }
}

impl<T: RealField + Copy, P: Projection<T> + ?Sized> Projection<T> for &P {
    fn project(&self, x: &OVector<T, Dyn>) -> OVector<T, Dyn> {
        (**self).project(x)
    }
}
