#![allow(clippy::many_single_char_names)]
#![allow(clippy::type_complexity)]
#![warn(missing_docs)]

//! # Kotva
//!
//! A pure Rust framework for iterative first-order optimization with
//! composable hooks.
//!
//! The library iterates a step rule (gradient descent or projected gradient
//! descent) on a differentiable objective. Everything else that happens in the
//! loop, from deciding when to stop to modifying the iterate after each step,
//! is injected by the caller as *hooks* without touching the loop itself. The
//! anchored [Halpern iteration](hooks::HalpernIteration) is implemented purely
//! as such a hook. Exact projection operators onto the scaled simplex and
//! onto sparse sets make constrained problems first-class.
//!
//! ## Algorithms
//!
//! * [Gradient descent](algo::gradient_descent) -- fixed-size steps in the
//!   direction of the negative gradient.
//! * [Projected gradient descent](algo::projected_gradient_descent) --
//!   gradient descent followed by a projection onto the constraint set.
//!
//! ## Hooks
//!
//! A hook has one or both of the capabilities:
//!
//! * *stopping condition* -- decides whether the run should stop,
//! * *post-iteration transform* -- replaces the iterate after each step.
//!
//! Hooks are kept in an ordered sequence and their order matters: all
//! transforms are applied in the order of the sequence, then all stopping
//! conditions are asked in the same order. A run without any stopping
//! condition is rejected. See [`hooks`] for the implemented hooks and
//! [`Hook`] for implementing custom ones.
//!
//! ## Problem
//!
//! The objective is any type that implements the [`Function`],
//! [`Differentiable`] and [`Problem`] traits. For quick experiments, the
//! [`objective`] function creates it from a pair of closures.
//!
//! ```rust
//! // Kotva is based on `nalgebra` crate.
//! use kotva::nalgebra as na;
//! use kotva::{Differentiable, Function, Problem};
//! use na::{Dyn, OVector};
//!
//! // f(x) = (x₁ + x₂ - 2)²
//! struct LeastSquares;
//!
//! impl Problem for LeastSquares {
//!     // The numeric type. Usually f64 or f32.
//!     type Field = f64;
//! }
//!
//! impl Function for LeastSquares {
//!     fn apply(&self, x: &OVector<f64, Dyn>) -> f64 {
//!         (x[0] + x[1] - 2.0).powi(2)
//!     }
//! }
//!
//! impl Differentiable for LeastSquares {
//!     fn gradient(&self, x: &OVector<f64, Dyn>, grad: &mut OVector<f64, Dyn>) {
//!         let r = x[0] + x[1] - 2.0;
//!         grad[0] = 2.0 * r;
//!         grad[1] = 2.0 * r;
//!     }
//! }
//! ```
//!
//! ## Optimizing
//!
//! The [`State`] holds the iterate, step size, step rule and hooks. The
//! drivers [`minimize_mut`] (in place) and [`minimize`] (on a copy) run the
//! iterative process until a stopping condition is satisfied.
//!
//! ```rust
//! # use kotva::nalgebra as na;
//! # use kotva::{Differentiable, Function, Problem};
//! # use na::{Dyn, OVector};
//! #
//! # struct LeastSquares;
//! #
//! # impl Problem for LeastSquares {
//! #     type Field = f64;
//! # }
//! #
//! # impl Function for LeastSquares {
//! #     fn apply(&self, x: &OVector<f64, Dyn>) -> f64 {
//! #         (x[0] + x[1] - 2.0).powi(2)
//! #     }
//! # }
//! #
//! # impl Differentiable for LeastSquares {
//! #     fn gradient(&self, x: &OVector<f64, Dyn>, grad: &mut OVector<f64, Dyn>) {
//! #         let r = x[0] + x[1] - 2.0;
//! #         grad[0] = 2.0 * r;
//! #         grad[1] = 2.0 * r;
//! #     }
//! # }
//! use kotva::hooks::{HalpernIteration, StopAfterIterations, StopWhenChangeLess};
//! use kotva::{minimize_mut, State};
//!
//! let f = LeastSquares;
//! let mut state = State::builder()
//!     .with_initial(vec![10.0, -4.0])
//!     .with_step_size(0.1)
//!     // Anchor the iterates to the initial point.
//!     .with_hook(HalpernIteration::harmonic(vec![10.0, -4.0]))
//!     .with_hook(StopWhenChangeLess::new(1e-6))
//!     .with_hook(StopAfterIterations::new(100))
//!     .build()
//!     .expect("invalid configuration");
//!
//! let solution = minimize_mut(&f, &mut state).expect("optimization error");
//!
//! println!(
//!     "iter = {}\tfx = {}\tx = {:?}",
//!     solution.iter(),
//!     solution.fx(),
//!     solution.x().as_slice()
//! );
//! ```
//!
//! ## License
//!
//! Licensed under MIT.

pub mod algo;
mod core;
pub mod driver;
pub mod hooks;
pub mod projection;

pub use core::*;
pub use driver::{minimize, minimize_mut, minimize_mut_with, minimize_with, Solution};

#[cfg(feature = "testing")]
pub mod testing;

#[cfg(not(feature = "testing"))]
pub(crate) mod testing;

pub use nalgebra;
