//! The collection of implemented hooks.
//!
//! * [`StopWhen`] -- stopping condition given by a closure.
//! * [`StopAfterIterations`], [`StopWhenChangeLess`],
//!   [`StopWhenGradientNormLess`] -- common stopping conditions.
//! * [`HalpernIteration`] -- anchoring of the iterates by Halpern iteration.
//!
//! See [`Hook`](crate::core::Hook) for how hooks are composed and how to
//! implement custom ones.

pub mod halpern;
pub mod stop;

pub use halpern::{harmonic, HalpernIteration};
pub use stop::{StopAfterIterations, StopWhen, StopWhenChangeLess, StopWhenGradientNormLess};
