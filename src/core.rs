//! Core abstractions and types for kotva.
//!
//! *Users* are mainly interested in implementing the [`Function`] and
//! [`Differentiable`] traits (or using [`objective`] for closures), building a
//! [`State`] and choosing [hooks](crate::hooks).
//!
//! Algorithm *developers* are interested in implementing the [`StepRule`]
//! trait, while hook authors implement [`Hook`] together with one or both of
//! the capability traits [`StoppingCondition`] and [`AfterIteration`].

mod base;
mod context;
mod error;
mod function;
mod hook;
mod state;
mod step_rule;

pub use base::*;
pub use context::*;
pub use error::*;
pub use function::*;
pub use hook::*;
pub use state::*;
pub use step_rule::*;
