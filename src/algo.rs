//! The collection of implemented step rules.

pub mod gradient_descent;
pub mod projected_gradient_descent;

pub use gradient_descent::GradientDescent;
pub use projected_gradient_descent::ProjectedGradientDescent;
