use std::collections::HashMap;

use nalgebra::{Dyn, OVector, RealField};

/// Named auxiliary values passed to every stopping condition.
///
/// The context is supplied by the caller when the run starts (see
/// [`minimize_mut_with`](crate::driver::minimize_mut_with)) and stays the same
/// for the whole run. A typical use is a known target point `z` for checking
/// the distance of the iterate from it.
///
/// ```rust
/// use kotva::Context;
///
/// let ctx = Context::new()
///     .with_point("z", vec![0.5, 0.5])
///     .with_scalar("tol", 1e-6);
///
/// assert_eq!(ctx.point("z").map(|z| z.len()), Some(2));
/// assert_eq!(ctx.scalar("tol"), Some(1e-6));
/// assert!(ctx.point("tol").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Context<T: RealField + Copy> {
    points: HashMap<String, OVector<T, Dyn>>,
    scalars: HashMap<String, T>,
}

impl<T: RealField + Copy> Context<T> {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self {
            points: HashMap::new(),
            scalars: HashMap::new(),
        }
    }

    /// Adds a named point.
    pub fn with_point(mut self, name: impl Into<String>, point: Vec<T>) -> Self {
        self.insert_point(name, point);
        self
    }

    /// Adds a named scalar.
    pub fn with_scalar(mut self, name: impl Into<String>, value: T) -> Self {
        self.insert_scalar(name, value);
        self
    }

    /// Inserts a named point, replacing the previous one of the same name.
    pub fn insert_point(&mut self, name: impl Into<String>, point: Vec<T>) {
        self.points
            .insert(name.into(), OVector::<T, Dyn>::from_vec(point));
    }

    /// Inserts a named scalar, replacing the previous one of the same name.
    pub fn insert_scalar(&mut self, name: impl Into<String>, value: T) {
        self.scalars.insert(name.into(), value);
    }

    /// Gets a point by name.
    pub fn point(&self, name: &str) -> Option<&OVector<T, Dyn>> {
        self.points.get(name)
    }

    /// Gets a scalar by name.
    pub fn scalar(&self, name: &str) -> Option<T> {
        self.scalars.get(name).copied()
    }

    /// Determines whether the context holds no values.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.scalars.is_empty()
    }
}

impl<T: RealField + Copy> Default for Context<T> {
    fn default() -> Self {
        Self::new()
    }
}
