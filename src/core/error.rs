use thiserror::Error;

/// Invalid configuration of an optimization run.
///
/// These errors are reported before the first iteration (or, for dimension
/// mismatches produced by user-supplied operators, as soon as they are
/// detected) and are never recoverable by continuing the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required option was not provided to the builder.
    #[error("missing required option `{0}`")]
    MissingOption(&'static str),
    /// Step size is not a positive finite number.
    #[error("step size must be positive and finite")]
    InvalidStepSize,
    /// The initial point has no coordinates.
    #[error("initial point is empty")]
    EmptyIterate,
    /// The initial point contains an invalid value (NaN, positive or negative
    /// infinity).
    #[error("initial point contains invalid values")]
    InvalidInitial,
    /// None of the hooks is able to stop the run, which would never terminate.
    #[error("no hook supports stopping condition, the run would never terminate")]
    NoStoppingCondition,
    /// A vector does not match the dimension of the iterate.
    #[error("dimension of {what} ({found}) does not match the iterate dimension ({expected})")]
    DimensionMismatch {
        /// What carried the wrong dimension.
        what: &'static str,
        /// Dimension of the iterate.
        expected: usize,
        /// Dimension that was encountered.
        found: usize,
    },
}

/// Error encountered during an optimization run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The run is not configured properly.
    #[error("{0}")]
    Config(#[from] ConfigError),
    /// The gradient contains an invalid value (NaN, positive or negative
    /// infinity).
    #[error("invalid gradient value encountered in iteration {iter}")]
    InvalidGradient {
        /// Iteration in which the error occurred.
        iter: usize,
    },
    /// The objective function value is invalid (NaN, positive or negative
    /// infinity).
    #[error("invalid function value encountered in iteration {iter}")]
    InvalidValue {
        /// Iteration in which the error occurred.
        iter: usize,
    },
    /// The step rule produced an iterate with invalid coordinates, for
    /// example through a projection.
    #[error("invalid iterate produced by the step rule in iteration {iter}")]
    InvalidStep {
        /// Iteration in which the error occurred.
        iter: usize,
    },
    /// A post-iteration hook produced an iterate with invalid coordinates.
    #[error("invalid iterate produced by hook `{hook}` in iteration {iter}")]
    InvalidIterate {
        /// Name of the hook that produced the iterate.
        hook: String,
        /// Iteration in which the error occurred.
        iter: usize,
    },
}
