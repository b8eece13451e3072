use nalgebra::RealField;

/// The base trait for [`Function`](super::Function) and
/// [`Differentiable`](super::Differentiable).
pub trait Problem {
    /// Field type of the problem, usually f64 or f32.
    type Field: RealField + Copy;
}
