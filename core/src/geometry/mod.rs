//! Geometry

mod bounds3;
mod frame;
mod point3;
mod ray;
mod vector3;

// Re-export
pub use bounds3::*;
pub use frame::*;
pub use point3::*;
pub use ray::*;
pub use vector3::*;

/// Dot product.
pub trait Dot<V> {
    type Output;

    /// Returns the dot product.
    ///
    /// * `other` - The other value.
    fn dot(&self, other: &V) -> Self::Output;
}

/// Cross product.
pub trait Cross<V> {
    type Output;

    /// Returns the cross product.
    ///
    /// * `other` - The other value.
    fn cross(&self, other: &V) -> Self::Output;
}
