//! Point types and related functionality

use nalgebra::{Point3, Vector3};

/// A 3D point with floating point coordinates, as stored in attribute buffers
pub type Point3f = Point3<f32>;

/// A 3D point with double precision coordinates, used for error metrics
pub type Point3d = Point3<f64>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// Widen the first three components of an attribute value to a double precision point.
///
/// Missing components read as zero.
pub fn point3d_from_slice(values: &[f32]) -> Point3d {
    let get = |i: usize| values.get(i).copied().unwrap_or(0.0) as f64;
    Point3d::new(get(0), get(1), get(2))
}
