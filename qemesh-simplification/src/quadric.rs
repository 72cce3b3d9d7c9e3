//! Quadric error metrics
//!
//! Each face contributes the outer product of its plane equation to the
//! quadric of its three vertices. Evaluating `p · (Q · p)` for a homogeneous
//! point then gives the sum of squared distances to those planes.

use nalgebra::{Matrix4, Vector4};
use qemesh_core::Point3d;
use std::ops::{Add, AddAssign};

/// Symmetric 4x4 error quadric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadric(Matrix4<f64>);

impl Default for Quadric {
    fn default() -> Self {
        Self(Matrix4::zeros())
    }
}

impl Quadric {
    /// The zero quadric
    pub fn zero() -> Self {
        Self::default()
    }

    /// Rank-1 quadric `plane * planeᵀ`
    pub fn from_plane(plane: &Vector4<f64>) -> Self {
        Self(plane * plane.transpose())
    }

    /// The underlying matrix
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.0
    }

    /// Error of a position under this quadric: `p · (Q · p)` with `p = (x, y, z, 1)`
    pub fn error(&self, position: &Point3d) -> f64 {
        let p = position.to_homogeneous();
        p.dot(&(self.0 * p))
    }

    /// Whether `Q[i][j] == Q[j][i]` for every element
    pub fn is_symmetric(&self) -> bool {
        self.0 == self.0.transpose()
    }
}

impl Add for Quadric {
    type Output = Quadric;

    fn add(self, rhs: Quadric) -> Quadric {
        Quadric(self.0 + rhs.0)
    }
}

impl AddAssign for Quadric {
    fn add_assign(&mut self, rhs: Quadric) {
        self.0 += rhs.0;
    }
}

/// Plane equation `(nx, ny, nz, d)` of triangle `(a, b, c)`.
///
/// The normal is `(c - b) × (a - b)`. It is rescaled to unit length only when
/// its squared length exceeds 1; shorter normals are kept as computed, so tiny
/// faces contribute proportionally smaller quadrics. `d = -(a · n)`, which makes
/// `n · p + d` vanish for points on the plane.
pub fn face_plane(a: &Point3d, b: &Point3d, c: &Point3d) -> Vector4<f64> {
    let e1 = c - b;
    let e2 = a - b;
    let mut normal = e1.cross(&e2);
    if normal.norm_squared() > 1.0 {
        normal.normalize_mut();
    }
    let d = -a.coords.dot(&normal);
    Vector4::new(normal.x, normal.y, normal.z, d)
}

/// Accumulate one quadric per vertex from every triangle.
///
/// Triangles must reference valid indices into `positions`.
pub fn accumulate_quadrics(positions: &[Point3d], triangles: &[[u32; 3]]) -> Vec<Quadric> {
    let mut quadrics = vec![Quadric::zero(); positions.len()];

    for tri in triangles {
        let [a, b, c] = tri.map(|i| i as usize);
        let plane = face_plane(&positions[a], &positions[b], &positions[c]);
        let q = Quadric::from_plane(&plane);
        quadrics[a] += q;
        quadrics[b] += q;
        quadrics[c] += q;
    }

    quadrics
}
