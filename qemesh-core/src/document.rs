//! Mesh and document containers

use crate::primitive::Primitive;
use serde::{Deserialize, Serialize};

/// A named collection of primitives
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub name: Option<String>,
    pub primitives: Vec<Primitive>,
}

impl Mesh {
    /// Create a mesh from primitives
    pub fn new(name: Option<String>, primitives: Vec<Primitive>) -> Self {
        Self { name, primitives }
    }
}

/// The unit of work for the outer simplification driver: every mesh of an asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub meshes: Vec<Mesh>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mesh, returning its index
    pub fn add_mesh(&mut self, mesh: Mesh) -> usize {
        let index = self.meshes.len();
        self.meshes.push(mesh);
        index
    }

    /// Total number of primitives across all meshes
    pub fn primitive_count(&self) -> usize {
        self.meshes.iter().map(|m| m.primitives.len()).sum()
    }

    /// Iterate all primitives in document order
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.meshes.iter().flat_map(|m| m.primitives.iter())
    }

    /// Iterate all primitives mutably in document order
    pub fn primitives_mut(&mut self) -> impl Iterator<Item = &mut Primitive> {
        self.meshes.iter_mut().flat_map(|m| m.primitives.iter_mut())
    }
}
