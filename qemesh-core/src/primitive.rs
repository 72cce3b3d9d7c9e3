//! Mesh primitive data structures and the contract the simplifier consumes

use crate::error::{Error, Result};
use crate::point::{point3d_from_slice, Point3d};
use crate::semantic;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Topology interpretation of a primitive's index buffer.
///
/// Discriminants match the glTF `mode` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DrawMode {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl DrawMode {
    /// Parse a glTF mode code
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(Self::Points),
            1 => Ok(Self::Lines),
            2 => Ok(Self::LineLoop),
            3 => Ok(Self::LineStrip),
            4 => Ok(Self::Triangles),
            5 => Ok(Self::TriangleStrip),
            6 => Ok(Self::TriangleFan),
            other => Err(Error::InvalidData(format!("Unknown draw mode code {other}"))),
        }
    }

    /// The glTF mode code
    pub const fn code(self) -> u32 {
        match self {
            Self::Points => 0,
            Self::Lines => 1,
            Self::LineLoop => 2,
            Self::LineStrip => 3,
            Self::Triangles => 4,
            Self::TriangleStrip => 5,
            Self::TriangleFan => 6,
        }
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Points => "POINTS",
            Self::Lines => "LINES",
            Self::LineLoop => "LINE_LOOP",
            Self::LineStrip => "LINE_STRIP",
            Self::Triangles => "TRIANGLES",
            Self::TriangleStrip => "TRIANGLE_STRIP",
            Self::TriangleFan => "TRIANGLE_FAN",
        };
        f.write_str(name)
    }
}

/// Tightly packed per-vertex attribute storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    components: usize,
    data: Vec<f32>,
}

impl Attribute {
    /// Create an attribute from flat data with `components` values per vertex
    pub fn new(components: usize, data: Vec<f32>) -> Result<Self> {
        if components == 0 {
            return Err(Error::InvalidData(
                "Attribute must have at least one component".to_string(),
            ));
        }
        if data.len() % components != 0 {
            return Err(Error::AttributeLength {
                len: data.len(),
                components,
            });
        }
        Ok(Self { components, data })
    }

    /// Create a three-component attribute (positions, normals)
    pub fn from_vec3(values: Vec<[f32; 3]>) -> Self {
        Self {
            components: 3,
            data: values.into_iter().flatten().collect(),
        }
    }

    /// Create a two-component attribute (texture coordinates)
    pub fn from_vec2(values: Vec<[f32; 2]>) -> Self {
        Self {
            components: 2,
            data: values.into_iter().flatten().collect(),
        }
    }

    /// Create a four-component attribute (tangents, colors)
    pub fn from_vec4(values: Vec<[f32; 4]>) -> Self {
        Self {
            components: 4,
            data: values.into_iter().flatten().collect(),
        }
    }

    /// Number of components per vertex
    pub fn components(&self) -> usize {
        self.components
    }

    /// Number of vertices stored
    pub fn count(&self) -> usize {
        self.data.len() / self.components
    }

    /// Get the value for one vertex
    pub fn get(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.components)?;
        self.data.get(start..start + self.components)
    }

    /// Overwrite the value for one vertex.
    ///
    /// Copies at most `components` values; returns false when `index` is out of range.
    pub fn set(&mut self, index: usize, value: &[f32]) -> bool {
        let components = self.components;
        let start = index * components;
        match self.data.get_mut(start..start + components) {
            Some(slot) => {
                let n = value.len().min(components);
                slot[..n].copy_from_slice(&value[..n]);
                true
            }
            None => false,
        }
    }

    /// Build a new attribute holding the rows at `indices`, in that order
    pub fn gather(&self, indices: &[usize]) -> Self {
        let mut data = Vec::with_capacity(indices.len() * self.components);
        for &i in indices {
            if let Some(row) = self.get(i) {
                data.extend_from_slice(row);
            }
        }
        Self {
            components: self.components,
            data,
        }
    }

    /// Flat view of the stored values
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// A morph target: per-vertex attribute displacements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MorphTarget {
    pub attributes: BTreeMap<String, Attribute>,
}

/// The host-side view of a primitive that simplification reads and writes through.
///
/// Implementors own the attribute and index buffers; the simplifier is the sole
/// writer while it runs.
pub trait MeshPrimitive {
    /// Semantic names of all vertex attributes present
    fn semantics(&self) -> Vec<String>;

    /// Number of vertices in the attribute buffers
    fn vertex_count(&self) -> usize;

    /// Read one attribute value
    fn attribute_value(&self, semantic: &str, index: usize) -> Option<&[f32]>;

    /// Overwrite one attribute value
    fn set_attribute_value(&mut self, semantic: &str, index: usize, value: &[f32]);

    /// Remove an attribute entirely; returns whether it existed
    fn remove_attribute(&mut self, semantic: &str) -> bool;

    /// The index buffer, or the implicit sequential one for non-indexed primitives
    fn indices(&self) -> Vec<u32>;

    /// Replace the index buffer
    fn set_indices(&mut self, indices: Vec<u32>);

    /// Current draw mode
    fn mode(&self) -> DrawMode;

    /// Number of morph targets attached
    fn morph_target_count(&self) -> usize;

    /// Whether an attribute is present
    fn has_attribute(&self, semantic: &str) -> bool {
        self.semantics().iter().any(|s| s == semantic)
    }

    /// Vertex position widened to double precision
    fn position(&self, index: usize) -> Option<Point3d> {
        self.attribute_value(semantic::POSITION, index)
            .map(point3d_from_slice)
    }

    /// The index buffer read as a triangle list.
    ///
    /// Fails when the index count is not a multiple of 3 or an index is out of
    /// range for the attribute buffers.
    fn triangle_faces(&self) -> Result<Vec<[u32; 3]>> {
        let indices = self.indices();
        let vertex_count = self.vertex_count();
        if indices.len() % 3 != 0 {
            return Err(Error::InvalidData(format!(
                "Triangle list index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(Error::InvalidData(format!(
                "Index {bad} out of range for {vertex_count} vertices"
            )));
        }
        Ok(indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect())
    }
}

/// A drawable unit of a mesh: attribute buffers, an optional index buffer and a draw mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub attributes: BTreeMap<String, Attribute>,
    pub indices: Option<Vec<u32>>,
    pub mode: DrawMode,
    pub targets: Vec<MorphTarget>,
}

impl Primitive {
    /// Create a new empty primitive with the given draw mode
    pub fn new(mode: DrawMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Create an indexed triangle-list primitive from positions and indices
    pub fn triangles(positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        let mut primitive = Self::new(DrawMode::Triangles);
        primitive
            .attributes
            .insert(semantic::POSITION.to_string(), Attribute::from_vec3(positions));
        primitive.indices = Some(indices);
        primitive
    }

    /// Add or replace an attribute
    pub fn with_attribute(mut self, semantic: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(semantic.into(), attribute);
        self
    }

    /// Set the draw mode
    pub fn with_mode(mut self, mode: DrawMode) -> Self {
        self.mode = mode;
        self
    }

    /// Attach a morph target
    pub fn with_morph_target(mut self, target: MorphTarget) -> Self {
        self.targets.push(target);
        self
    }

    /// Get an attribute by semantic
    pub fn attribute(&self, semantic: &str) -> Option<&Attribute> {
        self.attributes.get(semantic)
    }

    /// Number of triangles described by the index buffer (triangle lists only)
    pub fn triangle_count(&self) -> usize {
        match self.mode {
            DrawMode::Triangles => self.indices().len() / 3,
            _ => 0,
        }
    }
}

impl MeshPrimitive for Primitive {
    fn semantics(&self) -> Vec<String> {
        self.attributes.keys().cloned().collect()
    }

    fn vertex_count(&self) -> usize {
        self.attributes
            .get(semantic::POSITION)
            .or_else(|| self.attributes.values().next())
            .map_or(0, Attribute::count)
    }

    fn attribute_value(&self, semantic: &str, index: usize) -> Option<&[f32]> {
        self.attributes.get(semantic)?.get(index)
    }

    fn set_attribute_value(&mut self, semantic: &str, index: usize, value: &[f32]) {
        if let Some(attribute) = self.attributes.get_mut(semantic) {
            attribute.set(index, value);
        }
    }

    fn remove_attribute(&mut self, semantic: &str) -> bool {
        self.attributes.remove(semantic).is_some()
    }

    fn indices(&self) -> Vec<u32> {
        match &self.indices {
            Some(indices) => indices.clone(),
            None => (0..self.vertex_count() as u32).collect(),
        }
    }

    fn set_indices(&mut self, indices: Vec<u32>) {
        self.indices = Some(indices);
    }

    fn mode(&self) -> DrawMode {
        self.mode
    }

    fn morph_target_count(&self) -> usize {
        self.targets.len()
    }

    fn has_attribute(&self, semantic: &str) -> bool {
        self.attributes.contains_key(semantic)
    }
}
