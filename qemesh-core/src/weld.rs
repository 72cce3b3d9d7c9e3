//! Vertex welding
//!
//! Merges vertices that share a position (and every other attribute value) so
//! that edge topology is visible to the simplifier. Run before simplification.

use crate::error::Result;
use crate::primitive::{DrawMode, MeshPrimitive, Primitive};
use crate::semantic;
use std::collections::BTreeMap;
use tracing::debug;

/// Statistics from a weld pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeldReport {
    pub vertices_before: usize,
    pub vertices_after: usize,
    pub triangles_removed: usize,
}

impl WeldReport {
    /// Number of vertices merged away
    pub fn vertices_merged(&self) -> usize {
        self.vertices_before - self.vertices_after
    }
}

type WeldKey = ([i64; 3], Vec<u32>);

fn quantize(value: f32, tolerance: f32) -> i64 {
    if tolerance > 0.0 {
        (value / tolerance).round() as i64
    } else if value == 0.0 {
        // fold -0.0 onto 0.0
        0
    } else {
        value.to_bits() as i64
    }
}

fn weld_key(primitive: &Primitive, others: &[&str], index: usize, tolerance: f32) -> WeldKey {
    let position = primitive
        .attribute_value(semantic::POSITION, index)
        .unwrap_or(&[]);
    let mut cell = [0i64; 3];
    for (slot, &v) in cell.iter_mut().zip(position) {
        *slot = quantize(v, tolerance);
    }

    let rest = others
        .iter()
        .filter_map(|s| primitive.attribute_value(s, index))
        .flat_map(|row| row.iter().map(|v| v.to_bits()))
        .collect();
    (cell, rest)
}

/// Weld coincident vertices of a triangle-list primitive.
///
/// With `tolerance == 0.0` positions must match exactly; otherwise positions
/// are snapped to a grid of that cell size before comparison. Other attributes
/// must always match exactly. Triangles made degenerate by the merge are
/// removed, and attribute buffers are compacted.
///
/// Primitives that are not triangle lists, carry morph targets or have no
/// `POSITION` are left untouched. An invalid index buffer is an error and
/// nothing is modified.
pub fn weld_primitive(primitive: &mut Primitive, tolerance: f32) -> Result<WeldReport> {
    let vertex_count = primitive.vertex_count();
    let mut report = WeldReport {
        vertices_before: vertex_count,
        vertices_after: vertex_count,
        triangles_removed: 0,
    };

    if primitive.mode != DrawMode::Triangles
        || vertex_count == 0
        || !primitive.targets.is_empty()
        || !primitive.has_attribute(semantic::POSITION)
    {
        return Ok(report);
    }
    let faces = primitive.triangle_faces()?;

    let semantics = primitive.semantics();
    let others: Vec<&str> = semantics
        .iter()
        .map(String::as_str)
        .filter(|s| *s != semantic::POSITION)
        .collect();

    let mut first_seen: BTreeMap<WeldKey, u32> = BTreeMap::new();
    let mut keep: Vec<usize> = Vec::with_capacity(vertex_count);
    let mut remap = vec![0u32; vertex_count];

    for (i, slot) in remap.iter_mut().enumerate() {
        let key = weld_key(primitive, &others, i, tolerance);
        *slot = *first_seen.entry(key).or_insert_with(|| {
            keep.push(i);
            (keep.len() - 1) as u32
        });
    }

    let mut indices = Vec::with_capacity(faces.len() * 3);
    for [a, b, c] in faces {
        let (a, b, c) = (remap[a as usize], remap[b as usize], remap[c as usize]);
        if a == b || b == c || a == c {
            report.triangles_removed += 1;
            continue;
        }
        indices.extend_from_slice(&[a, b, c]);
    }

    if keep.len() < vertex_count {
        for attribute in primitive.attributes.values_mut() {
            *attribute = attribute.gather(&keep);
        }
    }
    primitive.indices = Some(indices);
    report.vertices_after = keep.len();

    debug!(
        before = report.vertices_before,
        after = report.vertices_after,
        degenerate = report.triangles_removed,
        "Welded primitive"
    );

    Ok(report)
}
