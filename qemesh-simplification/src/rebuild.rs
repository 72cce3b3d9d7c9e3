//! Writing contraction results back to the primitive
//!
//! Degenerate faces are dropped from the index buffer. Vertices that are no
//! longer referenced stay in the attribute buffers; pruning them is left to a
//! later compaction pass.

use crate::contraction::{ContractionState, Triangle};
use qemesh_core::MeshPrimitive;

/// Flatten the surviving triangles into an index buffer, preserving face order
pub fn compact_indices(triangles: &[Triangle]) -> Vec<u32> {
    let deleted = triangles.iter().filter(|t| t.deleted).count();
    let mut indices = Vec::with_capacity((triangles.len() - deleted) * 3);
    for tri in triangles.iter().filter(|t| !t.deleted) {
        indices.extend_from_slice(&tri.indices);
    }
    indices
}

/// Write merged attribute values and the compacted index buffer onto `primitive`.
///
/// Returns the number of triangles written.
pub fn write_back<P: MeshPrimitive + ?Sized>(
    primitive: &mut P,
    state: &ContractionState<'_>,
    semantics: &[String],
) -> usize {
    for vertex in state.modified_vertices() {
        for (semantic, value) in semantics.iter().zip(&vertex.attributes) {
            if !value.is_empty() {
                primitive.set_attribute_value(semantic, vertex.index as usize, value);
            }
        }
    }

    let indices = compact_indices(state.triangles());
    let written = indices.len() / 3;
    primitive.set_indices(indices);
    written
}
