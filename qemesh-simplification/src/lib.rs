//! Mesh simplification by quadric error metrics
//!
//! This crate reduces the vertex count of triangle-list primitives by greedy
//! pair contraction:
//! - Quadric accumulation per vertex from incident face planes
//! - Candidate pairs from mesh edges and, optionally, spatial proximity
//! - A min-cost priority queue driving the contraction loop
//! - Compaction of the index buffer after degenerate faces are removed
//!
//! Run a weld pass first (see [`qemesh_core::weld_primitive`]) so that
//! coincident vertices share an index; [`simplify_document`] does this for you.

pub mod quadric;
pub mod pairs;
pub mod cost;
pub mod scheduler;
pub mod contraction;
pub mod rebuild;
pub mod options;
pub mod report;
pub mod simplify;
pub mod quadric_error;

pub use quadric::{accumulate_quadrics, face_plane, Quadric};
pub use pairs::{Endpoint, Pair, PairIndex, PairOrigin};
pub use cost::{merge, CostFunction, EndpointCost, MergeResult, PairContext, VertexRecord};
pub use scheduler::CollapseScheduler;
pub use contraction::{ContractionState, ContractionStats, Triangle};
pub use rebuild::{compact_indices, write_back};
pub use options::{SimplifyOptions, PROXIMITY_WARN_VERTICES};
pub use report::{Outcome, SimplifyReport, SimplifyStats, SimplifyWarning, SkipReason};
pub use simplify::{simplify_document, simplify_primitive, simplify_with};
pub use quadric_error::*;

use qemesh_core::{MeshPrimitive, Result};

/// Simplify a mesh primitive in place
pub trait MeshSimplifier {
    /// Simplify `primitive` according to the simplifier's configuration
    fn simplify<P: MeshPrimitive + ?Sized>(&self, primitive: &mut P) -> Result<SimplifyReport>;
}
