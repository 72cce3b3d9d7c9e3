//! Merge cost evaluation
//!
//! The cost of contracting a pair is the error of the better of its two
//! endpoint positions under the sum of both quadrics. No optimal position is
//! solved for.

use crate::options::SimplifyOptions;
use crate::pairs::Endpoint;
use crate::quadric::Quadric;
use qemesh_core::Point3d;
use std::collections::BTreeMap;

/// Working state of one vertex during contraction.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexRecord {
    pub index: u32,
    pub position: Point3d,
    /// One value per semantic, in the order of the run's semantic list
    pub attributes: Vec<Vec<f32>>,
    pub quadric: Quadric,
}

/// Extra per-pair information passed to cost functions
#[derive(Debug, Clone, Copy)]
pub struct PairContext<'a> {
    pub seam: bool,
    pub semantics: &'a [String],
}

/// Outcome of evaluating a candidate merge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeResult {
    pub keep: Endpoint,
    pub cost: f64,
    pub quadric: Quadric,
}

/// Computes the merge result of a pair. Implement this to customise costs.
pub trait CostFunction: Send + Sync {
    fn evaluate(&self, a: &VertexRecord, b: &VertexRecord, context: &PairContext<'_>) -> MergeResult;
}

/// Sum the quadrics and keep whichever endpoint has the lower error.
///
/// Ties keep the first endpoint.
pub fn merge(a: &VertexRecord, b: &VertexRecord) -> MergeResult {
    let quadric = a.quadric + b.quadric;
    let error_a = quadric.error(&a.position);
    let error_b = quadric.error(&b.position);

    if error_b < error_a {
        MergeResult {
            keep: Endpoint::Second,
            cost: error_b,
            quadric,
        }
    } else {
        MergeResult {
            keep: Endpoint::First,
            cost: error_a,
            quadric,
        }
    }
}

/// Default cost function.
///
/// Carries the reserved penalty and weight options so that callers can already
/// configure them; they do not change the cost yet.
#[derive(Debug, Clone, Default)]
pub struct EndpointCost {
    pub seam_penalty: f64,
    pub inversion_penalty: f64,
    pub attribute_weights: BTreeMap<String, f64>,
}

impl EndpointCost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: &SimplifyOptions) -> Self {
        Self {
            seam_penalty: options.seam_penalty,
            inversion_penalty: options.inversion_penalty,
            attribute_weights: options.attribute_weights.clone(),
        }
    }
}

impl CostFunction for EndpointCost {
    fn evaluate(&self, a: &VertexRecord, b: &VertexRecord, _context: &PairContext<'_>) -> MergeResult {
        merge(a, b)
    }
}
