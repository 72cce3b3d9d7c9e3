//! Per-primitive and per-document simplification drivers

use crate::contraction::{ContractionState, Triangle};
use crate::cost::{CostFunction, EndpointCost, VertexRecord};
use crate::options::{SimplifyOptions, PROXIMITY_WARN_VERTICES};
use crate::pairs::PairIndex;
use crate::quadric::accumulate_quadrics;
use crate::rebuild::write_back;
use crate::report::{Outcome, SimplifyReport, SimplifyStats, SimplifyWarning, SkipReason};
use qemesh_core::{semantic, weld_primitive, Document, DrawMode, MeshPrimitive, Point3d, Result};
use rayon::prelude::*;
use tracing::{debug, info, warn};

fn push_warning(warnings: &mut Vec<SimplifyWarning>, warning: SimplifyWarning) {
    warn!("{}", warning);
    warnings.push(warning);
}

fn skipped(reason: SkipReason, warnings: Vec<SimplifyWarning>) -> SimplifyReport {
    SimplifyReport {
        outcome: Outcome::Skipped(reason),
        warnings,
    }
}

/// Simplify one primitive in place with the default cost function.
///
/// Primitives with morph targets, a draw mode other than triangle lists or no
/// `POSITION` are left unmodified and reported as skipped. Any `TANGENT`
/// attribute is removed. Invalid options and an invalid index buffer are the
/// only errors, and both are detected before the primitive is touched.
///
/// # Example
///
/// ```
/// use qemesh_core::Primitive;
/// use qemesh_simplification::{simplify_primitive, SimplifyOptions};
///
/// let mut quad = Primitive::triangles(
///     vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
///     vec![0, 1, 2, 0, 2, 3],
/// );
/// let report = simplify_primitive(&mut quad, &SimplifyOptions::default().with_target(0.75)).unwrap();
/// assert_eq!(report.stats().unwrap().collapses, 1);
/// ```
pub fn simplify_primitive<P: MeshPrimitive + ?Sized>(
    primitive: &mut P,
    options: &SimplifyOptions,
) -> Result<SimplifyReport> {
    let cost = EndpointCost::from_options(options);
    simplify_with(primitive, options, &cost)
}

/// Simplify one primitive in place using a custom cost function.
pub fn simplify_with<P: MeshPrimitive + ?Sized>(
    primitive: &mut P,
    options: &SimplifyOptions,
    cost: &dyn CostFunction,
) -> Result<SimplifyReport> {
    options.validate()?;
    let mut warnings = Vec::new();

    if primitive.morph_target_count() > 0 {
        push_warning(&mut warnings, SimplifyWarning::MorphTargetsUnsupported);
        return Ok(skipped(SkipReason::MorphTargets, warnings));
    }

    let mode = primitive.mode();
    if mode != DrawMode::Triangles {
        push_warning(&mut warnings, SimplifyWarning::DrawModeUnsupported(mode));
        return Ok(skipped(SkipReason::UnsupportedMode(mode), warnings));
    }

    if !primitive.has_attribute(semantic::POSITION) {
        push_warning(&mut warnings, SimplifyWarning::MissingPosition);
        return Ok(skipped(SkipReason::MissingPosition, warnings));
    }

    // validate before the first mutation
    let faces = primitive.triangle_faces()?;

    if primitive.remove_attribute(semantic::TANGENT) {
        push_warning(&mut warnings, SimplifyWarning::TangentsDiscarded);
    }

    let semantics = primitive.semantics();
    let vertex_count = primitive.vertex_count();
    let target_count = options.target_count(vertex_count);

    info!(
        vertices = vertex_count,
        triangles = faces.len(),
        target = target_count,
        "Starting simplification"
    );

    let positions: Vec<Point3d> = (0..vertex_count)
        .map(|i| primitive.position(i).unwrap_or_else(Point3d::origin))
        .collect();
    let quadrics = accumulate_quadrics(&positions, &faces);

    let mut pairs = PairIndex::from_triangles(vertex_count, &faces);
    if options.distance_threshold > 0.0 {
        if vertex_count > PROXIMITY_WARN_VERTICES {
            push_warning(
                &mut warnings,
                SimplifyWarning::QuadraticProximityScan {
                    vertices: vertex_count,
                },
            );
        }
        pairs.add_proximity_pairs(&positions, options.distance_threshold);
    }

    let vertices: Vec<VertexRecord> = positions
        .into_iter()
        .zip(quadrics)
        .enumerate()
        .map(|(i, (position, quadric))| VertexRecord {
            index: i as u32,
            position,
            attributes: semantics
                .iter()
                .map(|s| primitive.attribute_value(s, i).map(<[f32]>::to_vec).unwrap_or_default())
                .collect(),
            quadric,
        })
        .collect();
    let triangles: Vec<Triangle> = faces.iter().copied().map(Triangle::new).collect();

    let mut state = ContractionState::new(vertices, triangles, pairs, semantics.clone(), cost);
    let contraction = state.run(target_count);
    debug!(
        collapses = contraction.collapses,
        stale = contraction.stale_pops,
        faces_deleted = contraction.faces_deleted,
        exhausted = contraction.exhausted,
        "Contraction finished"
    );

    let final_triangles = write_back(primitive, &state, &semantics);

    let stats = SimplifyStats {
        original_vertices: vertex_count,
        target_vertices: target_count,
        collapses: contraction.collapses,
        stale_pops: contraction.stale_pops,
        original_triangles: faces.len(),
        final_triangles,
    };

    info!(
        vertices_removed = stats.vertices_removed(),
        triangles_removed = stats.triangles_removed(),
        "Simplification complete"
    );

    Ok(SimplifyReport {
        outcome: Outcome::Simplified(stats),
        warnings,
    })
}

/// Simplify every primitive of a document.
///
/// Each primitive is first welded with zero tolerance when `options.weld` is
/// set. Index buffers are checked up front, so an invalid primitive fails the
/// call before any primitive is modified. Primitives share no state and are
/// processed in parallel; reports come back in document order.
pub fn simplify_document(document: &mut Document, options: &SimplifyOptions) -> Result<Vec<SimplifyReport>> {
    options.validate()?;
    let cost = EndpointCost::from_options(options);

    info!(
        primitives = document.primitive_count(),
        target = options.target,
        "Simplifying document"
    );

    for primitive in document.primitives() {
        if will_simplify(primitive) {
            primitive.triangle_faces()?;
        }
    }

    document
        .primitives_mut()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|primitive| {
            if options.weld {
                weld_primitive(primitive, 0.0)?;
            }
            simplify_with(primitive, options, &cost)
        })
        .collect()
}

/// Whether the pre-loop filters let a primitive through to the index checks
fn will_simplify<P: MeshPrimitive + ?Sized>(primitive: &P) -> bool {
    primitive.morph_target_count() == 0
        && primitive.mode() == DrawMode::Triangles
        && primitive.has_attribute(semantic::POSITION)
}
