use qemesh_core::{
    semantic, weld_primitive, Attribute, Document, DrawMode, Error, Mesh, MeshPrimitive, MorphTarget, Primitive,
};
use qemesh_simplification::{
    simplify_document, simplify_primitive, Outcome, PairIndex, PairOrigin, SimplifyOptions, SimplifyWarning,
    SkipReason,
};
use std::collections::HashSet;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn make_cube() -> Primitive {
    Primitive::triangles(
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
        ],
        vec![
            0, 2, 1, 0, 3, 2, // bottom
            4, 5, 6, 4, 6, 7, // top
            0, 1, 5, 0, 5, 4, // front
            2, 3, 7, 2, 7, 6, // back
            0, 4, 7, 0, 7, 3, // left
            1, 2, 6, 1, 6, 5, // right
        ],
    )
}

fn make_curved_surface(size: usize) -> Primitive {
    let mut positions = Vec::new();
    for y in 0..size {
        for x in 0..size {
            let fx = x as f32 / (size - 1) as f32 * std::f32::consts::PI;
            let fy = y as f32 / (size - 1) as f32 * std::f32::consts::PI;
            positions.push([x as f32, y as f32, (fx.sin() * fy.sin()) * 2.0]);
        }
    }
    let mut indices = Vec::new();
    for y in 0..(size - 1) {
        for x in 0..(size - 1) {
            let tl = (y * size + x) as u32;
            let tr = tl + 1;
            let bl = ((y + 1) * size + x) as u32;
            let br = bl + 1;
            indices.extend_from_slice(&[tl, bl, tr, tr, bl, br]);
        }
    }
    Primitive::triangles(positions, indices)
}

fn faces(prim: &Primitive) -> Vec<[u32; 3]> {
    prim.indices()
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect()
}

fn assert_no_degenerate(prim: &Primitive) {
    for [a, b, c] in faces(prim) {
        assert!(a != b && b != c && a != c, "degenerate face [{a}, {b}, {c}]");
    }
}

fn referenced_vertices(prim: &Primitive) -> HashSet<u32> {
    prim.indices().into_iter().collect()
}

#[test]
fn test_cube_half() {
    init_tracing();
    let mut cube = make_cube();
    let report = simplify_primitive(&mut cube, &SimplifyOptions::new().with_target(0.5)).unwrap();

    let stats = report.stats().unwrap();
    assert_eq!(stats.target_vertices, 4);
    assert_eq!(stats.collapses, 4);
    assert!(referenced_vertices(&cube).len() <= 4);
    assert!(cube.triangle_count() < 12);
    assert_no_degenerate(&cube);
    // attribute buffers are not pruned
    assert_eq!(cube.vertex_count(), 8);
}

#[test]
fn test_curved_surface_properties() {
    let mut prim = make_curved_surface(8);
    let original_vertices = prim.vertex_count();
    let original_triangles = prim.triangle_count();

    let options = SimplifyOptions::new().with_target(0.25);
    let report = simplify_primitive(&mut prim, &options).unwrap();
    let stats = report.stats().unwrap();

    assert_eq!(stats.target_vertices, options.target_count(original_vertices));
    assert!(original_vertices - stats.collapses <= stats.target_vertices);
    assert!(prim.triangle_count() <= original_triangles);
    assert!(prim.triangle_count() > 0);
    assert!(referenced_vertices(&prim).len() <= stats.target_vertices);
    assert_no_degenerate(&prim);
}

#[test]
fn test_merged_attributes_come_from_an_endpoint() {
    let mut prim = make_curved_surface(6);
    let original: Vec<Vec<f32>> = (0..prim.vertex_count())
        .map(|i| prim.attribute_value(semantic::POSITION, i).unwrap().to_vec())
        .collect();

    simplify_primitive(&mut prim, &SimplifyOptions::new().with_target(0.5)).unwrap();

    for i in referenced_vertices(&prim) {
        let value = prim.attribute_value(semantic::POSITION, i as usize).unwrap();
        assert!(original.iter().any(|o| o.as_slice() == value));
    }
}

#[test]
fn test_rerun_never_adds_triangles() {
    let mut prim = make_curved_surface(7);
    let options = SimplifyOptions::new().with_target(0.4);
    simplify_primitive(&mut prim, &options).unwrap();
    let first = prim.triangle_count();

    simplify_primitive(&mut prim, &options).unwrap();
    assert!(prim.triangle_count() <= first);

    simplify_primitive(&mut prim, &SimplifyOptions::new().with_target(0.9)).unwrap();
    assert!(prim.triangle_count() <= first);
    assert_no_degenerate(&prim);
}

#[test]
fn test_zero_threshold_uses_edge_pairs_only() {
    let prim = make_cube();
    let mut pairs = PairIndex::from_triangles(prim.vertex_count(), &faces(&prim));
    let positions: Vec<_> = (0..prim.vertex_count()).map(|i| prim.position(i).unwrap()).collect();
    assert_eq!(pairs.add_proximity_pairs(&positions, 0.0), 0);
    assert!(pairs.iter().all(|(_, p)| p.origin == PairOrigin::Edge));
    // 12 cube edges + 6 face diagonals
    assert_eq!(pairs.len(), 18);

    let mut prim = make_cube();
    let report = simplify_primitive(&mut prim, &SimplifyOptions::new().with_target(0.5)).unwrap();
    assert!(report.warnings.is_empty());
}

fn make_tetrahedra(gap: f32) -> Primitive {
    let mut positions = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    let shift = 1.0 + gap;
    positions.extend([[shift, 0.0, 0.0], [shift + 1.0, 0.0, 0.0], [shift, 1.0, 0.0], [shift, 0.0, 1.0]]);
    let tetra = [0, 2, 1, 0, 1, 3, 0, 3, 2, 1, 2, 3];
    let indices = tetra.iter().copied().chain(tetra.iter().map(|i| i + 4)).collect();
    Primitive::triangles(positions, indices)
}

#[test]
fn test_proximity_merges_disjoint_pieces() -> anyhow::Result<()> {
    // vertex 1 of the first tetrahedron nearly touches vertex 4 of the second
    let options = SimplifyOptions::new().with_target(0.9);

    let mut isolated = make_tetrahedra(0.001);
    let report = simplify_primitive(&mut isolated, &options)?;
    assert_eq!(report.stats().unwrap().collapses, 1);
    assert_eq!(isolated.triangle_count(), 6);
    assert!(referenced_vertices(&isolated).contains(&4));

    let mut joined = make_tetrahedra(0.001);
    let report = simplify_primitive(&mut joined, &options.clone().with_distance_threshold(0.01))?;
    assert_eq!(report.stats().unwrap().collapses, 1);
    // no face spans the gap, so none is lost
    assert_eq!(joined.triangle_count(), 8);
    let referenced = referenced_vertices(&joined);
    assert!(!referenced.contains(&4));
    assert_eq!(faces(&joined).iter().filter(|f| f.contains(&1)).count(), 6);

    let kept = joined.position(1).unwrap();
    assert!(kept.y.abs() < 1e-9 && kept.z.abs() < 1e-9);
    assert!(kept.x == 1.0 || kept.x == 1.001f32 as f64);
    Ok(())
}

#[test]
fn test_non_triangle_mode_untouched() {
    init_tracing();
    for mode in [DrawMode::TriangleStrip, DrawMode::TriangleFan, DrawMode::Lines, DrawMode::Points] {
        let mut prim = make_cube().with_mode(mode);
        let before = prim.indices.clone();

        let report = simplify_primitive(&mut prim, &SimplifyOptions::new().with_target(0.5)).unwrap();
        assert_eq!(report.outcome, Outcome::Skipped(SkipReason::UnsupportedMode(mode)));
        assert_eq!(report.warnings, vec![SimplifyWarning::DrawModeUnsupported(mode)]);
        assert_eq!(prim.indices, before);
    }
}

#[test]
fn test_tangents_removed_without_collapse() {
    let tangents = Attribute::from_vec4(vec![[1.0, 0.0, 0.0, 1.0]; 8]);
    let mut prim = make_cube().with_attribute(semantic::TANGENT, tangents);

    let report = simplify_primitive(&mut prim, &SimplifyOptions::new().with_target(1.0)).unwrap();
    assert_eq!(report.stats().unwrap().collapses, 0);
    assert!(report.warnings.contains(&SimplifyWarning::TangentsDiscarded));
    assert!(!prim.has_attribute(semantic::TANGENT));
    assert!(prim.attribute(semantic::TANGENT).is_none());
}

#[test]
fn test_normals_follow_surviving_endpoint() {
    let normals = Attribute::from_vec3((0..8).map(|i| [i as f32, 0.0, 1.0]).collect());
    let mut prim = make_cube().with_attribute(semantic::NORMAL, normals);
    simplify_primitive(&mut prim, &SimplifyOptions::new().with_target(0.5)).unwrap();

    let cube = make_cube();
    for v in referenced_vertices(&prim) {
        let normal = prim.attribute_value(semantic::NORMAL, v as usize).unwrap();
        let position = prim.attribute_value(semantic::POSITION, v as usize).unwrap();
        // both attributes were taken from the same original vertex
        let source = normal[0] as usize;
        assert_eq!(cube.attribute_value(semantic::POSITION, source).unwrap(), position);
    }
}

/// Quad with its diagonal duplicated, as exported by many tools
fn make_split_quad() -> Primitive {
    Primitive::triangles(
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ],
        vec![0, 1, 2, 3, 4, 5],
    )
}

#[test]
fn test_document_welds_before_simplifying() {
    let split = make_split_quad();
    let mut welded = split.clone();
    let weld = weld_primitive(&mut welded, 0.0).unwrap();
    assert_eq!(weld.vertices_after, 4);

    let mut doc = Document::new();
    doc.add_mesh(Mesh::new(Some("quad".to_string()), vec![split.clone()]));
    doc.add_mesh(Mesh::new(None, vec![make_cube()]));

    let reports = simplify_document(&mut doc, &SimplifyOptions::new().with_target(0.75)).unwrap();
    assert_eq!(reports.len(), 2);

    let quad = &doc.meshes[0].primitives[0];
    assert_eq!(quad.vertex_count(), 4);
    assert_eq!(reports[0].stats().unwrap().collapses, 1);
    assert_eq!(reports[1].stats().unwrap().collapses, 2);
    for prim in doc.primitives() {
        assert_no_degenerate(prim);
    }
}

#[test]
fn test_document_skipped_primitives_come_back_identical() {
    init_tracing();
    // vertices 0 and 3 share a position but move apart under the morph target
    let mut deltas = vec![[0.0; 3]; 6];
    deltas[3] = [5.0, 5.0, 5.0];
    let mut target = MorphTarget::default();
    target
        .attributes
        .insert(semantic::POSITION.to_string(), Attribute::from_vec3(deltas));
    let morphed = make_split_quad().with_morph_target(target);
    let strip = make_split_quad().with_mode(DrawMode::TriangleStrip);

    let mut doc = Document::new();
    doc.add_mesh(Mesh::new(None, vec![morphed.clone(), strip.clone()]));

    let reports = simplify_document(&mut doc, &SimplifyOptions::new().with_target(0.5)).unwrap();
    assert_eq!(reports[0].outcome, Outcome::Skipped(SkipReason::MorphTargets));
    assert_eq!(reports[1].outcome, Outcome::Skipped(SkipReason::UnsupportedMode(DrawMode::TriangleStrip)));
    assert_eq!(doc.meshes[0].primitives[0], morphed);
    assert_eq!(doc.meshes[0].primitives[1], strip);
}

#[test]
fn test_document_rejects_out_of_range_index() {
    let mut bad = make_split_quad();
    bad.indices = Some(vec![0, 1, 9]);
    let mut short = make_split_quad();
    short.indices = Some(vec![0, 1, 2, 3]);

    for prim in [bad, short] {
        let mut doc = Document::new();
        doc.add_mesh(Mesh::new(None, vec![make_cube(), prim]));
        let before = doc.clone();

        let result = simplify_document(&mut doc, &SimplifyOptions::new().with_target(0.5));
        assert!(matches!(result, Err(Error::InvalidData(_))));
        assert_eq!(doc, before);
    }
}
