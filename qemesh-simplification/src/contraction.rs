//! The greedy contraction loop
//!
//! Repeatedly contracts the cheapest pair until the number of vertices that
//! have not been absorbed reaches the target. The lower index of a pair always
//! survives and takes the attributes of the cheaper endpoint; the higher index
//! is absorbed and stays in the buffers untouched.

use crate::cost::{CostFunction, PairContext, VertexRecord};
use crate::pairs::{Endpoint, PairIndex};
use crate::scheduler::CollapseScheduler;
use tracing::debug;

/// A face of the working mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub indices: [u32; 3],
    /// Set once the face collapses to zero area
    pub deleted: bool,
}

impl Triangle {
    /// Faces that are already degenerate start out deleted
    pub fn new(indices: [u32; 3]) -> Self {
        let mut tri = Self {
            indices,
            deleted: false,
        };
        tri.deleted = tri.is_degenerate();
        tri
    }

    /// Two or more corners share a vertex
    pub fn is_degenerate(&self) -> bool {
        let [a, b, c] = self.indices;
        a == b || b == c || a == c
    }

    /// Replace `from` with `to`, flagging the face if it degenerates.
    /// Returns true when this call deleted it.
    fn replace(&mut self, from: u32, to: u32) -> bool {
        for index in &mut self.indices {
            if *index == from {
                *index = to;
            }
        }
        if !self.deleted && self.is_degenerate() {
            self.deleted = true;
            return true;
        }
        false
    }
}

/// Counters from one run of the loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContractionStats {
    /// Pairs contracted
    pub collapses: usize,
    /// Popped pairs that were already resolved
    pub stale_pops: usize,
    /// Faces flagged degenerate by contraction
    pub faces_deleted: usize,
    /// The queue ran dry before reaching the target
    pub exhausted: bool,
}

/// Mutable mesh state for the contraction loop
pub struct ContractionState<'c> {
    vertices: Vec<VertexRecord>,
    triangles: Vec<Triangle>,
    vertex_faces: Vec<Vec<usize>>,
    pairs: PairIndex,
    scheduler: CollapseScheduler,
    modified: Vec<bool>,
    semantics: Vec<String>,
    cost: &'c dyn CostFunction,
    deleted_count: usize,
}

impl<'c> ContractionState<'c> {
    /// Evaluate every pair and queue it.
    ///
    /// Vertices must already carry their accumulated quadrics.
    pub fn new(
        vertices: Vec<VertexRecord>,
        triangles: Vec<Triangle>,
        pairs: PairIndex,
        semantics: Vec<String>,
        cost: &'c dyn CostFunction,
    ) -> Self {
        let mut vertex_faces = vec![Vec::new(); vertices.len()];
        for (fi, tri) in triangles.iter().enumerate() {
            if tri.deleted {
                continue;
            }
            for &v in &tri.indices {
                let faces: &mut Vec<usize> = &mut vertex_faces[v as usize];
                if faces.last() != Some(&fi) {
                    faces.push(fi);
                }
            }
        }

        let modified = vec![false; vertices.len()];
        let mut state = Self {
            vertices,
            triangles,
            vertex_faces,
            pairs,
            scheduler: CollapseScheduler::new(),
            modified,
            semantics,
            cost,
            deleted_count: 0,
        };

        for id in 0..state.pairs.len() {
            if state.pairs.get(id).is_live() {
                state.evaluate(id);
            }
        }
        state.scheduler = CollapseScheduler::from_pairs(&state.pairs);
        state
    }

    /// Contract pairs until at most `target_count` vertices remain unabsorbed
    pub fn run(&mut self, target_count: usize) -> ContractionStats {
        let vertex_count = self.vertices.len();
        let mut stats = ContractionStats::default();

        while vertex_count - self.deleted_count > target_count {
            let Some((id, _)) = self.scheduler.pop_min() else {
                stats.exhausted = true;
                debug!(
                    remaining = vertex_count - self.deleted_count,
                    target = target_count,
                    "No candidate pairs left"
                );
                break;
            };

            if !self.pairs.get(id).is_live() {
                stats.stale_pops += 1;
                continue;
            }

            stats.faces_deleted += self.contract(id);
            stats.collapses += 1;
            self.deleted_count += 1;
        }

        stats
    }

    /// Merge the pair's higher vertex into its lower one. Returns faces deleted.
    fn contract(&mut self, id: usize) -> usize {
        let pair = self.pairs.get(id).clone();
        let (survivor, absorbed) = (pair.a, pair.b);
        let (s, t) = (survivor as usize, absorbed as usize);

        let quadric = self.vertices[s].quadric + self.vertices[t].quadric;
        if pair.keep == Endpoint::Second {
            let (position, attributes) = {
                let source = &self.vertices[t];
                (source.position, source.attributes.clone())
            };
            self.vertices[s].position = position;
            self.vertices[s].attributes = attributes;
        }
        self.vertices[s].quadric = quadric;
        self.modified[s] = true;

        let mut faces_deleted = 0;
        let faces = std::mem::take(&mut self.vertex_faces[t]);
        for fi in faces {
            let tri = &mut self.triangles[fi];
            if tri.deleted {
                continue;
            }
            if tri.replace(absorbed, survivor) {
                faces_deleted += 1;
            } else {
                self.vertex_faces[s].push(fi);
            }
        }
        let triangles = &self.triangles;
        self.vertex_faces[s].retain(|&fi| !triangles[fi].deleted);

        for retired in self.pairs.redirect(absorbed, survivor) {
            self.scheduler.remove(retired);
        }
        for pid in self.pairs.live_incident(survivor) {
            self.evaluate(pid);
            self.scheduler.update(pid, self.pairs.get(pid).cost);
        }

        faces_deleted
    }

    fn evaluate(&mut self, id: usize) {
        let pair = self.pairs.get(id);
        let context = PairContext {
            seam: pair.seam,
            semantics: &self.semantics,
        };
        let result = self.cost.evaluate(
            &self.vertices[pair.a as usize],
            &self.vertices[pair.b as usize],
            &context,
        );
        let pair = self.pairs.get_mut(id);
        pair.keep = result.keep;
        pair.cost = result.cost;
    }

    /// Vertices not yet absorbed
    pub fn remaining_vertices(&self) -> usize {
        self.vertices.len() - self.deleted_count
    }

    pub fn deleted_count(&self) -> usize {
        self.deleted_count
    }

    pub fn vertices(&self) -> &[VertexRecord] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn pairs(&self) -> &PairIndex {
        &self.pairs
    }

    /// Vertices whose attributes were overwritten by a merge
    pub fn modified_vertices(&self) -> impl Iterator<Item = &VertexRecord> {
        self.vertices
            .iter()
            .zip(&self.modified)
            .filter(|(_, m)| **m)
            .map(|(v, _)| v)
    }
}
