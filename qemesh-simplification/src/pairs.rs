//! Candidate vertex pairs
//!
//! A pair is stored once, under its lower vertex index. Pairs come from mesh
//! edges and, when a distance threshold is configured, from spatial proximity.
//! They are never removed: contraction rewrites them in place and tombstones
//! the ones it resolves.

use qemesh_core::Point3d;
use std::collections::HashMap;
use tracing::debug;

/// Which endpoint of a pair survives a merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endpoint {
    #[default]
    First,
    Second,
}

/// Where a pair came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOrigin {
    /// A mesh edge
    Edge,
    /// Two vertices closer than the distance threshold without a shared edge
    Proximity,
}

/// A candidate contraction between vertices `a < b`
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub a: u32,
    pub b: u32,
    /// Endpoint whose attributes survive, from the last cost evaluation
    pub keep: Endpoint,
    pub cost: f64,
    /// Edge bounds exactly one face. Informational only.
    pub seam: bool,
    pub origin: PairOrigin,
    /// False once the pair has been resolved or merged into a duplicate
    pub active: bool,
}

impl Pair {
    fn new(a: u32, b: u32, origin: PairOrigin) -> Self {
        let (a, b) = canonical(a, b);
        Self {
            a,
            b,
            keep: Endpoint::First,
            cost: 0.0,
            seam: false,
            origin,
            active: true,
        }
    }

    /// Whether both endpoints have become the same vertex
    pub fn is_self_pair(&self) -> bool {
        self.a == self.b
    }

    /// Whether the pair can still be contracted
    pub fn is_live(&self) -> bool {
        self.active && !self.is_self_pair()
    }

    /// The endpoint opposite `v`
    pub fn other(&self, v: u32) -> u32 {
        if self.a == v {
            self.b
        } else {
            self.a
        }
    }
}

const fn canonical(a: u32, b: u32) -> (u32, u32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// All candidate pairs with per-vertex incidence.
#[derive(Debug, Clone, Default)]
pub struct PairIndex {
    pairs: Vec<Pair>,
    lookup: HashMap<(u32, u32), usize>,
    incident: Vec<Vec<usize>>,
}

impl PairIndex {
    /// Create an empty index for `vertex_count` vertices
    pub fn new(vertex_count: usize) -> Self {
        Self {
            pairs: Vec::new(),
            lookup: HashMap::new(),
            incident: vec![Vec::new(); vertex_count],
        }
    }

    /// One pair per distinct mesh edge. Edges used by exactly one face are flagged as seams.
    pub fn from_triangles(vertex_count: usize, triangles: &[[u32; 3]]) -> Self {
        let mut index = Self::new(vertex_count);
        let mut face_count: HashMap<(u32, u32), usize> = HashMap::new();

        for tri in triangles {
            for i in 0..3 {
                let (a, b) = canonical(tri[i], tri[(i + 1) % 3]);
                if a == b {
                    continue;
                }
                *face_count.entry((a, b)).or_insert(0) += 1;
                index.insert(a, b, PairOrigin::Edge);
            }
        }

        for pair in &mut index.pairs {
            pair.seam = face_count.get(&(pair.a, pair.b)) == Some(&1);
        }

        debug!(pairs = index.pairs.len(), "Built edge pairs");
        index
    }

    /// Add a pair for every two vertices closer than `threshold`.
    ///
    /// Compares every vertex against every other, so the cost grows with the
    /// square of the vertex count. Returns the number of pairs added.
    pub fn add_proximity_pairs(&mut self, positions: &[Point3d], threshold: f64) -> usize {
        if threshold <= 0.0 {
            return 0;
        }
        let threshold_sq = threshold * threshold;
        let mut added = 0;

        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                if (positions[i] - positions[j]).norm_squared() < threshold_sq
                    && self.insert(i as u32, j as u32, PairOrigin::Proximity).is_some()
                {
                    added += 1;
                }
            }
        }

        debug!(added, threshold, "Added proximity pairs");
        added
    }

    /// Insert a pair unless it already exists. Returns the new pair id.
    pub fn insert(&mut self, a: u32, b: u32, origin: PairOrigin) -> Option<usize> {
        let key = canonical(a, b);
        if key.0 == key.1 || self.lookup.contains_key(&key) {
            return None;
        }
        let id = self.pairs.len();
        self.pairs.push(Pair::new(a, b, origin));
        self.lookup.insert(key, id);
        self.incident[key.0 as usize].push(id);
        self.incident[key.1 as usize].push(id);
        Some(id)
    }

    /// Id of the pair joining `a` and `b`, if any
    pub fn find(&self, a: u32, b: u32) -> Option<usize> {
        self.lookup.get(&canonical(a, b)).copied()
    }

    pub fn get(&self, id: usize) -> &Pair {
        &self.pairs[id]
    }

    pub fn get_mut(&mut self, id: usize) -> &mut Pair {
        &mut self.pairs[id]
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Pair)> {
        self.pairs.iter().enumerate()
    }

    /// Ids of live pairs touching vertex `v`
    pub fn live_incident(&self, v: u32) -> Vec<usize> {
        self.incident[v as usize]
            .iter()
            .copied()
            .filter(|&id| self.pairs[id].is_live())
            .collect()
    }

    /// Move every pair of `absorbed` onto `survivor`.
    ///
    /// The pair joining the two becomes a resolved self-pair; a pair whose
    /// rewrite would duplicate an existing survivor pair is tombstoned instead.
    /// Returns the ids of the pairs that stopped being live.
    pub fn redirect(&mut self, absorbed: u32, survivor: u32) -> Vec<usize> {
        let mut retired = Vec::new();
        let moved = std::mem::take(&mut self.incident[absorbed as usize]);

        for id in moved {
            if !self.pairs[id].is_live() {
                continue;
            }
            let other = self.pairs[id].other(absorbed);
            let old_key = (self.pairs[id].a, self.pairs[id].b);

            if other == survivor {
                let pair = &mut self.pairs[id];
                pair.a = survivor;
                pair.b = survivor;
                pair.active = false;
                self.lookup.remove(&old_key);
                retired.push(id);
                continue;
            }

            let new_key = canonical(survivor, other);
            if self.lookup.contains_key(&new_key) {
                self.pairs[id].active = false;
                self.lookup.remove(&old_key);
                retired.push(id);
                continue;
            }

            let pair = &mut self.pairs[id];
            pair.a = new_key.0;
            pair.b = new_key.1;
            self.lookup.remove(&old_key);
            self.lookup.insert(new_key, id);
            self.incident[survivor as usize].push(id);
        }

        let pairs = &self.pairs;
        self.incident[survivor as usize].retain(|&id| pairs[id].is_live());
        retired
    }
}
