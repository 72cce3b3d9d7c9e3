//! Result types for simplification runs.

use qemesh_core::DrawMode;
use std::fmt;

/// Why a primitive was left unmodified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Morph-target-aware simplification is not implemented
    MorphTargets,
    /// Only triangle lists are supported
    UnsupportedMode(DrawMode),
    /// No `POSITION` attribute to measure error against
    MissingPosition,
}

/// A recoverable condition reported during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimplifyWarning {
    MorphTargetsUnsupported,
    DrawModeUnsupported(DrawMode),
    MissingPosition,
    /// Tangents cannot be interpolated and were removed; regenerate them afterwards
    TangentsDiscarded,
    /// Proximity pairing on a large primitive compares every vertex pair
    QuadraticProximityScan { vertices: usize },
}

impl fmt::Display for SimplifyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MorphTargetsUnsupported => {
                write!(f, "Skipping primitive with morph targets: not supported")
            }
            Self::DrawModeUnsupported(mode) => {
                write!(f, "Skipping primitive with draw mode {mode}: only TRIANGLES is supported")
            }
            Self::MissingPosition => {
                write!(f, "Skipping primitive without a POSITION attribute")
            }
            Self::TangentsDiscarded => write!(
                f,
                "Discarding TANGENT attribute: simplification cannot interpolate tangents, regenerate them afterwards"
            ),
            Self::QuadraticProximityScan { vertices } => write!(
                f,
                "Proximity pairing over {vertices} vertices compares every vertex pair and may be slow"
            ),
        }
    }
}

/// Counts from a primitive that was simplified
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimplifyStats {
    pub original_vertices: usize,
    pub target_vertices: usize,
    pub collapses: usize,
    pub stale_pops: usize,
    pub original_triangles: usize,
    pub final_triangles: usize,
}

impl SimplifyStats {
    /// Vertices absorbed by contraction (still present in the buffers)
    pub fn vertices_removed(&self) -> usize {
        self.collapses
    }

    /// Triangles dropped from the index buffer
    pub fn triangles_removed(&self) -> usize {
        self.original_triangles - self.final_triangles
    }

    /// Remaining vertex count after contraction
    pub fn remaining_vertices(&self) -> usize {
        self.original_vertices - self.collapses
    }
}

/// What happened to a primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Simplified(SimplifyStats),
    Skipped(SkipReason),
}

/// Result of simplifying one primitive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplifyReport {
    pub outcome: Outcome,
    pub warnings: Vec<SimplifyWarning>,
}

impl SimplifyReport {
    /// Statistics, if the primitive was simplified
    pub fn stats(&self) -> Option<&SimplifyStats> {
        match &self.outcome {
            Outcome::Simplified(stats) => Some(stats),
            Outcome::Skipped(_) => None,
        }
    }

    pub fn was_skipped(&self) -> bool {
        matches!(self.outcome, Outcome::Skipped(_))
    }
}

impl fmt::Display for SimplifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Simplified(stats) => write!(
                f,
                "Simplification: {} → {} vertices, {} → {} triangles ({} collapses)",
                stats.original_vertices,
                stats.remaining_vertices(),
                stats.original_triangles,
                stats.final_triangles,
                stats.collapses
            ),
            Outcome::Skipped(reason) => write!(f, "Simplification skipped: {reason:?}"),
        }
    }
}
