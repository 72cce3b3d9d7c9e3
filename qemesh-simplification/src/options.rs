//! Simplification options

use qemesh_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Vertex count above which enabling proximity pairing logs a warning.
pub const PROXIMITY_WARN_VERTICES: usize = 10_000;

/// Options for one simplification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimplifyOptions {
    /// Fraction of the original vertex count to retain, in (0, 1]. Default: 0.1
    pub target: f64,

    /// Vertices closer than this are paired even without a shared edge.
    /// 0 disables proximity pairing. The scan is quadratic in vertex count.
    pub distance_threshold: f64,

    /// Accepted but currently has no effect.
    pub seam_penalty: f64,

    /// Accepted but currently has no effect.
    pub inversion_penalty: f64,

    /// Accepted but currently has no effect.
    pub attribute_weights: BTreeMap<String, f64>,

    /// Run a zero-tolerance weld before simplifying each primitive of a document.
    pub weld: bool,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            target: 0.1,
            distance_threshold: 0.0,
            seam_penalty: 0.0,
            inversion_penalty: 0.0,
            attribute_weights: BTreeMap::new(),
            weld: true,
        }
    }
}

impl SimplifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the retained vertex fraction
    pub fn with_target(mut self, target: f64) -> Self {
        self.target = target;
        self
    }

    /// Set the proximity pairing distance
    pub fn with_distance_threshold(mut self, threshold: f64) -> Self {
        self.distance_threshold = threshold;
        self
    }

    /// Enable or disable the weld pre-pass of the document driver
    pub fn with_weld(mut self, weld: bool) -> Self {
        self.weld = weld;
        self
    }

    /// Check option ranges
    pub fn validate(&self) -> Result<()> {
        if !self.target.is_finite() || self.target <= 0.0 || self.target > 1.0 {
            return Err(Error::InvalidOption(format!(
                "target must be in (0, 1], got {}",
                self.target
            )));
        }
        if !self.distance_threshold.is_finite() || self.distance_threshold < 0.0 {
            return Err(Error::InvalidOption(format!(
                "distance threshold must be a non-negative number, got {}",
                self.distance_threshold
            )));
        }
        let penalties = [
            ("seam penalty", self.seam_penalty),
            ("inversion penalty", self.inversion_penalty),
        ];
        for (name, value) in penalties {
            if !value.is_finite() {
                return Err(Error::InvalidOption(format!("{name} must be finite")));
            }
        }
        if let Some((name, _)) = self.attribute_weights.iter().find(|(_, w)| !w.is_finite()) {
            return Err(Error::InvalidOption(format!(
                "weight for attribute {name} must be finite"
            )));
        }
        Ok(())
    }

    /// Number of vertices to keep out of `vertex_count`
    pub fn target_count(&self, vertex_count: usize) -> usize {
        (vertex_count as f64 * self.target).round() as usize
    }
}
