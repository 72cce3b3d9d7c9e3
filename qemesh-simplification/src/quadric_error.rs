//! Quadric error simplifier

use crate::cost::{CostFunction, EndpointCost};
use crate::options::SimplifyOptions;
use crate::report::SimplifyReport;
use crate::simplify::simplify_with;
use crate::MeshSimplifier;
use qemesh_core::{MeshPrimitive, Result};

/// Quadric error simplifier holding its options and cost function.
pub struct QuadricErrorSimplifier {
    options: SimplifyOptions,
    cost: Box<dyn CostFunction>,
}

impl Default for QuadricErrorSimplifier {
    fn default() -> Self {
        Self::new(SimplifyOptions::default())
    }
}

impl QuadricErrorSimplifier {
    pub fn new(options: SimplifyOptions) -> Self {
        let cost = Box::new(EndpointCost::from_options(&options));
        Self { options, cost }
    }

    /// Use a custom cost function
    pub fn with_cost_function(options: SimplifyOptions, cost: Box<dyn CostFunction>) -> Self {
        Self { options, cost }
    }

    pub fn options(&self) -> &SimplifyOptions {
        &self.options
    }
}

impl MeshSimplifier for QuadricErrorSimplifier {
    fn simplify<P: MeshPrimitive + ?Sized>(&self, primitive: &mut P) -> Result<SimplifyReport> {
        simplify_with(primitive, &self.options, self.cost.as_ref())
    }
}
