//! # qemesh
//!
//! Quadric error metric (QEM) mesh simplification.
//!
//! This is the umbrella crate that provides convenient access to all qemesh functionality.
//! You can use this crate to get everything in one place, or use individual crates for
//! more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Mesh primitives, attribute buffers, draw modes and the welding pre-pass
//! - **Simplification**: Greedy edge contraction guided by quadric error metrics
//!
//! ## Quick Start
//!
//! ```rust
//! use qemesh::prelude::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut primitive = Primitive::triangles(
//!     vec![
//!         [0.0, 0.0, 0.0],
//!         [1.0, 0.0, 0.0],
//!         [1.0, 1.0, 0.0],
//!         [0.0, 1.0, 0.0],
//!     ],
//!     vec![0, 1, 2, 0, 2, 3],
//! );
//!
//! let report = simplify_primitive(&mut primitive, &SimplifyOptions::default().with_target(0.5))?;
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables core and simplification
//! - `simplification`: The QEM simplification engine

// Re-export core functionality
pub use qemesh_core::*;

// Re-export sub-crates
#[cfg(feature = "simplification")]
pub use qemesh_simplification as simplification;

/// Convenient imports for common use cases
pub mod prelude {
    pub use qemesh_core::*;

    #[cfg(feature = "simplification")]
    pub use qemesh_simplification::*;
}
