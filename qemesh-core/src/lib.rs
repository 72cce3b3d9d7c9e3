//! Core data structures and traits for qemesh
//!
//! This crate provides the fundamental types shared by the simplification
//! engine: attribute buffers, mesh primitives and documents, the
//! [`MeshPrimitive`] contract the engine reads and writes through, and the
//! welding pre-pass that deduplicates coincident vertices.

pub mod point;
pub mod semantic;
pub mod primitive;
pub mod document;
pub mod weld;
pub mod error;

pub use point::*;
pub use primitive::*;
pub use document::*;
pub use weld::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point3, Vector3, Vector4};
