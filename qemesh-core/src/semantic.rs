//! Well-known vertex attribute semantic names.

/// Vertex position, always three components.
pub const POSITION: &str = "POSITION";

/// Vertex normal.
pub const NORMAL: &str = "NORMAL";

/// Vertex tangent. Simplification cannot interpolate these and drops them.
pub const TANGENT: &str = "TANGENT";

/// First texture coordinate set.
pub const TEXCOORD_0: &str = "TEXCOORD_0";

/// First vertex color set.
pub const COLOR_0: &str = "COLOR_0";
