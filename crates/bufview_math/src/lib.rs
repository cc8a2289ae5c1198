//! bufview_math - homogeneous transform primitives for the buffer viewer.
//!
//! Row-major 4x4 matrices acting on column vectors (`m * v`), plus the
//! GPU uniform layout used to upload a pose to a shader.

pub mod mat4;
pub mod uniform;
pub mod vec4;

pub use mat4::Mat4;
pub use uniform::TransformUniform;
pub use vec4::Vec4;

/// Tolerance used by approximate comparisons.
pub const EPSILON: f32 = 1e-5;
