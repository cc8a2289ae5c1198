//! Shared uniform types for GPU rendering pipelines.

use bytemuck::{Pod, Zeroable};

use crate::mat4::Mat4;

/// 4x4 view transform laid out for upload to a shader uniform buffer.
///
/// Shaders expect column-major storage, so this is the transpose of the
/// row-major [`Mat4`] it was built from.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TransformUniform {
    pub matrix: [[f32; 4]; 4],
}

impl TransformUniform {
    pub fn new() -> Self {
        Self::from_mat4(&Mat4::IDENTITY)
    }

    /// Build the uniform from a row-major transform.
    pub fn from_mat4(transform: &Mat4) -> Self {
        Self {
            matrix: transform.transpose().m,
        }
    }

    /// Raw bytes ready for a buffer write.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl Default for TransformUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Mat4> for TransformUniform {
    fn from(transform: Mat4) -> Self {
        Self::from_mat4(&transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec4;

    #[test]
    fn test_uniform_is_column_major() {
        let t = Mat4::translation(Vec4::new(3.0, 4.0, 0.0, 1.0));
        let uniform = TransformUniform::from(t);
        // Translation ends up in the last column (fourth array)
        assert_eq!(uniform.matrix[3], [3.0, 4.0, 0.0, 1.0]);
    }

    #[test]
    fn test_uniform_byte_size() {
        assert_eq!(TransformUniform::new().as_bytes().len(), 64);
    }
}
