use std::any::Any;

use crate::component::Component;

/// Dimensions of the displayed image buffer, in the buffer's own local units.
///
/// Fixed for the lifetime of the buffer; a new buffer means a new descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferDescriptor {
    width: f32,
    height: f32,
}

impl BufferDescriptor {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Center of the buffer in local units.
    pub fn center(&self) -> (f32, f32) {
        (self.width * 0.5, self.height * 0.5)
    }

    /// Whether `(x, y)` lies inside the buffer.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

impl Component for BufferDescriptor {
    fn kind(&self) -> &'static str {
        "buffer"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_and_bounds() {
        let buffer = BufferDescriptor::new(200.0, 100.0);
        assert_eq!(buffer.center(), (100.0, 50.0));
        assert!(buffer.contains(0.0, 100.0));
        assert!(!buffer.contains(200.5, 10.0));
        assert!(!buffer.contains(-1.0, 10.0));
    }
}
