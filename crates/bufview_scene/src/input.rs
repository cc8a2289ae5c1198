//! Viewport query surface: mouse position and canvas size.

use crate::event::{Event, Point};

/// Answers where the mouse is and how large the canvas is, in pixels.
pub trait InputSurface {
    fn mouse_position(&self) -> Point;
    fn viewport_size(&self) -> (u32, u32);
}

/// Canvas state kept current from the event stream.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CanvasInput {
    mouse: Point,
    width: u32,
    height: u32,
}

impl CanvasInput {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            mouse: Point::default(),
            width,
            height,
        }
    }

    /// Record mouse position and canvas size carried by `event`.
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Resized { width, height } => {
                self.width = *width;
                self.height = *height;
            }
            Event::MousePressed { position, .. }
            | Event::MouseReleased { position, .. }
            | Event::MouseMoved { position }
            | Event::MouseWheel { position, .. } => {
                self.mouse = *position;
            }
            Event::KeyPressed { .. } | Event::KeyReleased { .. } => {}
        }
    }

    pub fn set_mouse_position(&mut self, position: Point) {
        self.mouse = position;
    }
}

impl InputSurface for CanvasInput {
    fn mouse_position(&self) -> Point {
        self.mouse
    }

    fn viewport_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
