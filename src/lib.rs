//! bufview - pan/zoom camera for viewing 2D buffers
//!
//! A camera drives a node on a [`Stage`], publishing a view pose the renderer
//! inverts. The [`Viewer`] wires input events to the camera.

mod camera;
pub mod config;
pub mod constants;
mod error;
pub mod keybindings;
mod viewer;

pub use camera::{Camera, CameraSettings, EventResponse, pixel_to_ndc};
pub use error::{CameraError, Result};
pub use keybindings::KeyBindings;
pub use viewer::Viewer;

pub use bufview_math::{Mat4, TransformUniform, Vec4};
pub use bufview_scene::{
    BufferDescriptor, CanvasInput, Event, InputSurface, Key, KeyboardState, ModifierKey,
    Modifiers, MouseButton, NodeId, Point, PoseProvider, PressedKeys, SceneError, SceneNode,
    Stage,
};
