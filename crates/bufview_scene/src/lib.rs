//! bufview_scene - scene graph collaborators for the buffer viewer.
//!
//! Nodes carry a pose and a table of components looked up by type; the
//! [`Stage`] indexes nodes by name. Input events and the keyboard/viewport
//! query surfaces the camera polls also live here.

mod buffer;
mod component;
mod drag;
mod error;
mod event;
mod input;
mod keyboard;
mod node;
mod stage;

pub use buffer::BufferDescriptor;
pub use component::Component;
pub use drag::PanDragState;
pub use error::{Result, SceneError};
pub use event::{Event, Key, Modifiers, MouseButton, Point};
pub use input::{CanvasInput, InputSurface};
pub use keyboard::{KeyboardState, ModifierKey, PressedKeys};
pub use node::{PoseProvider, SceneNode};
pub use stage::{NodeId, Stage};

// Re-export math types that users need
pub use bufview_math::{Mat4, TransformUniform, Vec4};
