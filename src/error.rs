//! Error types for camera operations.

use bufview_scene::{NodeId, SceneError};
use thiserror::Error;

/// Errors that can occur while the camera reads or writes the scene.
#[derive(Error, Debug)]
pub enum CameraError {
    /// The node the camera drives was removed from the stage
    #[error("Camera node {0} is no longer on the stage")]
    MissingCameraNode(NodeId),

    /// The buffer node was removed from the stage
    #[error("Buffer node {0} is no longer on the stage")]
    MissingBufferNode(NodeId),

    /// The buffer node carries no buffer descriptor
    #[error("Buffer node {0} has no buffer descriptor")]
    MissingBufferDescriptor(NodeId),

    /// A transform that must be inverted is singular
    #[error("The {what} transform is not invertible")]
    SingularTransform {
        /// Which transform failed to invert
        what: &'static str,
    },

    /// Scene lookup error during setup
    #[error(transparent)]
    Scene(#[from] SceneError),
}

pub type Result<T> = std::result::Result<T, CameraError>;
