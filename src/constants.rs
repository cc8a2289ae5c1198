//! Global constants for the buffer viewer

/// Name under which the displayed buffer's node is registered on the stage
pub const BUFFER_NODE_NAME: &str = "buffer";

/// Name under which the camera's node is registered on the stage
pub const CAMERA_NODE_NAME: &str = "camera";

/// Base of the exponential zoom: one zoom step multiplies the zoom by this
pub const DEFAULT_ZOOM_FACTOR: f32 = 1.1;

/// Keyboard pan distance per tick
pub const DEFAULT_PAN_STEP: f32 = 1.0;

/// Render loop frame cap
pub const DEFAULT_MAX_FRAMERATE: f64 = 60.0;

/// Default canvas size used by the replay binary
pub const DEFAULT_VIEWPORT_SIZE: (u32, u32) = (800, 600);
