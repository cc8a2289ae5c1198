//! Viewport camera: projection, pan and zoom for the buffer view.
//!
//! The camera owns the orthographic projection and the pan/zoom state, and
//! publishes its view transform as the pose of the node it drives. The
//! renderer inverts that pose before applying it to world coordinates, so
//! every composition below reads in reverse when thinking about how points
//! move on screen.
//!
//! Zoom is stored as an exponent: the effective zoom is
//! `zoom_factor ^ zoom_power`, and the scale transform is always rebuilt as
//! a pure scale of its reciprocal. Any translation produced while anchoring
//! a zoom is folded into the pan before an operation returns.

use bufview_math::{Mat4, TransformUniform, Vec4};
use bufview_scene::{
    BufferDescriptor, InputSurface, KeyboardState, Key, NodeId, Point, PoseProvider, Stage,
};

use crate::constants::{
    BUFFER_NODE_NAME, CAMERA_NODE_NAME, DEFAULT_PAN_STEP, DEFAULT_ZOOM_FACTOR,
};
use crate::error::{CameraError, Result};
use crate::keybindings::KeyBindings;

#[cfg(test)]
mod tests;

/// Buffer extents below this are treated as empty.
const MIN_EXTENT: f32 = 1e-6;

/// Bound on the effective zoom and its reciprocal. Two full zoom swings
/// (`MAX_ZOOM^2`) must stay a normal `f32`.
const MAX_ZOOM: f32 = 1e18;

/// Whether an input was handled by the camera or should keep propagating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Consumed,
    Ignored,
}

impl EventResponse {
    pub fn is_consumed(self) -> bool {
        self == EventResponse::Consumed
    }
}

/// Tunable camera parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    zoom_factor: f32,
    pan_step: f32,
    bindings: KeyBindings,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            zoom_factor: DEFAULT_ZOOM_FACTOR,
            pan_step: DEFAULT_PAN_STEP,
            bindings: KeyBindings::default(),
        }
    }
}

impl CameraSettings {
    /// Create settings, falling back to defaults for a zoom factor that is
    /// not greater than 1 or a pan step that is not positive.
    pub fn new(zoom_factor: f32, pan_step: f32, bindings: KeyBindings) -> Self {
        let zoom_factor = if zoom_factor.is_finite() && zoom_factor > 1.0 {
            zoom_factor
        } else {
            log::warn!("Rejecting zoom factor {}, using {}", zoom_factor, DEFAULT_ZOOM_FACTOR);
            DEFAULT_ZOOM_FACTOR
        };
        let pan_step = if pan_step.is_finite() && pan_step > 0.0 {
            pan_step
        } else {
            log::warn!("Rejecting pan step {}, using {}", pan_step, DEFAULT_PAN_STEP);
            DEFAULT_PAN_STEP
        };
        Self {
            zoom_factor,
            pan_step,
            bindings,
        }
    }

    pub fn zoom_factor(&self) -> f32 {
        self.zoom_factor
    }

    pub fn pan_step(&self) -> f32 {
        self.pan_step
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Largest whole `|zoom_power|` keeping the zoom within `[1/MAX_ZOOM, MAX_ZOOM]`.
    pub fn max_zoom_power(&self) -> f32 {
        (MAX_ZOOM.ln() / self.zoom_factor.ln()).floor()
    }
}

/// Convert a pixel position (origin top-left, y down) to normalized device
/// coordinates (origin at the center, y up, `[-1, 1]` on both axes).
pub fn pixel_to_ndc(position: Point, width: u32, height: u32) -> Vec4 {
    let w = width as f32;
    let h = height as f32;
    Vec4::point(
        2.0 * (position.x - w / 2.0) / w,
        -2.0 * (position.y - h / 2.0) / h,
    )
}

/// Pan/zoom camera driving one scene node.
#[derive(Debug, Clone)]
pub struct Camera {
    node: NodeId,
    buffer: NodeId,
    settings: CameraSettings,
    projection: Mat4,
    /// Offset of the buffer origin from the viewport center
    pan: (f32, f32),
    zoom_power: f32,
    viewport: (u32, u32),
}

impl Camera {
    /// Create a camera driving `node` and looking at `buffer`.
    ///
    /// Starts with zero pan and unit zoom; call [`Camera::initialize`] once
    /// the viewport size is known.
    pub fn new(node: NodeId, buffer: NodeId, settings: CameraSettings) -> Self {
        Self {
            node,
            buffer,
            settings,
            projection: Mat4::IDENTITY,
            pan: (0.0, 0.0),
            zoom_power: 0.0,
            viewport: (0, 0),
        }
    }

    /// Resolve the camera and buffer nodes by their well-known names.
    pub fn attach(stage: &Stage, settings: CameraSettings) -> Result<Self> {
        let node = stage.require_node(CAMERA_NODE_NAME)?;
        let buffer = stage.require_node(BUFFER_NODE_NAME)?;
        log::debug!("Camera attached to node {} looking at buffer {}", node, buffer);
        Ok(Self::new(node, buffer, settings))
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn buffer(&self) -> NodeId {
        self.buffer
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn pan(&self) -> (f32, f32) {
        self.pan
    }

    pub fn zoom_power(&self) -> f32 {
        self.zoom_power
    }

    pub fn viewport_size(&self) -> (u32, u32) {
        self.viewport
    }

    /// Effective zoom, `zoom_factor ^ zoom_power`.
    pub fn compute_zoom(&self) -> f32 {
        self.settings.zoom_factor.powf(self.zoom_power)
    }

    /// Zoom readout for status displays.
    pub fn zoom(&self) -> f32 {
        self.compute_zoom()
    }

    /// Pure-scale transform holding the reciprocal of the zoom.
    pub fn scale(&self) -> Mat4 {
        Mat4::scale_xy(1.0 / self.compute_zoom())
    }

    /// The pose this camera publishes: `scale * translation(-pan)`.
    pub fn view_pose(&self) -> Mat4 {
        self.scale() * Mat4::translation(Vec4::point(-self.pan.0, -self.pan.1))
    }

    /// Inverse of [`Camera::scale`], built directly from the zoom.
    fn scale_inverse(&self) -> Mat4 {
        Mat4::scale_xy(self.compute_zoom())
    }

    /// Full world-to-NDC transform a renderer applies: the projection after
    /// the inverted view pose, `projection * translation(pan) * scale^-1`.
    ///
    /// World coordinates are buffer pixels relative to the buffer center,
    /// after the buffer pose.
    pub fn view_projection(&self) -> Mat4 {
        self.projection
            * Mat4::translation(Vec4::point(self.pan.0, self.pan.1))
            * self.scale_inverse()
    }

    /// [`Camera::view_projection`] in shader uniform layout.
    pub fn view_uniform(&self) -> TransformUniform {
        TransformUniform::from(self.view_projection())
    }

    /// Track a new canvas size.
    ///
    /// A zero dimension keeps the previous projection.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        if width == 0 || height == 0 {
            log::debug!("Ignoring projection update for empty viewport {}x{}", width, height);
            return;
        }
        self.projection = Mat4::ortho(width as f32 / 2.0, height as f32 / 2.0, -1.0, 1.0);
    }

    /// Publish the current view transform to the camera node.
    pub fn recompute_pose(&self, stage: &mut Stage) -> Result<()> {
        let node = stage
            .node_mut(self.node)
            .ok_or(CameraError::MissingCameraNode(self.node))?;
        node.set_pose(self.view_pose());
        node.request_render_update();
        Ok(())
    }

    /// Size the viewport from `input`, fit the buffer and publish the pose.
    pub fn initialize(&mut self, stage: &mut Stage, input: &impl InputSurface) -> Result<()> {
        let (width, height) = input.viewport_size();
        self.resize(width, height);
        self.fit_to_viewport(stage)
    }

    /// Zoom by `delta` steps keeping the point at `center_ndc` fixed on screen.
    ///
    /// The algorithm:
    /// 1. Map the anchor back through the projection and current pose, then
    ///    undo the current scale, giving the anchor in panned space
    /// 2. Compose the current scale with a scale about that anchor
    /// 3. Fold the translation of the composite into the pan, leaving a
    ///    pure scale
    /// 4. Advance `zoom_power` so the rebuilt scale matches the composite
    ///
    /// `zoom_power` is clamped to `±max_zoom_power`; a step past the limit
    /// only zooms as far as the limit.
    pub fn zoom_at(&mut self, stage: &mut Stage, center_ndc: Vec4, delta: f32) -> Result<()> {
        if !delta.is_finite() {
            log::warn!("Ignoring non-finite zoom step {}", delta);
            return Ok(());
        }
        let max_power = self.settings.max_zoom_power();
        let target = (self.zoom_power + delta).clamp(-max_power, max_power);
        let delta = target - self.zoom_power;
        if delta == 0.0 {
            log::trace!("Zoom limit reached at power {}", self.zoom_power);
            return Ok(());
        }

        let pose = stage
            .node(self.node)
            .ok_or(CameraError::MissingCameraNode(self.node))?
            .pose();
        let projection_inv = self
            .projection
            .inverse()
            .ok_or(CameraError::SingularTransform { what: "projection" })?;
        let view_projection_inv = pose * projection_inv;

        let scale = self.scale();
        let center_pos = self.scale_inverse() * view_projection_inv * center_ndc;

        let delta_zoom = self.settings.zoom_factor.powf(-delta);

        // Applied to world points in reverse: move anchor to origin, scale, move back
        let anchored = scale
            * Mat4::translation(center_pos)
            * Mat4::scale_xy(delta_zoom)
            * Mat4::translation(-center_pos);

        let (tx, ty) = anchored.translation_xy();
        self.pan.0 -= tx / anchored.get(0, 0);
        self.pan.1 -= ty / anchored.get(1, 1);
        self.zoom_power = target;

        log::trace!(
            "Zoom by {} at ({}, {}): power {}, pan ({}, {})",
            delta,
            center_ndc.x,
            center_ndc.y,
            self.zoom_power,
            self.pan.0,
            self.pan.1
        );

        self.recompute_pose(stage)
    }

    /// Choose the largest whole `zoom_power` at which the buffer still fits
    /// inside the viewport, then publish the pose.
    ///
    /// Starts from unit zoom and steps up while the buffer keeps strictly
    /// fitting, or down until it fits. An empty buffer or viewport leaves
    /// unit zoom.
    pub fn fit_to_viewport(&mut self, stage: &mut Stage) -> Result<()> {
        self.zoom_power = self.fitted_zoom_power(stage)?;
        log::debug!(
            "Fit buffer at zoom power {} ({:.3}x)",
            self.zoom_power,
            self.compute_zoom()
        );
        self.recompute_pose(stage)
    }

    fn fitted_zoom_power(&self, stage: &Stage) -> Result<f32> {
        let (pose, buffer) = self.buffer_geometry(stage)?;
        // Directions ignore the pose's translation
        let extent = (pose * Vec4::direction(buffer.width(), buffer.height())).abs();
        let view_w = self.viewport.0 as f32;
        let view_h = self.viewport.1 as f32;

        let degenerate = !(extent.x.is_finite() && extent.y.is_finite())
            || extent.x < MIN_EXTENT
            || extent.y < MIN_EXTENT
            || self.viewport.0 == 0
            || self.viewport.1 == 0;
        if degenerate {
            log::debug!(
                "Skipping fit: buffer extent {}x{}, viewport {}x{}",
                extent.x,
                extent.y,
                self.viewport.0,
                self.viewport.1
            );
            return Ok(0.0);
        }

        let factor = self.settings.zoom_factor;
        let max_power = self.settings.max_zoom_power();
        let fits = |power: f32| {
            let zoom = factor.powf(power);
            view_w > zoom * extent.x && view_h > zoom * extent.y
        };
        let overflows = |power: f32| {
            let zoom = factor.powf(power);
            view_w < zoom * extent.x || view_h < zoom * extent.y
        };

        let mut power = 0.0;
        if fits(0.0) {
            // Zoom in until the next step would overflow
            while power < max_power && fits(power + 1.0) {
                power += 1.0;
            }
        } else if overflows(0.0) {
            // Zoom out until nothing overflows
            power = -1.0;
            while power > -max_power && overflows(power) {
                power -= 1.0;
            }
        }
        Ok(power)
    }

    /// Center the view on `(x, y)` in buffer-local units.
    pub fn move_to(&mut self, stage: &mut Stage, x: f32, y: f32) -> Result<()> {
        let (pose, buffer) = self.buffer_geometry(stage)?;
        if !buffer.contains(x, y) {
            log::debug!("Centering on ({}, {}) outside the buffer", x, y);
        }
        let (cx, cy) = buffer.center();
        let centered = Vec4::direction(cx - x, cy - y);

        let goal = self.scale_inverse() * pose * centered;
        self.pan = (goal.x, goal.y);

        log::debug!("Moved camera to ({}, {})", x, y);
        self.recompute_pose(stage)
    }

    /// The buffer-local point currently at the center of the viewport.
    pub fn current_center(&self, stage: &Stage) -> Result<(f32, f32)> {
        let (pose, buffer) = self.buffer_geometry(stage)?;
        let (cx, cy) = buffer.center();

        let pose_inv = pose
            .inverse()
            .ok_or(CameraError::SingularTransform { what: "buffer pose" })?;
        let offset = pose_inv * self.scale() * Vec4::direction(self.pan.0, self.pan.1);

        Ok((cx - offset.x, cy - offset.y))
    }

    /// Drop the pan, refit the buffer and publish the pose.
    pub fn recenter(&mut self, stage: &mut Stage) -> Result<()> {
        self.pan = (0.0, 0.0);
        self.fit_to_viewport(stage)
    }

    /// Mouse wheel: zoom anchored at the cursor.
    pub fn on_scroll(
        &mut self,
        stage: &mut Stage,
        delta: f32,
        input: &impl InputSurface,
    ) -> Result<()> {
        let (width, height) = input.viewport_size();
        if width == 0 || height == 0 {
            log::debug!("Ignoring scroll on empty viewport");
            return Ok(());
        }
        let mouse_ndc = pixel_to_ndc(input.mouse_position(), width, height);
        self.zoom_at(stage, mouse_ndc, delta)
    }

    /// Key press: modifier + zoom keys zoom about the viewport center,
    /// modifier + recenter key refits, and modifier + arrows are swallowed
    /// so they don't scroll anything else.
    pub fn on_key_event(
        &mut self,
        stage: &mut Stage,
        keyboard: &impl KeyboardState,
    ) -> Result<EventResponse> {
        let bindings = self.settings.bindings;
        if !keyboard.is_modifier_pressed(bindings.modifier) {
            return Ok(EventResponse::Ignored);
        }

        let screen_center = Vec4::point(0.0, 0.0);
        if keyboard.is_key_pressed(bindings.zoom_in) {
            self.zoom_at(stage, screen_center, 1.0)?;
        } else if keyboard.is_key_pressed(bindings.zoom_out) {
            self.zoom_at(stage, screen_center, -1.0)?;
        } else if keyboard.is_key_pressed(bindings.recenter) {
            self.recenter(stage)?;
        } else if !arrow_keys().any(|key| keyboard.is_key_pressed(key)) {
            return Ok(EventResponse::Ignored);
        }
        Ok(EventResponse::Consumed)
    }

    /// Per-frame update: pan one step per held arrow key while the modifier
    /// is down.
    pub fn tick(&mut self, stage: &mut Stage, keyboard: &impl KeyboardState) -> Result<EventResponse> {
        if !keyboard.is_modifier_pressed(self.settings.bindings.modifier) {
            return Ok(EventResponse::Ignored);
        }

        let step = self.settings.pan_step;
        let mut delta = (0.0, 0.0);
        let mut moved = false;

        if keyboard.is_key_pressed(Key::Up) {
            delta.1 = -step;
            moved = true;
        } else if keyboard.is_key_pressed(Key::Down) {
            delta.1 = step;
            moved = true;
        }

        if keyboard.is_key_pressed(Key::Left) {
            delta.0 = -step;
            moved = true;
        } else if keyboard.is_key_pressed(Key::Right) {
            delta.0 = step;
            moved = true;
        }

        if !moved {
            return Ok(EventResponse::Ignored);
        }

        // Discard whatever translation the scale holds while moving
        let (residual_x, residual_y) = self.scale().translation_xy();
        self.pan.0 -= delta.0 + residual_x;
        self.pan.1 -= delta.1 + residual_y;

        self.recompute_pose(stage)?;
        Ok(EventResponse::Consumed)
    }

    /// Mouse drag: add the raw pixel delta to the pan.
    pub fn on_mouse_drag(&mut self, stage: &mut Stage, dx: f32, dy: f32) -> Result<()> {
        self.pan.0 += dx;
        self.pan.1 += dy;
        self.recompute_pose(stage)
    }

    /// Copy settings, pan, zoom and viewport state from another camera and
    /// publish the resulting pose on this camera's node.
    pub fn sync_from(&mut self, other: &Camera, stage: &mut Stage) -> Result<()> {
        self.settings = other.settings;
        self.projection = other.projection;
        self.pan = other.pan;
        self.zoom_power = other.zoom_power;
        self.viewport = other.viewport;
        self.recompute_pose(stage)
    }

    fn buffer_geometry(&self, stage: &Stage) -> Result<(Mat4, BufferDescriptor)> {
        let node = stage
            .node(self.buffer)
            .ok_or(CameraError::MissingBufferNode(self.buffer))?;
        let buffer = node
            .component::<BufferDescriptor>()
            .ok_or(CameraError::MissingBufferDescriptor(self.buffer))?;
        Ok((node.pose(), *buffer))
    }
}

fn arrow_keys() -> impl Iterator<Item = Key> {
    [Key::Up, Key::Down, Key::Left, Key::Right].into_iter()
}
