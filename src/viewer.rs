//! Buffer viewer: owns the stage and routes input events to the camera.

use bufview_math::Mat4;
use bufview_scene::{
    BufferDescriptor, CanvasInput, Event, MouseButton, PanDragState, PoseProvider, PressedKeys,
    SceneNode, Stage,
};

use crate::camera::{Camera, CameraSettings, EventResponse};
use crate::constants::{BUFFER_NODE_NAME, CAMERA_NODE_NAME};
use crate::error::{CameraError, Result};

/// A single buffer view with its camera and input state.
#[derive(Debug)]
pub struct Viewer {
    stage: Stage,
    camera: Camera,
    keyboard: PressedKeys,
    input: CanvasInput,
    drag: PanDragState,
}

impl Viewer {
    /// Build a stage holding `buffer`, attach a camera and fit the buffer
    /// into a `width` x `height` canvas.
    pub fn new(
        buffer: BufferDescriptor,
        settings: CameraSettings,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let mut stage = Stage::new();
        stage.add_node(BUFFER_NODE_NAME, SceneNode::new().with_component(buffer))?;
        stage.add_node(CAMERA_NODE_NAME, SceneNode::new())?;

        let mut camera = Camera::attach(&stage, settings)?;
        let input = CanvasInput::new(width, height);
        camera.initialize(&mut stage, &input)?;

        log::info!(
            "Viewing {}x{} buffer in {}x{} canvas",
            buffer.width(),
            buffer.height(),
            width,
            height
        );

        Ok(Self {
            stage,
            camera,
            keyboard: PressedKeys::new(),
            input,
            drag: PanDragState::default(),
        })
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn input(&self) -> &CanvasInput {
        &self.input
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Route one input event.
    pub fn handle_event(&mut self, event: &Event) -> Result<EventResponse> {
        self.input.handle_event(event);

        match event {
            Event::Resized { width, height } => {
                self.camera.resize(*width, *height);
                self.camera.recompute_pose(&mut self.stage)?;
                Ok(EventResponse::Consumed)
            }
            Event::MousePressed {
                button: MouseButton::Left,
                position,
            } => {
                self.drag.start_drag(*position);
                Ok(EventResponse::Consumed)
            }
            Event::MouseReleased {
                button: MouseButton::Left,
                ..
            } => {
                if !self.drag.is_dragging() {
                    return Ok(EventResponse::Ignored);
                }
                self.drag.stop_drag();
                Ok(EventResponse::Consumed)
            }
            Event::MouseMoved { position } => match self.drag.drag_to(*position) {
                // Canvas y grows downward, pan y grows upward
                Some((dx, dy)) => {
                    self.camera.on_mouse_drag(&mut self.stage, dx, -dy)?;
                    Ok(EventResponse::Consumed)
                }
                None => Ok(EventResponse::Ignored),
            },
            Event::MouseWheel { delta, .. } => {
                self.camera.on_scroll(&mut self.stage, *delta, &self.input)?;
                Ok(EventResponse::Consumed)
            }
            Event::KeyPressed { .. } => {
                self.keyboard.handle_event(event);
                self.camera.on_key_event(&mut self.stage, &self.keyboard)
            }
            Event::KeyReleased { .. } => {
                self.keyboard.handle_event(event);
                Ok(EventResponse::Ignored)
            }
            Event::MousePressed { .. } | Event::MouseReleased { .. } => Ok(EventResponse::Ignored),
        }
    }

    /// Advance one frame of held-key panning.
    pub fn tick(&mut self) -> Result<EventResponse> {
        self.camera.tick(&mut self.stage, &self.keyboard)
    }

    /// Center the view on buffer pixel `(x, y)`.
    pub fn go_to_pixel(&mut self, x: f32, y: f32) -> Result<()> {
        self.camera.move_to(&mut self.stage, x, y)
    }

    /// Drop the pan and fit the whole buffer.
    pub fn recenter(&mut self) -> Result<()> {
        self.camera.recenter(&mut self.stage)
    }

    /// Turn the buffer a quarter clockwise on screen.
    pub fn rotate_90_cw(&mut self) -> Result<()> {
        self.rotate(-1)
    }

    /// Turn the buffer a quarter counter-clockwise on screen.
    pub fn rotate_90_ccw(&mut self) -> Result<()> {
        self.rotate(1)
    }

    /// Rotate the buffer node, refit, and keep the centered pixel in place.
    fn rotate(&mut self, turns: i32) -> Result<()> {
        let (x, y) = self.camera.current_center(&self.stage)?;
        let buffer = self.camera.buffer();
        let node = self
            .stage
            .node_mut(buffer)
            .ok_or(CameraError::MissingBufferNode(buffer))?;
        let pose = Mat4::quarter_turns(turns) * node.pose();
        node.set_pose(pose);
        node.request_render_update();

        self.camera.fit_to_viewport(&mut self.stage)?;
        self.camera.move_to(&mut self.stage, x, y)?;
        log::debug!("Rotated buffer by {} quarter turns", turns);
        Ok(())
    }

    /// Mirror another viewer's camera, e.g. when views are linked.
    pub fn link_from(&mut self, other: &Viewer) -> Result<()> {
        self.camera.sync_from(&other.camera, &mut self.stage)
    }

    pub fn zoom(&self) -> f32 {
        self.camera.zoom()
    }

    /// One-line summary of zoom and centered pixel for a status bar.
    pub fn status_text(&self) -> String {
        let percent = self.zoom() * 100.0;
        match self.camera.current_center(&self.stage) {
            Ok((x, y)) => format!("Zoom: {:.0}% | Center: ({:.1}, {:.1})", percent, x, y),
            Err(e) => {
                log::warn!("No buffer center for status: {}", e);
                format!("Zoom: {:.0}%", percent)
            }
        }
    }

    /// Return and clear any pending redraw on the camera or buffer node.
    pub fn take_render_request(&mut self) -> bool {
        let mut requested = false;
        for id in [self.camera.node(), self.camera.buffer()] {
            if let Some(node) = self.stage.node_mut(id) {
                requested |= node.take_render_request();
            }
        }
        requested
    }
}
