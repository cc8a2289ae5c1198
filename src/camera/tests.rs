//! Tests for the viewport camera.

use bufview_math::{Mat4, TransformUniform, Vec4};
use bufview_scene::{
    BufferDescriptor, CanvasInput, Key, Modifiers, Point, PoseProvider, PressedKeys, SceneNode,
    Stage,
};

use super::*;
use crate::error::CameraError;

const EPSILON: f32 = 0.001;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Stage with a buffer node of the given size and an empty camera node.
fn create_stage(buffer_w: f32, buffer_h: f32, buffer_pose: Mat4) -> Stage {
    let mut stage = Stage::new();
    stage
        .add_node(
            BUFFER_NODE_NAME,
            SceneNode::with_pose(buffer_pose).with_component(BufferDescriptor::new(buffer_w, buffer_h)),
        )
        .unwrap();
    stage.add_node(CAMERA_NODE_NAME, SceneNode::new()).unwrap();
    stage
}

/// Camera initialized against a viewport of the given size.
fn create_camera(stage: &mut Stage, view_w: u32, view_h: u32) -> Camera {
    let mut camera = Camera::attach(stage, CameraSettings::default()).unwrap();
    camera.initialize(stage, &CanvasInput::new(view_w, view_h)).unwrap();
    camera
}

/// Screen position (pixels from the viewport center, y up) of a world point.
fn screen_of(camera: &Camera, world: (f32, f32)) -> (f32, f32) {
    let zoom = camera.compute_zoom();
    let (pan_x, pan_y) = camera.pan();
    (world.0 * zoom + pan_x, world.1 * zoom + pan_y)
}

/// World point shown at a screen position (pixels from the viewport center, y up).
fn world_under(camera: &Camera, screen: (f32, f32)) -> (f32, f32) {
    let zoom = camera.compute_zoom();
    let (pan_x, pan_y) = camera.pan();
    ((screen.0 - pan_x) / zoom, (screen.1 - pan_y) / zoom)
}

fn held(keys: &[Key], modifiers: Modifiers) -> PressedKeys {
    let mut keyboard = PressedKeys::new();
    for key in keys {
        keyboard.press(*key);
    }
    keyboard.set_modifiers(modifiers);
    keyboard
}

fn assert_pure_scale(camera: &Camera, stage: &Stage) {
    let scale = camera.scale();
    assert_eq!(scale.translation_xy(), (0.0, 0.0));
    assert!(approx_eq(scale.get(0, 0), 1.0 / camera.compute_zoom()));
    assert_eq!(scale.get(0, 0), scale.get(1, 1));

    let pose = stage.node(camera.node()).unwrap().pose();
    assert!(pose.approx_eq(&camera.view_pose(), 1e-5));
}

// =============================================================================
// Fit to viewport
// =============================================================================

#[test]
fn test_fit_picks_largest_zoom_that_fits() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let camera = create_camera(&mut stage, 400, 150);

    // 1.1^4 * 100 = 146.4 fits in 150, 1.1^5 * 100 = 161 does not
    assert_eq!(camera.zoom_power(), 4.0);
    let zoom = camera.compute_zoom();
    assert!(zoom * 200.0 <= 400.0);
    assert!(zoom * 100.0 <= 150.0);

    let next = camera.settings().zoom_factor().powf(camera.zoom_power() + 1.0);
    assert!(next * 200.0 > 400.0 || next * 100.0 > 150.0);
}

#[test]
fn test_fit_zooms_out_large_buffer() {
    let mut stage = create_stage(1000.0, 500.0, Mat4::IDENTITY);
    let camera = create_camera(&mut stage, 400, 300);

    assert_eq!(camera.zoom_power(), -10.0);
    let zoom = camera.compute_zoom();
    assert!(zoom * 1000.0 <= 400.0);
    assert!(zoom * 500.0 <= 300.0);

    let next = camera.settings().zoom_factor().powf(camera.zoom_power() + 1.0);
    assert!(next * 1000.0 > 400.0);
}

#[test]
fn test_fit_exact_size_keeps_unit_zoom() {
    let mut stage = create_stage(400.0, 300.0, Mat4::IDENTITY);
    let camera = create_camera(&mut stage, 400, 300);
    assert_eq!(camera.zoom_power(), 0.0);
    assert!(approx_eq(camera.compute_zoom(), 1.0));
}

#[test]
fn test_fit_uses_rotated_extent() {
    // A 100x200 buffer turned a quarter occupies 200x100 on screen
    let mut stage = create_stage(100.0, 200.0, Mat4::quarter_turns(1));
    let camera = create_camera(&mut stage, 400, 150);
    assert_eq!(camera.zoom_power(), 4.0);
}

#[test]
fn test_fit_degenerate_buffer_keeps_unit_zoom() {
    let mut stage = create_stage(0.0, 100.0, Mat4::IDENTITY);
    let camera = create_camera(&mut stage, 400, 300);
    assert_eq!(camera.zoom_power(), 0.0);
}

#[test]
fn test_fit_empty_viewport_keeps_unit_zoom() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let camera = create_camera(&mut stage, 0, 0);
    assert_eq!(camera.zoom_power(), 0.0);
    assert_eq!(camera.projection(), Mat4::IDENTITY);
}

#[test]
fn test_fit_resets_previous_zoom() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    camera.zoom_at(&mut stage, Vec4::point(0.0, 0.0), 7.0).unwrap();
    camera.fit_to_viewport(&mut stage).unwrap();
    assert_eq!(camera.zoom_power(), 4.0);
}

#[test]
fn test_fit_publishes_pose_for_next_zoom() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    camera.on_mouse_drag(&mut stage, 40.0, 20.0).unwrap();
    camera.zoom_at(&mut stage, Vec4::point(0.0, 0.0), 6.0).unwrap();
    stage.node_mut(camera.node()).unwrap().take_render_request();

    camera.fit_to_viewport(&mut stage).unwrap();
    assert!(stage.node(camera.node()).unwrap().render_requested());
    assert_pure_scale(&camera, &stage);

    let before = camera.current_center(&stage).unwrap();
    camera.zoom_at(&mut stage, Vec4::point(0.0, 0.0), 1.0).unwrap();
    let after = camera.current_center(&stage).unwrap();
    assert!(approx_eq(after.0, before.0), "x: {} -> {}", before.0, after.0);
    assert!(approx_eq(after.1, before.1), "y: {} -> {}", before.1, after.1);
}

// =============================================================================
// Projection
// =============================================================================

#[test]
fn test_resize_builds_pixel_projection() {
    let mut camera = Camera::new(dummy_id(), dummy_id(), CameraSettings::default());
    camera.resize(800, 600);
    let projection = camera.projection();
    assert!(approx_eq(projection.get(0, 0), 2.0 / 800.0));
    assert!(approx_eq(projection.get(1, 1), 2.0 / 600.0));
    assert_eq!(camera.viewport_size(), (800, 600));
}

#[test]
fn test_resize_is_idempotent() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    camera.move_to(&mut stage, 30.0, 40.0).unwrap();

    camera.resize(640, 480);
    let first = camera.clone();
    camera.resize(640, 480);

    assert_eq!(camera.projection(), first.projection());
    assert_eq!(camera.pan(), first.pan());
    assert_eq!(camera.zoom_power(), first.zoom_power());
    assert_eq!(camera.viewport_size(), first.viewport_size());
}

#[test]
fn test_resize_to_zero_keeps_projection() {
    let mut camera = Camera::new(dummy_id(), dummy_id(), CameraSettings::default());
    camera.resize(800, 600);
    let before = camera.projection();
    camera.resize(0, 600);
    assert_eq!(camera.projection(), before);
    assert_eq!(camera.viewport_size(), (0, 600));
}

fn dummy_id() -> NodeId {
    let mut stage = Stage::new();
    stage.add_node("dummy", SceneNode::new()).unwrap()
}

// =============================================================================
// Anchored zoom
// =============================================================================

#[test]
fn test_zoom_keeps_anchor_fixed() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    camera.on_mouse_drag(&mut stage, 25.0, -10.0).unwrap();

    // NDC (0.5, -0.25) is (100, -18.75) pixels from the center of a 400x150 view
    let anchor_ndc = Vec4::point(0.5, -0.25);
    let anchor_screen = (100.0, -18.75);
    let world = world_under(&camera, anchor_screen);

    camera.zoom_at(&mut stage, anchor_ndc, 3.0).unwrap();

    let after = screen_of(&camera, world);
    assert!(approx_eq(after.0, anchor_screen.0));
    assert!(approx_eq(after.1, anchor_screen.1));
    assert_eq!(camera.zoom_power(), 7.0);
    assert_pure_scale(&camera, &stage);
}

#[test]
fn test_zoom_round_trip_restores_state() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    camera.move_to(&mut stage, 60.0, 20.0).unwrap();

    let anchor = Vec4::point(-0.3, 0.7);
    let pan_before = camera.pan();
    let power_before = camera.zoom_power();
    let scale_before = camera.scale();

    camera.zoom_at(&mut stage, anchor, 2.5).unwrap();
    assert!(!approx_eq(camera.pan().0, pan_before.0));

    camera.zoom_at(&mut stage, anchor, -2.5).unwrap();
    assert!(approx_eq(camera.pan().0, pan_before.0));
    assert!(approx_eq(camera.pan().1, pan_before.1));
    assert!(approx_eq(camera.zoom_power(), power_before));
    assert!(camera.scale().approx_eq(&scale_before, 1e-5));
}

#[test]
fn test_zoom_at_center_keeps_centered_pixel() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    camera.move_to(&mut stage, 150.0, 25.0).unwrap();

    camera.zoom_at(&mut stage, Vec4::point(0.0, 0.0), -2.0).unwrap();

    let (x, y) = camera.current_center(&stage).unwrap();
    assert!(approx_eq(x, 150.0));
    assert!(approx_eq(y, 25.0));
}

#[test]
fn test_zoom_is_clamped_and_recoverable() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    let max_power = camera.settings().max_zoom_power();
    let start = camera.zoom_power();
    let center = Vec4::point(0.0, 0.0);

    camera.zoom_at(&mut stage, center, 915.0).unwrap();
    assert_eq!(camera.zoom_power(), max_power);
    assert!(camera.compute_zoom().is_finite());
    assert_pure_scale(&camera, &stage);

    // Already at the limit
    camera.zoom_at(&mut stage, center, 1.0).unwrap();
    assert_eq!(camera.zoom_power(), max_power);

    camera.zoom_at(&mut stage, center, start - max_power).unwrap();
    assert_eq!(camera.zoom_power(), start);
    camera.zoom_at(&mut stage, center, -1.0).unwrap();
    assert_eq!(camera.zoom_power(), start - 1.0);

    let (x, y) = camera.current_center(&stage).unwrap();
    assert!(approx_eq(x, 100.0));
    assert!(approx_eq(y, 50.0));

    camera.zoom_at(&mut stage, center, -915.0).unwrap();
    assert_eq!(camera.zoom_power(), -max_power);
    assert!(camera.scale().get(0, 0).is_finite());
    camera.move_to(&mut stage, 100.0, 50.0).unwrap();
}

#[test]
fn test_non_finite_zoom_step_is_ignored() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    camera.zoom_at(&mut stage, Vec4::point(0.0, 0.0), f32::NAN).unwrap();
    camera.zoom_at(&mut stage, Vec4::point(0.0, 0.0), f32::INFINITY).unwrap();
    assert_eq!(camera.zoom_power(), 4.0);
}

#[test]
fn test_repeated_zoom_keeps_pure_scale() {
    let mut stage = create_stage(640.0, 480.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 800, 600);
    for i in 0..25 {
        let anchor = Vec4::point((i as f32 * 0.37).sin(), (i as f32 * 0.71).cos());
        let delta = if i % 3 == 0 { -1.5 } else { 0.75 };
        camera.zoom_at(&mut stage, anchor, delta).unwrap();
        assert_pure_scale(&camera, &stage);
    }
}

// =============================================================================
// Pixel-space queries
// =============================================================================

#[test]
fn test_move_to_then_current_center() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);

    for &(x, y) in &[(0.0, 0.0), (100.0, 50.0), (200.0, 100.0), (13.5, 87.25)] {
        camera.move_to(&mut stage, x, y).unwrap();
        let (cx, cy) = camera.current_center(&stage).unwrap();
        assert!(approx_eq(cx, x), "x: expected {}, got {}", x, cx);
        assert!(approx_eq(cy, y), "y: expected {}, got {}", y, cy);
        assert_pure_scale(&camera, &stage);
    }
}

#[test]
fn test_center_recovery_with_rotated_buffer() {
    let mut stage = create_stage(120.0, 80.0, Mat4::quarter_turns(-1));
    let mut camera = create_camera(&mut stage, 300, 300);
    camera.move_to(&mut stage, 10.0, 70.0).unwrap();
    let (x, y) = camera.current_center(&stage).unwrap();
    assert!(approx_eq(x, 10.0));
    assert!(approx_eq(y, 70.0));
}

#[test]
fn test_buffer_center_means_zero_pan() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    camera.move_to(&mut stage, 100.0, 50.0).unwrap();
    assert_eq!(camera.pan(), (0.0, 0.0));
}

#[test]
fn test_recenter_resets_pan_and_zoom() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    camera.on_mouse_drag(&mut stage, 40.0, 40.0).unwrap();
    camera.zoom_at(&mut stage, Vec4::point(0.2, 0.2), 3.0).unwrap();

    camera.recenter(&mut stage).unwrap();
    assert_eq!(camera.pan(), (0.0, 0.0));
    assert_eq!(camera.zoom_power(), 4.0);
    assert_pure_scale(&camera, &stage);
}

// =============================================================================
// Discrete input
// =============================================================================

#[test]
fn test_key_without_modifier_is_ignored() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    let keyboard = held(&[Key::Left], Modifiers::NONE);

    assert_eq!(
        camera.on_key_event(&mut stage, &keyboard).unwrap(),
        EventResponse::Ignored
    );
    assert_eq!(camera.tick(&mut stage, &keyboard).unwrap(), EventResponse::Ignored);
    assert_eq!(camera.pan(), (0.0, 0.0));
}

#[test]
fn test_modifier_arrow_pans_one_step() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    let keyboard = held(&[Key::Left], Modifiers::CTRL);

    assert!(camera.on_key_event(&mut stage, &keyboard).unwrap().is_consumed());
    // The key press itself only swallows the arrow
    assert_eq!(camera.pan(), (0.0, 0.0));

    let residual = camera.scale().translation_xy();
    assert!(camera.tick(&mut stage, &keyboard).unwrap().is_consumed());
    assert_eq!(camera.pan(), (1.0 - residual.0, 0.0 - residual.1));
    assert_pure_scale(&camera, &stage);
}

#[test]
fn test_diagonal_pan() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    let keyboard = held(&[Key::Up, Key::Right], Modifiers::CTRL);

    camera.tick(&mut stage, &keyboard).unwrap();
    camera.tick(&mut stage, &keyboard).unwrap();
    assert_eq!(camera.pan(), (-2.0, 2.0));
}

#[test]
fn test_modifier_without_direction_is_ignored() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    let keyboard = held(&[Key::Char('a')], Modifiers::CTRL);

    assert_eq!(
        camera.on_key_event(&mut stage, &keyboard).unwrap(),
        EventResponse::Ignored
    );
    assert_eq!(camera.tick(&mut stage, &keyboard).unwrap(), EventResponse::Ignored);
}

#[test]
fn test_keyboard_zoom_steps() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    let start = camera.zoom_power();

    let zoom_in = held(&[Key::Plus], Modifiers::CTRL);
    assert!(camera.on_key_event(&mut stage, &zoom_in).unwrap().is_consumed());
    assert_eq!(camera.zoom_power(), start + 1.0);

    let zoom_out = held(&[Key::Minus], Modifiers::CTRL);
    camera.on_key_event(&mut stage, &zoom_out).unwrap();
    camera.on_key_event(&mut stage, &zoom_out).unwrap();
    assert_eq!(camera.zoom_power(), start - 1.0);
}

#[test]
fn test_recenter_key() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    camera.on_mouse_drag(&mut stage, 5.0, 5.0).unwrap();

    let keyboard = held(&[Key::Home], Modifiers::CTRL);
    assert!(camera.on_key_event(&mut stage, &keyboard).unwrap().is_consumed());
    assert_eq!(camera.pan(), (0.0, 0.0));
}

#[test]
fn test_scroll_at_canvas_center_matches_center_zoom() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut by_scroll = create_camera(&mut stage, 400, 150);
    by_scroll.move_to(&mut stage, 20.0, 30.0).unwrap();
    let mut by_key = by_scroll.clone();

    let mut input = CanvasInput::new(400, 150);
    input.set_mouse_position(Point::new(200.0, 75.0));
    by_scroll.on_scroll(&mut stage, 1.0, &input).unwrap();
    // Both cameras drive the same node, so restore the starting pose first
    by_key.recompute_pose(&mut stage).unwrap();
    by_key.zoom_at(&mut stage, Vec4::point(0.0, 0.0), 1.0).unwrap();

    assert!(approx_eq(by_scroll.pan().0, by_key.pan().0));
    assert!(approx_eq(by_scroll.pan().1, by_key.pan().1));
    assert_eq!(by_scroll.zoom_power(), by_key.zoom_power());
}

#[test]
fn test_scroll_keeps_cursor_point_fixed() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);

    // Pixel (300, 30) is (100, 45) from the center with y pointing up
    let mut input = CanvasInput::new(400, 150);
    input.set_mouse_position(Point::new(300.0, 30.0));
    let world = world_under(&camera, (100.0, 45.0));

    camera.on_scroll(&mut stage, 2.0, &input).unwrap();
    let after = screen_of(&camera, world);
    assert!(approx_eq(after.0, 100.0));
    assert!(approx_eq(after.1, 45.0));
}

#[test]
fn test_scroll_on_empty_viewport_is_ignored() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    let power = camera.zoom_power();
    camera.on_scroll(&mut stage, 1.0, &CanvasInput::new(0, 0)).unwrap();
    assert_eq!(camera.zoom_power(), power);
}

#[test]
fn test_drag_adds_raw_pixels() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    camera.zoom_at(&mut stage, Vec4::point(0.0, 0.0), 5.0).unwrap();
    let (x, y) = camera.pan();

    camera.on_mouse_drag(&mut stage, 12.0, -3.0).unwrap();
    assert_eq!(camera.pan(), (x + 12.0, y - 3.0));
}

#[test]
fn test_view_projection_maps_world_to_ndc() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    camera.on_mouse_drag(&mut stage, 30.0, -15.0).unwrap();

    let world = (12.0, -7.0);
    let (sx, sy) = screen_of(&camera, world);
    let ndc = camera.view_projection() * Vec4::point(world.0, world.1);
    assert!(approx_eq(ndc.x, sx / 200.0));
    assert!(approx_eq(ndc.y, sy / 75.0));

    // Inverse of the published pose, then the projection
    let pose_inv = camera.view_pose().inverse().unwrap();
    assert!(camera.view_projection().approx_eq(&(camera.projection() * pose_inv), 1e-5));

    let uniform = camera.view_uniform();
    assert_eq!(uniform, TransformUniform::from_mat4(&camera.view_projection()));
}

#[test]
fn test_pixel_to_ndc() {
    let ndc = pixel_to_ndc(Point::new(0.0, 0.0), 400, 200);
    assert_eq!((ndc.x, ndc.y), (-1.0, 1.0));
    let ndc = pixel_to_ndc(Point::new(400.0, 200.0), 400, 200);
    assert_eq!((ndc.x, ndc.y), (1.0, -1.0));
    let ndc = pixel_to_ndc(Point::new(200.0, 100.0), 400, 200);
    assert_eq!((ndc.x, ndc.y), (0.0, 0.0));
}

// =============================================================================
// Collaborators
// =============================================================================

#[test]
fn test_missing_buffer_node_is_an_error() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    stage.remove_node(camera.buffer());

    assert!(matches!(
        camera.fit_to_viewport(&mut stage),
        Err(CameraError::MissingBufferNode(_))
    ));
    assert!(matches!(
        camera.move_to(&mut stage, 1.0, 1.0),
        Err(CameraError::MissingBufferNode(_))
    ));
    assert!(matches!(
        camera.current_center(&stage),
        Err(CameraError::MissingBufferNode(_))
    ));
    // Zooming does not need the buffer
    assert!(camera.zoom_at(&mut stage, Vec4::point(0.0, 0.0), 1.0).is_ok());
}

#[test]
fn test_missing_buffer_descriptor_is_an_error() {
    let mut stage = Stage::new();
    stage.add_node(BUFFER_NODE_NAME, SceneNode::new()).unwrap();
    stage.add_node(CAMERA_NODE_NAME, SceneNode::new()).unwrap();
    let mut camera = Camera::attach(&stage, CameraSettings::default()).unwrap();

    let result = camera.initialize(&mut stage, &CanvasInput::new(100, 100));
    assert!(matches!(result, Err(CameraError::MissingBufferDescriptor(_))));
}

#[test]
fn test_attach_requires_named_nodes() {
    let stage = Stage::new();
    assert!(matches!(
        Camera::attach(&stage, CameraSettings::default()),
        Err(CameraError::Scene(_))
    ));
}

#[test]
fn test_missing_camera_node_is_an_error() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    stage.remove_node(camera.node());
    assert!(matches!(
        camera.on_mouse_drag(&mut stage, 1.0, 1.0),
        Err(CameraError::MissingCameraNode(_))
    ));
}

#[test]
fn test_pose_publish_requests_render() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    let mut camera = create_camera(&mut stage, 400, 150);
    let node = camera.node();
    stage.node_mut(node).unwrap().take_render_request();

    camera.on_mouse_drag(&mut stage, 1.0, 0.0).unwrap();
    assert!(stage.node_mut(node).unwrap().take_render_request());
}

#[test]
fn test_sync_from_copies_view() {
    let mut stage = create_stage(200.0, 100.0, Mat4::IDENTITY);
    stage.add_node("camera-2", SceneNode::new()).unwrap();
    let mut leader = create_camera(&mut stage, 400, 150);
    leader.move_to(&mut stage, 12.0, 34.0).unwrap();
    leader.zoom_at(&mut stage, Vec4::point(0.1, 0.1), 2.0).unwrap();

    let follower_node = stage.find_node("camera-2").unwrap();
    let settings = CameraSettings::new(2.0, 5.0, KeyBindings::default());
    let mut follower = Camera::new(follower_node, leader.buffer(), settings);
    follower.sync_from(&leader, &mut stage).unwrap();

    assert_eq!(follower.pan(), leader.pan());
    assert_eq!(follower.zoom_power(), leader.zoom_power());
    assert_eq!(follower.zoom(), leader.zoom());
    assert_eq!(follower.settings().pan_step(), leader.settings().pan_step());
    assert_eq!(follower.viewport_size(), leader.viewport_size());
    assert_eq!(stage.node(follower_node).unwrap().pose(), leader.view_pose());
}

#[test]
fn test_settings_reject_bad_zoom_factor() {
    let settings = CameraSettings::new(0.9, -1.0, KeyBindings::default());
    assert_eq!(settings.zoom_factor(), DEFAULT_ZOOM_FACTOR);
    assert_eq!(settings.pan_step(), DEFAULT_PAN_STEP);

    let settings = CameraSettings::new(2.0, 4.0, KeyBindings::default());
    assert_eq!(settings.zoom_factor(), 2.0);
    assert_eq!(settings.pan_step(), 4.0);
}
