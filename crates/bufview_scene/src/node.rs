//! Scene nodes: a pose plus a component table.

use std::any::TypeId;
use std::collections::HashMap;

use bufview_math::Mat4;

use crate::component::Component;

/// Anything whose placement can be read and written by a controller.
pub trait PoseProvider {
    fn pose(&self) -> Mat4;
    fn set_pose(&mut self, pose: Mat4);
    /// Ask the render loop to redraw on its next tick.
    fn request_render_update(&mut self);
}

/// A positioned object in the stage.
#[derive(Debug, Default)]
pub struct SceneNode {
    pose: Mat4,
    components: HashMap<TypeId, Box<dyn Component>>,
    render_requested: bool,
}

impl SceneNode {
    /// Create a node at the identity pose with no components.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node at the given pose.
    pub fn with_pose(pose: Mat4) -> Self {
        Self {
            pose,
            ..Self::default()
        }
    }

    /// Builder-style component attachment.
    pub fn with_component<C: Component>(mut self, component: C) -> Self {
        self.attach(component);
        self
    }

    /// Attach a component, returning the one of the same type it replaces.
    pub fn attach<C: Component>(&mut self, component: C) -> Option<Box<dyn Component>> {
        log::trace!("Attaching '{}' component", component.kind());
        self.components.insert(TypeId::of::<C>(), Box::new(component))
    }

    /// Detach and return the component of type `C`.
    pub fn detach<C: Component>(&mut self) -> Option<C> {
        let boxed = self.components.remove(&TypeId::of::<C>())?;
        boxed.into_any().downcast::<C>().ok().map(|c| *c)
    }

    pub fn component<C: Component>(&self) -> Option<&C> {
        self.components
            .get(&TypeId::of::<C>())
            .and_then(|c| c.as_any().downcast_ref::<C>())
    }

    pub fn has_component<C: Component>(&self) -> bool {
        self.components.contains_key(&TypeId::of::<C>())
    }

    /// Return and clear the pending render request.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    pub fn render_requested(&self) -> bool {
        self.render_requested
    }
}

impl PoseProvider for SceneNode {
    fn pose(&self) -> Mat4 {
        self.pose
    }

    fn set_pose(&mut self, pose: Mat4) {
        self.pose = pose;
    }

    fn request_render_update(&mut self) {
        self.render_requested = true;
    }
}
