//! Name-indexed registry of scene nodes.

use std::collections::HashMap;
use std::fmt;

use crate::component::Component;
use crate::error::{Result, SceneError};
use crate::node::SceneNode;

/// Handle to a node in a [`Stage`].
///
/// Handles are generational: once a node is removed, its handle stops
/// resolving even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    name: String,
    node: Option<SceneNode>,
}

/// Owns every scene node and resolves names to handles.
#[derive(Debug, Default)]
pub struct Stage {
    slots: Vec<Slot>,
    names: HashMap<String, NodeId>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node under a unique name.
    pub fn add_node(&mut self, name: impl Into<String>, node: SceneNode) -> Result<NodeId> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(SceneError::DuplicateName { name });
        }

        let id = match self.slots.iter().position(|slot| slot.node.is_none()) {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.generation += 1;
                slot.name = name.clone();
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    name: name.clone(),
                    node: Some(node),
                });
                NodeId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        };

        log::debug!("Added scene node '{}' as {}", name, id);
        self.names.insert(name, id);
        Ok(id)
    }

    /// Remove a node, returning it if the handle was still live.
    pub fn remove_node(&mut self, id: NodeId) -> Option<SceneNode> {
        let slot = self.live_slot_mut(id)?;
        let node = slot.node.take();
        let name = std::mem::take(&mut slot.name);
        self.names.remove(&name);
        log::debug!("Removed scene node '{}' ({})", name, id);
        node
    }

    /// Look up a node handle by name.
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// Look up a node handle by name, failing with [`SceneError::NodeNotFound`].
    pub fn require_node(&self, name: &str) -> Result<NodeId> {
        self.find_node(name).ok_or_else(|| SceneError::NodeNotFound {
            name: name.to_string(),
        })
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.live_slot_mut(id).and_then(|slot| slot.node.as_mut())
    }

    /// Resolve a handle, failing with [`SceneError::StaleHandle`].
    pub fn try_node(&self, id: NodeId) -> Result<&SceneNode> {
        self.node(id).ok_or(SceneError::StaleHandle { id })
    }

    /// Fetch a typed component from a node.
    pub fn component<C: Component>(&self, id: NodeId) -> Result<&C> {
        self.try_node(id)?
            .component::<C>()
            .ok_or(SceneError::MissingComponent {
                node: id,
                component: std::any::type_name::<C>(),
            })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn live_slot_mut(&mut self, id: NodeId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation && slot.node.is_some())
    }
}
