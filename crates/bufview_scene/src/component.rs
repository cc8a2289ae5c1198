//! Behavior components attached to scene nodes.

use std::any::Any;
use std::fmt::Debug;

/// A capability attached to a [`SceneNode`](crate::SceneNode).
///
/// Each node holds at most one component per concrete type; lookups go
/// through the type rather than a name string.
pub trait Component: Any + Debug {
    /// Human-readable component kind, used in error messages.
    fn kind(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}
