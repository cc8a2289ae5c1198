use thiserror::Error;

use crate::stage::NodeId;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("No scene node named '{name}'")]
    NodeNotFound { name: String },

    #[error("Scene node {id} was removed from the stage")]
    StaleHandle { id: NodeId },

    #[error("A scene node named '{name}' already exists")]
    DuplicateName { name: String },

    #[error("Scene node {node} has no '{component}' component")]
    MissingComponent {
        node: NodeId,
        component: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, SceneError>;
