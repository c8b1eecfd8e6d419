use crate::core::Transform;

/// Identity of a [`SceneNode`] inside its [`Scene`](crate::scene::Scene).
///
/// Ids are handed out by the scene and are only meaningful for the scene that
/// created them.
#[derive(Debug, Copy, Clone, Eq, Ord, PartialOrd, PartialEq, Hash)]
#[repr(transparent)]
pub struct NodeId(pub usize);

/// A renderable object in the scene graph.
///
/// The node's pose is set for display purposes only; when a node is driven by
/// a physics body, the session overwrites the transform every tick.
pub struct SceneNode {
    pub id: NodeId,
    pub name: String,
    pub transform: Transform,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub visible: bool,
}

impl SceneNode {
    pub(crate) fn new<S: Into<String>>(id: NodeId, name: S) -> Self {
        SceneNode {
            id,
            name: name.into(),
            transform: Transform::new(),
            cast_shadow: false,
            receive_shadow: false,
            visible: true,
        }
    }
}
