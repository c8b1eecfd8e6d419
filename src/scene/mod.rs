//! The [`Scene`] stores all visual nodes plus the configuration an external
//! renderer needs: camera parameters, lights and the skybox. It deliberately
//! knows nothing about physics; pairing nodes with bodies is the
//! [`Session`](crate::session::Session)'s job.

mod lighting;
mod skybox;

pub use lighting::*;
pub use skybox::*;

use crate::core::{NodeId, SceneNode};
use nalgebra::{Matrix4, Perspective3, Point3, Vector3};
use std::collections::HashMap;

/// Perspective camera configuration.
///
/// Field values are plain data; the projection matrix is derived on demand so
/// a window resize only has to touch `aspect`.
#[derive(Debug, Clone)]
pub struct Camera {
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
    pub position: Vector3<f32>,
    pub target: Vector3<f32>,
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            fov_y_deg: 60.0,
            aspect: 4.0 / 3.0,
            znear: 0.1,
            zfar: 1000.0,
            position: Vector3::new(0.0, 2.0, 10.0),
            target: Vector3::zeros(),
        }
    }
}

impl Camera {
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Perspective3::new(
            self.aspect,
            self.fov_y_deg.to_radians(),
            self.znear,
            self.zfar,
        )
        .to_homogeneous()
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(
            &Point3::from(self.position),
            &Point3::from(self.target),
            &Vector3::y_axis(),
        )
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }
}

/// All visual state of one running scene.
pub struct Scene {
    nodes: HashMap<NodeId, SceneNode>,
    next_node_id: NodeId,
    pub camera: Camera,
    pub lighting: Lighting,
    pub skybox: Option<Skybox>,
}

impl Default for Scene {
    fn default() -> Self {
        Scene::new()
    }
}

impl Scene {
    /// Creates an empty scene with a default camera and lighting rig.
    pub fn new() -> Self {
        Scene {
            nodes: HashMap::new(),
            next_node_id: NodeId(0),
            camera: Camera::default(),
            lighting: Lighting::default(),
            skybox: None,
        }
    }

    /// Creates a fresh node and returns its id.
    pub fn new_node<S: Into<String>>(&mut self, name: S) -> NodeId {
        let id = self.next_node_id;
        self.next_node_id.0 += 1;

        self.nodes.insert(id, SceneNode::new(id, name));

        id
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }

    pub fn find_node_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.name == name)
            .map(|(id, _)| *id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_findable() {
        let mut scene = Scene::new();
        let id = scene.new_node("Ground");
        assert_eq!(scene.find_node_by_name("Ground"), Some(id));
        assert_eq!(scene.node_count(), 1);
        assert!(scene.node(id).is_some());
    }

    #[test]
    fn node_ids_are_unique() {
        let mut scene = Scene::new();
        let a = scene.new_node("a");
        let b = scene.new_node("b");
        assert_ne!(a, b);
    }
}
