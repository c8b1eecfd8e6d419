//! Rigid-body simulation owned by a session.
//!
//! [`PhysicsSimulator`] wraps the rapier3d pipeline; [`BodyDesc`] is the
//! declarative spawn recipe that loaded content attaches to nodes that are
//! physics-bound. Tagging happens through these descriptors, never by
//! matching node names.

mod simulator;

pub use simulator::*;

use nalgebra::{UnitQuaternion, Vector3};

/// Collider shape attached to a spawned body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    /// A box, described by its half extents.
    Cuboid { hx: f32, hy: f32, hz: f32 },
    Ball { radius: f32 },
}

/// Spawn recipe for one rigid body.
///
/// A mass of zero makes the body static; anything else is a dynamic body with
/// that mass. The optional impulse is expressed in the body's local frame and
/// applied once at spawn time.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub mass: f32,
    pub shape: BodyShape,
    pub position: Vector3<f32>,
    pub orientation: UnitQuaternion<f32>,
    pub linear_velocity: Vector3<f32>,
    pub local_impulse: Option<Vector3<f32>>,
}

impl BodyDesc {
    /// A dynamic body with the given mass.
    pub fn dynamic(mass: f32, shape: BodyShape) -> Self {
        BodyDesc {
            mass,
            shape,
            position: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
            linear_velocity: Vector3::zeros(),
            local_impulse: None,
        }
    }

    /// A static body: infinite mass, immovable.
    pub fn fixed(shape: BodyShape) -> Self {
        BodyDesc::dynamic(0.0, shape)
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vector3::new(x, y, z);
        self
    }

    pub fn with_velocity(mut self, x: f32, y: f32, z: f32) -> Self {
        self.linear_velocity = Vector3::new(x, y, z);
        self
    }

    /// Initial orientation from an axis and an angle in radians. The axis
    /// does not need to be pre-normalized.
    pub fn with_axis_angle(mut self, axis: Vector3<f32>, angle: f32) -> Self {
        self.orientation = UnitQuaternion::from_scaled_axis(axis.normalize() * angle);
        self
    }

    pub fn with_local_impulse(mut self, impulse: Vector3<f32>) -> Self {
        self.local_impulse = Some(impulse);
        self
    }

    pub fn is_static(&self) -> bool {
        self.mass == 0.0
    }
}
