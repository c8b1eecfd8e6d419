use crate::physics::{BodyDesc, BodyShape};
use nalgebra::{UnitQuaternion, Vector3};
use rapier3d::prelude::*;

const EARTH_GRAVITY: f32 = 9.81;

/// Owns the complete rapier3d simulation state for one session.
///
/// The field set mirrors what the pipeline's `step` call needs; everything is
/// public so advanced callers can reach the raw sets.
pub struct PhysicsSimulator {
    pub gravity: Vector3<f32>,
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: Box<dyn BroadPhase>,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,
}

impl Default for PhysicsSimulator {
    fn default() -> Self {
        PhysicsSimulator {
            gravity: Vector3::new(0.0, -EARTH_GRAVITY, 0.0),
            rigid_body_set: RigidBodySet::default(),
            collider_set: ColliderSet::default(),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::default(),
            island_manager: IslandManager::default(),
            broad_phase: Box::<DefaultBroadPhase>::default(),
            narrow_phase: NarrowPhase::default(),
            impulse_joint_set: ImpulseJointSet::default(),
            multibody_joint_set: MultibodyJointSet::default(),
            ccd_solver: CCDSolver::default(),
            query_pipeline: QueryPipeline::default(),
        }
    }
}

impl PhysicsSimulator {
    /// Builds a body plus its collider from a descriptor and inserts both.
    pub fn spawn(&mut self, desc: &BodyDesc) -> RigidBodyHandle {
        let builder = if desc.is_static() {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic()
        };
        let body = builder
            .translation(desc.position)
            .rotation(desc.orientation.scaled_axis())
            .linvel(desc.linear_velocity)
            .build();
        let handle = self.rigid_body_set.insert(body);

        let collider = match desc.shape {
            BodyShape::Cuboid { hx, hy, hz } => ColliderBuilder::cuboid(hx, hy, hz),
            BodyShape::Ball { radius } => ColliderBuilder::ball(radius),
        };
        let collider = if desc.is_static() {
            collider.build()
        } else {
            collider.mass(desc.mass).build()
        };
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);

        if let Some(impulse) = desc.local_impulse {
            if let Some(body) = self.rigid_body_set.get_mut(handle) {
                let world_impulse = body.rotation() * impulse;
                body.apply_impulse(world_impulse, true);
            }
        }

        handle
    }

    /// Advances the simulation by `dt` seconds, split into `substeps` equal
    /// pipeline steps. A substep count of zero is treated as one.
    pub fn advance(&mut self, dt: f32, substeps: u32) {
        let substeps = substeps.max(1);
        self.integration_parameters.dt = dt / substeps as f32;

        for _ in 0..substeps {
            self.physics_pipeline.step(
                &self.gravity,
                &self.integration_parameters,
                &mut self.island_manager,
                self.broad_phase.as_mut(),
                &mut self.narrow_phase,
                &mut self.rigid_body_set,
                &mut self.collider_set,
                &mut self.impulse_joint_set,
                &mut self.multibody_joint_set,
                &mut self.ccd_solver,
                Some(&mut self.query_pipeline),
                &(), // no hooks
                &(), // no events
            );
        }
        self.query_pipeline.update(&self.collider_set)
    }

    /// Current pose of a body, or `None` while the body does not exist yet.
    ///
    /// Bodies whose handles were produced by an asynchronous load that has
    /// not completed fall into the `None` case; callers skip those.
    pub fn pose(&self, handle: RigidBodyHandle) -> Option<(Vector3<f32>, UnitQuaternion<f32>)> {
        let body = self.rigid_body_set.get(handle)?;
        Some((*body.translation(), *body.rotation()))
    }

    pub fn body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    pub fn body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{BodyDesc, BodyShape};

    const SHAPE: BodyShape = BodyShape::Ball { radius: 0.5 };

    #[test]
    fn static_body_ignores_gravity() {
        let mut sim = PhysicsSimulator::default();
        let handle = sim.spawn(&BodyDesc::fixed(SHAPE).at(0.0, 3.0, 0.0));

        sim.advance(1.0 / 60.0, 1);

        let (pos, _) = sim.pose(handle).unwrap();
        assert_eq!(pos, Vector3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn dynamic_body_falls() {
        let mut sim = PhysicsSimulator::default();
        let handle = sim.spawn(&BodyDesc::dynamic(5.0, SHAPE).at(0.0, 3.0, 0.0));

        for _ in 0..10 {
            sim.advance(1.0 / 60.0, 1);
        }

        let (pos, _) = sim.pose(handle).unwrap();
        assert!(pos.y < 3.0);
    }

    #[test]
    fn substeps_cover_the_same_interval() {
        let mut coarse = PhysicsSimulator::default();
        let mut fine = PhysicsSimulator::default();
        let a = coarse.spawn(&BodyDesc::dynamic(1.0, SHAPE).at(0.0, 10.0, 0.0));
        let b = fine.spawn(&BodyDesc::dynamic(1.0, SHAPE).at(0.0, 10.0, 0.0));

        coarse.advance(0.1, 1);
        fine.advance(0.1, 10);

        let (pos_a, _) = coarse.pose(a).unwrap();
        let (pos_b, _) = fine.pose(b).unwrap();
        // Integration error differs, but both must have fallen from rest.
        assert!(pos_a.y < 10.0);
        assert!(pos_b.y < 10.0);
    }

    #[test]
    fn missing_body_has_no_pose() {
        let sim = PhysicsSimulator::default();
        assert!(sim.pose(RigidBodyHandle::invalid()).is_none());
    }

    #[test]
    fn spawn_applies_initial_velocity() {
        let mut sim = PhysicsSimulator::default();
        let handle = sim.spawn(&BodyDesc::dynamic(5.0, SHAPE).with_velocity(2.0, 2.0, 2.0));
        let body = sim.body(handle).unwrap();
        assert_eq!(*body.linvel(), Vector3::new(2.0, 2.0, 2.0));
    }
}
