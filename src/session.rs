//! One running scene: visual state, simulation state, and the pairs that tie
//! them together. A [`Session`] replaces ambient globals; whoever drives the
//! tick loop owns it and passes it around explicitly.

use crate::core::NodeId;
use crate::physics::{BodyDesc, PhysicsSimulator};
use crate::rendering::RenderTarget;
use crate::scene::Scene;
use crate::sync::{SimulationClock, SyncConfig, TrackedPair, SUBSTEP_LIMIT};
use log::{debug, error};
use rapier3d::prelude::RigidBodyHandle;
use smallvec::SmallVec;
use snafu::{ensure, Snafu};
use std::collections::HashSet;
use std::time::Instant;

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(context(suffix(Err)))]
pub enum TrackError {
    #[snafu(display("Node {node:?} is already driven by another body"))]
    NodeAlreadyTracked { node: NodeId },

    #[snafu(display("Node {node:?} does not exist in this scene"))]
    NodeMissing { node: NodeId },
}

/// What the caller should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a halted session must not be re-scheduled"]
pub enum TickOutcome {
    /// Schedule the next tick.
    Continue,
    /// The render target failed; stop re-scheduling.
    Halt,
}

/// The full context of a running scene.
///
/// Pairs live for the whole session; there is no removal path. Tearing the
/// session down drops the scene, the physics world and all pairs together.
pub struct Session {
    pub scene: Scene,
    pub physics: PhysicsSimulator,
    pairs: SmallVec<[TrackedPair; 8]>,
    driven_nodes: HashSet<NodeId>,
    clock: SimulationClock,
    substeps: u32,
}

impl Session {
    pub fn new(scene: Scene, config: SyncConfig) -> Self {
        Self::new_at(scene, config, Instant::now())
    }

    /// Like [`Session::new`], with the clock origin pinned to `origin` so
    /// ticks can be driven deterministically.
    pub fn new_at(scene: Scene, config: SyncConfig, origin: Instant) -> Self {
        Session {
            scene,
            physics: PhysicsSimulator::default(),
            pairs: SmallVec::new(),
            driven_nodes: HashSet::new(),
            clock: SimulationClock::with_origin(config.mode, origin),
            substeps: config.substeps.clamp(1, SUBSTEP_LIMIT),
        }
    }

    /// Pairs `body` with `node` so every tick copies the body's pose onto the
    /// node. A node can be driven by at most one body.
    pub fn track(&mut self, body: RigidBodyHandle, node: NodeId) -> Result<(), TrackError> {
        ensure!(self.scene.node(node).is_some(), NodeMissingErr { node });
        ensure!(
            !self.driven_nodes.contains(&node),
            NodeAlreadyTrackedErr { node }
        );

        self.driven_nodes.insert(node);
        self.pairs.push(TrackedPair { body, node });

        Ok(())
    }

    /// Creates a node, spawns the body its descriptor declares, and tracks
    /// the pair. This is the path loaded content takes: the load result says
    /// which nodes are physics-bound by attaching a [`BodyDesc`].
    pub fn spawn_tracked<S: Into<String>>(
        &mut self,
        name: S,
        desc: &BodyDesc,
    ) -> Result<(NodeId, RigidBodyHandle), TrackError> {
        let node = self.scene.new_node(name);
        if let Some(n) = self.scene.node_mut(node) {
            n.transform.set_position_vec(desc.position);
            n.transform.set_rotation(desc.orientation);
        }

        let body = self.physics.spawn(desc);
        self.track(body, node)?;

        Ok((node, body))
    }

    pub fn pairs(&self) -> &[TrackedPair] {
        &self.pairs
    }

    /// Runs one tick against the current wall time.
    pub fn tick(&mut self, target: &mut dyn RenderTarget) -> TickOutcome {
        self.tick_at(Instant::now(), target)
    }

    /// Runs one tick as if it happened at `now`.
    ///
    /// One tick advances the simulation by whatever the clock owes, copies
    /// every tracked body's pose onto its node, and renders. The caller
    /// schedules the next tick only while this returns
    /// [`TickOutcome::Continue`].
    pub fn tick_at(&mut self, now: Instant, target: &mut dyn RenderTarget) -> TickOutcome {
        let steps = self.clock.tick_at(now);
        for _ in 0..steps.count {
            self.physics.advance(steps.step, self.substeps);
        }

        self.sync_pairs();

        match target.render(&self.scene) {
            Ok(()) => TickOutcome::Continue,
            Err(e) => {
                error!("Render target failed, stopping the tick loop: {e}");
                TickOutcome::Halt
            }
        }
    }

    /// Copies each tracked body's position and orientation verbatim onto its
    /// node. Pairs whose body has no pose yet are skipped for this tick.
    fn sync_pairs(&mut self) {
        for pair in &self.pairs {
            let Some((position, rotation)) = self.physics.pose(pair.body) else {
                debug!("Body of node {:?} has no pose yet, skipping", pair.node);
                continue;
            };
            let Some(node) = self.scene.node_mut(pair.node) else {
                continue;
            };

            node.transform.set_position_vec(position);
            node.transform.set_rotation(rotation);
        }
    }
}
