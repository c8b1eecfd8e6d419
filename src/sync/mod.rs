//! The data model behind the frame synchronizer: which body drives which
//! node, and how wall time turns into physics steps.

mod clock;

pub use clock::*;

use crate::core::NodeId;
use rapier3d::prelude::RigidBodyHandle;
use std::time::Duration;

/// Most sub-stepping a tick will perform. Matches the upper bound physics
/// engines accept for their own sub-step loops.
pub const SUBSTEP_LIMIT: u32 = 10;

/// Binding between one rigid body and the visual node it drives.
///
/// Pairs are one-to-one, established at creation time and never reassigned.
/// The session guarantees a node is never written by more than one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedPair {
    pub body: RigidBodyHandle,
    pub node: NodeId,
}

/// How a session advances the simulation each tick.
#[derive(Debug, Clone, Copy)]
pub struct SyncConfig {
    pub mode: StepMode,
    /// Solver sub-iterations per physics step, clamped to
    /// `1..=`[`SUBSTEP_LIMIT`] when the session runs.
    pub substeps: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            mode: StepMode::Fixed {
                timestep: Duration::from_millis(1000 / 60),
            },
            substeps: 1,
        }
    }
}

impl SyncConfig {
    pub fn measured() -> Self {
        SyncConfig {
            mode: StepMode::Measured,
            ..SyncConfig::default()
        }
    }

    pub fn with_substeps(mut self, substeps: u32) -> Self {
        self.substeps = substeps.clamp(1, SUBSTEP_LIMIT);
        self
    }
}
