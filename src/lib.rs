//! `tumble` keeps a rendered scene in lockstep with a rigid-body simulation.
//!
//! The crate revolves around one loop: each tick advances the physics world,
//! copies every tracked body's pose onto its paired visual node, and hands the
//! scene to a render target. Everything a running scene needs lives in a
//! [`Session`] so there is no ambient global state.

pub mod core;
pub mod physics;
pub mod rendering;
pub mod scene;
pub mod session;
pub mod sync;
pub mod windowing;

pub use session::{Session, TickOutcome};
pub use sync::{SimulationClock, StepMode, SyncConfig, TrackedPair};

pub use ::log;
pub use ::nalgebra;
pub use ::rapier3d;
pub use ::winit;
