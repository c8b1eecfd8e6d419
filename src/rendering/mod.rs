//! Where a ticked scene gets presented.
//!
//! Drawing scene contents is an external collaborator's job; this module owns
//! the seam. [`WindowSurface`] does the real surface plumbing against a
//! window, [`HeadlessTarget`] lets sessions tick without one.

mod headless;
mod surface;

pub use headless::*;
pub use surface::*;

use crate::scene::Scene;
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)))]
pub enum RenderError {
    #[snafu(display("Could not create the window surface: {source}"))]
    SurfaceCreation { source: wgpu::CreateSurfaceError },

    #[snafu(display("No graphics adapter accepted the window surface"))]
    NoAdapter,

    #[snafu(display("Could not acquire a graphics device: {source}"))]
    NoDevice { source: wgpu::RequestDeviceError },

    #[snafu(display("The rendering surface was lost: {source}"))]
    SurfaceLost { source: wgpu::SurfaceError },

    #[snafu(display("Render target refused the frame: {reason}"))]
    TargetRejected { reason: String },
}

/// A sink for finished ticks. Implementations present the scene however they
/// see fit; returning an error halts the tick loop.
pub trait RenderTarget {
    fn render(&mut self, scene: &Scene) -> Result<(), RenderError>;
}
