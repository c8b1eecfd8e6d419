use crate::rendering::{RenderError, RenderTarget, TargetRejectedErr};
use crate::scene::Scene;
use snafu::ensure;

/// Render target that draws nothing.
///
/// Sessions can tick against it without a window, which is what the test
/// suite does. It can also be armed to start failing after a number of
/// frames to exercise the halt path.
#[derive(Debug, Default)]
pub struct HeadlessTarget {
    frames: u64,
    fail_after: Option<u64>,
}

impl HeadlessTarget {
    pub fn new() -> Self {
        HeadlessTarget::default()
    }

    /// A target that accepts `frames` frames and then errors.
    pub fn failing_after(frames: u64) -> Self {
        HeadlessTarget {
            frames: 0,
            fail_after: Some(frames),
        }
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderTarget for HeadlessTarget {
    fn render(&mut self, _scene: &Scene) -> Result<(), RenderError> {
        ensure!(
            self.fail_after.is_none_or(|limit| self.frames < limit),
            TargetRejectedErr {
                reason: format!("frame budget of {} exhausted", self.frames),
            }
        );

        self.frames += 1;
        Ok(())
    }
}
