use crate::session::Session;
use std::error::Error;
use winit::window::Window;

/// Hooks an embedding application implements to populate and steer a session.
///
/// `init` runs once the rendering surface exists, which is where content that
/// pairs bodies with nodes belongs. `update` runs right before every tick.
#[allow(unused)]
pub trait SceneDriver: Sized {
    fn init(&mut self, session: &mut Session, window: &Window) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    fn update(&mut self, session: &mut Session, window: &Window) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}
