use crate::rendering::WindowSurface;
use crate::session::{Session, TickOutcome};
use crate::windowing::SceneDriver;
use futures::executor::block_on;
use log::{error, info};
use std::error::Error;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalSize, Size};
use winit::error::EventLoopError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{WindowAttributes, WindowId};

pub struct App<D: SceneDriver> {
    surface: Option<WindowSurface>,
    session: Session,
    window_attributes: WindowAttributes,
    driver: D,
}

pub struct AppSettings<D: SceneDriver> {
    pub window: WindowAttributes,
    pub driver: D,
}

impl<D: SceneDriver> AppSettings<D> {
    pub fn configure(driver: D, title: &str, width: u32, height: u32) -> Self {
        AppSettings {
            window: WindowAttributes::default()
                .with_inner_size(Size::Physical(PhysicalSize { width, height }))
                .with_title(title),
            driver,
        }
    }

    /// Runs `session` under the host event loop until the window closes or a
    /// tick halts.
    pub fn run(self, session: Session) -> Result<(), Box<dyn Error>> {
        let event_loop = match EventLoop::new() {
            Err(EventLoopError::NotSupported(_)) => {
                return Err("No windowing backend found that could be used.".into());
            }
            e => e?,
        };
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App {
            surface: None,
            session,
            window_attributes: self.window,
            driver: self.driver,
        };
        event_loop.run_app(&mut app)?;

        Ok(())
    }
}

impl<D: SceneDriver> ApplicationHandler for App<D> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        info!("(Re)initializing window surface!");
        let window = match event_loop.create_window(self.window_attributes.clone()) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Could not open a window: {e}");
                event_loop.exit();
                return;
            }
        };

        let surface = match block_on(WindowSurface::new(window)) {
            Ok(surface) => surface,
            Err(e) => {
                error!("Rendering surface unavailable: {e}");
                event_loop.exit();
                return;
            }
        };

        if let Err(e) = self.driver.init(&mut self.session, surface.window()) {
            error!("Driver init hook returned: {e}");
            event_loop.exit();
            return;
        }

        let size = surface.window().inner_size();
        self.session
            .scene
            .camera
            .set_aspect(size.width as f32, size.height as f32);

        surface.window().request_redraw();
        self.surface = Some(surface);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if event_loop.exiting() {
            return;
        }

        let Some(surface) = self.surface.as_mut() else {
            error!("No surface.");
            return;
        };
        if window_id != surface.window().id() {
            return;
        }

        match event {
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.driver.update(&mut self.session, surface.window()) {
                    error!("Error happened when calling update hook: {e}");
                }

                match self.session.tick(surface) {
                    TickOutcome::Continue => surface.window().request_redraw(),
                    TickOutcome::Halt => event_loop.exit(),
                }
            }
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                surface.resize(size);
                self.session
                    .scene
                    .camera
                    .set_aspect(size.width as f32, size.height as f32);
            }
            _ => {}
        }
    }
}
