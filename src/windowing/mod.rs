//! Window bring-up and the host tick loop.
//!
//! The host runtime delivers per-frame callbacks; [`App`] turns each one into
//! exactly one [`Session`](crate::session::Session) tick and only asks for
//! the next frame while the session wants to continue.

mod app;
mod driver;

pub use app::*;
pub use driver::*;
