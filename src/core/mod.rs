mod node;
mod transform;

pub use node::*;
pub use transform::*;
