//! Window lifecycle: winit event loop, GPU surface ownership, event routing.

mod runtime;

pub use runtime::{Runtime, ViewerConfig};
