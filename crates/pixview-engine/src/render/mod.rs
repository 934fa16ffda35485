//! Textured-quad rendering.
//!
//! [`PaintSurface`] is the seam between the transform pipeline and the GPU:
//! the coordinator composes matrices and issues abstract surface calls;
//! [`QuadSurface`] realizes them on wgpu. Tests drive the coordinator through
//! a recording mock instead of a device.

mod coordinator;
mod quad;
mod surface;

#[cfg(test)]
pub(crate) mod mock;

pub use coordinator::RenderCoordinator;
pub use quad::QuadSurface;
pub use surface::{Color, PaintSurface, ProgramError, TextureFilter};
