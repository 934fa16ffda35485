//! Pixview engine crate.
//!
//! This crate owns the platform + GPU runtime pieces of the pixview image
//! viewer, plus the transform pipeline that turns view state (zoom, rotation,
//! pan) and surface geometry into the single matrix uniform the textured-quad
//! pipeline consumes.

pub mod device;
pub mod window;
pub mod input;
pub mod logging;

pub mod loader;
pub mod projection;
pub mod render;
pub mod view;
pub mod viewer;
