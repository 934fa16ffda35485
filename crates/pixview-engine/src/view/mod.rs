//! View state (zoom, rotation, pan) and the user-facing action surface.
//!
//! Conventions:
//! - zoom is multiplicative (×1.03 / ×0.97 per step)
//! - pan is divided by the zoom factor so visual pan speed is constant
//! - the composed view matrix is `scaling · translation(x, −y, 0) ·
//!   rotation_z` — the order is a contract, not an implementation detail

mod actions;
mod state;

pub use actions::{ControlMode, ViewAction};
pub use state::{PAN_STEP, ViewState, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
