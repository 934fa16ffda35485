use std::f64::consts::{FRAC_PI_2, PI};

/// Discrete, synchronous user actions on a viewer.
///
/// Translate actions commute with each other; rotation does not commute with
/// translation, so action order is meaningful.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ViewAction {
    ZoomIn,
    ZoomOut,
    RotateClockwise,
    RotateAntiClockwise,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    ResetView,
    ToggleSmoothing,
    ToggleControlMode,
}

/// Rotation interaction mode.
///
/// Stepped turns the image in quarter-turn increments; continuous uses a fine
/// step so holding the rotate key (key repeat) sweeps smoothly.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ControlMode {
    #[default]
    Stepped,
    Continuous,
}

impl ControlMode {
    /// Rotation step per rotate action, in radians.
    pub fn rotation_step(self) -> f64 {
        match self {
            ControlMode::Stepped => FRAC_PI_2,
            ControlMode::Continuous => PI / 60.0,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ControlMode::Stepped => ControlMode::Continuous,
            ControlMode::Continuous => ControlMode::Stepped,
        }
    }
}
