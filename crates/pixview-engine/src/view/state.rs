use std::f64::consts::TAU;

use pixview_math::Matrix;

/// Multiplicative zoom step per zoom-in action.
pub const ZOOM_IN_FACTOR: f64 = 1.03;

/// Multiplicative zoom step per zoom-out action.
///
/// Deliberately not `1 / ZOOM_IN_FACTOR`: repeated in/out pairs converge
/// toward the starting zoom without round-tripping exactly.
pub const ZOOM_OUT_FACTOR: f64 = 0.97;

/// Nominal pan step per move action, in clip-space units at zoom 1.
pub const PAN_STEP: f64 = 0.04;

/// Mutable per-viewer view parameters.
///
/// Invariants:
/// - `zoom_factor > 0`
/// - `rotation_angle` stays within (−2π, 2π]; values within machine epsilon
///   of a full turn collapse to exactly 0
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    zoom_factor: f64,
    rotation_angle: f64,
    x_offset: f64,
    y_offset: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom_factor: 1.0,
            rotation_angle: 0.0,
            x_offset: 0.0,
            y_offset: 0.0,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    #[inline]
    pub fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }

    #[inline]
    pub fn offsets(&self) -> (f64, f64) {
        (self.x_offset, self.y_offset)
    }

    /// Stores `value` normalized into (−2π, 2π].
    ///
    /// Full turns (to within machine epsilon) collapse to exactly 0 so a
    /// sequence of quarter-turn rotations lands back on a clean zero instead
    /// of accumulating a residual angle.
    pub fn set_rotation_angle(&mut self, value: f64) {
        let wrapped = value % TAU;
        self.rotation_angle = if wrapped.abs() <= f64::EPSILON { 0.0 } else { wrapped };
    }

    pub fn zoom_in(&mut self) {
        self.zoom_factor *= ZOOM_IN_FACTOR;
    }

    pub fn zoom_out(&mut self) {
        self.zoom_factor *= ZOOM_OUT_FACTOR;
    }

    /// Rotates by `delta` radians. Positive is counter-clockwise in the
    /// quad's local coordinates; after the projection's Y flip that reads as
    /// clockwise on screen.
    pub fn rotate_by(&mut self, delta: f64) {
        self.set_rotation_angle(self.rotation_angle + delta);
    }

    pub fn move_up(&mut self, step: f64) {
        self.y_offset -= self.zoomed_offset(step);
    }

    pub fn move_down(&mut self, step: f64) {
        self.y_offset += self.zoomed_offset(step);
    }

    pub fn move_left(&mut self, step: f64) {
        self.x_offset += self.zoomed_offset(step);
    }

    pub fn move_right(&mut self, step: f64) {
        self.x_offset -= self.zoomed_offset(step);
    }

    /// Restores the default view (zoom 1, no rotation, centered).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Pan distance corrected for zoom so visual pan speed stays constant.
    #[inline]
    fn zoomed_offset(&self, nominal: f64) -> f64 {
        nominal / self.zoom_factor
    }

    /// Composed 4x4 view matrix: `scaling(zoom) · translation(x, −y, 0) ·
    /// rotation_around_z(angle)`.
    ///
    /// Scale is outermost; swapping translation and rotation would move the
    /// rotation gizmo center, so the order is part of the contract.
    pub fn matrix(&self) -> Matrix {
        Matrix::multiply_array(&[
            Matrix::scaling(self.zoom_factor),
            Matrix::translation(self.x_offset, -self.y_offset, 0.0),
            Matrix::rotation_around_z(self.rotation_angle),
        ])
        .expect("zoom/translate/rotate factors are all 4x4")
    }
}
