//! The viewer facade: one image, one view transform, one surface.
//!
//! [`Viewer`] ties the pieces together — it turns [`ViewAction`]s into
//! [`ViewState`] mutations, owns the [`RenderCoordinator`], and guards image
//! loads against stale completions.

use std::path::Path;

use crate::loader::{self, ImageData, ImageLoadError};
use crate::render::{PaintSurface, ProgramError, RenderCoordinator};
use crate::view::{ControlMode, ViewAction, ViewState, PAN_STEP};

/// Ticket for an in-flight image load.
///
/// Only the most recently issued ticket installs its image; completions of
/// superseded loads are dropped.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LoadToken(u64);

/// A complete image viewer over any [`PaintSurface`].
#[derive(Debug)]
pub struct Viewer<S: PaintSurface> {
    coordinator: RenderCoordinator<S>,
    view: ViewState,
    control_mode: ControlMode,
    load_generation: u64,
}

impl<S: PaintSurface> Viewer<S> {
    pub fn new(surface: S) -> Result<Self, ProgramError> {
        Ok(Self {
            coordinator: RenderCoordinator::new(surface)?,
            view: ViewState::new(),
            control_mode: ControlMode::default(),
            load_generation: 0,
        })
    }

    /// Applies one user action. Pure state mutation; nothing is drawn until
    /// the next [`render`](Self::render).
    pub fn apply(&mut self, action: ViewAction) {
        match action {
            ViewAction::ZoomIn => self.view.zoom_in(),
            ViewAction::ZoomOut => self.view.zoom_out(),
            // The projection's Y flip makes a positive angle clockwise on
            // screen.
            ViewAction::RotateClockwise => {
                self.view.rotate_by(self.control_mode.rotation_step());
            }
            ViewAction::RotateAntiClockwise => {
                self.view.rotate_by(-self.control_mode.rotation_step());
            }
            ViewAction::MoveUp => self.view.move_up(PAN_STEP),
            ViewAction::MoveDown => self.view.move_down(PAN_STEP),
            ViewAction::MoveLeft => self.view.move_left(PAN_STEP),
            ViewAction::MoveRight => self.view.move_right(PAN_STEP),
            ViewAction::ResetView => self.view.reset(),
            ViewAction::ToggleSmoothing => self.coordinator.toggle_smoothing(),
            ViewAction::ToggleControlMode => {
                self.control_mode = self.control_mode.toggled();
                log::debug!("control mode: {:?}", self.control_mode);
            }
        }
    }

    /// Starts a load, superseding any load still in flight.
    pub fn begin_load(&mut self) -> LoadToken {
        self.load_generation += 1;
        LoadToken(self.load_generation)
    }

    /// Installs a finished load, unless a newer [`begin_load`](Self::begin_load)
    /// superseded it. Returns whether the image was installed.
    pub fn complete_load(&mut self, token: LoadToken, image: &ImageData) -> bool {
        if token.0 != self.load_generation {
            log::debug!("dropping stale image load (token {})", token.0);
            return false;
        }
        self.coordinator.bind_image(image);
        true
    }

    /// Decodes and installs the image at `path`.
    ///
    /// On failure the viewer keeps its current image and view.
    pub fn load_image(&mut self, path: &Path) -> Result<(), ImageLoadError> {
        let token = self.begin_load();
        let image = loader::load_image(path)?;
        self.complete_load(token, &image);
        Ok(())
    }

    pub fn render(&mut self) -> anyhow::Result<()> {
        self.coordinator.render(&self.view)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.coordinator.resize(width, height);
    }

    #[inline]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    #[inline]
    pub fn control_mode(&self) -> ControlMode {
        self.control_mode
    }

    #[inline]
    pub fn smoothing(&self) -> bool {
        self.coordinator.smoothing()
    }

    #[inline]
    pub fn has_image(&self) -> bool {
        self.coordinator.has_image()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use pixview_math::Matrix;

    use super::*;
    use crate::projection::Projection;
    use crate::render::mock::RecordingSurface;
    use crate::view::{ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};

    fn viewer() -> Viewer<RecordingSurface> {
        Viewer::new(RecordingSurface::new((400, 400))).unwrap()
    }

    fn test_image(width: u32, height: u32) -> ImageData {
        ImageData::from_rgba8(width, height, vec![0; width as usize * height as usize * 4])
    }

    // ── actions ─────────────────────────────────────────────────────────

    #[test]
    fn zoom_actions_scale_the_view() {
        let mut v = viewer();
        v.apply(ViewAction::ZoomIn);
        assert_eq!(v.view().zoom_factor(), ZOOM_IN_FACTOR);
        v.apply(ViewAction::ZoomOut);
        assert_eq!(v.view().zoom_factor(), ZOOM_IN_FACTOR * ZOOM_OUT_FACTOR);
    }

    #[test]
    fn rotation_uses_the_active_control_mode_step() {
        let mut v = viewer();
        v.apply(ViewAction::RotateClockwise);
        assert_eq!(v.view().rotation_angle(), FRAC_PI_2);

        v.apply(ViewAction::ToggleControlMode);
        assert_eq!(v.control_mode(), ControlMode::Continuous);
        v.apply(ViewAction::RotateAntiClockwise);
        assert_eq!(
            v.view().rotation_angle(),
            FRAC_PI_2 - ControlMode::Continuous.rotation_step()
        );
    }

    #[test]
    fn clockwise_rotation_moves_right_edge_down_on_screen() {
        // Square image on a square surface. In NDC, +Y is up; after one
        // clockwise quarter turn the quad's right edge must end up below
        // center, or the key turns the image the wrong way.
        let mut v = viewer();
        v.apply(ViewAction::RotateClockwise);

        let projection = Projection::new((100, 100), (100, 100));
        let mvp =
            Matrix::multiply_array(&[projection.matrix(), v.view().matrix()]).unwrap();
        let right_edge =
            Matrix::from_rows(vec![vec![1.0], vec![0.0], vec![0.0], vec![1.0]]).unwrap();
        let ndc = mvp.multiply(&right_edge).unwrap();
        assert!(
            ndc.get(1, 0) < 0.0,
            "clockwise turn must move the right edge down; got NDC y = {}",
            ndc.get(1, 0)
        );
    }

    #[test]
    fn reset_view_restores_defaults_but_not_smoothing() {
        let mut v = viewer();
        v.apply(ViewAction::ZoomIn);
        v.apply(ViewAction::MoveLeft);
        v.apply(ViewAction::ToggleSmoothing);

        v.apply(ViewAction::ResetView);
        assert_eq!(v.view(), &ViewState::new());
        // Smoothing is a rendering preference, not part of the view.
        assert!(v.smoothing());
    }

    #[test]
    fn pan_actions_move_opposite_axes() {
        let mut v = viewer();
        v.apply(ViewAction::MoveLeft);
        v.apply(ViewAction::MoveUp);
        let (x, y) = v.view().offsets();
        assert!(x > 0.0);
        assert!(y < 0.0);
    }

    // ── construction ────────────────────────────────────────────────────

    #[test]
    fn program_failure_surfaces_as_error() {
        let surface = RecordingSurface::new((400, 400)).fail_compile_with(
            ProgramError::Compile {
                diagnostic: "bad wgsl".into(),
            },
        );
        let err = Viewer::new(surface).unwrap_err();
        assert!(err.to_string().contains("bad wgsl"));
    }

    // ── loads ───────────────────────────────────────────────────────────

    #[test]
    fn stale_load_completion_is_dropped() {
        let mut v = viewer();
        let first = v.begin_load();
        let second = v.begin_load();

        assert!(!v.complete_load(first, &test_image(10, 10)));
        assert!(!v.has_image());

        assert!(v.complete_load(second, &test_image(20, 20)));
        assert!(v.has_image());
    }

    #[test]
    fn failed_load_keeps_previous_image() {
        let mut v = viewer();
        let token = v.begin_load();
        v.complete_load(token, &test_image(10, 10));

        assert!(v.load_image(Path::new("/definitely/not/here.png")).is_err());
        assert!(v.has_image());
    }
}
