//! Aspect-ratio correction between image pixels and the drawable surface.
//!
//! At zoom 1 the projection maps one image pixel to one device pixel and
//! keeps the image undistorted whatever the surface shape. Recomputed on
//! every draw — the surface can change size between frames and the
//! computation is three divisions.

use pixview_math::Matrix;

/// Projection inputs: image pixel dimensions and the drawable size in
/// physical (device) pixels.
///
/// winit reports physical sizes with the device pixel ratio already applied,
/// so no separate DPR factor appears here.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    image_width: f64,
    image_height: f64,
    surface_width: f64,
    surface_height: f64,
}

impl Projection {
    /// Builds a projection for an `image` displayed on a `surface`
    /// (both as (width, height) pixel pairs).
    ///
    /// Zero dimensions are clamped to 1: a minimized window must not poison
    /// the matrix with infinities.
    pub fn new(image: (u32, u32), surface: (u32, u32)) -> Self {
        Self {
            image_width: f64::from(image.0.max(1)),
            image_height: f64::from(image.1.max(1)),
            surface_width: f64::from(surface.0.max(1)),
            surface_height: f64::from(surface.1.max(1)),
        }
    }

    /// Height over width of the image.
    #[inline]
    pub fn image_aspect_ratio(&self) -> f64 {
        self.image_height / self.image_width
    }

    /// Image width over surface width.
    #[inline]
    pub fn width_ratio(&self) -> f64 {
        self.image_width / self.surface_width
    }

    /// Image height over surface height.
    #[inline]
    pub fn height_ratio(&self) -> f64 {
        self.image_height / self.surface_height
    }

    /// The 4x4 correction matrix: diagonal
    /// `[width_ratio, −height_ratio / image_aspect_ratio, 1]` lifted to
    /// homogeneous form.
    ///
    /// The Y term is negated to flip into screen-space (Y-down) coordinates.
    /// The extra aspect-ratio division undoes the quad's own aspect scaling
    /// so the vertical pixel mapping matches the horizontal one.
    pub fn matrix(&self) -> Matrix {
        Matrix::scaling_xyz(
            self.width_ratio(),
            -self.height_ratio() / self.image_aspect_ratio(),
            1.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_image_in_square_surface() {
        // 200x100 image on a 400x400 surface.
        let p = Projection::new((200, 100), (400, 400));
        assert_eq!(p.image_aspect_ratio(), 0.5);
        assert_eq!(p.width_ratio(), 0.5);
        assert_eq!(p.height_ratio(), 0.25);
    }

    #[test]
    fn matrix_diagonal_carries_ratios() {
        let p = Projection::new((200, 100), (400, 400));
        let m = p.matrix();
        assert_eq!(m.shape(), (4, 4));
        assert_eq!(m.get(0, 0), 0.5);
        // −height_ratio / aspect = −0.25 / 0.5
        assert_eq!(m.get(1, 1), -0.5);
        assert_eq!(m.get(2, 2), 1.0);
        assert_eq!(m.get(3, 3), 1.0);
    }

    #[test]
    fn identity_when_image_fills_surface_at_pixel_scale() {
        // Square image on a matching surface: both ratios and the aspect are
        // 1, leaving only the Y flip.
        let p = Projection::new((480, 480), (480, 480));
        let m = p.matrix();
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(1, 1), -1.0);
    }

    #[test]
    fn non_square_image_divides_y_by_aspect() {
        // 640x480 on a matching surface: height_ratio 1, aspect 0.75, so the
        // Y term is -1 / 0.75. The quad's own ±aspect extent cancels this
        // back to a full-height mapping.
        let p = Projection::new((640, 480), (640, 480));
        let m = p.matrix();
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(1, 1), -1.0 / 0.75);
    }

    #[test]
    fn zero_surface_is_clamped() {
        let p = Projection::new((100, 100), (0, 0));
        assert!(p.width_ratio().is_finite());
        assert_eq!(p.width_ratio(), 100.0);
    }
}
