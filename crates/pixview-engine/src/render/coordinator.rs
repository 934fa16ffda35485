use anyhow::Context;

use pixview_math::Matrix;

use crate::loader::ImageData;
use crate::projection::Projection;
use crate::view::ViewState;

use super::surface::{Color, PaintSurface, ProgramError, TextureFilter};

/// Fixed shader pair for the textured quad.
const VERTEX_SHADER: &str = include_str!("shaders/quad.vert.wgsl");
const FRAGMENT_SHADER: &str = include_str!("shaders/quad.frag.wgsl");

/// Backdrop behind the image.
const BACKGROUND: Color = Color::new(0.9, 0.9, 0.92, 1.0);

/// Two triangles.
const QUAD_VERTEX_COUNT: u32 = 6;

/// Owns the drawing sequence: binds images to the surface, composes the
/// projection and view matrices every frame, and issues the clear + draw.
///
/// Generic over [`PaintSurface`] so the whole sequence is testable without a
/// GPU device.
#[derive(Debug)]
pub struct RenderCoordinator<S: PaintSurface> {
    surface: S,
    image_size: Option<(u32, u32)>,
    image_aspect_ratio: f64,
    smoothing: bool,
    texture_generation: u64,
}

impl<S: PaintSurface> RenderCoordinator<S> {
    /// Compiles the quad program on `surface` and starts with smoothing off
    /// (nearest-neighbor magnification).
    pub fn new(mut surface: S) -> Result<Self, ProgramError> {
        surface.compile_program(VERTEX_SHADER, FRAGMENT_SHADER)?;
        surface.set_magnification_filter(TextureFilter::Nearest);

        Ok(Self {
            surface,
            image_size: None,
            image_aspect_ratio: 1.0,
            smoothing: false,
            texture_generation: 0,
        })
    }

    /// Uploads `image` and rebuilds the quad geometry around its aspect
    /// ratio. Replaces any previously bound image.
    pub fn bind_image(&mut self, image: &ImageData) {
        let aspect = image.aspect_ratio();

        self.surface.upload_vertices(&quad_vertices(aspect as f32));
        self.surface.set_image_aspect_ratio(aspect as f32);
        self.surface.upload_image(image);
        // Filter state must survive the texture swap.
        self.surface.set_magnification_filter(self.filter());

        self.image_size = Some((image.width, image.height));
        self.image_aspect_ratio = aspect;
        self.texture_generation += 1;
        log::info!(
            "bound image {}x{} (generation {})",
            image.width,
            image.height,
            self.texture_generation
        );
    }

    /// Draws one frame with the given view transform.
    ///
    /// Without a bound image this is a logged no-op: there is nothing
    /// meaningful to compose a projection against.
    pub fn render(&mut self, view: &ViewState) -> anyhow::Result<()> {
        let Some(image_size) = self.image_size else {
            log::debug!("render skipped: no image bound");
            return Ok(());
        };

        let projection = Projection::new(image_size, self.surface.viewport_size());
        let mvp = Matrix::multiply_array(&[projection.matrix(), view.matrix()])
            .context("composing the frame transform")?;
        let transform = mvp
            .to_column_major_4x4()
            .context("exporting the frame transform")?;

        self.surface.set_transform(transform);
        self.surface.clear(BACKGROUND);
        self.surface.draw_triangles(QUAD_VERTEX_COUNT)
    }

    /// Flips between nearest-neighbor and linear magnification.
    pub fn toggle_smoothing(&mut self) {
        self.smoothing = !self.smoothing;
        self.surface.set_magnification_filter(self.filter());
        log::debug!("smoothing {}", if self.smoothing { "on" } else { "off" });
    }

    #[inline]
    pub fn smoothing(&self) -> bool {
        self.smoothing
    }

    #[inline]
    pub fn has_image(&self) -> bool {
        self.image_size.is_some()
    }

    /// Monotonic counter bumped on every [`bind_image`](Self::bind_image).
    #[inline]
    pub fn texture_generation(&self) -> u64 {
        self.texture_generation
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
    }

    fn filter(&self) -> TextureFilter {
        if self.smoothing {
            TextureFilter::Linear
        } else {
            TextureFilter::Nearest
        }
    }
}

/// Two-triangle quad spanning `[-1, 1] x [-aspect, aspect]`, as a flat x,y
/// position list.
fn quad_vertices(aspect: f32) -> [f32; 12] {
    let (w, h) = (1.0, aspect);
    [
        -w, -h, //
        -w, h, //
        w, h, //
        -w, -h, //
        w, h, //
        w, -h, //
    ]
}
