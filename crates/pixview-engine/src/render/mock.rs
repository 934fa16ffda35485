//! Recording [`PaintSurface`] for coordinator and viewer tests.

use crate::loader::ImageData;

use super::surface::{Color, PaintSurface, ProgramError, TextureFilter};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Compile,
    Vertices(Vec<f32>),
    Image(u32, u32),
    Filter(TextureFilter),
    Transform([f32; 16]),
    Aspect(f32),
    Clear(Color),
    Draw(u32),
    Resize(u32, u32),
}

/// Records every surface call in order. Infallible unless a compile error is
/// planted via `fail_compile_with`.
#[derive(Debug)]
pub(crate) struct RecordingSurface {
    pub calls: Vec<Call>,
    pub viewport: (u32, u32),
    pub compile_error: Option<ProgramError>,
}

impl RecordingSurface {
    pub fn new(viewport: (u32, u32)) -> Self {
        Self {
            calls: Vec::new(),
            viewport,
            compile_error: None,
        }
    }

    /// Makes the next `compile_program` call fail with `error`.
    pub fn fail_compile_with(mut self, error: ProgramError) -> Self {
        self.compile_error = Some(error);
        self
    }

    /// The recorded calls of one variant, by discriminating closure.
    pub fn filtered(&self, keep: impl Fn(&Call) -> bool) -> Vec<Call> {
        self.calls.iter().filter(|c| keep(c)).cloned().collect()
    }
}

impl PaintSurface for RecordingSurface {
    fn compile_program(&mut self, _vs: &str, _fs: &str) -> Result<(), ProgramError> {
        self.calls.push(Call::Compile);
        match self.compile_error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn upload_vertices(&mut self, vertices: &[f32]) {
        self.calls.push(Call::Vertices(vertices.to_vec()));
    }

    fn upload_image(&mut self, image: &ImageData) {
        self.calls.push(Call::Image(image.width, image.height));
    }

    fn set_magnification_filter(&mut self, filter: TextureFilter) {
        self.calls.push(Call::Filter(filter));
    }

    fn set_transform(&mut self, matrix: [f32; 16]) {
        self.calls.push(Call::Transform(matrix));
    }

    fn set_image_aspect_ratio(&mut self, ratio: f32) {
        self.calls.push(Call::Aspect(ratio));
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(Call::Clear(color));
    }

    fn draw_triangles(&mut self, vertex_count: u32) -> anyhow::Result<()> {
        self.calls.push(Call::Draw(vertex_count));
        Ok(())
    }

    fn viewport_size(&self) -> (u32, u32) {
        self.viewport
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.calls.push(Call::Resize(width, height));
    }
}
