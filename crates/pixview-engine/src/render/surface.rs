use std::fmt;

use crate::loader::ImageData;

/// Shader program construction failure. Fatal at viewer construction; never
/// retried. Carries the backend diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramError {
    /// A shader module was rejected.
    Compile { diagnostic: String },
    /// Modules compiled but the pipeline was rejected.
    Link { diagnostic: String },
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramError::Compile { diagnostic } => {
                write!(f, "shader compilation failed: {diagnostic}")
            }
            ProgramError::Link { diagnostic } => {
                write!(f, "shader program link failed: {diagnostic}")
            }
        }
    }
}

impl std::error::Error for ProgramError {}

/// Magnification filter for the bound texture.
///
/// Minification always stays linear — switching it to nearest would alias
/// when the image is zoomed out. Only magnification toggles, preserving hard
/// pixel edges by default.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TextureFilter {
    #[default]
    Nearest,
    Linear,
}

/// Straight-alpha RGBA clear color.
///
/// The quad is opaque and drawn without blending, so no premultiplication
/// concerns apply here.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

/// The rendering-capable surface collaborator.
///
/// One fixed program, one vertex stream, one bound texture, two uniforms —
/// exactly the capability set the textured-quad viewer needs. The production
/// implementation is [`QuadSurface`](super::QuadSurface) on wgpu.
pub trait PaintSurface {
    /// Compiles and links the fixed vertex/fragment program.
    ///
    /// Failure is fatal for the caller; implementations must not retry.
    fn compile_program(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<(), ProgramError>;

    /// Replaces the vertex buffer. `vertices` is a flat x,y position list.
    fn upload_vertices(&mut self, vertices: &[f32]);

    /// Creates and binds a fresh texture from `image`.
    ///
    /// Any previously bound texture is released; clamp-to-edge wrapping in
    /// both axes.
    fn upload_image(&mut self, image: &ImageData);

    /// Switches the magnification filter; minification stays linear.
    fn set_magnification_filter(&mut self, filter: TextureFilter);

    /// Uploads the column-major model-view-projection matrix uniform.
    fn set_transform(&mut self, matrix: [f32; 16]);

    /// Uploads the image aspect ratio (height/width) uniform.
    fn set_image_aspect_ratio(&mut self, ratio: f32);

    /// Latches the clear color for the next presented frame.
    fn clear(&mut self, color: Color);

    /// Presents one frame: clear, then a single triangle-list draw of
    /// `vertex_count` vertices.
    ///
    /// Transient surface loss is handled internally (skip/reconfigure); only
    /// unrecoverable failures surface as errors.
    fn draw_triangles(&mut self, vertex_count: u32) -> anyhow::Result<()>;

    /// Drawable size in physical (device) pixels.
    fn viewport_size(&self) -> (u32, u32);

    /// Host resize notification, in physical pixels.
    fn resize(&mut self, width: u32, height: u32);
}
