//! OpenGL ES / WebGL2 rendering infrastructure.
//!
//! Only available with the `render` feature. Executes the pure pass
//! plan from [`crate::passes`] against a live `glow::Context`.
//!
//! # Module overview
//!
//! - [`context`] -- GPU context wrapper with texture-size limits.
//! - [`shader`] -- Program building and shader error reporting.
//! - [`sources`] -- Embedded GLSL for the convolution program.
//! - [`texture`] -- Clamped, nearest-filtered RGBA8 texture creation.
//! - [`target`] -- FBO + texture scratch render targets.
//! - [`quad`] -- Vertex/texcoord buffer upload for the image quad.
//! - [`pipeline`] -- The multi-pass convolution executor.

pub mod context;
pub mod pipeline;
pub mod quad;
pub mod shader;
pub mod sources;
pub mod target;
pub mod texture;

pub use context::GpuContext;
pub use pipeline::{FilterPipeline, PipelineError};
pub use quad::QuadBuffers;
pub use shader::{build_program, number_source, ShaderError};
pub use sources::{CONVOLVE_FRAGMENT_SHADER, CONVOLVE_VERTEX_SHADER};
pub use target::RenderTarget;
pub use texture::create_texture;
