//! Program building and shader error reporting.
//!
//! Compile and link failures are the only error path in the pipeline:
//! the failed object is deleted, the driver log is captured, and the
//! caller treats the error as fatal for the render. There are no
//! retries.

use thiserror::Error;

/// Errors from building the convolution program.
#[derive(Debug, Clone, Error)]
pub enum ShaderError {
    /// A shader stage failed to compile.
    #[error("{stage} shader failed to compile:\n{log}")]
    CompileError {
        /// "vertex" or "fragment".
        stage: &'static str,
        /// Numbered source followed by the driver's info log.
        log: String,
    },
    /// The program failed to link.
    #[error("program failed to link:\n{0}")]
    LinkError(String),
}

/// Prefixes each source line with a `NN | ` gutter so driver logs, which
/// reference line numbers, can be read against the GLSL directly.
pub fn number_source(source: &str) -> String {
    let gutter = source.lines().count().to_string().len().max(2);
    source
        .lines()
        .enumerate()
        .map(|(i, line)| format!("{:>gutter$} | {line}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compiles one shader stage, deleting the object on failure.
#[allow(unsafe_code)]
fn compile_stage(
    gl: &glow::Context,
    stage: &'static str,
    shader_type: u32,
    source: &str,
) -> Result<glow::Shader, ShaderError> {
    use glow::HasContext;

    // SAFETY: glow wraps raw GL calls as unsafe. shader_type is a valid
    // stage constant and source is a valid GLSL string; the shader object
    // is deleted on the failure path.
    let shader = unsafe {
        gl.create_shader(shader_type)
            .map_err(|log| ShaderError::CompileError { stage, log })?
    };

    unsafe {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
    }

    if unsafe { gl.get_shader_compile_status(shader) } {
        Ok(shader)
    } else {
        let info_log = unsafe { gl.get_shader_info_log(shader) };
        unsafe { gl.delete_shader(shader) };
        Err(ShaderError::CompileError {
            stage,
            log: format!("{}\n\n{info_log}", number_source(source)),
        })
    }
}

/// Compiles the vertex and fragment sources and links them into a program.
///
/// The shader objects are deleted once linking finishes (the program
/// keeps its own copies), and on every failure path, so no partially
/// created object outlives an error.
///
/// # Errors
///
/// `ShaderError::CompileError` if either stage fails to compile,
/// `ShaderError::LinkError` if linking fails.
#[allow(unsafe_code)]
pub fn build_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<glow::Program, ShaderError> {
    use glow::HasContext;

    let vert = compile_stage(gl, "vertex", glow::VERTEX_SHADER, vertex_src)?;
    let frag = match compile_stage(gl, "fragment", glow::FRAGMENT_SHADER, fragment_src) {
        Ok(f) => f,
        Err(e) => {
            // SAFETY: vert is a valid shader handle from compile_stage.
            unsafe { gl.delete_shader(vert) };
            return Err(e);
        }
    };

    // SAFETY: both handles are valid; the program is deleted if the link
    // fails and the shaders are deleted on every path.
    let program = unsafe {
        match gl.create_program() {
            Ok(p) => p,
            Err(log) => {
                gl.delete_shader(vert);
                gl.delete_shader(frag);
                return Err(ShaderError::LinkError(log));
            }
        }
    };

    unsafe {
        gl.attach_shader(program, vert);
        gl.attach_shader(program, frag);
        gl.link_program(program);
        gl.detach_shader(program, vert);
        gl.detach_shader(program, frag);
        gl.delete_shader(vert);
        gl.delete_shader(frag);
    }

    if unsafe { gl.get_program_link_status(program) } {
        Ok(program)
    } else {
        let info_log = unsafe { gl.get_program_info_log(program) };
        unsafe { gl.delete_program(program) };
        Err(ShaderError::LinkError(info_log))
    }
}
