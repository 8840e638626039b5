//! Embedded GLSL ES 3.00 sources for the convolution program.
//!
//! One program serves every pass. The vertex stage maps pixel-space
//! quad positions into clip space via `u_resolution` and applies the
//! `u_flipY` sign; the fragment stage sums the nine taps of the 3x3
//! neighborhood weighted by `u_kernel`, stepping one texel at a time
//! via `u_textureSize`. The kernel weight sum is deliberately not
//! applied in the shader; see `Kernel::weight`.

/// Vertex shader: pixel space -> clip space with vertical flip sign.
pub const CONVOLVE_VERTEX_SHADER: &str = r#"#version 300 es
in vec2 a_position;
in vec2 a_texCoord;
uniform vec2 u_resolution;
uniform float u_flipY;
out vec2 v_texCoord;
void main() {
    vec2 zeroToOne = a_position / u_resolution;
    vec2 clipSpace = zeroToOne * 2.0 - 1.0;
    gl_Position = vec4(clipSpace * vec2(1.0, u_flipY), 0.0, 1.0);
    v_texCoord = a_texCoord;
}
"#;

/// Fragment shader: 3x3 convolution over the sampled input.
///
/// Alpha is carried from the center texel rather than convolved, so the
/// identity kernel reproduces the input exactly.
pub const CONVOLVE_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;
uniform sampler2D u_image;
uniform vec2 u_textureSize;
uniform float u_kernel[9];
in vec2 v_texCoord;
out vec4 outColor;
void main() {
    vec2 onePixel = vec2(1.0) / u_textureSize;
    vec4 colorSum =
        texture(u_image, v_texCoord + onePixel * vec2(-1.0, -1.0)) * u_kernel[0] +
        texture(u_image, v_texCoord + onePixel * vec2( 0.0, -1.0)) * u_kernel[1] +
        texture(u_image, v_texCoord + onePixel * vec2( 1.0, -1.0)) * u_kernel[2] +
        texture(u_image, v_texCoord + onePixel * vec2(-1.0,  0.0)) * u_kernel[3] +
        texture(u_image, v_texCoord + onePixel * vec2( 0.0,  0.0)) * u_kernel[4] +
        texture(u_image, v_texCoord + onePixel * vec2( 1.0,  0.0)) * u_kernel[5] +
        texture(u_image, v_texCoord + onePixel * vec2(-1.0,  1.0)) * u_kernel[6] +
        texture(u_image, v_texCoord + onePixel * vec2( 0.0,  1.0)) * u_kernel[7] +
        texture(u_image, v_texCoord + onePixel * vec2( 1.0,  1.0)) * u_kernel[8];
    outColor = vec4(colorSum.rgb, texture(u_image, v_texCoord).a);
}
"#;
