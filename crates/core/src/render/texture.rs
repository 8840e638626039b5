//! RGBA8 texture creation for convolution sampling.
//!
//! Every texture in the pipeline uses the same parameters: CLAMP_TO_EDGE
//! wrapping on both axes and NEAREST filtering with no mipmaps. The
//! convolution shader needs pixel-exact neighbor taps, so any smoothing
//! or border wrap-around would corrupt edge sampling.

/// Creates an RGBA8 texture, optionally uploading initial pixel data.
///
/// Pass `Some(pixels)` with a `width * height * 4` RGBA byte buffer to
/// upload the source image; pass `None` to allocate empty storage for a
/// scratch target.
///
/// # Errors
///
/// Returns an error string if the GL context fails to create the texture.
#[allow(unsafe_code)]
pub fn create_texture(
    gl: &glow::Context,
    width: u32,
    height: u32,
    pixels: Option<&[u8]>,
) -> Result<glow::Texture, String> {
    use glow::HasContext;

    if let Some(data) = pixels {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(format!(
                "pixel buffer length {} does not match {width}x{height} RGBA ({expected})",
                data.len()
            ));
        }
    }

    // SAFETY: glow wraps raw GL calls as unsafe. The texture handle is
    // valid for the configure/upload calls below, and the pixel slice
    // length is checked against the allocation size above.
    let texture = unsafe { gl.create_texture()? };

    unsafe {
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));

        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_S,
            glow::CLAMP_TO_EDGE as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_T,
            glow::CLAMP_TO_EDGE as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MIN_FILTER,
            glow::NEAREST as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MAG_FILTER,
            glow::NEAREST as i32,
        );

        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::RGBA8 as i32,
            width as i32,
            height as i32,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            glow::PixelUnpackData::Slice(pixels),
        );

        gl.bind_texture(glow::TEXTURE_2D, None);
    }

    Ok(texture)
}
