//! Vertex and texcoord buffer upload for the image quad.
//!
//! Uploads the pixel-space positions from [`Quad`] and the fixed unit
//! texcoords into two STATIC_DRAW buffers under one VAO, wiring them to
//! the program's `a_position` and `a_texCoord` attributes. The index
//! pairing between the two arrays is established here and must not be
//! disturbed; see [`crate::geometry`].

use crate::geometry::{Quad, TEX_COORDS};

/// The uploaded quad: one VAO over two attribute buffers.
pub struct QuadBuffers {
    vao: glow::VertexArray,
    position_buffer: glow::Buffer,
    texcoord_buffer: glow::Buffer,
}

impl QuadBuffers {
    /// Uploads the quad and wires both attributes on the given program.
    ///
    /// # Errors
    ///
    /// Returns an error string if buffer/VAO creation fails or the
    /// program does not expose the expected attributes.
    #[allow(unsafe_code)]
    pub fn new(
        gl: &glow::Context,
        program: glow::Program,
        quad: &Quad,
    ) -> Result<Self, String> {
        use glow::HasContext;

        // SAFETY: glow wraps raw GL calls as unsafe. All handles used
        // below come from successful create calls on this context, and
        // bytemuck casts the f32 slices to their exact byte layout.
        let (vao, position_buffer, texcoord_buffer) = unsafe {
            let vao = gl.create_vertex_array()?;
            let position_buffer = gl.create_buffer()?;
            let texcoord_buffer = gl.create_buffer()?;
            (vao, position_buffer, texcoord_buffer)
        };

        // SAFETY: program is a valid linked program; the three objects
        // above are deleted if either attribute is missing.
        let locate = |name: &'static str| unsafe {
            gl.get_attrib_location(program, name).ok_or_else(|| {
                gl.delete_vertex_array(vao);
                gl.delete_buffer(position_buffer);
                gl.delete_buffer(texcoord_buffer);
                format!("program has no {name} attribute")
            })
        };
        let a_position = locate("a_position")?;
        let a_tex_coord = locate("a_texCoord")?;

        unsafe {
            gl.bind_vertex_array(Some(vao));

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(position_buffer));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(quad.positions()),
                glow::STATIC_DRAW,
            );
            gl.enable_vertex_attrib_array(a_position);
            gl.vertex_attrib_pointer_f32(a_position, 2, glow::FLOAT, false, 0, 0);

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(texcoord_buffer));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&TEX_COORDS),
                glow::STATIC_DRAW,
            );
            gl.enable_vertex_attrib_array(a_tex_coord);
            gl.vertex_attrib_pointer_f32(a_tex_coord, 2, glow::FLOAT, false, 0, 0);

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }

        Ok(Self {
            vao,
            position_buffer,
            texcoord_buffer,
        })
    }

    /// Binds the VAO for drawing.
    #[allow(unsafe_code)]
    pub fn bind(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: self.vao is a valid vertex array handle from new().
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
        }
    }

    /// Deletes the VAO and both buffers.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: all three handles are valid objects created in new().
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.position_buffer);
            gl.delete_buffer(self.texcoord_buffer);
        }
    }
}
