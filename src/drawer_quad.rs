//! draw 2D positions through an element (index) buffer with one uniform color

use crate::shader_program::{ProgramBuilder, ShaderProgram};
use crate::shader_source::ShaderSourcePair;

pub struct Drawer {
    pub program: ShaderProgram<glow::Program>,
    vertex_array: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: glow::Buffer,
    num_elem_vtx: usize,
    // uniform variables
    loc_color: Option<glow::UniformLocation>,
    pub color: [f32; 4],
}

impl Drawer {
    /// Build the program from `sources` inside a freshly bound vertex array,
    /// then upload `vtx2xy` (two floats per vertex, attribute location 0) and
    /// `tri2vtx` (three vertex indices per triangle). The fragment shader may
    /// declare `uniform vec4 u_Color`; it is set from [`Drawer::color`] on
    /// every draw.
    pub fn new<T>(
        gl: &glow::Context,
        sources: &ShaderSourcePair,
        vtx2xy: &[f32],
        tri2vtx: &[T],
    ) -> crate::Result<Self>
    where
        T: 'static + Copy + num_traits::AsPrimitive<u32>,
    {
        use glow::HasContext as _;
        let tri2vtx0: Vec<u32> = tri2vtx.iter().map(|i| (*i).as_()).collect();
        let (vertex_array, program) = ProgramBuilder::new(gl).build_in_vertex_array(sources)?;
        unsafe {
            let buffers = gl
                .create_buffer()
                .and_then(|vbo| match gl.create_buffer() {
                    Ok(ebo) => Ok((vbo, ebo)),
                    Err(e) => {
                        gl.delete_buffer(vbo);
                        Err(e)
                    }
                });
            let (vbo, ebo) = match buffers {
                Ok(buffers) => buffers,
                Err(e) => {
                    gl.bind_vertex_array(None);
                    gl.delete_vertex_array(vertex_array);
                    program.destroy(gl);
                    return Err(crate::Error::Gl(e));
                }
            };
            //
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vtx2xy),
                glow::STATIC_DRAW,
            );
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(
                0,
                2,
                glow::FLOAT,
                false,
                (2 * std::mem::size_of::<f32>()) as i32,
                0,
            );
            //
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(&tri2vtx0),
                glow::STATIC_DRAW,
            );
            gl.bind_vertex_array(None);
            let loc_color = gl.get_uniform_location(program.raw(), "u_Color");
            if loc_color.is_none() {
                log::debug!("u_Color not found, drawing with the shader's own color");
            }
            Ok(Self {
                program,
                vertex_array,
                vbo,
                ebo,
                num_elem_vtx: tri2vtx0.len(),
                loc_color,
                color: [0.2, 0.3, 0.8, 1.0],
            })
        }
    }

    pub fn set_color(&mut self, rgba: [f32; 4]) {
        self.color = rgba;
    }

    pub fn draw(&self, gl: &glow::Context) {
        use glow::HasContext as _;
        self.program.use_program(gl);
        unsafe {
            let c = self.color;
            gl.uniform_4_f32(self.loc_color.as_ref(), c[0], c[1], c[2], c[3]);
            gl.bind_vertex_array(Some(self.vertex_array));
            gl.draw_elements(
                glow::TRIANGLES,
                self.num_elem_vtx as i32,
                glow::UNSIGNED_INT,
                0,
            );
            gl.bind_vertex_array(None);
        }
    }

    pub fn destroy(self, gl: &glow::Context) {
        use glow::HasContext as _;
        unsafe {
            gl.delete_buffer(self.ebo);
            gl.delete_buffer(self.vbo);
            gl.delete_vertex_array(self.vertex_array);
        }
        self.program.destroy(gl);
    }
}
