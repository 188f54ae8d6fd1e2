//! draw a flat triangle (or any triangle list) from 2D positions with `glDrawArrays`

use crate::shader_program::{ProgramBuilder, ShaderProgram};
use crate::shader_source::ShaderSourcePair;

pub const VS_SRC: &str = r#"#version 330 core
layout(location = 0) in vec4 position;
void main() {
    gl_Position = position;
}
"#;

pub const FS_SRC: &str = r#"#version 330 core
out vec4 color;
void main() {
    color = vec4(1.0, 0.0, 0.0, 1.0);
}
"#;

pub struct Drawer {
    pub program: ShaderProgram<glow::Program>,
    vertex_array: glow::VertexArray,
    vbo: glow::Buffer,
    num_vtx: usize,
}

impl Drawer {
    /// Build the program from `sources` inside a freshly bound vertex array,
    /// then upload `vtx2xy` (two floats per vertex, attribute location 0).
    pub fn new(
        gl: &glow::Context,
        sources: &ShaderSourcePair,
        vtx2xy: &[f32],
    ) -> crate::Result<Self> {
        use glow::HasContext as _;
        let (vertex_array, program) = ProgramBuilder::new(gl).build_in_vertex_array(sources)?;
        unsafe {
            let vbo = match gl.create_buffer() {
                Ok(vbo) => vbo,
                Err(e) => {
                    gl.bind_vertex_array(None);
                    gl.delete_vertex_array(vertex_array);
                    program.destroy(gl);
                    return Err(crate::Error::Gl(e));
                }
            };
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vtx2xy),
                glow::STATIC_DRAW,
            );
            gl.vertex_attrib_pointer_f32(
                0,
                2,
                glow::FLOAT,
                false,
                2 * std::mem::size_of::<f32>() as i32,
                0,
            );
            gl.enable_vertex_attrib_array(0);
            gl.bind_vertex_array(None);
            Ok(Self {
                program,
                vertex_array,
                vbo,
                num_vtx: vtx2xy.len() / 2,
            })
        }
    }

    pub fn num_vtx(&self) -> usize {
        self.num_vtx
    }

    pub fn draw(&self, gl: &glow::Context) {
        use glow::HasContext as _;
        self.program.use_program(gl);
        unsafe {
            gl.bind_vertex_array(Some(self.vertex_array));
            gl.draw_arrays(glow::TRIANGLES, 0, self.num_vtx as i32);
            gl.bind_vertex_array(None);
        }
    }

    pub fn destroy(self, gl: &glow::Context) {
        use glow::HasContext as _;
        unsafe {
            gl.delete_buffer(self.vbo);
            gl.delete_vertex_array(self.vertex_array);
        }
        self.program.destroy(gl);
    }
}
