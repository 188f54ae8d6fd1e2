//! Build GLSL shader programs with [`glow`]: split a combined shader file into
//! its vertex/fragment sections, compile each stage, link and validate the
//! program, and draw simple 2D shapes with it.

pub mod drawer_quad;
pub mod drawer_triangle;
pub mod shader_context;
pub mod shader_program;
pub mod shader_source;

pub use shader_context::ShaderContext;
pub use shader_program::{
    compile, link, link_with_options, BuildOptions, BuildState, CompileError, CompiledShader,
    LinkError, ProgramBuilder, ShaderProgram, Stage,
};
pub use shader_source::{LoadError, ShaderSourcePair};

/// Any failure on the way from a shader file to a bindable program.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Link(#[from] LinkError),

    /// The driver refused to allocate a buffer or vertex array.
    #[error("OpenGL object allocation failed: {0}")]
    Gl(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Load a combined shader file and link it into a program in one call.
pub fn program_from_file<C: ShaderContext + ?Sized>(
    gl: &C,
    path: impl AsRef<std::path::Path>,
) -> Result<ShaderProgram<C::Program>> {
    let sources = ShaderSourcePair::load(path)?;
    let program = link(gl, &sources.vertex, &sources.fragment)?;
    Ok(program)
}
