//! Compile vertex/fragment sources and link them into a program.

use crate::shader_context::ShaderContext;
use crate::shader_source::ShaderSourcePair;
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    pub fn gl_enum(self) -> u32 {
        match self {
            Stage::Vertex => glow::VERTEX_SHADER,
            Stage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Vertex => "Vertex",
            Stage::Fragment => "Fragment",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CompileError {
    #[error("{stage} shader failed to compile:\n{log}")]
    Compile { stage: Stage, log: String },

    #[error("cannot create {stage} shader: {message}")]
    CreateShader { stage: Stage, message: String },
}

impl CompileError {
    pub fn stage(&self) -> Stage {
        match self {
            CompileError::Compile { stage, .. } | CompileError::CreateShader { stage, .. } => {
                *stage
            }
        }
    }

    /// Driver diagnostics, verbatim.
    pub fn log(&self) -> &str {
        match self {
            CompileError::Compile { log, .. } => log,
            CompileError::CreateShader { message, .. } => message,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LinkError {
    #[error("shader program not linked, {0}")]
    Stage(#[from] CompileError),

    #[error("Vertex+Fragment program failed to link:\n{log}")]
    Link { log: String },

    #[error("Vertex+Fragment program failed validation:\n{log}")]
    Validate { log: String },

    #[error("cannot create shader program: {message}")]
    CreateProgram { message: String },

    #[error("cannot create vertex array for program validation: {message}")]
    CreateVertexArray { message: String },
}

impl LinkError {
    pub fn log(&self) -> &str {
        match self {
            LinkError::Stage(e) => e.log(),
            LinkError::Link { log } | LinkError::Validate { log } => log,
            LinkError::CreateProgram { message } | LinkError::CreateVertexArray { message } => {
                message
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Prepended as its own line to both stage sources, e.g. `#version 330`.
    /// Leave `None` when the sources carry their own `#version` line.
    pub version_header: Option<String>,
    /// Run `glValidateProgram` after a successful link.
    pub validate: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            version_header: None,
            validate: true,
        }
    }
}

impl BuildOptions {
    /// Options with the GLSL version header of the compilation target.
    pub fn for_target() -> Self {
        let shader_version = if cfg!(target_arch = "wasm32") {
            "#version 300 es"
        } else {
            "#version 330"
        };
        Self {
            version_header: Some(shader_version.to_string()),
            ..Self::default()
        }
    }

    fn prepare<'s>(&self, source: &'s str) -> Cow<'s, str> {
        match &self.version_header {
            Some(header) => Cow::Owned(format!("{header}\n{source}")),
            None => Cow::Borrowed(source),
        }
    }
}

/// A compiled single-stage shader object.
///
/// The object is deleted when this value is dropped. A program keeps its own
/// copy of the linked code, so stage objects never outlive a build.
pub struct CompiledShader<'a, C: ShaderContext + ?Sized> {
    gl: &'a C,
    shader: C::Shader,
    stage: Stage,
}

impl<C: ShaderContext + ?Sized> CompiledShader<'_, C> {
    pub fn raw(&self) -> C::Shader {
        self.shader
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }
}

impl<C: ShaderContext + ?Sized> Drop for CompiledShader<'_, C> {
    fn drop(&mut self) {
        log::trace!("delete {} shader {:?}", self.stage, self.shader);
        self.gl.delete_shader(self.shader);
    }
}

/// Compile one stage.
pub fn compile<'a, C: ShaderContext + ?Sized>(
    gl: &'a C,
    source: &str,
    stage: Stage,
) -> Result<CompiledShader<'a, C>, CompileError> {
    let shader = gl
        .create_shader(stage)
        .map_err(|message| CompileError::CreateShader { stage, message })?;
    let shader = CompiledShader { gl, shader, stage };
    gl.shader_source(shader.shader, source);
    gl.compile_shader(shader.shader);
    let log = gl.shader_info_log(shader.shader);
    if !gl.shader_compile_status(shader.shader) {
        log::error!("{stage} failed to compile\n{log}");
        return Err(CompileError::Compile { stage, log });
    }
    if !log.trim().is_empty() {
        log::warn!("{stage} shader compiled with messages\n{log}");
    }
    log::debug!("compiled {stage} shader {:?}", shader.shader);
    Ok(shader)
}

/// Where a program build currently stands.
///
/// `Ready` is the only state whose program may be bound; `Failed` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Idle,
    CompilingVertex,
    CompilingFragment,
    Linking,
    Validating,
    Ready,
    Failed,
}

/// A linked (and by default validated) program, ready to bind.
///
/// Owned by the application. Release it with [`ShaderProgram::destroy`]
/// while the context is still alive.
#[derive(Debug)]
pub struct ShaderProgram<P> {
    program: P,
}

impl<P: Copy> ShaderProgram<P> {
    pub fn raw(&self) -> P {
        self.program
    }

    pub fn use_program<C>(&self, gl: &C)
    where
        C: ShaderContext<Program = P> + ?Sized,
    {
        gl.use_program(Some(self.program));
    }

    pub fn destroy<C>(self, gl: &C)
    where
        C: ShaderContext<Program = P> + ?Sized,
    {
        gl.delete_program(self.program);
    }
}

/// Runs the compile, link and validate steps, tracking [`BuildState`].
pub struct ProgramBuilder<'a, C: ShaderContext + ?Sized> {
    gl: &'a C,
    options: BuildOptions,
    state: BuildState,
}

impl<'a, C: ShaderContext + ?Sized> ProgramBuilder<'a, C> {
    pub fn new(gl: &'a C) -> Self {
        Self::with_options(gl, BuildOptions::default())
    }

    pub fn with_options(gl: &'a C, options: BuildOptions) -> Self {
        Self {
            gl,
            options,
            state: BuildState::Idle,
        }
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build a program; calling it again starts over from `Idle`.
    pub fn build(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ShaderProgram<C::Program>, LinkError> {
        self.state = BuildState::Idle;
        let res = self.run(vertex_source, fragment_source);
        self.state = match res {
            Ok(_) => BuildState::Ready,
            Err(_) => BuildState::Failed,
        };
        res
    }

    pub fn build_pair(
        &mut self,
        sources: &ShaderSourcePair,
    ) -> Result<ShaderProgram<C::Program>, LinkError> {
        self.build(&sources.vertex, &sources.fragment)
    }

    /// Create a vertex array, bind it, then build the program while it is bound.
    ///
    /// Core profiles validate against the bound vertex array, so a program
    /// destined for a drawer is built this way. On success the vertex array is
    /// left bound for the caller's buffer setup; on failure it is deleted.
    pub fn build_in_vertex_array(
        &mut self,
        sources: &ShaderSourcePair,
    ) -> Result<(C::VertexArray, ShaderProgram<C::Program>), LinkError> {
        let gl = self.gl;
        let vertex_array = gl
            .create_vertex_array()
            .map_err(|message| LinkError::CreateVertexArray { message })?;
        gl.bind_vertex_array(Some(vertex_array));
        match self.build_pair(sources) {
            Ok(program) => Ok((vertex_array, program)),
            Err(e) => {
                gl.bind_vertex_array(None);
                gl.delete_vertex_array(vertex_array);
                Err(e)
            }
        }
    }

    fn run(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ShaderProgram<C::Program>, LinkError> {
        let gl = self.gl;
        self.state = BuildState::CompilingVertex;
        let vs = compile(gl, &self.options.prepare(vertex_source), Stage::Vertex)?;
        self.state = BuildState::CompilingFragment;
        let fs = compile(gl, &self.options.prepare(fragment_source), Stage::Fragment)?;

        self.state = BuildState::Linking;
        let program = gl
            .create_program()
            .map_err(|message| LinkError::CreateProgram { message })?;
        gl.attach_shader(program, vs.raw());
        gl.attach_shader(program, fs.raw());
        gl.link_program(program);
        gl.detach_shader(program, vs.raw());
        gl.detach_shader(program, fs.raw());
        if !gl.program_link_status(program) {
            let log = gl.program_info_log(program);
            gl.delete_program(program);
            log::error!("program failed to link\n{log}");
            return Err(LinkError::Link { log });
        }

        if self.options.validate {
            self.state = BuildState::Validating;
            gl.validate_program(program);
            if !gl.program_validate_status(program) {
                let log = gl.program_info_log(program);
                gl.delete_program(program);
                log::error!("program failed validation\n{log}");
                return Err(LinkError::Validate { log });
            }
        }
        let log = gl.program_info_log(program);
        if !log.trim().is_empty() {
            log::warn!("program linked with messages\n{log}");
        }
        log::debug!("linked program {program:?}");
        Ok(ShaderProgram { program })
    }
}

/// Compile both stages and link them with [`BuildOptions::default`].
pub fn link<C: ShaderContext + ?Sized>(
    gl: &C,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<ShaderProgram<C::Program>, LinkError> {
    link_with_options(gl, vertex_source, fragment_source, BuildOptions::default())
}

pub fn link_with_options<C: ShaderContext + ?Sized>(
    gl: &C,
    vertex_source: &str,
    fragment_source: &str,
    options: BuildOptions,
) -> Result<ShaderProgram<C::Program>, LinkError> {
    ProgramBuilder::with_options(gl, options).build(vertex_source, fragment_source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_names() {
        assert_eq!(Stage::Vertex.to_string(), "Vertex");
        assert_eq!(Stage::Fragment.gl_enum(), glow::FRAGMENT_SHADER);
    }

    #[test]
    fn version_header_is_prepended() {
        let options = BuildOptions {
            version_header: Some("#version 330".to_string()),
            validate: true,
        };
        assert_eq!(options.prepare("void main() {}"), "#version 330\nvoid main() {}");
        assert_eq!(BuildOptions::default().prepare("x"), "x");
    }

    #[test]
    fn link_error_carries_stage_log() {
        let e: LinkError = CompileError::Compile {
            stage: Stage::Fragment,
            log: "0:3: error".to_string(),
        }
        .into();
        assert_eq!(e.log(), "0:3: error");
        assert!(e.to_string().contains("Fragment shader failed to compile"));
    }
}
