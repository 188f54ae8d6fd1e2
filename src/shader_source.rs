//! Split a combined shader file into its vertex and fragment sources.
//!
//! The file holds both stages, each introduced by a marker line:
//!
//! ```text
//! #shader #vertex
//! #version 330 core
//! layout(location = 0) in vec4 position;
//! void main() { gl_Position = position; }
//!
//! #shader #fragment
//! #version 330 core
//! out vec4 color;
//! void main() { color = vec4(1.0, 0.0, 0.0, 1.0); }
//! ```
//!
//! A line is a marker when it contains `#vertex`, `#fragment` or `shader`.
//! The first two switch the current section, a bare `shader` line is dropped
//! and keeps the section as it is. Marker lines never reach the output.

use crate::shader_program::Stage;
use std::io::BufRead;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("shader file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read shader file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read shader source")]
    Read(#[source] std::io::Error),

    /// Source text showed up before any `#vertex`/`#fragment` marker.
    #[error("line {line_number}: shader source before the first section marker: {line:?}")]
    ContentBeforeMarker { line_number: usize, line: String },
}

/// Vertex and fragment source text of one program.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShaderSourcePair {
    pub vertex: String,
    pub fragment: String,
}

enum Marker {
    Switch(Stage),
    Other,
}

fn marker(line: &str) -> Option<Marker> {
    if line.contains("#vertex") {
        Some(Marker::Switch(Stage::Vertex))
    } else if line.contains("#fragment") {
        Some(Marker::Switch(Stage::Fragment))
    } else if line.contains("shader") {
        Some(Marker::Other)
    } else {
        None
    }
}

impl ShaderSourcePair {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Read and split the combined shader file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let pair = Self::load_from_reader(std::io::BufReader::new(file)).map_err(|e| match e {
            LoadError::Read(source) => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
            e => e,
        })?;
        log::debug!(
            "loaded {}: vertex {} bytes, fragment {} bytes",
            path.display(),
            pair.vertex.len(),
            pair.fragment.len()
        );
        Ok(pair)
    }

    /// Split text already in memory, e.g. from `include_str!`.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        Self::load_from_reader(text.as_bytes())
    }

    pub fn load_from_reader<R: BufRead>(reader: R) -> Result<Self, LoadError> {
        let mut pair = Self::default();
        let mut section: Option<Stage> = None;
        for (i_line, line) in reader.lines().enumerate() {
            let line = line.map_err(LoadError::Read)?;
            match marker(&line) {
                Some(Marker::Switch(stage)) => {
                    section = Some(stage);
                    continue;
                }
                Some(Marker::Other) => continue,
                None => {}
            }
            let buf = match section {
                Some(Stage::Vertex) => &mut pair.vertex,
                Some(Stage::Fragment) => &mut pair.fragment,
                None if line.trim().is_empty() => {
                    log::trace!("skip blank line {} before the first marker", i_line + 1);
                    continue;
                }
                None => {
                    return Err(LoadError::ContentBeforeMarker {
                        line_number: i_line + 1,
                        line,
                    })
                }
            };
            buf.push_str(&line);
            buf.push('\n');
        }
        Ok(pair)
    }

    pub fn source(&self, stage: Stage) -> &str {
        match stage {
            Stage::Vertex => &self.vertex,
            Stage::Fragment => &self.fragment,
        }
    }
}
