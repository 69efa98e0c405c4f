use std::{io, path::PathBuf};
use thiserror::Error;

pub mod parse;
pub mod program;
pub mod stage;

pub use self::{
    parse::ShaderProgramSource,
    program::{Shader, UniformCache},
    stage::StageType,
};

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("could not read shader `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: unknown shader stage in `{text}`")]
    UnknownStage { line: usize, text: String },

    #[error("shader source has no {0} section")]
    MissingStage(StageType),

    #[error("{stage} shader compilation failed: {log}")]
    Compile { stage: StageType, log: String },

    #[error("shader program failed to link: {0}")]
    Link(String),
}
