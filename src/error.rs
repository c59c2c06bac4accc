//! Error types.

use std::{ffi, io, path};

use crate::shader::Stage;

/// Failure to build a GLSL program.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A shader source file could not be read.
    #[error("failed to read {stage} shader source from {}", .path.display())]
    Read {
        stage: Stage,
        path: path::PathBuf,
        #[source]
        source: io::Error,
    },

    /// Shader source text cannot be passed to the driver.
    #[error("{stage} shader source contains an interior NUL byte")]
    Nul {
        stage: Stage,
        #[source]
        source: ffi::NulError,
    },

    /// A shader stage failed to compile.
    #[error("{stage} shader compilation failed\n{log}")]
    Compile {
        stage: Stage,
        log: String,
    },

    /// The program failed to link.
    #[error("program linkage failed\n{log}")]
    Link {
        log: String,
    },
}

impl Error {
    /// Returns the shader stage the error concerns, if any.
    pub fn stage(&self) -> Option<Stage> {
        match *self {
            Error::Read { stage, .. } => Some(stage),
            Error::Nul { stage, .. } => Some(stage),
            Error::Compile { stage, .. } => Some(stage),
            Error::Link { .. } => None,
        }
    }
}

/// Result type returned by program construction.
pub type Result<T> = std::result::Result<T, Error>;
