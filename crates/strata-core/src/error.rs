use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrataError {
    #[error("Undeclared dimension value: {axis}={value}")]
    InvalidDimension { axis: String, value: String },

    #[error("Resource not found: '{name}' - searched {searched:?}")]
    ResourceNotFound {
        name: String,
        searched: Vec<PathBuf>,
    },

    #[error("Manifest parse error in {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Project root does not exist: {path}")]
    ProjectRootNotFound { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StrataError>;

impl StrataError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidDimension { .. } => 2,
            Self::ResourceNotFound { .. } => 3,
            Self::ConfigParse { .. } => 4,
            Self::ProjectRootNotFound { .. } => 5,
            _ => 1,
        }
    }
}
