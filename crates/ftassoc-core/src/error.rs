use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssocError {
    #[error("Invalid file name pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Failed to parse rules file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("File type declared more than once: {name}")]
    DuplicateFileType { name: String },

    #[error("File type not found: {name}")]
    FileTypeNotFound { name: String },

    #[error("Directory does not exist: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AssocError>;

impl AssocError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileTypeNotFound { .. } => 2,
            Self::DirectoryNotFound { .. } => 3,
            Self::InvalidPattern { .. } => 4,
            Self::ConfigParse { .. } | Self::DuplicateFileType { .. } => 5,
            _ => 1,
        }
    }
}
