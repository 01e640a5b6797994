use std::path::PathBuf;

use thiserror::Error;

/// A markdown document has no line starting with `# `.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no title found in markdown (expected a line starting with `# `)")]
pub struct MissingTitleError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing title in {}", .path.display())]
    MissingTitle {
        path: PathBuf,
        #[source]
        source: MissingTitleError,
    },

    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy {} to {}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to clean output directory {}", .path.display())]
    Clean {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("refusing to clean {}: it contains site sources", .path.display())]
    UnsafeClean { path: PathBuf },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error("invalid path: {}", .0.display())]
    InvalidPath(PathBuf),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("content directory not specified")]
    MissingContentDir,
    #[error("template not specified")]
    MissingTemplate,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parsing(#[from] toml::de::Error),
}
