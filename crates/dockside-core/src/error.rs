use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Validation and configuration failures, reported before any tool runs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    // ── Project validation ──
    #[error("project path is required")]
    MissingProjectPath,

    #[error("project path {0} is not absolute")]
    ProjectPathNotAbsolute(PathBuf),

    #[error("project path {0} does not exist")]
    ProjectPathNotFound(PathBuf),

    #[error("project path {0} is not a directory")]
    ProjectPathNotDirectory(PathBuf),

    #[error("project file not found at {0}")]
    ProjectFileMissing(PathBuf),

    #[error("project path {0} has no parent directory to hold the working directory")]
    NoParentDirectory(PathBuf),

    #[error("project directory name in {0} is not valid UTF-8")]
    InvalidProjectName(PathBuf),

    #[error("invalid project file extension {0:?}")]
    InvalidProjectExtension(String),

    // ── Resource names ──
    #[error("invalid resource name {name:?}: {reason}")]
    InvalidResourceName { name: String, reason: &'static str },

    #[error("invalid framework {0:?}: expected a version like 8.0 or a moniker like net8.0")]
    InvalidFramework(String),
}
