//! Project location validation and the working directory layout.
//!
//! Build and publish output go to a sibling of the project directory so
//! that IDE and toolchain conventions (`bin/`, `obj/`) are left untouched:
//!
//! ```text
//! <parent>/
//!   MyApi/                 project directory
//!     MyApi.csproj
//!   MyApi.dockside/        working directory
//!     build/
//!     publish/
//!     Dockerfile
//! ```

use std::path::{Path, PathBuf};

/// Suffix appended to the project name to form the working directory.
pub const WORK_DIR_SUFFIX: &str = ".dockside";
pub const BUILD_DIR_NAME: &str = "build";
pub const PUBLISH_DIR_NAME: &str = "publish";
pub const DESCRIPTOR_FILE_NAME: &str = "Dockerfile";

/// Extension of the main artifact the runtime loads.
pub const ENTRY_POINT_EXTENSION: &str = "dll";

/// A validated project and the paths derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Project name (the project directory's name)
    pub name: String,
    /// Absolute path to the project directory
    pub project_dir: PathBuf,
    /// `<project_dir>/<name>.<ext>`
    pub project_file: PathBuf,
    /// `<parent>/<name>.dockside`
    pub work_dir: PathBuf,
    pub build_dir: PathBuf,
    pub publish_dir: PathBuf,
    pub descriptor_path: PathBuf,
}

impl ProjectLayout {
    /// Validate `project_path` and compute the working layout.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingProjectPath`](crate::Error::MissingProjectPath) for an empty path
    /// - [`Error::ProjectPathNotAbsolute`](crate::Error::ProjectPathNotAbsolute)
    /// - [`Error::ProjectPathNotFound`](crate::Error::ProjectPathNotFound)
    /// - [`Error::ProjectPathNotDirectory`](crate::Error::ProjectPathNotDirectory)
    /// - [`Error::ProjectFileMissing`](crate::Error::ProjectFileMissing) when
    ///   `<name>.<ext>` is not inside the project directory
    pub fn discover(project_path: &Path, extension: &str) -> crate::Result<Self> {
        if project_path.as_os_str().is_empty() {
            return Err(crate::Error::MissingProjectPath);
        }
        if !project_path.is_absolute() {
            return Err(crate::Error::ProjectPathNotAbsolute(
                project_path.to_path_buf(),
            ));
        }
        if !project_path.exists() {
            return Err(crate::Error::ProjectPathNotFound(project_path.to_path_buf()));
        }
        if !project_path.is_dir() {
            return Err(crate::Error::ProjectPathNotDirectory(
                project_path.to_path_buf(),
            ));
        }

        let extension = normalize_extension(extension)?;

        let name = project_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| crate::Error::InvalidProjectName(project_path.to_path_buf()))?
            .to_owned();

        let parent = project_path
            .parent()
            .ok_or_else(|| crate::Error::NoParentDirectory(project_path.to_path_buf()))?;

        let project_file = project_path.join(format!("{name}.{extension}"));
        if !project_file.is_file() {
            return Err(crate::Error::ProjectFileMissing(project_file));
        }

        let work_dir = parent.join(format!("{name}{WORK_DIR_SUFFIX}"));

        tracing::debug!(
            name = %name,
            project_file = %project_file.display(),
            work_dir = %work_dir.display(),
            "project layout resolved"
        );

        Ok(Self {
            name,
            project_dir: project_path.to_path_buf(),
            project_file,
            build_dir: work_dir.join(BUILD_DIR_NAME),
            publish_dir: work_dir.join(PUBLISH_DIR_NAME),
            descriptor_path: work_dir.join(DESCRIPTOR_FILE_NAME),
            work_dir,
        })
    }

    /// File name of the main artifact, e.g. `MyApi.dll`.
    pub fn entry_point(&self) -> String {
        format!("{}.{ENTRY_POINT_EXTENSION}", self.name)
    }
}

/// Accepts `csproj` or `.csproj`; rejects empty values and path separators.
fn normalize_extension(extension: &str) -> crate::Result<&str> {
    let trimmed = extension.trim().trim_start_matches('.');
    if trimmed.is_empty() || trimmed.contains(['/', '\\']) {
        return Err(crate::Error::InvalidProjectExtension(extension.to_owned()));
    }
    Ok(trimmed)
}
