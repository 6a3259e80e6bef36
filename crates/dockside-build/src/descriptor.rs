use std::path::Path;

/// Writes the generated Dockerfile, replacing any previous version.
///
/// The parent directory is created when missing; there is no merge with
/// existing content.
pub fn write_descriptor(path: &Path, content: &str) -> Result<(), DescriptorError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| DescriptorError::CreateDir {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, content).map_err(|e| DescriptorError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "descriptor written");
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("failed to create directory {path}")]
    CreateDir {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write Dockerfile at {path}")]
    Write {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}
