//! Reconciles dynamic libraries between build and publish output.
//!
//! `dotnet publish` resolves dependencies on its own and can leave out
//! libraries that `dotnet build` produced. Every library present in the
//! build output but absent from the publish output is copied over; files
//! already in the publish output are never touched.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Basenames of the files in one directory that carry a given extension.
///
/// Non-recursive and regular files only. Names are sorted so that the
/// listing (and anything derived from it) is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactListing {
    dir: PathBuf,
    names: Vec<String>,
}

impl ArtifactListing {
    /// List `dir`, keeping files whose extension equals `extension`
    /// (ASCII case-insensitive, leading dot optional).
    pub fn scan(dir: &Path, extension: &str) -> Result<Self, ArtifactError> {
        let extension = extension.trim_start_matches('.');
        let entries = std::fs::read_dir(dir).map_err(|e| ArtifactError::List {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ArtifactError::List {
                path: dir.to_path_buf(),
                source: e,
            })?;
            let file_type = entry.file_type().map_err(|e| ArtifactError::List {
                path: entry.path(),
                source: e,
            })?;
            if !file_type.is_file() {
                continue;
            }

            let path = entry.path();
            let matches = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
            if !matches {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => {
                    tracing::warn!(name = ?raw, dir = %dir.display(), "skipping non UTF-8 file name");
                }
            }
        }
        names.sort();

        tracing::debug!(dir = %dir.display(), count = names.len(), "artifacts listed");
        Ok(Self {
            dir: dir.to_path_buf(),
            names,
        })
    }

    /// Build a listing from known names, e.g. for planning without I/O.
    pub fn from_names<I, S>(dir: &Path, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dir: dir.to_path_buf(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Names in `source` that do not appear in `target`, in `source` order.
///
/// Each name is reported once even if `source` repeats it.
pub fn missing_artifacts(source: &ArtifactListing, target: &ArtifactListing) -> Vec<String> {
    let present: HashSet<&str> = target.names.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();

    source
        .names
        .iter()
        .map(String::as_str)
        .filter(|name| !present.contains(name))
        .filter(|name| seen.insert(*name))
        .map(str::to_owned)
        .collect()
}

/// What [`reconcile_artifacts`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Names copied from source to target, in copy order
    pub copied: Vec<String>,
    /// Number of source names already present in the target
    pub already_present: usize,
}

/// Copy every library in `source_dir` that `target_dir` lacks.
///
/// Stops at the first I/O failure; files copied before the failure stay in
/// place.
pub fn reconcile_artifacts(
    source_dir: &Path,
    target_dir: &Path,
    extension: &str,
) -> Result<ReconcileReport, ArtifactError> {
    let source = ArtifactListing::scan(source_dir, extension)?;
    let target = ArtifactListing::scan(target_dir, extension)?;

    let missing = missing_artifacts(&source, &target);
    let already_present = source.names.len() - missing.len();

    for name in &missing {
        let from = source_dir.join(name);
        let to = target_dir.join(name);
        tracing::debug!(from = %from.display(), to = %to.display(), "copying artifact");

        std::fs::copy(&from, &to).map_err(|e| ArtifactError::Copy {
            from,
            to,
            source: e,
        })?;
    }

    tracing::info!(
        copied = missing.len(),
        already_present,
        "artifacts reconciled"
    );

    Ok(ReconcileReport {
        copied: missing,
        already_present,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to list artifacts in {path}")]
    List {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to copy {from} to {to}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}
