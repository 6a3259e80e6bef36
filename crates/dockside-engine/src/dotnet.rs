use crate::executor::{RealExecutor, ToolExecutor};
use crate::tool::ToolError;
use std::fmt;
use std::path::Path;

/// Options shared by `build` and `publish`.
#[derive(Debug, Clone, Copy)]
pub struct BuildOptions<'a> {
    /// Build configuration, e.g. `Release`
    pub configuration: &'a str,
    /// Target framework moniker passed with `-f`, when set
    pub framework: Option<&'a str>,
}

/// Build/publish toolchain operations, parameterized over the executor.
///
/// The toolchain always runs directly; only container engine calls are
/// routed through an execution shim.
pub struct DotnetClient<E: ToolExecutor = RealExecutor> {
    executor: E,
}

impl DotnetClient<RealExecutor> {
    pub fn new(program: &str) -> Self {
        Self {
            executor: RealExecutor::new(program),
        }
    }
}

impl<E: ToolExecutor> DotnetClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    pub async fn restore(&self, project_file: &Path) -> Result<(), ToolchainError> {
        let project = path_str(project_file)?;
        self.executor
            .exec_streaming(&[ToolchainStep::Restore.to_string(), project.to_owned()])
            .await
            .map_err(|e| ToolchainError::step(ToolchainStep::Restore, e))
    }

    pub async fn build(
        &self,
        project_file: &Path,
        output_dir: &Path,
        options: BuildOptions<'_>,
    ) -> Result<(), ToolchainError> {
        self.compile(ToolchainStep::Build, project_file, output_dir, options)
            .await
    }

    pub async fn publish(
        &self,
        project_file: &Path,
        output_dir: &Path,
        options: BuildOptions<'_>,
    ) -> Result<(), ToolchainError> {
        self.compile(ToolchainStep::Publish, project_file, output_dir, options)
            .await
    }

    /// SDK version, used by `doctor`.
    pub async fn version(&self) -> Result<String, ToolchainError> {
        let output = self
            .executor
            .exec(&["--version".to_owned()])
            .await
            .map_err(|e| ToolchainError::step(ToolchainStep::Version, e))?;
        Ok(output.trim().to_owned())
    }

    async fn compile(
        &self,
        step: ToolchainStep,
        project_file: &Path,
        output_dir: &Path,
        options: BuildOptions<'_>,
    ) -> Result<(), ToolchainError> {
        let project = path_str(project_file)?;
        let output = path_str(output_dir)?;
        let verb = step.to_string();

        let mut cmd: Vec<String> = [
            verb.as_str(),
            project,
            "-c",
            options.configuration,
            "-o",
            output,
        ]
        .iter()
        .map(|s| (*s).to_owned())
        .collect();

        if let Some(framework) = options.framework {
            cmd.push("-f".to_owned());
            cmd.push(framework.to_owned());
        }

        self.executor
            .exec_streaming(&cmd)
            .await
            .map_err(|e| ToolchainError::step(step, e))
    }
}

fn path_str(path: &Path) -> Result<&str, ToolchainError> {
    path.to_str()
        .ok_or_else(|| ToolchainError::InvalidPath(path.to_path_buf()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolchainStep {
    Restore,
    Build,
    Publish,
    Version,
}

impl fmt::Display for ToolchainStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Restore => "restore",
            Self::Build => "build",
            Self::Publish => "publish",
            Self::Version => "--version",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
    #[error("toolchain `{step}` failed")]
    Step {
        step: ToolchainStep,
        source: ToolError,
    },

    #[error("path is not valid UTF-8: {0}")]
    InvalidPath(std::path::PathBuf),
}

impl ToolchainError {
    fn step(step: ToolchainStep, source: ToolError) -> Self {
        Self::Step { step, source }
    }
}
