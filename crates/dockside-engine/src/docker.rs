use crate::executor::{ExecutionStrategy, RealExecutor, ToolExecutor};
use crate::lifecycle::{ContainerEngine, ContainerHandle, ContainerState, ImageHandle, ImageState};
use crate::tool::ToolError;
use std::fmt;
use std::path::Path;

/// Container engine operations, parameterized over the executor for testability.
pub struct DockerClient<E: ToolExecutor = RealExecutor> {
    executor: E,
}

impl DockerClient<RealExecutor> {
    pub fn new(program: &str, strategy: ExecutionStrategy) -> Self {
        Self {
            executor: RealExecutor::with_strategy(program, strategy),
        }
    }
}

impl<E: ToolExecutor> DockerClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    // ── Listings ──

    /// Names of running containers.
    pub async fn running_containers(&self) -> Result<Vec<String>, EngineError> {
        let output = self
            .executor
            .exec(&args(["ps", "--format", "{{.Names}}"]))
            .await
            .map_err(|e| EngineError::op(EngineOp::ListRunning, e))?;
        Ok(lines(&output))
    }

    /// Names of containers that exist but are not running.
    pub async fn stopped_containers(&self) -> Result<Vec<String>, EngineError> {
        let output = self
            .executor
            .exec(&args([
                "ps",
                "-a",
                "--filter",
                "status=exited",
                "--filter",
                "status=created",
                "--filter",
                "status=dead",
                "--format",
                "{{.Names}}",
            ]))
            .await
            .map_err(|e| EngineError::op(EngineOp::ListStopped, e))?;
        Ok(lines(&output))
    }

    /// IDs of images matching `reference`.
    pub async fn image_ids(&self, reference: &str) -> Result<Vec<String>, EngineError> {
        let output = self
            .executor
            .exec(&args(["images", "-q", reference]))
            .await
            .map_err(|e| EngineError::op(EngineOp::ListImages, e))?;
        Ok(lines(&output))
    }

    // ── Image ──

    /// Build `image` from `descriptor` with `context_dir` as build context.
    pub async fn build_image(
        &self,
        descriptor: &Path,
        context_dir: &Path,
        image: &ImageHandle,
    ) -> Result<(), EngineError> {
        let descriptor = path_str(descriptor)?;
        let context = path_str(context_dir)?;

        self.executor
            .exec_streaming(&args([
                "build",
                "-f",
                descriptor,
                "-t",
                image.reference(),
                context,
            ]))
            .await
            .map_err(|e| EngineError::op(EngineOp::Build, e))
    }

    pub async fn pull(&self, reference: &str) -> Result<(), EngineError> {
        self.executor
            .exec_streaming(&args(["pull", reference]))
            .await
            .map_err(|e| EngineError::op(EngineOp::Pull, e))
    }

    // ── Container ──

    /// Start a detached container and return its ID.
    pub async fn run(
        &self,
        container: &ContainerHandle,
        image: &ImageHandle,
        port_mapping: &str,
        env: &[(String, String)],
    ) -> Result<String, EngineError> {
        let mut cmd = args(["run", "-d", "--name", container.name(), "-p", port_mapping]);
        for (key, value) in env {
            cmd.push("-e".to_owned());
            cmd.push(format!("{key}={value}"));
        }
        cmd.push(image.reference().to_owned());

        let output = self
            .executor
            .exec(&cmd)
            .await
            .map_err(|e| EngineError::op(EngineOp::Run, e))?;

        Ok(output.trim().to_owned())
    }

    /// Server version, used by `doctor`.
    pub async fn version(&self) -> Result<String, EngineError> {
        let output = self
            .executor
            .exec(&args(["version", "--format", "{{.Server.Version}}"]))
            .await
            .map_err(|e| EngineError::op(EngineOp::Version, e))?;
        Ok(output.trim().to_owned())
    }
}

impl<E: ToolExecutor> ContainerEngine for DockerClient<E> {
    async fn container_state(
        &self,
        container: &ContainerHandle,
    ) -> Result<ContainerState, EngineError> {
        let name = container.name();
        if self.running_containers().await?.iter().any(|n| n == name) {
            return Ok(ContainerState::Running);
        }
        if self.stopped_containers().await?.iter().any(|n| n == name) {
            return Ok(ContainerState::Stopped);
        }
        Ok(ContainerState::Absent)
    }

    async fn image_state(&self, image: &ImageHandle) -> Result<ImageState, EngineError> {
        if self.image_ids(&image.tagged()).await?.is_empty() {
            Ok(ImageState::Absent)
        } else {
            Ok(ImageState::Present)
        }
    }

    async fn stop_container(&self, container: &ContainerHandle) -> Result<(), EngineError> {
        self.executor
            .exec(&args(["stop", container.name()]))
            .await
            .map_err(|e| EngineError::op(EngineOp::Stop, e))?;
        Ok(())
    }

    async fn remove_container(&self, container: &ContainerHandle) -> Result<(), EngineError> {
        self.executor
            .exec(&args(["rm", container.name()]))
            .await
            .map_err(|e| EngineError::op(EngineOp::Remove, e))?;
        Ok(())
    }

    async fn remove_image(&self, image: &ImageHandle) -> Result<(), EngineError> {
        let reference = image.tagged();
        self.executor
            .exec(&args(["rmi", reference.as_str()]))
            .await
            .map_err(|e| EngineError::op(EngineOp::RemoveImage, e))?;
        Ok(())
    }
}

// ── Helper ──

fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}

fn lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect()
}

fn path_str(path: &Path) -> Result<&str, EngineError> {
    path.to_str()
        .ok_or_else(|| EngineError::InvalidPath(path.to_path_buf()))
}

// ── Error types ──

/// Container engine operation, named in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineOp {
    ListRunning,
    ListStopped,
    ListImages,
    Stop,
    Remove,
    RemoveImage,
    Build,
    Pull,
    Run,
    Version,
}

impl fmt::Display for EngineOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ListRunning => "ps",
            Self::ListStopped => "ps -a",
            Self::ListImages => "images",
            Self::Stop => "stop",
            Self::Remove => "rm",
            Self::RemoveImage => "rmi",
            Self::Build => "build",
            Self::Pull => "pull",
            Self::Run => "run",
            Self::Version => "version",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("container engine `{op}` failed")]
    Operation { op: EngineOp, source: ToolError },

    #[error("path is not valid UTF-8: {0}")]
    InvalidPath(std::path::PathBuf),
}

impl EngineError {
    fn op(op: EngineOp, source: ToolError) -> Self {
        Self::Operation { op, source }
    }

    /// The failed operation, if any.
    pub fn operation(&self) -> Option<EngineOp> {
        match self {
            Self::Operation { op, .. } => Some(*op),
            Self::InvalidPath(_) => None,
        }
    }
}
