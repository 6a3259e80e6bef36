mod deploy;
mod deploy_pipeline;
mod descriptor;
mod doctor;
mod teardown;

use clap::Args;
use dockside_core::{
    DeploySettings, DocksideConfig, EngineConfig, Framework, ProjectLayout, ResourceName,
};
use dockside_engine::ExecutionStrategy;
use std::path::{Path, PathBuf};

pub use deploy::deploy;
pub use descriptor::descriptor;
pub use doctor::doctor;
pub use teardown::teardown;

/// Options locating and describing the project to containerize.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Absolute path to the project directory
    #[arg(long, value_name = "PATH")]
    pub project_path: PathBuf,
    /// Extension of the project file inside that directory
    #[arg(long, value_name = "EXT", default_value = "csproj")]
    pub project_ext: String,
    /// Target framework, e.g. `8.0` or `net8.0`; also selects the runtime image tag
    #[arg(long, value_name = "VERSION")]
    pub framework: Option<String>,
}

/// Options controlling how the container engine is invoked.
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// Route every container engine call through the configured shim (`wsl` by default)
    #[arg(long)]
    pub wsl: bool,
}

/// Options for commands that only need tool settings, not a project.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Project directory whose `dockside.toml` supplies tool settings
    #[arg(long, value_name = "PATH")]
    pub project_path: Option<PathBuf>,
}

/// Project resolved from CLI options, before any tool runs.
pub(crate) struct ResolvedProject {
    pub layout: ProjectLayout,
    pub config: DocksideConfig,
    pub framework: Option<Framework>,
}

/// Validate the project options and load `dockside.toml` from the project
/// directory.
pub(crate) fn resolve_project(args: &ProjectArgs) -> anyhow::Result<ResolvedProject> {
    let layout = ProjectLayout::discover(&args.project_path, &args.project_ext)?;
    let config = DocksideConfig::load(&layout.project_dir)?;
    let framework = args.framework.as_deref().map(Framework::parse).transpose()?;

    tracing::debug!(
        project = %layout.name,
        work_dir = %layout.work_dir.display(),
        "project resolved"
    );

    Ok(ResolvedProject {
        layout,
        config,
        framework,
    })
}

/// `dockside.toml` from the given project directory, or the built-in
/// defaults when none is given.
pub(crate) fn load_config(project_dir: Option<&Path>) -> anyhow::Result<DocksideConfig> {
    match project_dir {
        Some(dir) => Ok(DocksideConfig::load(dir)?),
        None => Ok(DocksideConfig::default()),
    }
}

/// Build the immutable plan for one deploy run. Every validation error
/// surfaces here, before any external tool is invoked.
pub(crate) fn resolve_settings(
    project: &ProjectArgs,
    name: &str,
    host_port: u16,
    simple_console: bool,
) -> anyhow::Result<DeploySettings> {
    let name = ResourceName::parse(name)?;
    let ResolvedProject {
        layout,
        config,
        framework,
    } = resolve_project(project)?;

    Ok(DeploySettings {
        layout,
        name,
        host_port,
        framework,
        simple_console,
        config,
    })
}

pub(crate) fn execution_strategy(config: &EngineConfig, args: &EngineArgs) -> ExecutionStrategy {
    if args.wsl {
        ExecutionStrategy::Shim(config.shim.clone())
    } else {
        ExecutionStrategy::Direct
    }
}
