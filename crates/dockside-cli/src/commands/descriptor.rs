use super::ProjectArgs;
use dockside_build::DockerfileGenerator;

/// Print the Dockerfile `deploy` would write, without running any tool.
pub fn descriptor(project: &ProjectArgs) -> anyhow::Result<()> {
    let resolved = super::resolve_project(project)?;

    let dockerfile = DockerfileGenerator::for_project(
        &resolved.layout,
        &resolved.config,
        resolved.framework.as_ref(),
    )
    .render();

    print!("{dockerfile}");
    Ok(())
}
