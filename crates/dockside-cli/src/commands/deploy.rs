use super::{EngineArgs, ProjectArgs, deploy_pipeline};
use dockside_engine::{DockerClient, DotnetClient};

/// Execute the full deploy pipeline.
pub async fn deploy(
    project: &ProjectArgs,
    name: &str,
    port: u16,
    simple_console: bool,
    engine: &EngineArgs,
) -> anyhow::Result<()> {
    let settings = super::resolve_settings(project, name, port, simple_console)?;

    let dotnet = DotnetClient::new(&settings.config.toolchain.program);
    let docker = DockerClient::new(
        &settings.config.engine.program,
        super::execution_strategy(&settings.config.engine, engine),
    );

    println!(
        "Deploying {} as '{}' on port {}...",
        settings.layout.name, settings.name, settings.host_port
    );

    let outcome = deploy_pipeline::run(&settings, &dotnet, &docker).await?;

    println!();
    for step in &outcome.steps {
        println!("  {step}");
    }
    println!();
    println!(
        "Running: {} ({}) at http://localhost:{}",
        settings.name, outcome.container_id, settings.host_port
    );

    Ok(())
}
