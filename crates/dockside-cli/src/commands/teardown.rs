use super::{ConfigArgs, EngineArgs};
use dockside_core::ResourceName;
use dockside_engine::{DockerClient, lifecycle};

/// Stop and remove the container and image named `name`, if they exist.
pub async fn teardown(
    name: &str,
    config: &ConfigArgs,
    engine: &EngineArgs,
) -> anyhow::Result<()> {
    let name = ResourceName::parse(name)?;
    let config = super::load_config(config.project_path.as_deref())?;
    let docker = DockerClient::new(
        &config.engine.program,
        super::execution_strategy(&config.engine, engine),
    );

    println!("Tearing down '{name}'...");
    let report = lifecycle::teardown(&docker, &name).await?;

    if report.is_noop() {
        println!("  Nothing to remove.");
    } else {
        for action in &report.actions {
            println!("  {} '{name}'", capitalize(&action.to_string()));
        }
    }

    println!();
    println!("Teardown complete.");
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
