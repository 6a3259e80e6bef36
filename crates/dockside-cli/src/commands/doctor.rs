use super::{ConfigArgs, EngineArgs};
use dockside_engine::{DockerClient, DotnetClient};

pub async fn doctor(config: &ConfigArgs, engine: &EngineArgs) -> anyhow::Result<()> {
    let config = super::load_config(config.project_path.as_deref())?;
    let strategy = super::execution_strategy(&config.engine, engine);
    tracing::debug!(?strategy, "checking tools");

    let dotnet = DotnetClient::new(&config.toolchain.program);
    let docker = DockerClient::new(&config.engine.program, strategy);
    let report = dockside_engine::doctor(&dotnet, &docker).await;

    println!();
    println!("{report}");

    if !report.all_passed() {
        anyhow::bail!("some checks failed, see above for details");
    }

    Ok(())
}
