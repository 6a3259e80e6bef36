mod commands;

use clap::{Parser, Subcommand};
use commands::{ConfigArgs, EngineArgs, ProjectArgs};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "dockside",
    about = "Build .NET web projects into local Docker containers"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Restore, build and publish a project, then run it in a fresh container
    Deploy {
        #[command(flatten)]
        project: ProjectArgs,
        /// Container and image name
        #[arg(long)]
        name: String,
        /// Host port mapped to the container's listen port
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        port: u16,
        /// Use the plain-text console log formatter inside the container
        #[arg(long)]
        simple_console: bool,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Print the Dockerfile that deploy would generate
    Descriptor {
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Stop and remove the container and image with the given name
    Teardown {
        /// Container and image name
        #[arg(long)]
        name: String,
        #[command(flatten)]
        config: ConfigArgs,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Check that the toolchain and container engine respond
    Doctor {
        #[command(flatten)]
        config: ConfigArgs,
        #[command(flatten)]
        engine: EngineArgs,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Deploy {
            project,
            name,
            port,
            simple_console,
            engine,
        } => commands::deploy(&project, &name, port, simple_console, &engine).await,
        Commands::Descriptor { project } => commands::descriptor(&project),
        Commands::Teardown {
            name,
            config,
            engine,
        } => commands::teardown(&name, &config, &engine).await,
        Commands::Doctor { config, engine } => commands::doctor(&config, &engine).await,
    }
}
