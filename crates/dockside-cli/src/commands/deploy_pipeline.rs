use anyhow::Context;
use dockside_build::{DockerfileGenerator, reconcile_artifacts, write_descriptor};
use dockside_core::DeploySettings;
use dockside_engine::{
    BuildOptions, ContainerHandle, DockerClient, DotnetClient, ImageHandle, ToolExecutor, teardown,
};
use std::fmt;

/// Deploy stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Restore,
    Build,
    Publish,
    ReconcileArtifacts,
    GenerateDescriptor,
    ReconcileResources,
    BuildImage,
    PullBaseImage,
    RunContainer,
}

impl Stage {
    fn failed(self) -> String {
        format!("{self} failed")
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Restore => "restore",
            Self::Build => "build",
            Self::Publish => "publish",
            Self::ReconcileArtifacts => "reconcile-artifacts",
            Self::GenerateDescriptor => "generate-descriptor",
            Self::ReconcileResources => "reconcile-resources",
            Self::BuildImage => "build-image",
            Self::PullBaseImage => "pull-base-image",
            Self::RunContainer => "run-container",
        })
    }
}

/// Result of a successful deploy pipeline run.
#[derive(Debug)]
pub(crate) struct DeployOutcome {
    pub steps: Vec<String>,
    pub container_id: String,
}

/// Run the full deploy pipeline:
/// restore → build → publish → reconcile-artifacts → generate-descriptor →
/// reconcile-resources → build-image → pull-base-image → run-container.
///
/// The first failing stage aborts the run. Nothing done by earlier stages is
/// undone.
pub(crate) async fn run<T: ToolExecutor, D: ToolExecutor>(
    settings: &DeploySettings,
    dotnet: &DotnetClient<T>,
    docker: &DockerClient<D>,
) -> anyhow::Result<DeployOutcome> {
    let layout = &settings.layout;
    let options = BuildOptions {
        configuration: &settings.config.toolchain.configuration,
        framework: settings.target_framework(),
    };
    let container = ContainerHandle::new(settings.name.clone());
    let image = ImageHandle::new(settings.name.clone());
    let base_image = settings.base_image();
    let mut steps = Vec::new();

    // Toolchain
    enter(Stage::Restore);
    dotnet
        .restore(&layout.project_file)
        .await
        .with_context(|| Stage::Restore.failed())?;
    steps.push("Packages restored".to_string());

    enter(Stage::Build);
    dotnet
        .build(&layout.project_file, &layout.build_dir, options)
        .await
        .with_context(|| Stage::Build.failed())?;
    steps.push(format!("Built to {}", layout.build_dir.display()));

    enter(Stage::Publish);
    dotnet
        .publish(&layout.project_file, &layout.publish_dir, options)
        .await
        .with_context(|| Stage::Publish.failed())?;
    steps.push(format!("Published to {}", layout.publish_dir.display()));

    // Local files
    enter(Stage::ReconcileArtifacts);
    let report = reconcile_artifacts(
        &layout.build_dir,
        &layout.publish_dir,
        &settings.config.artifacts.extension,
    )
    .with_context(|| Stage::ReconcileArtifacts.failed())?;
    if report.copied.is_empty() {
        steps.push("Publish output already complete".to_string());
    } else {
        steps.push(format!(
            "Copied {} missing librar{}: {}",
            report.copied.len(),
            if report.copied.len() == 1 { "y" } else { "ies" },
            report.copied.join(", ")
        ));
    }

    enter(Stage::GenerateDescriptor);
    let dockerfile = DockerfileGenerator::from_settings(settings).render();
    write_descriptor(&layout.descriptor_path, &dockerfile)
        .with_context(|| Stage::GenerateDescriptor.failed())?;
    steps.push(format!("Dockerfile written to {}", layout.descriptor_path.display()));

    // Container engine
    enter(Stage::ReconcileResources);
    let teardown_report = teardown(docker, &settings.name)
        .await
        .with_context(|| Stage::ReconcileResources.failed())?;
    if teardown_report.is_noop() {
        steps.push(format!("No previous '{}' to replace", settings.name));
    } else {
        let actions: Vec<String> = teardown_report
            .actions
            .iter()
            .map(ToString::to_string)
            .collect();
        steps.push(format!("Previous '{}': {}", settings.name, actions.join(", ")));
    }

    enter(Stage::BuildImage);
    docker
        .build_image(&layout.descriptor_path, &layout.work_dir, &image)
        .await
        .with_context(|| Stage::BuildImage.failed())?;
    steps.push(format!("Image '{}' built", image.reference()));

    enter(Stage::PullBaseImage);
    docker
        .pull(&base_image)
        .await
        .with_context(|| Stage::PullBaseImage.failed())?;
    steps.push(format!("Base image {base_image} up to date"));

    enter(Stage::RunContainer);
    let container_id = docker
        .run(
            &container,
            &image,
            &settings.port_mapping(),
            &settings.container_env(),
        )
        .await
        .with_context(|| Stage::RunContainer.failed())?;
    steps.push(format!(
        "Container '{}' started on port {}",
        container.name(),
        settings.host_port
    ));

    Ok(DeployOutcome {
        steps,
        container_id,
    })
}

fn enter(stage: Stage) {
    tracing::info!(stage = %stage, "starting stage");
}
