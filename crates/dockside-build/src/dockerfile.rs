use dockside_core::{DeploySettings, DocksideConfig, Framework, ProjectLayout};
use dockside_core::project::PUBLISH_DIR_NAME;

/// Command that hosts the entry point inside the runtime image.
const RUNTIME_COMMAND: &str = "dotnet";

/// Generates the two-stage Dockerfile for a published project.
///
/// Rendering is a pure function of the generator's fields: identical inputs
/// always produce byte-identical output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerfileGenerator {
    base_image: String,
    entry_point: String,
    listen_port: u16,
    app_dir: String,
}

impl DockerfileGenerator {
    pub fn new(base_image: impl Into<String>, entry_point: impl Into<String>) -> Self {
        Self {
            base_image: base_image.into(),
            entry_point: entry_point.into(),
            listen_port: 80,
            app_dir: "/app".to_owned(),
        }
    }

    pub fn from_settings(settings: &DeploySettings) -> Self {
        Self::for_project(
            &settings.layout,
            &settings.config,
            settings.framework.as_ref(),
        )
    }

    /// Generator for a project before a resource name or port is chosen.
    pub fn for_project(
        layout: &ProjectLayout,
        config: &DocksideConfig,
        framework: Option<&Framework>,
    ) -> Self {
        Self::new(config.image.base_image(framework), layout.entry_point())
            .listen_port(config.image.listen_port)
            .app_dir(&config.image.app_dir)
    }

    pub fn listen_port(mut self, port: u16) -> Self {
        self.listen_port = port;
        self
    }

    pub fn app_dir(mut self, dir: &str) -> Self {
        self.app_dir = dir.to_owned();
        self
    }

    pub fn base_image(&self) -> &str {
        &self.base_image
    }

    pub fn render(&self) -> String {
        let copy_dest = format!("{}/", self.app_dir.trim_end_matches('/'));

        format!(
            r#"# === Stage 1: Base ===
FROM {base} AS base
WORKDIR {app_dir}
EXPOSE {port}

# === Stage 2: Final ===
FROM {base} AS final
WORKDIR {app_dir}
COPY {publish}/ {copy_dest}
ENTRYPOINT ["{runtime}", "{entry}"]
"#,
            base = self.base_image,
            app_dir = self.app_dir,
            port = self.listen_port,
            publish = PUBLISH_DIR_NAME,
            copy_dest = copy_dest,
            runtime = RUNTIME_COMMAND,
            entry = self.entry_point,
        )
    }
}
