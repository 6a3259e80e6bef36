use crate::settings::Framework;
use serde::{Deserialize, Serialize};

/// Name of the optional per-project configuration file.
pub const CONFIG_FILE_NAME: &str = "dockside.toml";

/// dockside.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocksideConfig {
    #[serde(default)]
    pub image: ImageConfig,
    #[serde(default)]
    pub toolchain: ToolchainConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Runtime image repository, without tag
    #[serde(default = "default_registry")]
    pub registry: String,
    /// Tag used when no framework version is given on the command line
    #[serde(default = "default_tag")]
    pub default_tag: String,
    /// Port the application listens on inside the container
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
    /// In-image directory receiving the publish output
    #[serde(default = "default_app_dir")]
    pub app_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Build/publish toolchain executable
    #[serde(default = "default_toolchain_program")]
    pub program: String,
    /// Build configuration passed with `-c`
    #[serde(default = "default_configuration")]
    pub configuration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Container engine executable
    #[serde(default = "default_engine_program")]
    pub program: String,
    /// Program that prefixes engine calls when routing through a shim
    #[serde(default = "default_shim")]
    pub shim: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    /// Dynamic-library extension reconciled between build and publish output
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            registry: default_registry(),
            default_tag: default_tag(),
            listen_port: default_listen_port(),
            app_dir: default_app_dir(),
        }
    }
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            program: default_toolchain_program(),
            configuration: default_configuration(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: default_engine_program(),
            shim: default_shim(),
        }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
        }
    }
}

impl ImageConfig {
    /// Runtime image tag: the framework version when given, otherwise
    /// `default_tag`.
    pub fn tag_for<'a>(&'a self, framework: Option<&'a Framework>) -> &'a str {
        framework.map_or(self.default_tag.as_str(), Framework::image_tag)
    }

    pub fn base_image(&self, framework: Option<&Framework>) -> String {
        format!("{}:{}", self.registry, self.tag_for(framework))
    }
}

impl DocksideConfig {
    /// Load from dockside.toml at the given path, or return defaults if not found.
    pub fn load(project_dir: &std::path::Path) -> crate::Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            tracing::debug!(path = %config_path.display(), "loading config");
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            Ok(Self::default())
        }
    }
}

fn default_registry() -> String {
    "mcr.microsoft.com/dotnet/aspnet".to_owned()
}

fn default_tag() -> String {
    "8.0".to_owned()
}

fn default_listen_port() -> u16 {
    80
}

fn default_app_dir() -> String {
    "/app".to_owned()
}

fn default_toolchain_program() -> String {
    "dotnet".to_owned()
}

fn default_configuration() -> String {
    "Release".to_owned()
}

fn default_engine_program() -> String {
    "docker".to_owned()
}

fn default_shim() -> String {
    "wsl".to_owned()
}

fn default_extension() -> String {
    "dll".to_owned()
}
