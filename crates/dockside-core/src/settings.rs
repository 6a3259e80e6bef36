use crate::config::DocksideConfig;
use crate::project::ProjectLayout;
use std::fmt;

/// Environment variable selecting the plain-text console log formatter.
pub const SIMPLE_CONSOLE_ENV: (&str, &str) = ("Logging__Console__FormatterName", "simple");

const MIN_RESOURCE_NAME_LEN: usize = 2;
const MAX_RESOURCE_NAME_LEN: usize = 128;

fn is_name_alnum(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

fn is_name_separator(c: char) -> bool {
    matches!(c, '_' | '.' | '-')
}

/// A user-chosen name used as both container name and image tag.
///
/// Accepted names satisfy both engine grammars at once: container names
/// (`[a-zA-Z0-9][a-zA-Z0-9_.-]+`, so at least two characters) and image path
/// components (`[a-z0-9]+((\.|_|__|-+)[a-z0-9]+)*`). In practice that is
/// lowercase alphanumeric runs joined by a single `.`, `_`, `__` or any
/// number of `-`.
///
/// # Examples
///
/// ```
/// use dockside_core::ResourceName;
///
/// let name = ResourceName::parse("orders-api").unwrap();
/// assert_eq!(name.as_str(), "orders-api");
/// assert!(ResourceName::parse("Orders").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceName(String);

impl ResourceName {
    pub fn parse(name: &str) -> crate::Result<Self> {
        let invalid = |reason| crate::Error::InvalidResourceName {
            name: name.to_owned(),
            reason,
        };

        if name.is_empty() {
            return Err(invalid("must not be empty"));
        }
        if name.len() < MIN_RESOURCE_NAME_LEN {
            return Err(invalid("must be at least 2 characters"));
        }
        if name.len() > MAX_RESOURCE_NAME_LEN {
            return Err(invalid("must be at most 128 characters"));
        }
        if !name.starts_with(is_name_alnum) {
            return Err(invalid("must start with a lowercase letter or digit"));
        }
        if !name.chars().all(|c| is_name_alnum(c) || is_name_separator(c)) {
            return Err(invalid(
                "may only contain lowercase letters, digits, '_', '.' and '-'",
            ));
        }
        if !name.ends_with(is_name_alnum) {
            return Err(invalid("must end with a lowercase letter or digit"));
        }
        let separators_ok = name
            .split(is_name_alnum)
            .filter(|run| !run.is_empty())
            .all(|run| matches!(run, "." | "_" | "__") || run.chars().all(|c| c == '-'));
        if !separators_ok {
            return Err(invalid(
                "separators must be a single '.', '_' or '__', or a run of '-'",
            ));
        }

        Ok(Self(name.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Target framework, accepted either as a version (`8.0`) or a moniker
/// (`net8.0`, `netcoreapp3.1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framework {
    moniker: String,
    version: String,
}

impl Framework {
    pub fn parse(input: &str) -> crate::Result<Self> {
        let input = input.trim();
        let (moniker, version) = if let Some(v) = input.strip_prefix("netcoreapp") {
            (input.to_owned(), v)
        } else if let Some(v) = input.strip_prefix("net") {
            (input.to_owned(), v)
        } else {
            (format!("net{input}"), input)
        };

        // `<major>.<minor>[.<patch>...]`
        let mut parts = version.split('.');
        let well_formed = version.contains('.')
            && parts.all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));
        if !well_formed {
            return Err(crate::Error::InvalidFramework(input.to_owned()));
        }

        Ok(Self {
            version: version.to_owned(),
            moniker,
        })
    }

    /// Target framework moniker passed to the toolchain, e.g. `net8.0`.
    pub fn moniker(&self) -> &str {
        &self.moniker
    }

    /// Runtime image tag, e.g. `8.0`.
    pub fn image_tag(&self) -> &str {
        &self.version
    }
}

/// Everything one deploy run needs, resolved from CLI arguments and
/// `dockside.toml` before any external tool is invoked.
#[derive(Debug, Clone)]
pub struct DeploySettings {
    pub layout: ProjectLayout,
    pub name: ResourceName,
    pub host_port: u16,
    pub framework: Option<Framework>,
    pub simple_console: bool,
    pub config: DocksideConfig,
}

impl DeploySettings {
    /// Tag of the runtime base image: the framework version when given,
    /// otherwise the configured default.
    pub fn image_tag(&self) -> &str {
        self.config.image.tag_for(self.framework.as_ref())
    }

    /// Full base image reference, e.g. `mcr.microsoft.com/dotnet/aspnet:8.0`.
    pub fn base_image(&self) -> String {
        self.config.image.base_image(self.framework.as_ref())
    }

    pub fn target_framework(&self) -> Option<&str> {
        self.framework.as_ref().map(Framework::moniker)
    }

    /// `-p` value for the container run, `<host>:<listen>`.
    pub fn port_mapping(&self) -> String {
        format!("{}:{}", self.host_port, self.config.image.listen_port)
    }

    /// Environment passed to the container at run time.
    pub fn container_env(&self) -> Vec<(String, String)> {
        if self.simple_console {
            let (key, value) = SIMPLE_CONSOLE_ENV;
            vec![(key.to_owned(), value.to_owned())]
        } else {
            Vec::new()
        }
    }
}
