use dockside_core::DocksideConfig;
use tempfile::TempDir;

#[test]
fn load_returns_defaults_when_no_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = DocksideConfig::load(tmp.path()).unwrap();

    assert_eq!(config.image.registry, "mcr.microsoft.com/dotnet/aspnet");
    assert_eq!(config.image.default_tag, "8.0");
    assert_eq!(config.image.listen_port, 80);
    assert_eq!(config.image.app_dir, "/app");
    assert_eq!(config.toolchain.program, "dotnet");
    assert_eq!(config.toolchain.configuration, "Release");
    assert_eq!(config.engine.program, "docker");
    assert_eq!(config.engine.shim, "wsl");
    assert_eq!(config.artifacts.extension, "dll");
}

#[test]
fn load_parses_full_config() {
    let tmp = TempDir::new().unwrap();
    let toml = r#"
[image]
registry = "registry.internal/dotnet/aspnet"
default_tag = "6.0"
listen_port = 8080
app_dir = "/srv"

[toolchain]
program = "/usr/share/dotnet/dotnet"
configuration = "Debug"

[engine]
program = "podman"
shim = "ubuntu"

[artifacts]
extension = "so"
"#;
    std::fs::write(tmp.path().join("dockside.toml"), toml).unwrap();

    let config = DocksideConfig::load(tmp.path()).unwrap();

    assert_eq!(config.image.registry, "registry.internal/dotnet/aspnet");
    assert_eq!(config.image.default_tag, "6.0");
    assert_eq!(config.image.listen_port, 8080);
    assert_eq!(config.image.app_dir, "/srv");
    assert_eq!(config.toolchain.program, "/usr/share/dotnet/dotnet");
    assert_eq!(config.toolchain.configuration, "Debug");
    assert_eq!(config.engine.program, "podman");
    assert_eq!(config.engine.shim, "ubuntu");
    assert_eq!(config.artifacts.extension, "so");
}

#[test]
fn load_partial_config_fills_defaults() {
    let tmp = TempDir::new().unwrap();
    let toml = r#"
[image]
listen_port = 5000
"#;
    std::fs::write(tmp.path().join("dockside.toml"), toml).unwrap();

    let config = DocksideConfig::load(tmp.path()).unwrap();

    assert_eq!(config.image.listen_port, 5000);
    assert_eq!(config.image.registry, "mcr.microsoft.com/dotnet/aspnet");
    assert_eq!(config.toolchain.program, "dotnet");
    assert_eq!(config.engine.program, "docker");
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("dockside.toml"), "[image\nbroken").unwrap();

    let err = DocksideConfig::load(tmp.path()).unwrap_err();
    assert!(matches!(err, dockside_core::Error::ConfigParse { .. }));
    assert!(err.to_string().contains("dockside.toml"));
}

#[test]
fn load_wrong_type_returns_parse_error() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("dockside.toml"),
        "[image]\nlisten_port = \"eighty\"\n",
    )
    .unwrap();

    let result = DocksideConfig::load(tmp.path());
    assert!(matches!(
        result,
        Err(dockside_core::Error::ConfigParse { .. })
    ));
}

#[test]
fn base_image_uses_framework_tag_when_given() {
    let config = DocksideConfig::default();
    let fw = dockside_core::Framework::parse("6.0").unwrap();

    assert_eq!(
        config.image.base_image(None),
        "mcr.microsoft.com/dotnet/aspnet:8.0"
    );
    assert_eq!(
        config.image.base_image(Some(&fw)),
        "mcr.microsoft.com/dotnet/aspnet:6.0"
    );
}
