use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use dockside_build::artifacts::{ArtifactError, ArtifactListing, reconcile_artifacts};
use dockside_build::descriptor::write_descriptor;
use dockside_build::dockerfile::DockerfileGenerator;
use dockside_core::{DeploySettings, DocksideConfig, Framework, ProjectLayout, ResourceName};
use tempfile::TempDir;

fn settings(framework: Option<&str>) -> DeploySettings {
    let work = PathBuf::from("/work/OrdersApi.dockside");
    DeploySettings {
        layout: ProjectLayout {
            name: "OrdersApi".to_owned(),
            project_dir: PathBuf::from("/work/OrdersApi"),
            project_file: PathBuf::from("/work/OrdersApi/OrdersApi.csproj"),
            build_dir: work.join("build"),
            publish_dir: work.join("publish"),
            descriptor_path: work.join("Dockerfile"),
            work_dir: work,
        },
        name: ResourceName::parse("orders").unwrap(),
        host_port: 8081,
        framework: framework.map(|f| Framework::parse(f).unwrap()),
        simple_console: false,
        config: DocksideConfig::default(),
    }
}

/// Two sibling directories standing in for build and publish output.
fn output_dirs() -> (TempDir, PathBuf, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let build = tmp.path().join("build");
    let publish = tmp.path().join("publish");
    std::fs::create_dir_all(&build).unwrap();
    std::fs::create_dir_all(&publish).unwrap();
    (tmp, build, publish)
}

fn write_files(dir: &Path, names: &[&str]) {
    for name in names {
        std::fs::write(dir.join(name), format!("contents of {name}")).unwrap();
    }
}

fn dll_names(dir: &Path) -> BTreeSet<String> {
    ArtifactListing::scan(dir, "dll")
        .unwrap()
        .names()
        .iter()
        .cloned()
        .collect()
}

// ── Dockerfile Generation Tests ──

#[test]
fn dockerfile_has_two_stages_on_same_base() {
    let output = DockerfileGenerator::new("mcr.microsoft.com/dotnet/aspnet:8.0", "Api.dll").render();

    assert!(output.contains("FROM mcr.microsoft.com/dotnet/aspnet:8.0 AS base"));
    assert!(output.contains("FROM mcr.microsoft.com/dotnet/aspnet:8.0 AS final"));
    assert_eq!(output.matches("FROM ").count(), 2);
}

#[test]
fn dockerfile_exposes_listen_port() {
    let output = DockerfileGenerator::new("img:1", "Api.dll").render();
    assert!(output.contains("EXPOSE 80\n"));

    let output = DockerfileGenerator::new("img:1", "Api.dll")
        .listen_port(5000)
        .render();
    assert!(output.contains("EXPOSE 5000\n"));
}

#[test]
fn dockerfile_copies_publish_output_into_app_dir() {
    let output = DockerfileGenerator::new("img:1", "Api.dll").render();

    assert!(output.contains("WORKDIR /app\n"));
    assert!(output.contains("COPY publish/ /app/\n"));
}

#[test]
fn dockerfile_entry_point_runs_main_artifact() {
    let output = DockerfileGenerator::new("img:1", "OrdersApi.dll").render();
    assert!(output.contains(r#"ENTRYPOINT ["dotnet", "OrdersApi.dll"]"#));
}

#[test]
fn dockerfile_entry_point_is_last_instruction() {
    let output = DockerfileGenerator::new("img:1", "Api.dll").render();
    let last = output.lines().last().unwrap();
    assert!(last.starts_with("ENTRYPOINT"), "got: {last}");
}

#[test]
fn dockerfile_render_is_deterministic() {
    let a = DockerfileGenerator::new("img:6.0", "A.dll").render();
    let b = DockerfileGenerator::new("img:6.0", "A.dll").render();
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn dockerfile_differs_when_inputs_differ() {
    let a = DockerfileGenerator::new("img:6.0", "A.dll").render();
    let b = DockerfileGenerator::new("img:8.0", "A.dll").render();
    let c = DockerfileGenerator::new("img:6.0", "B.dll").render();
    assert_ne!(a, b);
    assert_ne!(a, c);
}

#[test]
fn dockerfile_from_settings_uses_default_tag() {
    let generator = DockerfileGenerator::from_settings(&settings(None));
    assert_eq!(generator.base_image(), "mcr.microsoft.com/dotnet/aspnet:8.0");

    let output = generator.render();
    assert!(output.contains(r#"ENTRYPOINT ["dotnet", "OrdersApi.dll"]"#));
    assert!(output.contains("EXPOSE 80\n"));
}

#[test]
fn dockerfile_from_settings_uses_framework_tag() {
    let generator = DockerfileGenerator::from_settings(&settings(Some("net6.0")));
    assert_eq!(generator.base_image(), "mcr.microsoft.com/dotnet/aspnet:6.0");
}

#[test]
fn dockerfile_from_settings_honors_image_config() {
    let mut s = settings(Some("7.0"));
    s.config.image.registry = "registry.local/aspnet".to_owned();
    s.config.image.listen_port = 8080;
    s.config.image.app_dir = "/srv".to_owned();

    let output = DockerfileGenerator::from_settings(&s).render();
    assert!(output.contains("FROM registry.local/aspnet:7.0 AS base"));
    assert!(output.contains("EXPOSE 8080\n"));
    assert!(output.contains("WORKDIR /srv\n"));
    assert!(output.contains("COPY publish/ /srv/\n"));
}

#[test]
fn dockerfile_for_project_matches_settings_rendering() {
    let s = settings(Some("7.0"));
    let from_project =
        DockerfileGenerator::for_project(&s.layout, &s.config, s.framework.as_ref()).render();
    assert_eq!(from_project, DockerfileGenerator::from_settings(&s).render());
    assert!(from_project.contains("aspnet:7.0"));
}

// ── Descriptor Writing Tests ──

#[test]
fn descriptor_written_with_parent_created() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("Api.dockside/Dockerfile");

    write_descriptor(&path, "FROM img:1\n").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "FROM img:1\n");
}

#[test]
fn descriptor_overwrites_previous_content() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("Dockerfile");
    std::fs::write(&path, "FROM old:1\nRUN echo a very long previous recipe\n").unwrap();

    write_descriptor(&path, "FROM new:2\n").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "FROM new:2\n");
}

#[test]
fn descriptor_write_fails_when_path_is_directory() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("Dockerfile");
    std::fs::create_dir_all(&path).unwrap();

    let err = write_descriptor(&path, "FROM x\n").unwrap_err();
    assert!(err.to_string().contains("Dockerfile"), "got: {err}");
}

// ── Artifact Reconciliation Tests ──

#[test]
fn reconcile_copies_only_missing_libraries() {
    let (_tmp, build, publish) = output_dirs();
    write_files(&build, &["a.dll", "b.dll", "c.dll"]);
    std::fs::write(publish.join("b.dll"), "published b").unwrap();

    let report = reconcile_artifacts(&build, &publish, "dll").unwrap();

    assert_eq!(report.copied, vec!["a.dll", "c.dll"]);
    assert_eq!(report.already_present, 1);
    assert_eq!(
        dll_names(&publish),
        ["a.dll", "b.dll", "c.dll"]
            .into_iter()
            .map(String::from)
            .collect::<BTreeSet<_>>()
    );
}

#[test]
fn reconcile_preserves_target_content_on_name_collision() {
    let (_tmp, build, publish) = output_dirs();
    write_files(&build, &["shared.dll"]);
    std::fs::write(publish.join("shared.dll"), "publish version").unwrap();

    reconcile_artifacts(&build, &publish, "dll").unwrap();

    assert_eq!(
        std::fs::read_to_string(publish.join("shared.dll")).unwrap(),
        "publish version"
    );
}

#[test]
fn reconcile_copies_bytes_verbatim() {
    let (_tmp, build, publish) = output_dirs();
    let bytes: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    std::fs::write(build.join("native.dll"), &bytes).unwrap();

    reconcile_artifacts(&build, &publish, "dll").unwrap();

    assert_eq!(std::fs::read(publish.join("native.dll")).unwrap(), bytes);
}

#[test]
fn reconcile_empty_source_is_noop() {
    let (_tmp, build, publish) = output_dirs();
    write_files(&publish, &["x.dll"]);

    let report = reconcile_artifacts(&build, &publish, "dll").unwrap();

    assert!(report.copied.is_empty());
    assert_eq!(report.already_present, 0);
    assert_eq!(dll_names(&publish).len(), 1);
}

#[test]
fn reconcile_superset_target_copies_nothing() {
    let (_tmp, build, publish) = output_dirs();
    write_files(&build, &["a.dll", "b.dll"]);
    write_files(&publish, &["a.dll", "b.dll", "extra.dll"]);

    let report = reconcile_artifacts(&build, &publish, "dll").unwrap();

    assert!(report.copied.is_empty());
    assert_eq!(report.already_present, 2);
}

#[test]
fn reconcile_is_idempotent() {
    let (_tmp, build, publish) = output_dirs();
    write_files(&build, &["a.dll", "b.dll", "c.dll"]);
    write_files(&publish, &["b.dll"]);

    reconcile_artifacts(&build, &publish, "dll").unwrap();
    let after_first = dll_names(&publish);

    let second = reconcile_artifacts(&build, &publish, "dll").unwrap();
    assert!(second.copied.is_empty());
    assert_eq!(dll_names(&publish), after_first);
}

#[test]
fn reconcile_ignores_other_extensions_and_directories() {
    let (_tmp, build, publish) = output_dirs();
    write_files(&build, &["a.dll", "a.pdb", "app.json", "notes.dll.txt"]);
    std::fs::create_dir_all(build.join("runtimes.dll")).unwrap();
    std::fs::create_dir_all(build.join("de")).unwrap();
    write_files(&build.join("de"), &["a.resources.dll"]);

    let report = reconcile_artifacts(&build, &publish, "dll").unwrap();

    assert_eq!(report.copied, vec!["a.dll"]);
    assert!(!publish.join("a.pdb").exists());
    assert!(!publish.join("de").exists());
}

#[test]
fn reconcile_extension_match_is_case_insensitive() {
    let (_tmp, build, publish) = output_dirs();
    write_files(&build, &["Legacy.DLL"]);

    let report = reconcile_artifacts(&build, &publish, ".dll").unwrap();

    assert_eq!(report.copied, vec!["Legacy.DLL"]);
    assert!(publish.join("Legacy.DLL").exists());
}

#[test]
fn reconcile_missing_source_dir_fails_with_path() {
    let (tmp, _build, publish) = output_dirs();
    let ghost = tmp.path().join("ghost");

    let err = reconcile_artifacts(&ghost, &publish, "dll").unwrap_err();

    assert!(matches!(err, ArtifactError::List { ref path, .. } if path == &ghost));
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn reconcile_missing_target_dir_fails() {
    let (tmp, build, _publish) = output_dirs();
    write_files(&build, &["a.dll"]);

    let result = reconcile_artifacts(&build, &tmp.path().join("nowhere"), "dll");
    assert!(matches!(result, Err(ArtifactError::List { .. })));
}

#[test]
fn listing_is_sorted() {
    let (_tmp, build, _publish) = output_dirs();
    write_files(&build, &["z.dll", "a.dll", "m.dll"]);

    let listing = ArtifactListing::scan(&build, "dll").unwrap();
    assert_eq!(listing.names(), ["a.dll", "m.dll", "z.dll"]);
    assert_eq!(listing.dir(), build.as_path());
    assert!(listing.contains("m.dll"));
    assert!(!listing.contains("M.dll"));
}
