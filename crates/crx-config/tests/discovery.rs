//! Tests for config file discovery and layered loading.

use crx_config::{BackgroundSpec, ConfigDiscovery, ConfigOverrides, ContentSpec};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn discovers_crx_toml() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("crx.toml"),
        r#"
name = "demo"
version = "1.2.0"
port = 3080
background = ["background/index.ts", "background/a.ts"]
permissions = ["tabs", "storage"]

[[content]]
matches = ["<all_urls>"]
js = ["content/index.ts"]
run_at = "document_idle"
"#,
    )
    .unwrap();

    let discovery = ConfigDiscovery::new(dir.path());
    let found = discovery.find().unwrap();
    assert_eq!(found.file_name().unwrap(), "crx.toml");

    let options = discovery.load().unwrap();
    assert_eq!(options.name, "demo");
    assert_eq!(options.version, "1.2.0");
    assert_eq!(options.port, 3080);
    assert_eq!(options.host, "localhost");
    assert_eq!(options.root, dir.path());
    assert_eq!(
        options.background,
        Some(BackgroundSpec::paths([
            "background/index.ts",
            "background/a.ts"
        ]))
    );

    let Some(ContentSpec::Groups(groups)) = &options.content else {
        panic!("expected content groups, got {:?}", options.content);
    };
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].js.as_deref(), Some(&["content/index.ts".to_string()][..]));
    assert_eq!(groups[0].extra["run_at"], "document_idle");
    assert_eq!(options.extra["permissions"], serde_json::json!(["tabs", "storage"]));
}

#[test]
fn discovers_json_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("crx.config.json"),
        r#"{
  "name": "json demo",
  "background": { "scripts": ["bg.ts"] },
  "content": "content.ts",
  "outDir": "build"
}"#,
    )
    .unwrap();

    let options = ConfigDiscovery::new(dir.path()).load().unwrap();
    assert_eq!(options.name, "json demo");
    assert_eq!(options.content, Some(ContentSpec::path("content.ts")));
    assert_eq!(options.resolved_out_dir(), dir.path().join("build"));
}

#[test]
fn discovers_package_json() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{
  "name": "test",
  "crx": {
    "name": "from package",
    "background": "bg.ts"
  }
}"#,
    )
    .unwrap();

    let discovery = ConfigDiscovery::new(dir.path());
    assert_eq!(discovery.find().unwrap().file_name().unwrap(), "package.json");

    let options = discovery.load().unwrap();
    assert_eq!(options.name, "from package");
    assert_eq!(options.background, Some(BackgroundSpec::path("bg.ts")));
}

#[test]
fn overrides_take_precedence_over_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("crx.toml"),
        r#"
host = "127.0.0.1"
port = 4000
outDir = "dist-file"
"#,
    )
    .unwrap();

    let overrides = ConfigOverrides {
        out_dir: Some(PathBuf::from("dist-cli")),
        host: None,
        port: Some(5000),
    };
    let options = ConfigDiscovery::new(dir.path())
        .load_with(None, &overrides)
        .unwrap();

    assert_eq!(options.host, "127.0.0.1");
    assert_eq!(options.port, 5000);
    assert_eq!(options.out_dir, Some(PathBuf::from("dist-cli")));
}

#[test]
fn explicit_path_is_relative_to_root() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("config")).unwrap();
    fs::write(dir.path().join("config/ext.toml"), "name = \"explicit\"\n").unwrap();

    let options = ConfigDiscovery::new(dir.path())
        .load_with(
            Some(std::path::Path::new("config/ext.toml")),
            &ConfigOverrides::default(),
        )
        .unwrap();
    assert_eq!(options.name, "explicit");
}

#[test]
fn unrecognized_shape_still_loads() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("crx.toml"),
        r#"
background = 7
"#,
    )
    .unwrap();

    let options = ConfigDiscovery::new(dir.path()).load().unwrap();
    assert!(matches!(
        options.background,
        Some(BackgroundSpec::Unrecognized(_))
    ));
}

#[test]
fn wrong_field_type_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("crx.toml"), "port = \"abc\"\n").unwrap();

    let err = ConfigDiscovery::new(dir.path()).load().unwrap_err();
    assert!(matches!(err, crx_config::ConfigError::InvalidValue { .. }));
}
