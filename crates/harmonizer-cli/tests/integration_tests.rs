//! Integration tests for the gen-harmonizer binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::{Command, cargo};
use predicates::prelude::*;
use tempfile::TempDir;

const MPOX: &str = r#"
id: https://example.org/mpox
name: mpox
imports:
  - linkml:types
  - core
classes:
  Mpox:
    is_a: dh_interface
    slots:
      - host
  Container:
    slots:
      - sample_id
slots:
  host:
    range: string
"#;

const CORE: &str = r#"
id: https://example.org/core
name: core
classes:
  dh_interface:
    description: DataHarmonizer template marker
  Sample:
    is_a: dh_interface
    slots:
      - sample_id
slots:
  sample_id:
    identifier: true
"#;

/// A schema pair on disk and an empty config file, so the user's own
/// configuration never leaks into a test.
struct Workspace {
    temp: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("schemas")).unwrap();
        fs::write(temp.path().join("schemas/mpox.yaml"), MPOX).unwrap();
        fs::write(temp.path().join("schemas/core.yaml"), CORE).unwrap();
        fs::write(temp.path().join("config.toml"), "").unwrap();
        Self { temp }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.temp.path().join(rel)
    }

    fn schema(&self) -> String {
        self.path("schemas/mpox.yaml").display().to_string()
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo::cargo_bin_cmd!("gen-harmonizer");
        cmd.current_dir(self.temp.path())
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.path("config.toml"));
        cmd
    }

    fn new_project(&self, dest: &str, extra: &[&str]) -> assert_cmd::assert::Assert {
        self.cmd()
            .args(["new", &self.schema(), dest, "--skip-install"])
            .args(extra)
            .assert()
    }
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_help_flag() {
    cargo::cargo_bin_cmd!("gen-harmonizer")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("DataHarmonizer"))
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("classes"));
}

#[test]
fn test_version_flag() {
    cargo::cargo_bin_cmd!("gen-harmonizer")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_new_with_defaults_generates_project() {
    let ws = Workspace::new();

    ws.new_project("mpox-dh", &["--yes"])
        .success()
        .stdout(predicate::str::contains("mpox-dh successfully generated!"))
        .stdout(predicate::str::contains("npm start"));

    let dest = ws.path("mpox-dh");
    let package = read_json(&dest.join("package.json"));
    assert_eq!(package["name"], "mpox-dh");
    assert!(dest.join("src/index.js").exists());

    let menu = read_json(&dest.join("src/schemas/_menu.json"));
    let selected: Vec<&String> = menu["mpox"].as_object().unwrap().keys().collect();
    assert_eq!(selected, ["Mpox", "Sample"]);

    let schema = read_json(&dest.join("src/schemas/mpox.json"));
    let sample = &schema["classes"]["Sample"]["attributes"];
    assert!(sample.get("sample_id").is_some());
    assert!(schema["classes"].get("dh_interface").is_some());
}

#[test]
fn test_new_with_flags_skips_prompt() {
    let ws = Workspace::new();

    ws.new_project("out", &["--name", "custom", "--class", "Container"])
        .success()
        .stdout(predicate::str::contains("custom successfully generated!"));

    let package = read_json(&ws.path("out/package.json"));
    assert_eq!(package["name"], "custom");

    let menu = read_json(&ws.path("out/src/schemas/_menu.json"));
    assert_eq!(
        menu,
        serde_json::json!({
            "mpox": { "Container": { "name": "Container", "status": "published", "display": true } }
        })
    );
}

#[test]
fn test_new_with_template_directory() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.path("skeleton")).unwrap();
    fs::write(
        ws.path("skeleton/about.txt.tpl"),
        "{{ project_name }} uses {{schema_name}}",
    )
    .unwrap();

    ws.new_project("out", &["--yes", "--templates", "skeleton"])
        .success();

    assert_eq!(
        fs::read_to_string(ws.path("out/about.txt")).unwrap(),
        "out uses mpox"
    );
    assert!(!ws.path("out/package.json").exists());
}

#[test]
fn test_new_json_output() {
    let ws = Workspace::new();

    let assert = ws
        .cmd()
        .args(["--output-format", "json", "new", &ws.schema(), "out"])
        .args(["--yes", "--skip-install"])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["project_name"], "out");
    assert_eq!(report["schema_name"], "mpox");
    assert_eq!(report["installed"], false);
    assert_eq!(report["selected_classes"], serde_json::json!(["Mpox", "Sample"]));
}

#[test]
fn test_new_into_current_directory_uses_its_name() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.path("lab-portal")).unwrap();

    let assert = cargo::cargo_bin_cmd!("gen-harmonizer")
        .current_dir(ws.path("lab-portal"))
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(ws.path("config.toml"))
        .args(["--output-format", "json", "new", &ws.schema(), "."])
        .args(["--yes", "--skip-install"])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["project_name"], "lab-portal");
    let package = read_json(&ws.path("lab-portal/package.json"));
    assert_eq!(package["name"], "lab-portal");
}

#[test]
fn test_quiet_flag() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["-q", "new", &ws.schema(), "out", "--skip-install"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(ws.path("out/src/schemas/_menu.json").exists());
}

#[test]
fn test_second_run_requires_force() {
    let ws = Workspace::new();
    ws.new_project("out", &["--yes"]).success();

    ws.new_project("out", &["--yes"])
        .failure()
        .code(2)
        .stderr(predicate::str::contains("already exist"))
        .stderr(predicate::str::contains("--force"));

    ws.new_project("out", &["--yes", "--force"]).success();
}

#[test]
fn test_classes_listing() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["classes", &ws.schema(), "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Mpox\nContainer\nSample\n"));
}

#[test]
fn test_classes_json() {
    let ws = Workspace::new();

    let assert = ws
        .cmd()
        .args(["classes", &ws.schema(), "--format", "json"])
        .assert()
        .success();

    let rows: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(
        rows,
        serde_json::json!([
            { "name": "Mpox", "default_selected": true, "attributes": 1 },
            { "name": "Container", "default_selected": false, "attributes": 1 },
            { "name": "Sample", "default_selected": true, "attributes": 1 }
        ])
    );
}

#[test]
fn test_classes_with_other_marker() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["classes", &ws.schema(), "--marker", "Sample", "--format", "table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ ] Mpox"))
        .stdout(predicate::str::contains("dh_interface"))
        .stdout(predicate::str::contains("descends from 'Sample'"));
}

#[test]
fn test_init_and_config_commands() {
    let ws = Workspace::new();
    let config = ws.path("cfg/gen-harmonizer.toml");

    cargo::cargo_bin_cmd!("gen-harmonizer")
        .arg("--config")
        .arg(&config)
        .arg("init")
        .assert()
        .success();
    assert!(config.exists());

    cargo::cargo_bin_cmd!("gen-harmonizer")
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "install.program"])
        .assert()
        .success()
        .stdout(predicate::str::diff("npm\n"));

    cargo::cargo_bin_cmd!("gen-harmonizer")
        .arg("--config")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gen-harmonizer.toml"));
}

#[test]
fn test_environment_overrides_config() {
    let ws = Workspace::new();

    ws.cmd()
        .env("HARMONIZER_DEFAULTS__INTERFACE_MARKER", "Sample")
        .args(["config", "get", "defaults.interface_marker"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Sample\n"));
}

#[test]
fn test_shell_completions() {
    cargo::cargo_bin_cmd!("gen-harmonizer")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gen-harmonizer"));
}
