//! Integration tests for the bldr hook binary

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An isolated project directory with its own config file
struct Project {
    dir: TempDir,
}

impl Project {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    fn with_block_loader(loader: &str) -> Self {
        let project = Self::new();
        fs::write(
            project.config_path(),
            format!("block-loader = \"{}\"\n", loader),
        )
        .expect("write config");
        project
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn config_path(&self) -> PathBuf {
        self.root().join("bldr.toml")
    }

    fn default_manifest(&self) -> PathBuf {
        self.root().join(".bldr").join("blocks.yml")
    }

    fn command(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("bldr");
        cmd.current_dir(self.root());
        cmd.env("BLDR_CONFIG", self.config_path());
        cmd.env_remove("RUST_LOG");
        cmd
    }

    fn hook(&self, event: &str) -> assert_cmd::assert::Assert {
        self.command().arg("hook").write_stdin(event).assert()
    }

    fn manifest(&self, path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_default()
    }
}

fn event(kind: &str, name: &str, class: Option<&str>) -> String {
    let extra = class
        .map(|c| format!(r#", "extra": {{"block-class": {}}}"#, serde_json_string(c)))
        .unwrap_or_default();
    format!(r#"{{"kind": "{}", "package": {{"name": "{}"{}}}}}"#, kind, name, extra)
}

fn serde_json_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\"))
}

#[test]
fn test_version() {
    Project::new()
        .command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bldr"));
}

#[test]
fn test_help() {
    Project::new()
        .command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("block manifest"));
}

#[test]
fn test_invalid_command() {
    Project::new().command().arg("invalid").assert().failure();
}

#[test]
fn test_post_install_creates_and_registers() {
    let project = Project::new();
    project
        .hook(&event("post-install", "acme/foo", Some("Foo\\Bar")))
        .success();

    assert!(project.default_manifest().is_file());
    project
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout("Foo\\Bar\n");
}

#[test]
fn test_register_is_idempotent() {
    let project = Project::new();
    let install = event("post-package-install", "acme/foo", Some("Foo\\Bar"));
    project.hook(&install).success();
    project.hook(&install).success();

    project
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout("Foo\\Bar\n");
}

#[test]
fn test_package_without_block_class_is_ignored() {
    let project = Project::new();
    project
        .hook(&event("post-install", "acme/util", None))
        .success();

    assert_eq!(project.manifest(&project.default_manifest()), "");
}

#[test]
fn test_uninstall_keeps_order_of_survivors() {
    let project = Project::new();
    for (name, class) in [("acme/a", "A"), ("acme/b", "B"), ("acme/c", "C")] {
        project.hook(&event("post-install", name, Some(class))).success();
    }
    project
        .hook(&event("post-uninstall", "acme/b", Some("B")))
        .success();

    project
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout("A\nC\n");
}

#[test]
fn test_update_event_uses_initial_and_target() {
    let project = Project::new();
    project
        .hook(&event("post-install", "acme/lint", Some("Lint\\V1")))
        .success();

    let update = |kind: &str| {
        format!(
            r#"{{"kind": "{}", "package": {{"name": "acme/lint"}},
                "initial": {{"name": "acme/lint", "extra": {{"block-class": "Lint\\V1"}}}},
                "target": {{"name": "acme/lint", "extra": {{"block-class": "Lint\\V2"}}}}}}"#,
            kind
        )
    };
    project.hook(&update("pre-update")).success();
    assert_eq!(project.manifest(&project.default_manifest()), "[]\n");

    project.hook(&update("post-update")).success();
    project
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout("Lint\\V2\n");
}

#[test]
fn test_configured_block_loader() {
    let project = Project::with_block_loader("config/blocks.yml");
    project
        .hook(&event("post-install", "acme/foo", Some("Foo\\Bar")))
        .success();

    assert!(!project.default_manifest().exists());
    let configured = project.root().join("config").join("blocks.yml");
    assert!(project.manifest(&configured).contains("Foo"));

    project
        .command()
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("config/blocks.yml"));
}

#[test]
fn test_malformed_manifest_aborts_with_path() {
    let project = Project::new();
    let manifest_path = project.default_manifest();
    fs::create_dir_all(manifest_path.parent().expect("parent")).expect("mkdir");
    fs::write(&manifest_path, "- [broken").expect("seed manifest");

    project
        .hook(&event("post-install", "acme/foo", Some("Foo\\Bar")))
        .failure()
        .stderr(predicate::str::contains("blocks.yml"));

    assert_eq!(project.manifest(&manifest_path), "- [broken");
}

#[test]
fn test_write_failure_only_warns() {
    let project = Project::new();
    project
        .hook(&event("post-install", "acme/foo", Some("Foo\\Bar")))
        .success();
    // A directory in place of the temp file blocks the atomic write
    fs::create_dir(project.root().join(".bldr").join("blocks.yml.tmp")).expect("blocker");

    project
        .command()
        .arg("--no-log-file")
        .arg("hook")
        .write_stdin(event("post-install", "acme/baz", Some("Baz\\Qux")))
        .assert()
        .success()
        .stderr(predicate::str::contains("warning:"));

    project
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout("Foo\\Bar\n");
}

#[test]
fn test_unreadable_manifest_fails() {
    let project = Project::new();
    // A regular file where the manifest directory should be
    fs::write(project.root().join("blocked"), "").expect("blocker");

    project
        .command()
        .args(["--manifest", "blocked/blocks.yml", "--no-log-file"])
        .arg("hook")
        .write_stdin(event("post-uninstall", "acme/foo", Some("Foo\\Bar")))
        .assert()
        .failure()
        .stderr(predicate::str::contains("blocks.yml"));
}

#[test]
fn test_malformed_event_fails() {
    Project::new()
        .hook("{\"kind\": \"post-install\"")
        .failure()
        .stderr(predicate::str::contains("Invalid lifecycle event"));
}

#[test]
fn test_manual_register_and_unregister() {
    let project = Project::new();
    project
        .command()
        .args(["register", "acme/foo", "--block-class", "Foo\\Bar"])
        .assert()
        .success();
    project
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout("Foo\\Bar\n");
    project
        .command()
        .args(["unregister", "acme/foo", "--block-class", "Foo\\Bar"])
        .assert()
        .success();

    assert_eq!(project.manifest(&project.default_manifest()), "[]\n");
}

#[test]
fn test_manual_register_requires_block_class() {
    Project::new()
        .command()
        .args(["register", "acme/foo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--block-class"));
}

#[test]
fn test_config_set_and_get() {
    let project = Project::new();
    project
        .command()
        .args(["config", "get", "block-loader"])
        .assert()
        .success()
        .stdout(".bldr/blocks.yml\n");

    project
        .command()
        .args(["config", "set", "block-loader", "app/blocks.yml"])
        .assert()
        .success();

    project
        .command()
        .args(["config", "get", "block-loader"])
        .assert()
        .success()
        .stdout("app/blocks.yml\n");

    project
        .command()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("app/blocks.yml"));
}

#[test]
fn test_config_unknown_key_fails() {
    Project::new()
        .command()
        .args(["config", "set", "cache-path", "/tmp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_config_path() {
    let project = Project::new();
    project
        .command()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bldr.toml"));
}
