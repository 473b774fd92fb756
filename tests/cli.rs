use assert_cmd::{Command, cargo::cargo_bin_cmd};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn agents_setup() -> Command {
    let mut cmd = cargo_bin_cmd!("agents-setup");
    cmd.env_remove("AGENTS_SETUP_LOG").env_remove("RUST_LOG");
    cmd
}

fn install_go_linear(target: &Path) -> Command {
    let mut cmd = agents_setup();
    cmd.arg("--target")
        .arg(target)
        .args(["--language", "go", "--workflow", "linear"])
        .args(["--set", "APP_NAME=billing-api"])
        .args(["--set", "LANGUAGE_NAME=Go"])
        .args(["--set", "TRACKER_NAME=Linear"])
        .args(["--set", "TEST_COMMAND=go test ./..."]);
    cmd
}

#[test]
fn test_binary_help() {
    agents_setup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--infer-only"));
}

#[test]
fn test_install_go_linear() {
    let dir = tempdir().unwrap();

    install_go_linear(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("AGENTS.md placeholder plan:"))
        .stdout(predicate::str::contains("- APP_NAME = billing-api"))
        .stdout(predicate::str::contains("[OK] Wrote:"))
        .stdout(predicate::str::contains(
            "Unresolved placeholders in non-AGENTS files:",
        ));

    for name in ["AGENTS.md", "APP.md", "PLANS.md", "LANGUAGE.md", "WORKFLOW.md"] {
        assert!(dir.path().join(name).is_file(), "{} missing", name);
    }
    assert!(dir.path().join("plans").is_dir());

    let agents = fs::read_to_string(dir.path().join("AGENTS.md")).unwrap();
    assert!(agents.contains("billing-api"));
    assert!(!agents.contains("{{"));
}

#[test]
fn test_second_run_reports_skips() {
    let dir = tempdir().unwrap();
    install_go_linear(dir.path()).assert().success();

    install_go_linear(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[SKIP] Exists (use --force to overwrite):",
        ))
        .stdout(predicate::str::contains("[OK] Wrote:").not());
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempdir().unwrap();

    install_go_linear(dir.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("[DRY RUN] Would create:"));

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_unknown_language_exits_with_config_error() {
    let dir = tempdir().unwrap();

    agents_setup()
        .arg("--target")
        .arg(dir.path())
        .args(["--language", "rust", "--workflow", "linear"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: unknown language 'rust'"));

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_values_exit_with_validation_error() {
    let dir = tempdir().unwrap();

    agents_setup()
        .arg("--target")
        .arg(dir.path())
        .args(["--language", "go", "--workflow", "linear", "--no-infer"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("{{APP_NAME}}"));

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_io_failure_exits_with_io_error() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("plans"), "not a directory").unwrap();

    install_go_linear(dir.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn test_infer_only_pyproject() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("pyproject.toml"),
        "[project]\nname = \"my-service\"\n",
    )
    .unwrap();

    agents_setup()
        .arg("--infer-only")
        .arg("--target")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("- APP_NAME = my-service"))
        .stdout(predicate::str::contains("- TEST_COMMAND = pytest"));

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_json_report() {
    let dir = tempdir().unwrap();

    let output = install_go_linear(dir.path())
        .args(["--dry-run", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["dry_run"], true);
    assert_eq!(json["entries"].as_array().unwrap().len(), 6);
    assert_eq!(json["entries"][0]["action"], "create");
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let dir = tempdir().unwrap();

    install_go_linear(dir.path())
        .args(["--dry-run", "--json", "-v"])
        .assert()
        .success()
        .stderr(predicate::str::contains("installing templates"));
}

#[test]
fn test_force_rerun_overwrites_with_new_values() {
    let dir = tempdir().unwrap();
    install_go_linear(dir.path()).assert().success();

    install_go_linear(dir.path())
        .args(["--force", "--set", "APP_NAME=ledger"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "[OK] Wrote: {}",
            dir.path().canonicalize().unwrap().join("AGENTS.md").display()
        )))
        .stdout(predicate::str::contains("[SKIP] Exists").not());

    let agents = fs::read_to_string(dir.path().join("AGENTS.md")).unwrap();
    assert!(agents.contains("ledger"));
    assert!(!agents.contains("billing-api"));
}

#[test]
fn test_token_inside_set_value_exits_with_validation_error() {
    let dir = tempdir().unwrap();

    install_go_linear(dir.path())
        .args(["--set", "APP_NAME={{EPIC_ID}}"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("{{EPIC_ID}}"));

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
