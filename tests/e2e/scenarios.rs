use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

use super::helpers::{TestProject, GOOD_JSON, GOOD_YAML};

#[test]
fn test_missing_config_fails() {
    let project = TestProject::new();

    project
        .klepto()
        .arg("steal")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("could not read configurations"));
}

#[test]
fn test_invalid_toml_reports_parse_error() {
    let project = TestProject::new();
    project.write("bad.toml", "[[tables]\nname = \"users\"\n");

    project
        .klepto()
        .args(["steal", "--config", "./bad.toml"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("could not read configurations"))
        .stderr(predicate::str::contains("bad.toml is not valid TOML"))
        .stderr(predicate::str::contains("Caused by"));
}

#[test]
fn test_explicit_yaml_config_reaches_steal() {
    let project = TestProject::new();
    project.write("good.yaml", GOOD_YAML);

    project
        .klepto()
        .args(["steal", "--config", "./good.yaml", "--from", "src", "--to", "dst"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stealing from src to dst"))
        .stdout(predicate::str::contains("  filter:    users.active = TRUE"))
        .stdout(predicate::str::contains("  limit:     25"))
        .stdout(predicate::str::contains("  anonymise: email (EmailAddress)"))
        .stdout(predicate::str::contains("  anonymise: username (UserName)"))
        .stdout(predicate::str::contains("audit_log\n  rows:      skipped"));
}

#[test]
fn test_search_path_finds_json_in_working_directory() {
    let project = TestProject::new();
    project.write(".klepto.json", GOOD_JSON);

    project
        .klepto()
        .arg("steal")
        .assert()
        .success()
        .stdout(predicate::str::contains("customers"))
        .stdout(predicate::str::contains("anonymise: phone (PhoneNumber)"));
}

#[test]
fn test_explicit_config_ignores_search_path() {
    let project = TestProject::new();
    project.write(".klepto.json", GOOD_JSON);
    project.write("good.yaml", GOOD_YAML);

    project
        .klepto()
        .args(["-c", "good.yaml", "steal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("users"))
        .stdout(predicate::str::contains("customers").not());
}

#[test]
fn test_verbose_adds_debug_output() {
    let project = TestProject::new();
    project.write(".klepto.json", GOOD_JSON);

    project
        .klepto()
        .args(["steal", "--verbose"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG Reading config from .klepto..."));

    project
        .klepto()
        .arg("steal")
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG").not());
}

#[test]
fn test_commands_without_config() {
    let project = TestProject::new();

    project
        .klepto()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("klepto version"));

    project
        .klepto()
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("releases"));
}

#[test]
fn test_init_then_steal() {
    let project = TestProject::new();

    project
        .klepto()
        .args(["init", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration written"));
    assert!(project.path().join(".klepto.yaml").is_file());

    project
        .klepto()
        .arg("init")
        .args(["--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    project
        .klepto()
        .arg("steal")
        .assert()
        .success()
        .stdout(predicate::str::contains("anonymise: email (EmailAddress)"));

    let written = fs::read_to_string(project.path().join(".klepto.yaml")).unwrap();
    assert!(written.contains("active_users"));
}

#[test]
fn test_no_subcommand_prints_help() {
    let project = TestProject::new();

    project
        .klepto()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_deleted_working_directory_fails() {
    let project = TestProject::new();
    fs::create_dir(project.path().join("gone")).unwrap();

    // klepto starts inside a directory that no longer exists
    Command::new("sh")
        .arg("-c")
        .arg(r#"cd gone && rmdir ../gone && exec "$0" steal"#)
        .arg(project.binary_path())
        .current_dir(project.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("can't find current working directory"));
}
