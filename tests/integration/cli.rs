//! End-to-end tests of the `modmeta` binary.

use assert_cmd::Command;
use modmeta::test_utils::DescriptorFixture;
use predicates::prelude::*;
use tempfile::TempDir;

fn modmeta() -> Command {
    let mut cmd = Command::cargo_bin("modmeta").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_inspect_text() {
    let temp = TempDir::new().unwrap();
    let path = DescriptorFixture::maven_basic().write_to(temp.path()).unwrap();

    modmeta()
        .arg("inspect")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("org.example:lib:1.0 (maven, release)"))
        .stdout(predicate::str::contains("runtime extends compile"))
        .stdout(predicate::str::contains("depends on org.junit:junit:4.13"))
        .stdout(predicate::str::contains("Variants:").not());
}

#[test]
fn test_inspect_json_matches_between_mutable_and_snapshot() {
    let temp = TempDir::new().unwrap();
    let path = DescriptorFixture::maven_with_variants().write_to(temp.path()).unwrap();

    let run = |immutable: bool| {
        let mut cmd = modmeta();
        cmd.arg("inspect").arg(&path).args(["--format", "json"]);
        if immutable {
            cmd.arg("--immutable");
        }
        let output = cmd.assert().success().get_output().stdout.clone();
        serde_json::from_slice::<serde_json::Value>(&output).unwrap()
    };

    let mutable = run(false);
    let frozen = run(true);
    assert_eq!(mutable, frozen);

    assert_eq!(mutable["component"], "org.example:lib:2.0");
    assert_eq!(mutable["explicit_variants"], true);
    let variants = mutable["variants"].as_array().unwrap();
    assert_eq!(variants.len(), 2);
    assert_eq!(variants[1]["name"], "runtimeElements");
    assert_eq!(variants[1]["dependencies"][1]["target"], "org.dep:runtime-only:1.5 !{1.4}");
    assert_eq!(variants[0]["attributes"]["org.gradle.usage"], "java-api");
}

#[test]
fn test_inspect_missing_file_fails() {
    let temp = TempDir::new().unwrap();

    modmeta()
        .arg("inspect")
        .arg(temp.path().join("absent.toml"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to read module descriptor"));
}

#[test]
fn test_inspect_cycle_reports_suggestion() {
    let temp = TempDir::new().unwrap();
    let path = DescriptorFixture::ivy_cyclic().write_to(temp.path()).unwrap();

    modmeta()
        .arg("inspect")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Circular configuration inheritance"))
        .stderr(predicate::str::contains("Break the cycle"));
}

#[test]
fn test_verbose_and_quiet_conflict() {
    modmeta()
        .args(["--verbose", "--quiet", "inspect", "module.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
