//! CLI behavior: output paths, exit codes, document shape.

use assert_cmd::Command;
use predicates::prelude::*;

use crate::common::SitePackagesFixture;

/// The binary with a hermetic environment pointed at the fixture.
fn piptree_cmd(fixture: &SitePackagesFixture) -> Command {
    let mut cmd = Command::cargo_bin("piptree").unwrap();
    cmd.env_remove("PYTHONPATH")
        .env_remove("VIRTUAL_ENV")
        .env_remove("RUST_LOG")
        .env("PIP_TARGET", fixture.path());
    cmd
}

#[test]
fn test_writes_default_output_file() {
    let fixture = SitePackagesFixture::new();
    fixture.add_package("solo", "1.0", &[], &[]);

    piptree_cmd(&fixture).current_dir(fixture.root()).assert().success();

    let doc = std::fs::read_to_string(fixture.scratch("piptree.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&doc).unwrap();
    assert_eq!(parsed[0]["name"], "solo");
}

#[test]
fn test_writes_explicit_output_path() {
    let fixture = SitePackagesFixture::new();
    fixture.add_package("solo", "1.0", &[], &[]);
    let out = fixture.scratch("deps.json");

    piptree_cmd(&fixture).arg(&out).assert().success();

    assert!(out.exists());
}

#[test]
fn test_document_shape() {
    let fixture = SitePackagesFixture::new();
    fixture.add_package(
        "webapp",
        "2.0.0",
        &["requests >=2.8.1", "requests-helper ; extra == 'full'"],
        &["full"],
    );
    fixture.add_package("requests", "2.31.0", &["idna >=2.5,<4"], &[]);
    fixture.add_package("idna", "3.4", &[], &[]);
    fixture.add_package("requests-helper", "0.2", &[], &[]);
    let out = fixture.scratch("deps.json");

    piptree_cmd(&fixture).arg(&out).assert().success();

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let roots = doc.as_array().unwrap();
    let webapp = roots.iter().find(|r| r["name"] == "webapp").unwrap();

    assert_eq!(webapp["version"], "2.0.0");
    assert_eq!(webapp["purl"], "pkg:pypi/webapp@2.0.0");
    assert!(webapp.get("versionSpecifiers").is_none());
    assert_eq!(webapp["extra_deps"]["full"][0]["name"], "requests-helper");
    assert!(webapp["extra_deps"]["full"][0]["url"].is_null());

    let requests = &webapp["dependencies"][0];
    assert_eq!(requests["name"], "requests");
    assert_eq!(requests["versionSpecifiers"], ">=2.8.1");
    let idna = &requests["dependencies"][0];
    assert_eq!(idna["name"], "idna");
    assert_eq!(idna["versionSpecifiers"], ">=2.5,<4");
    assert_eq!(idna["purl"], "pkg:pypi/idna@3.4");
}

#[test]
fn test_missing_environment_fails_with_hint() {
    let mut cmd = Command::cargo_bin("piptree").unwrap();
    let fixture = SitePackagesFixture::new();
    cmd.env_remove("PYTHONPATH")
        .env_remove("VIRTUAL_ENV")
        .env_remove("PIP_TARGET")
        .current_dir(fixture.root())
        .arg(fixture.scratch("deps.json"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no installed Python packages found"))
        .stderr(predicate::str::contains("VIRTUAL_ENV"));
}

#[test]
fn test_cyclic_metadata_reports_and_succeeds() {
    let fixture = SitePackagesFixture::new();
    fixture.add_package("app", "1.0", &["alpha"], &[]);
    fixture.add_package("alpha", "1.0", &["beta"], &[]);
    fixture.add_package("beta", "1.0", &["alpha"], &[]);
    let out = fixture.scratch("deps.json");

    piptree_cmd(&fixture)
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("cycle"));

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(doc.as_array().unwrap().len(), 1);
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let fixture = SitePackagesFixture::new();
    fixture.add_package("a-root", "1.0", &["b-dep", "c-dep"], &[]);
    fixture.add_package("b-dep", "1.0", &["c-dep"], &[]);
    fixture.add_package("c-dep", "1.0", &[], &[]);
    let first_out = fixture.scratch("first.json");
    let second_out = fixture.scratch("second.json");

    piptree_cmd(&fixture).arg(&first_out).assert().success();
    piptree_cmd(&fixture).arg(&second_out).assert().success();

    assert_eq!(
        std::fs::read(&first_out).unwrap(),
        std::fs::read(&second_out).unwrap()
    );
}

#[test]
fn test_unwritable_output_exits_nonzero() {
    let fixture = SitePackagesFixture::new();
    fixture.add_package("solo", "1.0", &[], &[]);

    piptree_cmd(&fixture)
        .arg("/proc/definitely-not-writable/piptree.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to write output document"));
}

#[test]
fn test_help_shows_single_positional() {
    Command::cargo_bin("piptree")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("OUTPUT"));
}
