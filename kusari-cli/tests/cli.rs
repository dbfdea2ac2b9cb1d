use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn kusari() -> Command {
    Command::cargo_bin("kusari").expect("kusari binary to be built")
}

#[test]
fn transforms_json_tree() {
    kusari()
        .arg(fixture_path("property.json"))
        .assert()
        .success()
        .stdout("hi {{ person[\"name\"] }}\n");
}

#[test]
fn transforms_several_files_in_order() {
    kusari()
        .arg(fixture_path("property.json"))
        .arg(fixture_path("set_dict.yaml"))
        .assert()
        .success()
        .stdout(
            "hi {{ person[\"name\"] }}\n{% set x = {\"foo\": \"bar\", \"kitty\": meow} %}{{ x[\"foo\"] }}\n",
        );
}

#[test]
fn missing_file_fails_before_processing() {
    kusari()
        .arg(fixture_path("property.json"))
        .arg("no/such/file.json")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("'no/such/file.json' does not exist"));
}

#[test]
fn unsupported_node_reports_and_continues() {
    kusari()
        .arg(fixture_path("macro.json"))
        .arg(fixture_path("property.json"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("hi {{ person[\"name\"] }}"))
        .stderr(predicate::str::contains("Unhandled node Macro"));
}

#[test]
fn for_else_is_rejected() {
    kusari()
        .arg(fixture_path("for_else.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("else_ is not handled"));
}

#[test]
fn treeviz_format() {
    kusari()
        .arg(fixture_path("property.json"))
        .arg("--format")
        .arg("treeviz")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Root\n").and(predicate::str::contains("Symbol: person")));
}

#[test]
fn unknown_format_fails() {
    kusari()
        .arg(fixture_path("property.json"))
        .arg("--format")
        .arg("xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Format 'xml' not found"));
}

#[test]
fn list_formats() {
    kusari()
        .arg("--list-formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("twig").and(predicate::str::contains("treeviz")));
}

#[test]
fn config_file_changes_rewrites() {
    let mut config = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(config, "[transform.filter_renames]\njoin = \"implode\"").unwrap();

    kusari()
        .arg(fixture_path("filter_include.json"))
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("nyaa | implode(\",\",wat,\"nonsense\")"));
}

#[test]
fn local_config_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("kusari.toml"),
        "[transform.filter_renames]\njoin = \"implode\"\n",
    )
    .unwrap();

    kusari()
        .current_dir(dir.path())
        .arg(fixture_path("filter_include.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("nyaa | implode("));
}

#[test]
fn format_flag_overrides_config_file() {
    let mut config = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(config, "[output]\nformat = \"treeviz\"").unwrap();

    kusari()
        .arg(fixture_path("property.json"))
        .arg("--config")
        .arg(config.path())
        .arg("--format")
        .arg("twig")
        .assert()
        .success()
        .stdout("hi {{ person[\"name\"] }}\n");

    kusari()
        .arg(fixture_path("property.json"))
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Root\n"));
}

#[test]
fn verbose_logs_each_file_to_stderr() {
    kusari()
        .env_remove("RUST_LOG")
        .arg("--verbose")
        .arg(fixture_path("property.json"))
        .arg(fixture_path("macro.json"))
        .assert()
        .failure()
        .stdout("hi {{ person[\"name\"] }}\n")
        .stderr(
            predicate::str::contains("transforming")
                .and(predicate::str::contains("transform failed")),
        );
}
