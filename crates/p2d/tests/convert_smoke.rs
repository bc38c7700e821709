use assert_cmd::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Command running the built binary's `convert` subcommand in `dir`.
///
/// Tests pass `--renderer p2d-no-such-renderer` so rendering deterministically
/// falls back to the placeholder image regardless of the host environment.
fn p2d(dir: &Path) -> Command {
    let exe = assert_cmd::cargo_bin!("p2d");
    let mut cmd = Command::new(exe);
    cmd.current_dir(dir).arg("convert");
    cmd
}

fn write_diagram(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dirs");
    }
    fs::write(path, "@startuml\nAlice -> Bob: hello\n@enduml\n").expect("write diagram");
}

#[test]
fn cli_converts_single_file_without_renderer() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_diagram(&tmp.path().join("seq.puml"));

    p2d(tmp.path())
        .args(["seq.puml", "seq.drawio", "--renderer", "p2d-no-such-renderer"])
        .assert()
        .success();

    let document = fs::read_to_string(tmp.path().join("seq.drawio")).expect("read output");
    assert!(document.contains("<mxfile"));
    assert!(document.contains(r#"name="seq""#));
}

#[test]
fn cli_forces_output_extension() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_diagram(&tmp.path().join("seq.puml"));

    p2d(tmp.path())
        .args(["seq.puml", "seq.xml", "--renderer", "p2d-no-such-renderer"])
        .assert()
        .success();

    assert!(tmp.path().join("seq.drawio").is_file());
    assert!(!tmp.path().join("seq.xml").exists());
}

#[test]
fn cli_rejects_wrong_extension() {
    let tmp = tempfile::tempdir().expect("tempdir");
    fs::write(tmp.path().join("notes.txt"), "not a diagram").expect("write file");

    p2d(tmp.path())
        .args(["notes.txt", "out.drawio", "--renderer", "p2d-no-such-renderer"])
        .assert()
        .failure();
}

#[test]
fn cli_rejects_missing_input() {
    let tmp = tempfile::tempdir().expect("tempdir");

    p2d(tmp.path())
        .args(["ghost.puml", "out.drawio", "--renderer", "p2d-no-such-renderer"])
        .assert()
        .failure();
}

#[test]
fn cli_batch_mirrors_tree_and_ignores_other_files() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_diagram(&tmp.path().join("src/a/b/diagram1.puml"));
    write_diagram(&tmp.path().join("src/top.puml"));
    fs::write(tmp.path().join("src/readme.md"), "not a diagram").expect("write file");

    p2d(tmp.path())
        .args(["src", "out", "--renderer", "p2d-no-such-renderer", "--verbose"])
        .assert()
        .success();

    assert!(tmp.path().join("out/a/b/diagram1.drawio").is_file());
    assert!(tmp.path().join("out/top.drawio").is_file());
    assert!(!tmp.path().join("out/readme.drawio").exists());
}

#[test]
fn cli_batch_fails_on_directory_without_diagrams() {
    let tmp = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(tmp.path().join("src")).expect("create src");

    p2d(tmp.path())
        .args(["src", "out", "--renderer", "p2d-no-such-renderer"])
        .assert()
        .failure();

    assert!(!tmp.path().join("out").exists());
}

#[test]
fn cli_reads_renderer_from_config_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_diagram(&tmp.path().join("seq.puml"));
    fs::write(
        tmp.path().join("p2d.toml"),
        "[renderer]\ncommand = \"p2d-no-such-renderer\"\n",
    )
    .expect("write config");

    p2d(tmp.path())
        .args(["seq.puml", "seq.drawio", "--config", "p2d.toml"])
        .assert()
        .success();

    assert!(tmp.path().join("seq.drawio").is_file());
}
