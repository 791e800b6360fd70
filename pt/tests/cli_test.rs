//! Integration tests for the pt binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// `pt` running inside `temp`, with config and log locations kept there too
fn pt_cmd(temp: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("pt");
    cmd.current_dir(temp)
        .env("XDG_CONFIG_HOME", temp.join(".config"))
        .env("XDG_DATA_HOME", temp.join(".local/share"));
    cmd
}

#[test]
fn test_syntaxes_lists_builtin_templates() {
    let temp = TempDir::new().unwrap();

    pt_cmd(temp.path())
        .arg("syntaxes")
        .assert()
        .success()
        .stdout(predicate::str::contains(".scss"))
        .stdout(predicate::str::contains("@import '{name}';"))
        .stdout(predicate::str::contains("<%= render '{name}' %>"));
}

#[test]
fn test_syntaxes_include_config_additions() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("partials.yml");
    fs::write(&config, "syntaxes:\n  .twig: \"{% include '{name}' %}\"\n").unwrap();

    pt_cmd(temp.path())
        .args(["--config", config.to_str().unwrap(), "syntaxes"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".twig"));
}

#[test]
fn test_partial_extracts_selection() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("main.scss");
    fs::write(&file, ".card {\n  color: red;\n  margin: 0;\n}\n").unwrap();

    pt_cmd(temp.path())
        .args(["partial", file.to_str().unwrap(), "--select", "2:3", "--name", "card/body"])
        .assert()
        .success()
        .stdout(predicate::str::contains("card/body created successfully"));

    assert_eq!(
        fs::read_to_string(temp.path().join("card/_body.scss")).unwrap(),
        "color: red;\nmargin: 0;\n"
    );
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        ".card {\n  @import 'card/body';\n}\n"
    );
}

#[test]
fn test_partial_refuses_to_overwrite_without_yes() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("main.scss");
    fs::write(&file, "color: red;\n").unwrap();
    fs::write(temp.path().join("_colors.scss"), "color: blue;\n").unwrap();

    pt_cmd(temp.path())
        .args(["partial", file.to_str().unwrap(), "--select", "1:1", "--name", "colors"])
        .write_stdin("")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("_colors.scss")).unwrap(),
        "color: blue;\n"
    );
    assert_eq!(fs::read_to_string(&file).unwrap(), "color: red;\n");

    pt_cmd(temp.path())
        .args(["partial", file.to_str().unwrap(), "--select", "1:1", "--name", "colors", "-y"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("_colors.scss")).unwrap(),
        "color: red;\n"
    );
    assert_eq!(fs::read_to_string(&file).unwrap(), "@import 'colors';\n");
}

#[test]
fn test_partial_on_line_prints_partial_path() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("layout.haml");
    fs::write(&file, "%body\n  = render 'footer'\n").unwrap();
    fs::write(temp.path().join("_footer.haml"), "%footer\n").unwrap();

    pt_cmd(temp.path())
        .args(["partial", file.to_str().unwrap(), "--line", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_footer.haml"));
}

#[test]
fn test_partial_on_line_without_partial_fails() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("layout.haml");
    fs::write(&file, "= render 'missing'\n").unwrap();

    pt_cmd(temp.path())
        .args(["partial", file.to_str().unwrap(), "--line", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Partial not found"));
}

#[test]
fn test_dispose_inlines_and_deletes() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("main.scss");
    let partial = temp.path().join("_colors.scss");
    fs::write(&file, "body {\n  @import 'colors';\n}\n").unwrap();
    fs::write(&partial, "color: red;\n").unwrap();

    pt_cmd(temp.path())
        .args(["dispose", file.to_str().unwrap(), "--line", "2", "--delete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inlined and deleted"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "body {\n  color: red;\n}\n");
    assert!(!partial.exists());
}

#[test]
fn test_dispose_keep_leaves_partial() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("page.slim");
    let partial = temp.path().join("_menu.slim");
    fs::write(&file, "== render 'menu'\n").unwrap();
    fs::write(&partial, "ul\n").unwrap();

    pt_cmd(temp.path())
        .args(["dispose", file.to_str().unwrap(), "--line", "1", "--keep"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&file).unwrap(), "ul\n");
    assert!(partial.exists());
}

#[test]
fn test_unsupported_file_type_fails() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("notes.txt");
    fs::write(&file, "some notes\n").unwrap();

    pt_cmd(temp.path())
        .args(["partial", file.to_str().unwrap(), "--select", "1:1", "--name", "part"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(".txt"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "some notes\n");
    assert!(!temp.path().join("_part.txt").exists());
}

#[test]
fn test_resolve_prints_candidates_and_include() {
    let temp = TempDir::new().unwrap();
    let views = temp.path().join("app/views");
    fs::create_dir_all(views.join("shared")).unwrap();
    fs::create_dir_all(views.join("users")).unwrap();
    fs::write(views.join("shared/_card.html.erb"), "<div/>\n").unwrap();
    let file = views.join("users/show.html.erb");

    pt_cmd(temp.path())
        .args(["resolve", file.to_str().unwrap(), "shared/card"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shared/_card.html.erb"))
        .stdout(predicate::str::contains("<%= render 'shared/card' %>"));
}

#[test]
fn test_out_of_range_line_fails() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("main.scss");
    fs::write(&file, "a\n").unwrap();

    pt_cmd(temp.path())
        .args(["dispose", file.to_str().unwrap(), "--line", "7"])
        .assert()
        .failure();
}
