use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_guidedoc")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn json_output(args: &[&str]) -> serde_json::Value {
    let assert = cmd()
        .args(["-f", "json"])
        .args(args)
        .arg(fixture_path("unpoly"))
        .assert()
        .success();
    serde_json::from_slice(&assert.get_output().stdout).unwrap()
}

// -- summary --

#[test]
fn summary_lists_classes_guide_and_releases() {
    cmd()
        .arg(fixture_path("unpoly"))
        .assert()
        .success()
        .stdout(predicate::str::contains("version 0.50.2 (v0.50.2)"))
        .stdout(predicate::str::contains("* up.link (3 features)"))
        .stdout(predicate::str::contains("* up.modal (1 feature) [protected]"))
        .stdout(predicate::str::contains("[up-close] /up-close (x2)"))
        .stdout(predicate::str::contains("up:link:follow /up-link-follow"))
        .stdout(predicate::str::contains("* 0.50.1"));
}

#[test]
fn summary_promoted_section() {
    cmd()
        .args(["--promoted", "up.modal", "--promoted", "up.link"])
        .arg(fixture_path("unpoly"))
        .assert()
        .success()
        .stdout(predicate::str::contains("## Promoted\n\n* up.modal\n* up.link\n"));
}

// -- json --

#[test]
fn json_contains_parsed_params() {
    let model = json_output(&[]);
    let follow = &model["klasses"][0]["functions"][0];
    assert_eq!(follow["name"], "up.follow");
    assert_eq!(follow["klass"], "up.link");

    let params = follow["params"].as_array().unwrap();
    assert_eq!(params.len(), 3);
    assert_eq!(params[0]["name"], "linkOrSelector");
    assert_eq!(params[0]["optional"], false);
    assert_eq!(
        params[0]["types"],
        serde_json::json!(["Element", "jQuery", "String"])
    );
    assert_eq!(params[1]["name"], "options.target");
    assert_eq!(params[1]["optional"], true);
    assert!(params[1].get("default").is_none());
    assert_eq!(params[2]["default"], "true");
    assert_eq!(
        params[2]["guide_markdown"],
        "Whether to push an entry to the browser history."
    );
}

#[test]
fn json_guide_is_grouped_and_sorted() {
    let model = json_output(&[]);
    let names: Vec<&str> = model["guide"]
        .as_array()
        .unwrap()
        .iter()
        .map(|page| page["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "a[up-target]",
            "[up-close]",
            "up.follow",
            "up.link",
            "up.modal",
            "up.popup",
            "up:link:follow"
        ]
    );

    let close = &model["guide"][1];
    assert_eq!(close["features"], 2);
    assert_eq!(close["kind"], "selector");
    assert_eq!(model["guide"][6]["kind"], "event");
    assert_eq!(model["guide"][6]["visibility"], "protected");
}

#[test]
fn json_releases() {
    let model = json_output(&[]);
    let releases = model["releases"].as_array().unwrap();
    assert_eq!(releases.len(), 2);
    assert_eq!(releases[0]["version"], "0.50.2");
    assert_eq!(releases[0]["git_tag"], "v0.50.2");
    assert_eq!(
        releases[0]["source_url"],
        "https://github.com/unpoly/unpoly/tree/v0.50.2"
    );
    assert!(releases[1]["markdown"]
        .as_str()
        .unwrap()
        .contains("Popups close"));
}

#[test]
fn output_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("model.json");

    cmd()
        .args(["-f", "json", "-o", out.to_str().unwrap()])
        .arg(fixture_path("unpoly"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let model: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(model["version"], "0.50.2");
}

// -- config --

#[test]
fn config_file_changes_layout() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("src")).unwrap();
    std::fs::write(
        dir.path().join("src/widget.js"),
        "/* ignored */\n###*\n@class ui.widget\n###\n###*\n@method ui.render\n@param [el]\n###\n",
    )
    .unwrap();
    let config = dir.path().join("custom.toml");
    std::fs::write(
        &config,
        "source_dir = \"src\"\nextensions = [\"js\"]\nversion_file = \"VERSION\"\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("VERSION"), "2.1.0\n").unwrap();

    cmd()
        .args(["-c", config.to_str().unwrap()])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("version 2.1.0 (v2.1.0)"))
        .stdout(predicate::str::contains("* ui.widget (1 feature)"));
}

// -- failures --

#[test]
fn strict_mode_rejects_unmarked_blocks() {
    cmd()
        .arg("--strict")
        .arg(fixture_path("unpoly"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("popup.coffee.erb"))
        .stderr(predicate::str::contains("neither a class nor a function marker"));
}

#[test]
fn unknown_promoted_class_fails() {
    cmd()
        .args(["--promoted", "up.radio"])
        .arg(fixture_path("unpoly"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such class: up.radio"));
}

#[test]
fn missing_root_fails() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(dir.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("input path not found"));
}

#[test]
fn invalid_format_fails() {
    cmd()
        .args(["-f", "xml"])
        .arg(fixture_path("unpoly"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}
