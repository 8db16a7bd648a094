use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sdmx-filter-ui").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn fixture(dir: &Path, name: &str, json: &str) {
    fs::write(dir.join(name), json).expect("write fixture");
}

#[test]
fn render_single_result_to_stdout() {
    let tmp = TempDir::new().unwrap();
    fixture(tmp.path(), "upload.json", r#"{"removed": 1, "total": 5, "messages": ["x"]}"#);

    cmd(tmp.path())
        .args(["render", "upload.json", "-o", "-", "--format", "fragments"])
        .assert()
        .success()
        .stdout(contains(
            "<div id=\"summary\"><p>1 series keys were removed (out of 5).</p></div>",
        ))
        .stdout(contains(
            "<div id=\"messages\"><h2>Reasons for removals:</h2><ol><li>x</li></ol></div>",
        ));
}

#[test]
fn render_violations_json_report() {
    let tmp = TempDir::new().unwrap();
    fixture(
        tmp.path(),
        "upload.json",
        r#"{"dsd_violations": 3, "content_violations": 0, "total": 10, "series": 7}"#,
    );

    cmd(tmp.path())
        .args(["render", "upload.json", "-o", "out/result.json", "-q"])
        .assert()
        .success();

    let written = fs::read_to_string(tmp.path().join("out/result.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["schema"], "violations");
    assert_eq!(value["source"], "upload.json");
    assert!(value["regions"]["summary"]
        .as_str()
        .unwrap()
        .contains("3 series keys had DSD violations (out of 10) and were removed."));
}

#[test]
fn render_directory_reports_failures() {
    let tmp = TempDir::new().unwrap();
    let inputs = tmp.path().join("responses");
    fs::create_dir_all(&inputs).unwrap();
    fixture(&inputs, "good.json", r#"{"removed": 0, "total": 4}"#);
    fixture(&inputs, "bad.json", "{ broken");

    cmd(tmp.path())
        .args(["render", "responses", "--report-dir", "reports", "-q"])
        .assert()
        .code(1)
        .stderr(contains("Failed"));

    assert!(tmp.path().join("reports/good.html").is_file());
    assert!(!tmp.path().join("reports/bad.html").exists());
}

#[test]
fn render_directory_keeps_nested_layout() {
    let tmp = TempDir::new().unwrap();
    for month in ["jan", "feb"] {
        let dir = tmp.path().join("responses").join(month);
        fs::create_dir_all(&dir).unwrap();
        fixture(&dir, "upload.json", r#"{"removed": 1, "total": 3}"#);
    }

    cmd(tmp.path())
        .args(["render", "responses", "--report-dir", "reports", "-q"])
        .assert()
        .success();

    assert!(tmp.path().join("reports/jan/upload.html").is_file());
    assert!(tmp.path().join("reports/feb/upload.html").is_file());
}

#[test]
fn render_falsy_fields_show_nothing() {
    let tmp = TempDir::new().unwrap();
    fixture(
        tmp.path(),
        "upload.json",
        r#"{"info": false, "download": 0, "removed": 1, "total": 5, "messages": ["x", 7]}"#,
    );

    cmd(tmp.path())
        .args(["render", "upload.json", "-o", "-", "--format", "fragments"])
        .assert()
        .success()
        .stdout(contains("<div id=\"info\"></div>"))
        .stdout(contains("<div id=\"download\"></div>"))
        .stdout(contains("<li>x</li><li>7</li>"));
}

#[test]
fn render_schema_flag_forces_shape() {
    let tmp = TempDir::new().unwrap();
    fixture(tmp.path(), "upload.json", r#"{"info": "<p>done</p>"}"#);

    cmd(tmp.path())
        .args(["render", "upload.json", "-o", "-", "--format", "fragments", "--schema", "violations"])
        .assert()
        .success()
        .stdout(contains("<div id=\"dsd-messages\"></div>"))
        .stdout(contains("<div id=\"info\"><p>done</p></div>"));
}

#[test]
fn config_file_sets_schema() {
    let tmp = TempDir::new().unwrap();
    fixture(tmp.path(), "upload.json", "{}");
    fs::write(tmp.path().join("sdmx-filter-ui.toml"), "fallback = \"violations\"\n").unwrap();

    cmd(tmp.path())
        .args(["render", "upload.json", "-o", "-", "--format", "fragments"])
        .assert()
        .success()
        .stdout(contains("<div id=\"content-messages\"></div>"));
}

#[test]
fn unknown_schema_fails() {
    let tmp = TempDir::new().unwrap();
    fixture(tmp.path(), "upload.json", "{}");

    cmd(tmp.path())
        .args(["render", "upload.json", "-o", "-", "--schema", "legacy"])
        .assert()
        .failure()
        .stderr(contains("Unknown schema 'legacy'"));
}

#[test]
fn missing_input_fails() {
    let tmp = TempDir::new().unwrap();

    cmd(tmp.path())
        .args(["render", "nothing-here"])
        .assert()
        .failure()
        .stderr(contains("No upload results found"));
}

#[test]
fn broken_config_fails() {
    let tmp = TempDir::new().unwrap();
    fixture(tmp.path(), "upload.json", "{}");
    fs::write(tmp.path().join("custom.toml"), "schema = 3\n").unwrap();

    cmd(tmp.path())
        .args(["--config", "custom.toml", "render", "upload.json", "-o", "-"])
        .assert()
        .failure()
        .stderr(contains("Configuration error"));
}
