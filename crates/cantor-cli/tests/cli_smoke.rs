use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "cantor-cli-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_cantor<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_cantor");
    Command::new(bin)
        .args(args)
        .output()
        .expect("cantor command should execute")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn assert_failure(output: &Output) {
    if output.status.success() {
        panic!(
            "command unexpectedly succeeded\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn parse_json_stdout(output: &Output) -> Value {
    serde_json::from_slice::<Value>(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "expected valid JSON stdout, got error: {e}\nstdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

/// The three-point scenario fixture: cuts ∅, {a}, {a,b}.
fn write_scenario_fixture(path: &Path) {
    let payload = serde_json::json!({
        "points": 3,
        "cuts": [0, 1, 3],
        "labels": ["a", "b", "c"]
    });
    fs::write(path, payload.to_string()).expect("fixture should be written");
}

/// A fixture violating the cut-0 sentinel convention.
fn write_bad_sentinel_fixture(path: &Path) {
    let payload = serde_json::json!({
        "points": 3,
        "cuts": [1]
    });
    fs::write(path, payload.to_string()).expect("fixture should be written");
}

#[test]
fn partition_human_output_lists_cells() {
    let dir = TempDirGuard::new("partition");
    let fixture = dir.path().join("space.json");
    write_scenario_fixture(&fixture);

    let output = run_cantor(["partition", fixture.to_str().unwrap(), "--depth", "2"]);
    assert_success(&output);
    let text = stdout_text(&output);
    assert!(text.contains("3 nonempty cells of 4 slots"), "got:\n{text}");
    assert!(text.contains("11 → {a}"), "got:\n{text}");
    assert!(text.contains("01 → {b}"), "got:\n{text}");
    assert!(text.contains("00 → {c}"), "got:\n{text}");
    assert!(!text.contains("10 →"), "empty slot should be pruned:\n{text}");
}

#[test]
fn partition_json_output_matches_the_scenario() {
    let dir = TempDirGuard::new("partition-json");
    let fixture = dir.path().join("space.json");
    write_scenario_fixture(&fixture);

    let output = run_cantor([
        "partition",
        fixture.to_str().unwrap(),
        "--depth",
        "2",
        "--json",
    ]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["points"], 3);
    assert_eq!(payload["depth"], 2);
    assert_eq!(payload["slotCount"], 4);
    assert_eq!(payload["nonemptyCount"], 3);
    let cells = payload["cells"].as_array().expect("cells array");
    assert_eq!(cells.len(), 3);
    assert_eq!(cells[0]["address"], "00");
    assert_eq!(cells[0]["points"], serde_json::json!(["c"]));
    assert_eq!(cells[2]["address"], "11");
    assert_eq!(cells[2]["extent"], 1);
    assert!(payload["fingerprint"].is_string());
}

#[test]
fn partition_slots_flag_keeps_empty_cells() {
    let dir = TempDirGuard::new("partition-slots");
    let fixture = dir.path().join("space.json");
    write_scenario_fixture(&fixture);

    let output = run_cantor([
        "partition",
        fixture.to_str().unwrap(),
        "--depth",
        "2",
        "--slots",
        "--json",
    ]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    let cells = payload["cells"].as_array().expect("cells array");
    assert_eq!(cells.len(), 4);
    assert_eq!(cells[2]["address"], "10");
    assert_eq!(cells[2]["extent"], 0);
}

#[test]
fn encode_json_output_matches_the_expected_codes() {
    let dir = TempDirGuard::new("encode");
    let fixture = dir.path().join("space.json");
    write_scenario_fixture(&fixture);

    let output = run_cantor([
        "encode",
        fixture.to_str().unwrap(),
        "--depth",
        "4",
        "--json",
    ]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    let codes = payload["codes"].as_array().expect("codes array");
    assert_eq!(codes.len(), 3);
    assert_eq!(codes[0]["label"], "a");
    assert_eq!(codes[0]["bits"], "0110");
    assert_eq!(codes[1]["bits"], "0010");
    assert_eq!(codes[2]["bits"], "0000");
}

#[test]
fn encode_rejects_points_outside_the_space() {
    let dir = TempDirGuard::new("encode-bad-point");
    let fixture = dir.path().join("space.json");
    write_scenario_fixture(&fixture);

    let output = run_cantor(["encode", fixture.to_str().unwrap(), "--point", "7"]);
    assert_failure(&output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("outside the 3-point space"), "got:\n{stderr}");
}

#[test]
fn separation_reports_the_scenario_as_separating() {
    let dir = TempDirGuard::new("separation");
    let fixture = dir.path().join("space.json");
    write_scenario_fixture(&fixture);

    let output = run_cantor(["separation", fixture.to_str().unwrap(), "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["separating"], true);
    assert_eq!(payload["report"]["pairsChecked"], 3);
    assert_eq!(payload["report"]["collisions"], serde_json::json!([]));
}

#[test]
fn separation_names_colliding_pairs() {
    let dir = TempDirGuard::new("separation-collide");
    let fixture = dir.path().join("space.json");
    // Only {a} is listed: b and c are never distinguished.
    let payload = serde_json::json!({
        "points": 3,
        "cuts": [0, 1],
        "labels": ["a", "b", "c"]
    });
    fs::write(&fixture, payload.to_string()).expect("fixture should be written");

    let output = run_cantor(["separation", fixture.to_str().unwrap(), "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["separating"], false);
    assert_eq!(payload["collisionLabels"], serde_json::json!(["b ~ c"]));
}

#[test]
fn check_accepts_the_scenario() {
    let dir = TempDirGuard::new("check");
    let fixture = dir.path().join("space.json");
    write_scenario_fixture(&fixture);

    let output = run_cantor(["check", fixture.to_str().unwrap(), "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["report"]["result"], "accepted");
    assert_eq!(payload["report"]["failures"], serde_json::json!([]));
}

#[test]
fn check_rejects_a_sentinel_violation() {
    let dir = TempDirGuard::new("check-bad");
    let fixture = dir.path().join("space.json");
    write_bad_sentinel_fixture(&fixture);

    let output = run_cantor(["check", fixture.to_str().unwrap(), "--json"]);
    assert_failure(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["report"]["result"], "rejected");
    assert_eq!(payload["report"]["failures"][0]["class"], "closure");
}

#[test]
fn malformed_fixtures_exit_with_an_error() {
    let dir = TempDirGuard::new("bad-fixture");
    let fixture = dir.path().join("space.json");
    fs::write(&fixture, "{\"points\": 99}").expect("fixture should be written");

    let output = run_cantor(["partition", fixture.to_str().unwrap()]);
    assert_failure(&output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "got:\n{stderr}");
}

#[test]
fn check_idempotence_across_runs() {
    let dir = TempDirGuard::new("check-idempotent");
    let fixture = dir.path().join("space.json");
    write_scenario_fixture(&fixture);

    let first = run_cantor(["check", fixture.to_str().unwrap(), "--json"]);
    let second = run_cantor(["check", fixture.to_str().unwrap(), "--json"]);
    assert_success(&first);
    assert_success(&second);
    let a = parse_json_stdout(&first);
    let b = parse_json_stdout(&second);
    assert_eq!(
        a["report"]["levelFingerprint"],
        b["report"]["levelFingerprint"]
    );
}
