//! CLI integration tests for Gangway.
//!
//! These tests verify the full workflow from header parsing through
//! binding generation.

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the gangway binary command.
fn gangway() -> Command {
    Command::cargo_bin("gangway").unwrap()
}

/// Create a temporary directory for test files.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

const SAMPLE_HEADER: &str = r#"
typedef enum {
    StatusOk,
    StatusError = 10,
    StatusTimeout
} Status;

typedef struct Point_s {
    int32_t x;
    int32_t y;
} Point;

typedef int32_t device_id_t;

int32_t get_value(Status s, const char* label);
void reset(void);
"#;

// ============================================================================
// gangway generate
// ============================================================================

#[test]
fn test_generate_writes_bindings() {
    let tmp = temp_dir();
    let header_path = tmp.path().join("device.h");
    let output_path = tmp.path().join("device.py");
    fs::write(&header_path, SAMPLE_HEADER).unwrap();

    gangway()
        .args([
            "generate",
            header_path.to_str().unwrap(),
            output_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated Python bindings"));

    let code = fs::read_to_string(&output_path).unwrap();
    assert!(code.contains("class Device:"));
    assert!(code.contains("class Status(IntEnum):"));
    assert!(code.contains("StatusOk = 0"));
    assert!(code.contains("StatusError = 10"));
    assert!(code.contains("StatusTimeout = 2"));
    assert!(code.contains("self.lib.get_value.argtypes = [c_int, c_char_p]"));
    assert!(code.contains("def get_value(self, s: int, label: str) -> int:"));
    assert!(code.contains("device_id_t = c_int32"));
}

#[test]
fn test_generate_reports_parse_summary() {
    let tmp = temp_dir();
    let header_path = tmp.path().join("device.h");
    fs::write(&header_path, SAMPLE_HEADER).unwrap();

    gangway()
        .args([
            "generate",
            header_path.to_str().unwrap(),
            tmp.path().join("device.py").to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 functions"))
        .stdout(predicate::str::contains("1 enums"));
}

#[test]
fn test_generate_empty_header_succeeds() {
    let tmp = temp_dir();
    let header_path = tmp.path().join("empty.h");
    let output_path = tmp.path().join("empty.py");
    fs::write(&header_path, "// no declarations here\n").unwrap();

    gangway()
        .args([
            "generate",
            header_path.to_str().unwrap(),
            output_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let code = fs::read_to_string(&output_path).unwrap();
    assert!(code.contains("class Empty:"));
    assert!(code.contains("CDLL(lib_path)"));
}

#[test]
fn test_generate_fails_on_missing_header() {
    let tmp = temp_dir();

    gangway()
        .args([
            "generate",
            tmp.path().join("missing.h").to_str().unwrap(),
            tmp.path().join("out.py").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read header"));
}

#[test]
fn test_generate_fails_on_typedef_cycle() {
    let tmp = temp_dir();
    let header_path = tmp.path().join("cyclic.h");
    fs::write(
        &header_path,
        "typedef B A;\ntypedef A B;\nvoid use_it(A value);\n",
    )
    .unwrap();

    gangway()
        .args([
            "generate",
            header_path.to_str().unwrap(),
            tmp.path().join("cyclic.py").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("typedef cycle"));
}

#[test]
fn test_generate_with_class_and_lib_overrides() {
    let tmp = temp_dir();
    let header_path = tmp.path().join("device.h");
    let output_path = tmp.path().join("device.py");
    fs::write(&header_path, SAMPLE_HEADER).unwrap();

    gangway()
        .args([
            "generate",
            header_path.to_str().unwrap(),
            output_path.to_str().unwrap(),
            "--class-name",
            "DeviceBindings",
            "--lib-path",
            "/opt/device/libdevice.so",
        ])
        .assert()
        .success();

    let code = fs::read_to_string(&output_path).unwrap();
    assert!(code.contains("class DeviceBindings:"));
    assert!(code.contains("lib_path = '/opt/device/libdevice.so'"));
}

// ============================================================================
// gangway inspect
// ============================================================================

#[test]
fn test_inspect_lists_declarations() {
    let tmp = temp_dir();
    let header_path = tmp.path().join("device.h");
    fs::write(&header_path, SAMPLE_HEADER).unwrap();

    gangway()
        .args(["inspect", header_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status (3 members)"))
        .stdout(predicate::str::contains("device_id_t -> int32_t"))
        .stdout(predicate::str::contains("get_value"));
}

#[test]
fn test_inspect_json_output() {
    let tmp = temp_dir();
    let header_path = tmp.path().join("device.h");
    fs::write(&header_path, SAMPLE_HEADER).unwrap();

    let output = gangway()
        .args(["inspect", header_path.to_str().unwrap(), "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["functions"][0]["name"], "get_value");
    assert_eq!(parsed["enums"][0]["name"], "Status");
}

#[test]
fn test_inspect_empty_header() {
    let tmp = temp_dir();
    let header_path = tmp.path().join("empty.h");
    fs::write(&header_path, "#define ONLY_MACROS 1\n").unwrap();

    gangway()
        .args(["inspect", header_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("no recognized declarations"));
}
