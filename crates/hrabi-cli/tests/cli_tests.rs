//! Integration tests for the hrabi CLI
//!
//! These tests invoke the actual hrabi-cli binary and verify:
//! - Exit codes (0 = success, 1 = validation failure, 2 = usage or IO error)
//! - stdout/stderr output
//! - JSON output format
//! - All commands work end-to-end

use std::path::PathBuf;
use std::process::Command;

// ── Helpers ───────────────────────────────────────────────

fn hrabi_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_hrabi-cli"))
}

fn fixture_valid(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(format!("../../tests/fixtures/valid/{}", name))
}

fn fixture_invalid(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join(format!("../../tests/fixtures/invalid/{}", name))
}

fn run_hrabi(args: &[&str]) -> std::process::Output {
    Command::new(hrabi_bin())
        .args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to execute hrabi-cli")
}

fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

// ── Version ───────────────────────────────────────────────

#[test]
fn test_version_command() {
    let output = run_hrabi(&["version"]);
    assert!(output.status.success(), "version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("hrabi"), "should contain 'hrabi'");
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "should contain version"
    );
    assert!(
        stdout.contains(&format!("hrabi-core {}", hrabi_core::VERSION)),
        "should report the library version"
    );
}

#[test]
fn test_version_flag() {
    let output = run_hrabi(&["--version"]);
    assert!(output.status.success(), "--version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

// ── Format ────────────────────────────────────────────────

#[test]
fn test_format_full() {
    let output = run_hrabi(&["format", fixture_valid("main.abi").to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec![
            "constructor()",
            "event Event(uint256 indexed a, bytes32 b)",
            "event Event2(uint256 indexed a, bytes32 b)",
            "error InsufficientBalance(uint256 available, uint256 required)",
            "function foo(uint256 a)",
        ]
    );
}

#[test]
fn test_format_minimal() {
    let output = run_hrabi(&[
        "format",
        "--mode",
        "minimal",
        fixture_valid("structs.abi").to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(
        lines[0],
        "function submit((address,uint256[2])[],bytes) payable returns (bool)"
    );
    assert_eq!(
        lines[2],
        "event Settled(uint64 indexed,(address,uint256)[])"
    );
}

#[test]
fn test_format_json_drops_default_functions() {
    let output = run_hrabi(&[
        "format",
        "--mode",
        "json",
        fixture_valid("erc20.json").to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("should be valid JSON");
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 6);
    assert!(entries.iter().all(|e| e["type"] != "fallback" && e["type"] != "receive"));
    assert_eq!(entries[4]["name"], "balanceOf");
    assert_eq!(entries[4]["constant"], true);
}

#[test]
fn test_format_is_stable() {
    let first = run_hrabi(&["format", fixture_valid("structs.abi").to_str().unwrap()]);
    assert!(first.status.success());

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("structs-full.abi");
    std::fs::write(&path, &first.stdout).expect("write temp");

    let second = run_hrabi(&["format", path.to_str().unwrap()]);
    assert!(second.status.success());
    assert_eq!(first.stdout, second.stdout, "format must be a fixed point");
}

#[test]
fn test_format_sighash_is_usage_error() {
    let output = run_hrabi(&[
        "format",
        "--mode",
        "sighash",
        fixture_valid("main.abi").to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot format interface as sighash"));
}

#[test]
fn test_format_unknown_mode() {
    let output = run_hrabi(&[
        "format",
        "--mode",
        "pretty",
        fixture_valid("main.abi").to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(2), "clap rejects bad values with 2");
}

#[test]
fn test_format_invalid_file() {
    let output = run_hrabi(&[
        "format",
        fixture_invalid("unbalanced.abi").to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unbalanced parenthesis"));
}

#[test]
fn test_format_nonexistent_file() {
    let output = run_hrabi(&["format", "nonexistent.abi"]);
    assert_eq!(output.status.code(), Some(2), "missing file should exit 2");
}

// ── Check ─────────────────────────────────────────────────

#[test]
fn test_check_valid_file() {
    let output = run_hrabi(&["check", fixture_valid("main.abi").to_str().unwrap()]);
    assert!(output.status.success(), "valid file should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("valid"), "should mention valid");
    assert!(stdout.contains("5 fragments"));
}

#[test]
fn test_check_duplicates_warn() {
    let output = run_hrabi(&["check", fixture_valid("duplicates.abi").to_str().unwrap()]);
    assert!(output.status.success(), "duplicates are not fatal");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("duplicate definition of function foo(uint256)"));
    assert!(stderr.contains("duplicate definition of event Ping()"));
}

#[test]
fn test_check_json_output() {
    let output = run_hrabi(&[
        "check",
        "--json",
        fixture_valid("duplicates.abi").to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("should be valid JSON");
    assert_eq!(json["valid"], true);
    assert_eq!(json["fragments"], 2);
    assert_eq!(json["functions"], 1);
    assert_eq!(json["errors"], 0);
    assert_eq!(json["warning_diagnostics"], 2);
    assert_eq!(json["error_diagnostics"], 0);
    assert_eq!(json["diagnostics"][0]["kind"], "duplicate_definition");
    assert_eq!(json["diagnostics"][0]["index"], 1);
}

#[test]
fn test_check_invalid_file() {
    let output = run_hrabi(&[
        "check",
        fixture_invalid("indexed-in-function.abi").to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1), "invalid file should exit 1");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "should mention error");
}

#[test]
fn test_check_json_invalid() {
    let output = run_hrabi(&[
        "check",
        "--json",
        fixture_invalid("bad-mutability.json").to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("should be valid JSON");
    assert_eq!(json["valid"], false);
    assert_eq!(json["error_diagnostics"], 1);
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("cannot have payable function with mutability view"));
}

#[test]
fn test_check_lenient_reports_skipped() {
    let output = run_hrabi(&[
        "check",
        "--lenient",
        "--json",
        fixture_invalid("indexed-in-function.abi").to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("should be valid JSON");
    assert_eq!(json["fragments"], 1);
    assert_eq!(json["error_diagnostics"], 1);
    assert_eq!(json["diagnostics"][0]["kind"], "skipped_declaration");
    assert_eq!(json["diagnostics"][0]["index"], 1);
}

#[test]
fn test_check_quiet_valid() {
    let output = run_hrabi(&[
        "--quiet",
        "check",
        fixture_valid("main.abi").to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.is_empty(), "quiet mode should produce no stdout");
}

#[test]
fn test_check_nonexistent_file() {
    let output = run_hrabi(&["check", "nonexistent.abi"]);
    assert_eq!(output.status.code(), Some(2));
}

// ── Signature ─────────────────────────────────────────────

#[test]
fn test_signature_function() {
    let output = run_hrabi(&["signature", "function transfer(address to, uint amount)"]);
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["transfer(address,uint256)", "0xa9059cbb"]
    );
}

#[test]
fn test_signature_event_json() {
    let output = run_hrabi(&[
        "signature",
        "--json",
        "event Transfer(address indexed from, address indexed to, uint value)",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("should be valid JSON");
    assert_eq!(json["signature"], "Transfer(address,address,uint256)");
    assert_eq!(
        json["topic"],
        "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
    );
}

#[test]
fn test_signature_constructor_unsupported() {
    let output = run_hrabi(&["signature", "constructor(address owner)"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_signature_invalid_declaration() {
    let output = run_hrabi(&["signature", "function foo(uint a"]);
    assert_eq!(output.status.code(), Some(1));
}

// ── Parse ─────────────────────────────────────────────────

#[test]
fn test_parse_default_json() {
    let output = run_hrabi(&["parse", "event Event(uint indexed a, bytes32 b)"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("should be valid JSON");
    assert_eq!(json["type"], "event");
    assert_eq!(json["anonymous"], false);
    assert_eq!(json["inputs"][0]["type"], "uint256");
    assert_eq!(json["inputs"][0]["indexed"], true);
    assert_eq!(json["inputs"][1]["indexed"], false);
}

#[test]
fn test_parse_modes() {
    let decl = "function foo(uint a) view returns (bool)";
    for (mode, expected) in [
        ("sighash", "foo(uint256)"),
        ("minimal", "function foo(uint256) view returns (bool)"),
        ("full", "function foo(uint256 a) view returns (bool)"),
    ] {
        let output = run_hrabi(&["parse", "--mode", mode, decl]);
        assert!(output.status.success(), "mode {}", mode);
        assert_eq!(stdout_lines(&output), vec![expected]);
    }
}

#[test]
fn test_parse_unknown_modifier_logs_warning() {
    let output = run_hrabi(&["parse", "--mode", "full", "function foo() nonreentrant"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown modifier: nonreentrant"));
}

#[test]
fn test_quiet_suppresses_warnings() {
    let output = run_hrabi(&["--quiet", "parse", "function foo() nonreentrant"]);
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
}

// ── Fixture sweep ─────────────────────────────────────────

#[test]
fn test_all_valid_fixtures_check() {
    let valid_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../tests/fixtures/valid");

    for entry in std::fs::read_dir(&valid_dir).expect("read dir") {
        let path = entry.expect("entry").path();
        let output = run_hrabi(&["check", path.to_str().unwrap()]);
        assert!(
            output.status.success(),
            "fixture {:?} should check",
            path.file_name()
        );
    }
}

#[test]
fn test_all_invalid_fixtures_fail() {
    let invalid_dir =
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../tests/fixtures/invalid");

    for entry in std::fs::read_dir(&invalid_dir).expect("read dir") {
        let path = entry.expect("entry").path();
        let output = run_hrabi(&["check", path.to_str().unwrap()]);
        assert_eq!(
            output.status.code(),
            Some(1),
            "fixture {:?} should fail",
            path.file_name()
        );
    }
}

// ── Determinism: CLI output ───────────────────────────────

#[test]
fn test_cli_format_json_determinism() {
    let path = fixture_valid("erc20.json").to_str().unwrap().to_string();

    let first = run_hrabi(&["format", "--mode", "json", &path]);
    for i in 0..20 {
        let output = run_hrabi(&["format", "--mode", "json", &path]);
        assert_eq!(
            first.stdout, output.stdout,
            "format --mode json determinism failure at iteration {}",
            i
        );
    }
}
