//! CLI integration tests

use std::process::Command;

const CAPTURE: &str = "\
Linux 6.1.0-13-amd64 (host01) \t08/27/26 \t_x86_64_\t(2 CPU)

17:32:45     CPU    %usr   %nice    %sys %iowait    %irq   %soft  %steal  %guest  %gnice   %idle
17:32:46     all    5.26    0.00    2.11    1.05    0.00    0.11    0.00    0.00    0.00   91.47
17:32:46       0    6.00    0.00    2.00    1.00    0.00    0.00    0.00    0.00    0.00   91.00
17:32:46       1    4.04    0.00    2.02    1.01    0.00    0.20    0.00    0.00    0.00   92.73
";

fn cpuplot(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "-p", "cpuplot-cli", "--quiet", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = cpuplot(&["--help"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(
        stdout.contains("Chart CPU utilization"),
        "Should show app description"
    );
    assert!(stdout.contains("CPU_ID"), "Should show cpu_id argument");
    assert!(stdout.contains("OUTPUT"), "Should show output argument");
    assert!(stdout.contains("--input"), "Should show input option");
    assert!(stdout.contains("--interval"), "Should show interval option");
    assert!(stdout.contains("--count"), "Should show count option");
    assert!(stdout.contains("--keep-raw"), "Should show keep-raw option");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = cpuplot(&["--version"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("cpuplot"), "Should show binary name");
}

/// Test format option values
#[test]
fn test_format_option() {
    let output = cpuplot(&["--help"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("--format"), "Should show format option");
    assert!(stdout.contains("table"), "Should show table format");
    assert!(stdout.contains("json"), "Should show json format");
}

/// Test invalid flag error handling
#[test]
fn test_invalid_flag() {
    let output = cpuplot(&["--no-such-flag"]);

    assert!(!output.status.success(), "Invalid flag should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("unexpected"),
        "Should show error message"
    );
}

/// Test that a missing input file exits non-zero with a message
#[test]
fn test_missing_input_file() {
    let output = cpuplot(&["all", "out.png", "--input", "/no/such/capture.txt"]);

    assert!(!output.status.success(), "Missing input should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("failed to read input file"),
        "Should name the unreadable file, got: {stderr}"
    );
}

/// Test the full parse-and-render path from an existing capture
#[test]
fn test_chart_from_capture() {
    let dir = tempfile::TempDir::new().unwrap();
    let capture = dir.path().join("capture.txt");
    let chart = dir.path().join("chart.svg");
    std::fs::write(&capture, CAPTURE).unwrap();

    let output = cpuplot(&[
        "all",
        chart.to_str().unwrap(),
        "--input",
        capture.to_str().unwrap(),
        "--quiet",
    ]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "Chart run should succeed: {stderr}");

    let svg = std::fs::read_to_string(&chart).unwrap();
    assert!(svg.contains("<svg"), "Should write an SVG chart");
    assert!(svg.contains("%iowait"), "Legend should name the metrics");
}

/// Test that an absent CPU id still renders and warns instead of failing
#[test]
fn test_absent_cpu_id_warns() {
    let dir = tempfile::TempDir::new().unwrap();
    let capture = dir.path().join("capture.txt");
    let chart = dir.path().join("chart.svg");
    std::fs::write(&capture, CAPTURE).unwrap();

    let output = cpuplot(&[
        "31",
        chart.to_str().unwrap(),
        "--input",
        capture.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "Absent CPU id is not an error");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("never appeared"),
        "Should warn about the empty series, got: {stdout}"
    );
    assert!(chart.exists(), "Empty chart should still be written");
}

/// Test that a capture without a header exits non-zero
#[test]
fn test_missing_header_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let capture = dir.path().join("capture.txt");
    let chart = dir.path().join("chart.svg");
    std::fs::write(&capture, "Linux 6.1.0 (host01)\n\nnothing useful\n").unwrap();

    let output = cpuplot(&[
        "all",
        chart.to_str().unwrap(),
        "--input",
        capture.to_str().unwrap(),
    ]);

    assert!(!output.status.success(), "Missing header should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("header"),
        "Should report the missing header, got: {stderr}"
    );
    assert!(!chart.exists(), "No chart on the failure path");
}
