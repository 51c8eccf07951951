use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

const RATES: &str = r#"{
  "hourly_rate": "50",
  "purser_premium": "300",
  "purser_hourly_rate": "0",
  "international_premium": "0",
  "per_diem_rate": "2",
  "guarantee_hours": "0"
}"#;

fn bidline() -> Command {
    Command::cargo_bin("bidline").unwrap()
}

fn write_inputs(dir: &Path, rows: &str) -> (PathBuf, PathBuf) {
    let input = dir.join("lines.csv");
    std::fs::write(&input, format!("line_number,credit,tafb,crew,category\n{rows}")).unwrap();
    let rates = dir.join("rates.json");
    std::fs::write(&rates, RATES).unwrap();
    (input, rates)
}

#[test]
fn rank_writes_csv_report_in_pay_order() {
    let dir = tempfile::tempdir().unwrap();
    let (input, rates) = write_inputs(dir.path(), "205,70,100,4,purser\n101,80,120,3,general\n");
    let output = dir.path().join("bid.csv");

    bidline()
        .arg("rank")
        .arg(&input)
        .arg(&output)
        .arg("--rates")
        .arg(&rates)
        .assert()
        .success()
        .stdout(predicate::str::contains("top is line 101"));

    let report = std::fs::read_to_string(&output).unwrap();
    let rows: Vec<&str> = report.lines().skip(1).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("1,101,"));
    assert!(rows[0].contains(",4000.00,240.00,4240.00,"));
    assert!(rows[1].starts_with("2,205,"));
    assert!(rows[1].contains(",FMP,3800.00,200.00,4000.00,"));
}

#[test]
fn rank_writes_pdf_report() {
    let dir = tempfile::tempdir().unwrap();
    let (input, rates) = write_inputs(dir.path(), "101,80,120,3,general\n");
    let output = dir.path().join("reports").join("bid.pdf");

    bidline()
        .args(["rank", "--rates"])
        .arg(&rates)
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn rank_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let (input, rates) = write_inputs(
        dir.path(),
        "3,80,100,1,general\n1,80,100,1,general\n2,80,100,2,general\n",
    );
    let first = dir.path().join("a.csv");
    let second = dir.path().join("b.csv");
    for out in [&first, &second] {
        bidline()
            .arg("rank")
            .arg(&input)
            .arg(out)
            .arg("--rates")
            .arg(&rates)
            .assert()
            .success();
    }
    let a = std::fs::read(&first).unwrap();
    assert_eq!(a, std::fs::read(&second).unwrap());
    let text = String::from_utf8(a).unwrap();
    let order: Vec<&str> = text
        .lines()
        .skip(1)
        .map(|l| l.split(',').nth(1).unwrap())
        .collect();
    assert_eq!(order, vec!["1", "2", "3"]);
}

#[test]
fn negative_credit_fails_without_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let (input, rates) = write_inputs(dir.path(), "101,80,120,3,general\n102,-5,120,3,general\n");
    let output = dir.path().join("bid.pdf");

    bidline()
        .arg("rank")
        .arg(&input)
        .arg(&output)
        .arg("--rates")
        .arg(&rates)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid field 'credit' on line 102"));

    assert!(!output.exists());
}

#[test]
fn missing_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("lines.csv");
    let (_, rates) = write_inputs(dir.path(), "");
    std::fs::write(&input, "line_number,credit,crew,category\n101,80,3,general\n").unwrap();
    let output = dir.path().join("bid.html");

    bidline()
        .arg("rank")
        .arg(&input)
        .arg(&output)
        .arg("--rates")
        .arg(&rates)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required column 'tafb'"));

    assert!(!output.exists());
}

#[test]
fn unknown_output_extension_fails_before_reading_input() {
    let dir = tempfile::tempdir().unwrap();
    let (_, rates) = write_inputs(dir.path(), "");
    let output = dir.path().join("bid.docx");

    bidline()
        .arg("rank")
        .arg(dir.path().join("does-not-exist.csv"))
        .arg(&output)
        .arg("--rates")
        .arg(&rates)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported format"));

    assert!(!output.exists());
}

#[test]
fn input_errors_are_reported_before_rates_errors() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("lines.csv");
    std::fs::write(&input, "line_number,credit,crew,category\n101,80,3,general\n").unwrap();

    bidline()
        .arg("show")
        .arg(&input)
        .arg("--rates")
        .arg(dir.path().join("no-such-rates.json"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing required column 'tafb'"));
}

#[test]
fn overflowing_credit_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let (input, rates) = write_inputs(dir.path(), "101,79228162514264337593543950335,120,3,general\n");
    let output = dir.path().join("bid.csv");

    bidline()
        .arg("rank")
        .arg(&input)
        .arg(&output)
        .arg("--rates")
        .arg(&rates)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Invalid field 'credit' on line 101: pay overflows"));

    assert!(!output.exists());
}

#[test]
fn duplicate_line_number_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (input, rates) = write_inputs(dir.path(), "101,80,120,3,general\n101,70,100,4,purser\n");

    bidline()
        .arg("show")
        .arg(&input)
        .arg("--rates")
        .arg(&rates)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("row 3, column 'line_number': duplicate of row 2"));
}

#[cfg(feature = "xlsx")]
#[test]
fn rank_reads_named_worksheet() {
    let dir = tempfile::tempdir().unwrap();
    let (_, rates) = write_inputs(dir.path(), "");
    let input = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/bid_packet.xlsx");
    let output = dir.path().join("bid.csv");

    bidline()
        .arg("rank")
        .arg(&input)
        .arg(&output)
        .arg("--rates")
        .arg(&rates)
        .args(["--sheet", "june", "--time-format", "hhmm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("top is line 7 (FMP)"));

    let report = std::fs::read_to_string(&output).unwrap();
    let rows: Vec<&str> = report.lines().skip(1).collect();
    assert_eq!(rows.len(), 1);
    // 75.5 read as 75h50m
    assert!(rows[0].starts_with("1,7,75.83,90.00,2,FMP,"));
}

#[test]
fn rank_help_describes_guarantee() {
    bidline()
        .args(["rank", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("70 credit-hour monthly guarantee"))
        .stdout(predicate::str::contains("guarantee_hours"));
}

#[test]
fn show_prints_ranked_table() {
    let dir = tempfile::tempdir().unwrap();
    let (input, rates) = write_inputs(dir.path(), "205,70,100,4,purser\n101,80,120,3,general\n");

    bidline()
        .arg("show")
        .arg(&input)
        .arg("--rates")
        .arg(&rates)
        .args(["--top", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$4,240.00"))
        .stdout(predicate::str::contains("1 of 2 lines shown"));
}

#[test]
fn clock_time_format_and_split_crew() {
    let dir = tempfile::tempdir().unwrap();
    let (input, rates) = write_inputs(dir.path(), "7,80.30,100.00,2,general\n");
    let output = dir.path().join("bid.csv");

    bidline()
        .arg("rank")
        .arg(&input)
        .arg(&output)
        .arg("--rates")
        .arg(&rates)
        .args(["--time-format", "hhmm", "--split-crew"])
        .assert()
        .success();

    let report = std::fs::read_to_string(&output).unwrap();
    let rows: Vec<&str> = report.lines().skip(1).collect();
    assert_eq!(rows.len(), 2);
    // 80h30m * 50 + 300 purser premium
    assert!(rows[0].starts_with("1,7,80.50,100.00,2,FMP,4325.00,"));
    assert!(rows[1].starts_with("2,7,80.50,100.00,2,Any FA,4025.00,"));
}

#[test]
fn rates_writes_template() {
    let dir = tempfile::tempdir().unwrap();
    let (_, rates) = write_inputs(dir.path(), "");
    let out = dir.path().join("copy.json");

    bidline()
        .arg("rates")
        .arg("--rates")
        .arg(&rates)
        .arg("--write")
        .arg(&out)
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["purser_premium"], "300");
}
