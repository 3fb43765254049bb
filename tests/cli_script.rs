use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

/// CLI command isolated from any user configuration.
fn tally(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tally_cli").unwrap();
    cmd.env("TALLY_CLI_SCRIPT", "1")
        .env("TALLY_CONFIG", config_dir.path().join("config.json"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_mode_prints_one_line_per_income_query() {
    let dir = TempDir::new().unwrap();
    let input = "\
Earn 2000-01-02 2000-01-02 2
Earn 2000-01-03 2000-01-03 2
Earn 2000-01-04 2000-01-04 2
ComputeIncome 2000-01-02 2000-01-04
PayTax 2000-01-02 2000-01-02 13
ComputeIncome 2000-01-02 2000-01-02
Earn 2000-01-01 2000-01-01 10
Spend 2000-01-01 2000-01-01 4
ComputeIncome 2000-01-01 2000-01-01
";

    tally(&dir)
        .write_stdin(input)
        .assert()
        .success()
        .stdout("6\n1.74\n6\n");
}

#[test]
fn bad_lines_are_reported_on_stderr_and_skipped() {
    let dir = TempDir::new().unwrap();
    let input = "\
Earn 2000-01-01 2000-01-01 five
Ernn 2000-01-01 2000-01-01 5
Earn 2000-01-01 2000-01-01 5
ComputeIncome 2000-01-01 2000-01-01
";

    tally(&dir)
        .write_stdin(input)
        .assert()
        .success()
        .stdout("5\n")
        .stderr(contains("invalid amount `five`"))
        .stderr(contains("Unknown command `Ernn`"))
        .stderr(contains("Suggestion: `Earn`?"));
}

#[test]
fn config_file_sets_precision_and_domain() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{ "domain_start": "2021-03-01", "domain_end": "2021-03-06", "output_precision": 2 }"#,
    )
    .unwrap();

    tally(&dir)
        .write_stdin("Earn 2021-03-01 2021-03-03 10\nComputeIncome 2021-03-01 2021-03-01\nComputeIncome 2000-01-01 2000-01-01\n")
        .assert()
        .success()
        .stdout("3.33\n")
        .stderr(contains("outside the ledger domain"));
}

#[test]
fn broken_config_fails_fast() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), "{ nope").unwrap();

    tally(&dir)
        .write_stdin("ComputeIncome 2000-01-01 2000-01-01\n")
        .assert()
        .failure()
        .stderr(contains("Configuration error"));
}

#[test]
fn help_lists_ledger_verbs() {
    let dir = TempDir::new().unwrap();
    tally(&dir)
        .write_stdin("help\nhelp paytax\n")
        .assert()
        .success()
        .stdout(contains("ComputeIncome"))
        .stdout(contains("Usage: PayTax <from> <to> <percentage>"));
}

#[test]
fn exit_ignores_remaining_input() {
    let dir = TempDir::new().unwrap();
    tally(&dir)
        .write_stdin("Earn 2000-01-01 2000-01-01 1\nexit\nComputeIncome 2000-01-01 2000-01-01\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn out_of_range_tax_is_refused_and_ledger_stays_clean() {
    let dir = TempDir::new().unwrap();
    let input = "\
PayTax 2000-01-01 2000-01-05 1e300
PayTax 2000-01-01 2000-01-05 1e300
ComputeIncome 2000-01-01 2000-01-01
";

    tally(&dir)
        .write_stdin(input)
        .assert()
        .success()
        .stdout("0\n")
        .stderr(contains("tax percentage must lie in [0, 100]"));
}

#[test]
fn accumulated_float_noise_is_trimmed() {
    let dir = TempDir::new().unwrap();
    tally(&dir)
        .write_stdin("Earn 2000-01-01 2000-01-01 0.1\nEarn 2000-01-01 2000-01-01 0.2\nComputeIncome 2000-01-01 2000-01-01\n")
        .assert()
        .success()
        .stdout("0.3\n");
}
