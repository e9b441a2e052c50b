use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use std::fs;
use tempfile::TempDir;

const BIN_NAME: &str = "balances";

const PAYLOAD: &str = r#"{
    "periodicity": "MONTHLY",
    "accountBalances": [
        {"name": "Income", "credit": true, "permanent": false,
         "cumulativeBalance": "500.00", "periodBalance": "200.00",
         "balances": [
            {"year": 2023, "month": 1, "day": 0, "fuzzyDate": 20230100,
             "periodBalance": "300.00", "cumulativeBalance": "300.00"},
            {"year": 2023, "month": 2, "day": 0, "fuzzyDate": 20230200,
             "periodBalance": "200.00", "cumulativeBalance": "500.00"}
         ]}
    ],
    "groupBalances": [
        {"name": "Expenses", "credit": false, "permanent": false,
         "cumulativeBalance": "300.00",
         "balances": [
            {"year": 2023, "month": 1, "day": 0, "fuzzyDate": 20230100,
             "periodBalance": "300.00", "cumulativeBalance": "300.00"}
         ],
         "accountBalances": [
            {"name": "Food", "credit": false, "permanent": false,
             "cumulativeBalance": "300.00", "properties": {"code": "4.1"},
             "balances": [
                {"year": 2023, "month": 1, "day": 0, "fuzzyDate": 20230100,
                 "periodBalance": "300.00", "cumulativeBalance": "300.00"}
             ]}
         ]}
    ]
}"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("balances.json"), PAYLOAD).expect("write payload");
        Self { dir }
    }

    fn payload(&self) -> String {
        self.dir.path().join("balances.json").display().to_string()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
        cmd.env("BALANCES_CONFIG_DIR", self.dir.path().join("config"));
        cmd
    }
}

#[test]
fn cli_help_lists_commands() {
    let fixture = Fixture::new();
    fixture
        .command()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("table").and(contains("lookup")).and(contains("summary")));
}

#[test]
fn cli_total_table_as_csv() {
    let fixture = Fixture::new();
    fixture
        .command()
        .args(["table", &fixture.payload(), "--format", "csv"])
        .assert()
        .success()
        .stdout("Expenses,-300\nIncome,500\n");
}

#[test]
fn cli_total_table_formatted_values() {
    let fixture = Fixture::new();
    fixture
        .command()
        .args(["table", &fixture.payload(), "--format-values", "--expand-all-accounts"])
        .assert()
        .success()
        .stdout(contains("Food").and(contains("-300.00")).and(contains("500.00")));
}

#[test]
fn cli_cumulative_table_as_json() {
    let fixture = Fixture::new();
    let output = fixture
        .command()
        .args([
            "table",
            &fixture.payload(),
            "--type",
            "cumulative",
            "--format",
            "json",
        ])
        .output()
        .expect("run balances");
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(rows[0][1], "Income");
    assert_eq!(rows[0][2], "Expenses");
    assert_eq!(rows[1][0], "2023-01-31");
    assert_eq!(rows[2][0], "2023-02-28");
    assert_eq!(rows[2][1], 500.0);
    // forward-filled from January
    assert_eq!(rows[2][2], -300.0);
}

#[test]
fn cli_table_single_group_to_file() {
    let fixture = Fixture::new();
    let out = fixture.dir.path().join("out.csv");
    fixture
        .command()
        .args([
            "table",
            &fixture.payload(),
            "--group",
            "food",
            "--properties",
            "--format",
            "csv",
            "--output",
            &out.display().to_string(),
        ])
        .assert()
        .success()
        .stdout(contains("Wrote 1 rows"));
    let written = fs::read_to_string(out).expect("read output");
    assert_eq!(written, "Food,-300,4.1\n");
}

#[test]
fn cli_lookup_inside_group() {
    let fixture = Fixture::new();
    fixture
        .command()
        .args(["lookup", &fixture.payload(), "FOOD", "--in", "Expenses"])
        .assert()
        .success()
        .stdout(contains("Account: Food").and(contains("Parent:     Expenses")));
}

#[test]
fn cli_lookup_missing_container_fails() {
    let fixture = Fixture::new();
    fixture
        .command()
        .args(["lookup", &fixture.payload(), "Rent", "--in", "Expenses"])
        .assert()
        .failure()
        .stderr(contains("Balances container not found: Rent in group Expenses"));
}

#[test]
fn cli_summary_lists_roots() {
    let fixture = Fixture::new();
    fixture
        .command()
        .args(["summary", &fixture.payload()])
        .assert()
        .success()
        .stdout(
            contains("Periodicity: MONTHLY")
                .and(contains("Income"))
                .and(contains("Expenses")),
        );
}

#[test]
fn cli_invalid_balance_type_fails() {
    let fixture = Fixture::new();
    fixture
        .command()
        .args(["table", &fixture.payload(), "--type", "weekly"])
        .assert()
        .failure()
        .stderr(contains("Invalid balance type"));
}
