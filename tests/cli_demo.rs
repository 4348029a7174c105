//! CLI integration tests for the demo, bench, and stress modes.

use std::process::Command;

fn kitchen() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_kitchen_orders"));
    // Keep per-order debug logs out of test output.
    command.env("RUST_LOG", "warn");
    command
}

fn summary_value<'a>(stdout: &'a str, key: &str) -> &'a str {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix(key))
        .unwrap_or_else(|| panic!("{key} line missing"))
        .trim()
}

#[test]
fn demo_cli_handles_every_expected_order() {
    // Run the demo binary with default settings.
    let output = kitchen().output().expect("failed to run demo binary");

    assert!(
        output.status.success(),
        "demo exited with non-zero status: {:?}",
        output.status
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Restaurant is open!"));
    assert!(stdout.contains("Restaurant is closed!"));
    assert!(stdout.contains("DEMO SUMMARY"), "demo summary missing from output");

    // 90 customers placing 3 orders each.
    assert_eq!(summary_value(&stdout, "orders_expected="), "270");
    assert_eq!(summary_value(&stdout, "orders_handled="), "270");
    assert_eq!(summary_value(&stdout, "leftover_orders="), "0");
    assert_eq!(summary_value(&stdout, "accounting_ok="), "true");

    let peak: usize = summary_value(&stdout, "peak_pending=")
        .parse()
        .expect("peak_pending is a number");
    assert!(peak <= 100);

    let cook_lines = stdout
        .lines()
        .filter(|line| line.starts_with("Cook #"))
        .count();
    assert_eq!(cook_lines, 10);
}

#[test]
fn bench_cli_prints_header_and_row() {
    let output = kitchen()
        .args([
            "bench",
            "--customers",
            "3",
            "--orders-per-customer",
            "4",
            "--cooks",
            "2",
            "--capacity",
            "2",
            "--work-ms",
            "0",
            "--validate",
        ])
        .output()
        .expect("failed to run bench");
    assert!(output.status.success(), "bench failed: {:?}", output.status);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("customers,orders_per_customer,cooks,capacity"));
    assert!(lines[1].starts_with("3,4,2,2,12,"));
    assert!(lines[1].ends_with(",true,false"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("# violation"));
}

#[test]
fn stress_cli_prints_one_row_per_combination() {
    let output = kitchen()
        .args([
            "stress",
            "--customers",
            "1,2",
            "--orders-per-customer",
            "2",
            "--cooks",
            "1,3",
            "--capacity",
            "1",
            "--work-ms",
            "0",
        ])
        .output()
        .expect("failed to run stress");
    assert!(output.status.success(), "stress failed: {:?}", output.status);

    let stdout = String::from_utf8_lossy(&output.stdout);
    // Header plus 2 * 1 * 2 * 1 rows.
    assert_eq!(stdout.lines().count(), 5);
}

#[test]
fn zero_cooks_is_a_usage_error() {
    let output = kitchen()
        .args(["bench", "--cooks", "0"])
        .output()
        .expect("failed to run bench");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cooks must be > 0"));
}
