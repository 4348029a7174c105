//! Demo, benchmark, and stress-test runners for the kitchen.

use crate::config::KitchenConfig;
use crate::error::{ConfigError, RunError};
use crate::kitchen::{KitchenReport, run_kitchen};

const CSV_HEADER: &str = "customers,orders_per_customer,cooks,capacity,total_orders,elapsed_ms,throughput_orders_per_s,cpu_user_s,cpu_sys_s,peak_pending,accounting_ok,duplicate_orders";

/// Best-effort CPU user/system time snapshot (seconds) on Unix platforms.
#[cfg(unix)]
fn cpu_times_seconds() -> Option<(f64, f64)> {
    // SAFETY: rusage is plain old data and getrusage only writes into it.
    let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, &mut usage) };
    if rc != 0 {
        return None;
    }
    let user = usage.ru_utime.tv_sec as f64 + (usage.ru_utime.tv_usec as f64 / 1_000_000.0);
    let sys = usage.ru_stime.tv_sec as f64 + (usage.ru_stime.tv_usec as f64 / 1_000_000.0);
    Some((user, sys))
}

/// Stub on non-Unix platforms.
#[cfg(not(unix))]
fn cpu_times_seconds() -> Option<(f64, f64)> {
    None
}

/// One benchmark row: the run itself plus process CPU time spent on it.
struct BenchResult {
    config: KitchenConfig,
    report: KitchenReport,
    cpu_user_s: Option<f64>,
    cpu_sys_s: Option<f64>,
}

impl BenchResult {
    fn elapsed_ms(&self) -> f64 {
        self.report.elapsed.as_secs_f64() * 1000.0
    }

    fn throughput(&self) -> f64 {
        let secs = self.report.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.report.handled as f64 / secs
        } else {
            0.0
        }
    }

    fn duplicates(&self) -> bool {
        self.report
            .validation
            .map(|validation| validation.duplicates)
            .unwrap_or(false)
    }

    fn csv_row(&self) -> String {
        let cpu_user = self
            .cpu_user_s
            .map(|v| format!("{v:.4}"))
            .unwrap_or_else(|| "NA".to_string());
        let cpu_sys = self
            .cpu_sys_s
            .map(|v| format!("{v:.4}"))
            .unwrap_or_else(|| "NA".to_string());
        format!(
            "{},{},{},{},{},{:.2},{:.2},{},{},{},{},{}",
            self.config.customers,
            self.config.orders_per_customer,
            self.config.cooks,
            self.config.capacity,
            self.report.expected,
            self.elapsed_ms(),
            self.throughput(),
            cpu_user,
            cpu_sys,
            self.report.peak_pending,
            self.report.accounting_ok(),
            self.duplicates()
        )
    }

    /// Print warnings and validation failures to stderr.
    fn report_issues(&self, validate: bool) {
        if self.report.leftover > 0 {
            eprintln!("# warning,leftover_orders,{}", self.report.leftover);
        }
        if self.report.handled != self.report.expected {
            eprintln!(
                "# warning,accounting,expected={},handled={}",
                self.report.expected, self.report.handled
            );
        }
        if !validate {
            return;
        }
        if self.report.peak_pending > self.report.capacity {
            eprintln!("# violation,capacity");
        }
        if let Some(validation) = self.report.validation {
            if validation.duplicates {
                eprintln!("# violation,duplicate_orders");
            }
            if !validation.complete {
                eprintln!("# violation,missing_orders");
            }
        }
    }
}

fn benchmark_once(config: KitchenConfig, validate: bool) -> Result<BenchResult, RunError> {
    let cpu_start = cpu_times_seconds();
    let report = run_kitchen(&config, validate)?;
    let (cpu_user_s, cpu_sys_s) = match (cpu_start, cpu_times_seconds()) {
        (Some((user_start, sys_start)), Some((user_end, sys_end))) => {
            (Some(user_end - user_start), Some(sys_end - sys_start))
        }
        _ => (None, None),
    };
    Ok(BenchResult {
        config,
        report,
        cpu_user_s,
        cpu_sys_s,
    })
}

/// Run the restaurant demo and print a summary.
pub fn run_demo(config: &KitchenConfig) -> Result<KitchenReport, RunError> {
    println!("Restaurant is open!");
    let report = run_kitchen(config, true)?;
    for (cook, fulfilled) in report.per_cook.iter().enumerate() {
        println!("Cook #{cook} fulfilled {fulfilled} orders");
    }
    if !report.accounting_ok() {
        eprintln!(
            "Warning: expected {} orders, but handled {}",
            report.expected, report.handled
        );
    }
    println!("Restaurant is closed!");

    println!("DEMO SUMMARY");
    println!(
        "customers={} cooks={} capacity={}",
        config.customers, config.cooks, config.capacity
    );
    println!("orders_expected={}", report.expected);
    println!("orders_handled={}", report.handled);
    println!("leftover_orders={}", report.leftover);
    println!("peak_pending={}", report.peak_pending);
    println!("orders_per_cook={:?}", report.per_cook);
    println!("accounting_ok={}", report.accounting_ok());
    Ok(report)
}

/// Run a single benchmark and print one CSV row.
pub fn run_benchmark(config: KitchenConfig, validate: bool) -> Result<(), RunError> {
    config.validate()?;
    let result = benchmark_once(config, validate)?;
    println!("{CSV_HEADER}");
    println!("{}", result.csv_row());
    result.report_issues(validate);
    Ok(())
}

/// Parameter sets swept by [`run_stress`].
#[derive(Clone, Debug)]
pub struct StressSets {
    pub customers: Vec<usize>,
    pub orders_per_customer: Vec<usize>,
    pub cooks: Vec<usize>,
    pub capacities: Vec<usize>,
    pub work_ms: u64,
    pub seed: Option<u64>,
}

impl StressSets {
    fn validate(&self) -> Result<(), ConfigError> {
        let sets: [(&'static str, &[usize]); 4] = [
            ("customers", &self.customers),
            ("orders_per_customer", &self.orders_per_customer),
            ("cooks", &self.cooks),
            ("capacity", &self.capacities),
        ];
        for (name, values) in sets {
            if values.is_empty() {
                return Err(ConfigError::EmptySet(name));
            }
            if values.contains(&0) {
                return Err(ConfigError::Zero(name));
            }
        }
        Ok(())
    }

    fn configs(&self) -> Vec<KitchenConfig> {
        let mut configs = Vec::new();
        for &customers in &self.customers {
            for &orders_per_customer in &self.orders_per_customer {
                for &cooks in &self.cooks {
                    for &capacity in &self.capacities {
                        configs.push(KitchenConfig {
                            capacity,
                            customers,
                            cooks,
                            orders_per_customer,
                            work_ms: self.work_ms,
                            seed: self.seed,
                        });
                    }
                }
            }
        }
        configs
    }
}

/// Sweep every combination of the given sets and print CSV output.
pub fn run_stress(sets: &StressSets, validate: bool) -> Result<(), RunError> {
    sets.validate()?;
    println!("{CSV_HEADER}");
    for config in sets.configs() {
        let result = benchmark_once(config, validate)?;
        println!("{}", result.csv_row());
        result.report_issues(validate);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets() -> StressSets {
        StressSets {
            customers: vec![1, 2],
            orders_per_customer: vec![3],
            cooks: vec![1, 2],
            capacities: vec![1, 4],
            work_ms: 0,
            seed: Some(5),
        }
    }

    #[test]
    fn stress_sweeps_every_combination() {
        let configs = sets().configs();
        assert_eq!(configs.len(), 8);
        assert!(configs.iter().all(|c| c.validate().is_ok()));
    }

    #[test]
    fn stress_rejects_empty_or_zero_sets() {
        let mut bad = sets();
        bad.cooks.clear();
        assert_eq!(bad.validate(), Err(ConfigError::EmptySet("cooks")));

        let mut bad = sets();
        bad.capacities.push(0);
        assert_eq!(bad.validate(), Err(ConfigError::Zero("capacity")));
    }

    #[test]
    fn bench_row_has_one_value_per_column() {
        let config = KitchenConfig {
            capacity: 2,
            customers: 2,
            cooks: 2,
            orders_per_customer: 2,
            work_ms: 0,
            seed: Some(1),
        };
        let result = benchmark_once(config, true).expect("benchmark run");
        let row = result.csv_row();
        assert_eq!(row.split(',').count(), CSV_HEADER.split(',').count());
        assert!(row.starts_with("2,2,2,2,4,"));
        assert!(!result.duplicates());
    }
}
