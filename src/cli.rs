use clap::{ArgAction, Args, Parser, Subcommand};

use kitchen_orders::config::{
    DEFAULT_CAPACITY, DEFAULT_COOKS, DEFAULT_CUSTOMERS, DEFAULT_ORDERS_PER_CUSTOMER, KitchenConfig,
};
use kitchen_orders::sim::StressSets;

#[derive(Args, Clone, Debug, Default)]
pub struct DemoArgs {
    #[arg(long, value_name = "SEED", help = "Seed for menu selection")]
    pub seed: Option<u64>,
}

#[derive(Args, Clone, Debug)]
pub struct BenchArgs {
    #[arg(long, value_name = "N", default_value_t = 4)]
    pub customers: usize,

    #[arg(long, value_name = "N", default_value_t = 25)]
    pub orders_per_customer: usize,

    #[arg(long, value_name = "N", default_value_t = 4)]
    pub cooks: usize,

    #[arg(long, value_name = "N", default_value_t = 8)]
    pub capacity: usize,

    #[arg(long, value_name = "MS", default_value_t = 1, help = "Cooking time per order")]
    pub work_ms: u64,

    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    #[arg(long, action = ArgAction::SetTrue, help = "Enable extra safety checks")]
    pub validate: bool,
}

impl BenchArgs {
    pub fn config(&self) -> KitchenConfig {
        KitchenConfig {
            capacity: self.capacity,
            customers: self.customers,
            cooks: self.cooks,
            orders_per_customer: self.orders_per_customer,
            work_ms: self.work_ms,
            seed: self.seed,
        }
    }
}

#[derive(Args, Clone, Debug)]
pub struct StressArgs {
    #[arg(long, value_name = "SET", value_delimiter = ',', default_values_t = [1usize, 4, 16])]
    pub customers: Vec<usize>,

    #[arg(long, value_name = "SET", value_delimiter = ',', default_values_t = [3usize, 10])]
    pub orders_per_customer: Vec<usize>,

    #[arg(long, value_name = "SET", value_delimiter = ',', default_values_t = [1usize, 4])]
    pub cooks: Vec<usize>,

    #[arg(long, value_name = "SET", value_delimiter = ',', default_values_t = [1usize, 8, 64])]
    pub capacity: Vec<usize>,

    #[arg(long, value_name = "MS", default_value_t = 1)]
    pub work_ms: u64,

    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    #[arg(long, action = ArgAction::SetTrue)]
    pub validate: bool,
}

impl StressArgs {
    pub fn sets(&self) -> StressSets {
        StressSets {
            customers: self.customers.clone(),
            orders_per_customer: self.orders_per_customer.clone(),
            cooks: self.cooks.clone(),
            capacities: self.capacity.clone(),
            work_ms: self.work_ms,
            seed: self.seed,
        }
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    #[command(about = "Run the restaurant demo (default)")]
    Demo(DemoArgs),

    #[command(about = "Run one configuration and print a CSV row")]
    Bench(BenchArgs),

    #[command(about = "Sweep comma-separated parameter sets and print CSV rows")]
    Stress(StressArgs),
}

#[derive(Parser, Debug)]
#[command(name = "kitchen_orders", version, about = "Bounded order queue shared by customers and cooks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

pub fn demo_config(args: &DemoArgs) -> KitchenConfig {
    KitchenConfig {
        capacity: DEFAULT_CAPACITY,
        customers: DEFAULT_CUSTOMERS,
        cooks: DEFAULT_COOKS,
        orders_per_customer: DEFAULT_ORDERS_PER_CUSTOMER,
        work_ms: 0,
        seed: args.seed,
    }
}
