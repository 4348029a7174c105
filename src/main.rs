mod cli;

use clap::Parser;

use kitchen_orders::error::RunError;
use kitchen_orders::{logging, sim};

use crate::cli::{Cli, Command, DemoArgs, demo_config};

fn main() {
    logging::init();
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Command::Demo(DemoArgs::default())) {
        Command::Demo(args) => sim::run_demo(&demo_config(&args)).map(|_| ()),
        Command::Bench(args) => sim::run_benchmark(args.config(), args.validate),
        Command::Stress(args) => sim::run_stress(&args.sets(), args.validate),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        let code = match err {
            RunError::Config(_) => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}
