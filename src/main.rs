mod cli;
mod constants;
mod converge;
mod entity;
mod errors;
mod host;
mod linux;
mod manifest;
mod run;
mod sanity;
mod utils;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::constants::defaults;

fn main() {
    let args = cli::Cli::parse();
    init_tracing(args.verbose);

    if let Err(err) = run::run(args) {
        eprintln!("{}", format!("lvg-rs error: {err}").red());
        std::process::exit(1);
    }
}

// RUST_LOG takes precedence over -v
fn init_tracing(verbose: bool) {
    let default_filter = match verbose {
        true => defaults::LOG_FILTER_VERBOSE,
        false => defaults::LOG_FILTER,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
