mod cli;
mod commands;
mod config;
mod error;
mod output;
mod raid;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use commands::handle_request;
use config::Config;
use error::Result;
use output::{print_error, write_stdout};
use raid::{SystemRunner, Tool};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::resolve(cli)?;
    init_logging(&config.log);
    debug!(
        vendor = %config.vendor,
        binary = %config.binary,
        request = ?config.request,
        "resolved configuration"
    );

    let runner = SystemRunner;
    let driver = config.vendor.driver(Tool::new(&config.binary, &runner));
    let document = handle_request(driver.as_ref(), &config.request, config.indent)?;
    write_stdout(&document)
}

/// Logs go to stderr; stdout carries only the JSON document.
fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_env("RAIDSTAT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
