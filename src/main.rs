mod apt;
mod classifier;
mod cleaner;
mod cli;
mod config;
mod error;
mod exit_policy;
mod log;
mod report;
mod utils;
mod workflow;

use clap::Parser;
use cli::Cli;
use colored::Colorize;
use config::Config;
use exit_policy::FAILURE_STATUS;
use std::io::{self, Write};
use std::process;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // nothing left to report to if the terminal is gone; the status still matters
            let _ = e.print();
            // usage errors must not look like an update count
            let code = if e.use_stderr() { FAILURE_STATUS } else { 0 };
            process::exit(i32::from(code));
        }
    };

    if cli.verbose {
        unsafe {
            std::env::set_var(log::VERBOSE_ENV, "1");
        }
    }

    let result = Config::load(cli.config.as_deref())
        .and_then(|config| workflow::execute(&cli.mode(), &config));

    match result {
        Ok(status) => process::exit(i32::from(status)),
        Err(e) => {
            // eprintln! panics (status 101) when stderr is closed
            let _ = writeln!(io::stderr().lock(), "{} {}", "Error:".red().bold(), e);
            process::exit(i32::from(FAILURE_STATUS));
        }
    }
}
