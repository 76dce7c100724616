use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::workflow::Mode;

#[derive(Parser, Debug)]
#[command(
    name = "apt-check",
    about = "Count pending apt upgrades and security upgrades",
    long_about = "Count pending apt upgrades and security upgrades.\n\n\
        The report is written to stderr and the exit status carries the number of \
        security updates (or all updates with -f). Exit status 255 means the check failed.",
    version,
    disable_help_flag = true
)]
pub struct Cli {
    /// Skip the index refresh and only simulate the upgrade
    #[arg(short = 's', long)]
    pub simulate: bool,

    /// Print nothing when there are no updates
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Human readable output
    #[arg(short = 'h', long)]
    pub human: bool,

    /// Exit with the number of all updates, not only security updates
    #[arg(short = 'f', long)]
    pub fussy: bool,

    /// Empty the package index cache and exit
    #[arg(short = 'c', long)]
    pub cleanup: bool,

    /// Trace each step on stdout
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Path to a TOML config file (defaults to /etc/apt-check.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        Mode {
            simulate: self.simulate,
            quiet: self.quiet,
            human: self.human,
            fussy: self.fussy,
            cleanup: self.cleanup,
        }
    }
}
