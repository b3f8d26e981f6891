use crate::adapters::OutputFormat;
use crate::config::SettingsOverrides;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "trial-primes")]
#[command(about = "Enumerate odd primes by trial division and report milestones")]
pub struct CliConfig {
    /// Inclusive ceiling on the last candidate tested [default: 9999999]
    #[arg(long)]
    pub upper_bound: Option<u64>,

    /// Report every time the found-count is a multiple of this [default: 100000]
    #[arg(long)]
    pub milestone_interval: Option<u64>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Write milestones to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Milestone output format [default: text]
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Log CPU and memory usage during the run
    #[arg(long)]
    pub monitor: bool,

    /// Print the run summary as JSON to stderr
    #[arg(long)]
    pub summary: bool,

    /// Validate and describe the run without enumerating
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            upper_bound: self.upper_bound,
            milestone_interval: self.milestone_interval,
            output_path: self.output.clone(),
            output_format: self.format,
            // A bare `--monitor` can only switch monitoring on.
            monitor: self.monitor.then_some(true),
        }
    }
}
