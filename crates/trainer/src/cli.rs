//! Command Line Interface

use crate::settings::TrainerConfig;
use clap::Parser;
use std::path::PathBuf;

/// Derive anomaly rules from recent sensor history and write them for the arbiter
#[derive(Debug, Parser)]
#[command(name = "rule-trainer", version)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, env = "RULE_TRAINER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output path, overrides output.path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Samples fetched per feed, overrides source.limit
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Print the rule document instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut TrainerConfig) {
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(limit) = self.limit {
            config.source.limit = limit;
        }
    }
}
