//! Rule Trainer - Main Entry Point

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use rule_sink::{to_json, FileSink};
use sample_source::AdafruitSource;
use trainer::{init_logging, train, Cli, TrainerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = TrainerConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    init_logging(config.logging.json);
    info!("=== Rule Trainer v{} ===", env!("CARGO_PKG_VERSION"));

    let source = AdafruitSource::new(config.source.connection(), config.source.credentials())?;
    let document = train(&source, &config, Utc::now()).await?;

    if cli.dry_run {
        println!("{}", to_json(&document)?);
    } else {
        FileSink::new(&config.output.path).write(&document)?;
    }

    Ok(())
}
