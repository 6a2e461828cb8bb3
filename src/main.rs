mod cli;
mod commands;
mod config;
mod detect;
mod error;
mod naming;
mod page_range;
mod pdf;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, DetectArgs};
use config::SplitConfig;
use detect::DetectOptions;
use std::path::Path;
use tracing::Level;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Split {
            input,
            output_dir,
            detect,
        } => {
            let config = SplitConfig::new(&input, &output_dir, detect_options(&detect)?);
            commands::split::run(&config)?;
        }
        Commands::Plan {
            input,
            json,
            detect,
        } => {
            let config = SplitConfig::new(&input, Path::new("output"), detect_options(&detect)?);
            commands::plan::run(&config, json)?;
        }
    }

    Ok(())
}

fn detect_options(args: &DetectArgs) -> Result<DetectOptions> {
    Ok(DetectOptions::new(
        args.max_depth,
        args.heading_pattern.as_deref(),
    )?)
}
