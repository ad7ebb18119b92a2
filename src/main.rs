use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use treemirror::commands::mirror;
use treemirror::config::Cli;
use treemirror::ui::{format_summary, multi_progress, ProgressLogWriter};
use treemirror::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Log lines and progress bars share stderr through one MultiProgress
    let multi = multi_progress(!cli.quiet && !cli.json);

    // RUST_LOG wins over -v/-q
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(ProgressLogWriter::new(multi.clone()))
        .init();

    if let Err(e) = run(cli, multi) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli, multi: indicatif::MultiProgress) -> anyhow::Result<()> {
    let json = cli.json;
    let config = Config::try_from(cli)?;

    let summary = mirror::run_with_progress(&config, multi)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", format_summary(&summary));
    }

    Ok(())
}
