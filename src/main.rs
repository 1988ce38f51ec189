use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use tagversion::cli::Cli;
use tagversion::config::Config;
use tagversion::{ExtractError, GitCli};

fn setup_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tagversion")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("tagversion.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_ref(), &cli.repo).context("Failed to load configuration")?;
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }

    let output = config.output_in(&cli.repo);
    let mut stdout = io::stdout().lock();

    if cli.check {
        tagversion::check(&output, &mut stdout)?;
        return Ok(());
    }

    info!("Reading tags from {} with '{}'", cli.repo.display(), config.git);
    let git = GitCli::new(&config.git, &cli.repo);
    tagversion::extract_and_write(&git, &output, &mut stdout)?;

    Ok(())
}

fn exit_code(report: &eyre::Report) -> u8 {
    report
        .downcast_ref::<ExtractError>()
        .map(ExtractError::exit_code)
        .unwrap_or(1)
}

fn main() -> ExitCode {
    if let Err(e) = setup_logging() {
        let _ = env_logger::Builder::from_default_env().try_init();
        log::warn!("Falling back to stderr logging: {:#}", e);
    }

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            let message = report
                .chain()
                .map(|cause| cause.to_string())
                .collect::<Vec<_>>()
                .join(": ");
            log::error!("{}", message);
            eprintln!("{} {}", "error:".red().bold(), message);
            ExitCode::from(exit_code(&report))
        }
    }
}
