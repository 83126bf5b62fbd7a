use clap::Parser;
use facadegen::cli::{run_cli, Cli};
use facadegen::logging::{init_logging, LogConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env();
    if cli.verbose {
        log_config = log_config.verbose();
    }
    if let Err(err) = init_logging(&log_config) {
        eprintln!("warning: {err:#}");
    }

    match run_cli(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("❌ {err:#}");
            ExitCode::FAILURE
        }
    }
}
