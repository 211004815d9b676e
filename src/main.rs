use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use clap::Parser;
use gistory::cli::Cli;
use gistory::services::SettingsService;
use tracing_subscriber::EnvFilter;

fn init_logging(cli: &Cli) {
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // The TUI owns the terminal, so its logs go to ~/.gistory/gistory.log
    if cli.is_tui() {
        let file = SettingsService::new().ok().and_then(|service| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(service.log_path())
                .ok()
        });
        if let Some(file) = file {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        return;
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    cli.run()
}
