use anyhow::{Context, Result};
use clap::Parser;
use rusty_library_catalog::{
    application::catalog::CatalogStore,
    cli::{self, Cli},
};
use std::fs::OpenOptions;
use std::io;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let args = Cli::parse();

    if let Err(e) = init_tracing(&args) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }

    tracing::debug!(path = %args.file.display(), "Opening catalog");
    let mut store = CatalogStore::open(args.file.clone());

    let stdin = io::stdin();
    match cli::run(&mut store, args.command, stdin.lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Initialize tracing
///
/// Logs go to stderr, or are appended to `--log-file` without colours.
fn init_tracing(args: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "rusty_library_catalog={}",
            args.log_level.to_filter_directive()
        )
        .into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    match &args.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .init();
        }
        None => registry.with(fmt::layer().with_writer(io::stderr)).init(),
    }

    Ok(())
}
