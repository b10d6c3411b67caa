//! Draw Number - interactive number-guessing game.

#![warn(missing_docs)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use draw_number::cli::{Cli, DEFAULT_OUTPUT_FILE};
use draw_number::{ConfigSource, ConsoleView, DrawNumberApp, DrawNumberView, StreamView};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing(&cli.log_file)?;

    info!(?cli, "Starting draw_number");

    let mut views: Vec<Arc<dyn DrawNumberView>> = vec![Arc::new(ConsoleView::stdio("console"))];
    if cli.echo {
        views.push(Arc::new(StreamView::new("stdout", std::io::stdout())));
    }
    if !cli.no_output {
        let path = match cli.output {
            Some(path) => path,
            None => default_output_path()?,
        };
        views.push(Arc::new(StreamView::open(&path)?));
    }

    let app = DrawNumberApp::new(views, &ConfigSource::Path(cli.config));

    tokio::select! {
        () = app.wait_for_quit() => info!("Session ended by the player"),
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            info!("Session interrupted");
        }
    }

    Ok(())
}

/// Log to a file so tracing output never interleaves with the console view.
#[instrument]
fn initialize_tracing(log_file: &Path) -> Result<()> {
    let file = std::fs::File::create(log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// `$HOME/Output.txt`, the output file used when none is given.
fn default_output_path() -> Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .context("Cannot locate the home directory; pass --output")?;
    Ok(PathBuf::from(home).join(DEFAULT_OUTPUT_FILE))
}
