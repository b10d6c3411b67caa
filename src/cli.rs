//! Command-line interface for draw_number.

use std::path::PathBuf;

use clap::Parser;

use crate::config_file::DEFAULT_CONFIG_FILE;

/// Default name of the output file, resolved against the home directory.
pub const DEFAULT_OUTPUT_FILE: &str = "Output.txt";

/// Draw Number - guess the secret number before your attempts run out
#[derive(Parser, Debug)]
#[command(name = "draw_number")]
#[command(about = "Number-guessing game with console and file views", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file with `minimum`, `maximum` and `attempts` lines
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// File the output view appends to (defaults to ~/Output.txt)
    #[arg(short, long, conflicts_with = "no_output")]
    pub output: Option<PathBuf>,

    /// Do not write game events to a file
    #[arg(long)]
    pub no_output: bool,

    /// Also echo game events to standard output
    #[arg(long)]
    pub echo: bool,

    /// File receiving tracing output
    #[arg(long, default_value = "draw_number.log")]
    pub log_file: PathBuf,
}
