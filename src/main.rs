mod commands;
mod config;
mod diagnostics;
mod error;
mod hasher;
mod patterns;
mod report;
mod resolver;
mod rewriter;
mod types;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::RunOptions;
use crate::report::OutputFormat;

/// Append content-hash postfixes to asset references in HTML files.
#[derive(Parser)]
#[command(name = "url-postfix", version, about)]
struct Cli {
    /// Site root for `/`-rooted references and target paths.
    #[arg(short = 'd', long = "base-dir", visible_alias = "base_dir")]
    base_dir: PathBuf,

    /// URL prefix mapped onto the base directory (overrides `.postfix.toml`).
    #[arg(short = 'u', long = "base-url", visible_alias = "base_url")]
    base_url: Option<String>,

    /// Report stale postfixes without writing; exits 1 if any are found.
    #[arg(long)]
    check: bool,

    /// HTML file to rewrite in place, relative to the base directory. Repeatable.
    #[arg(short = 'f', long = "file")]
    files: Vec<PathBuf>,

    /// Summary format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log every reference decision to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // --verbose enables DEBUG, otherwise RUST_LOG decides.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = RunOptions::assemble(&cli.base_dir, cli.base_url, cli.files).and_then(|options| {
        if cli.check {
            return commands::check(&options, cli.format);
        }
        return commands::rewrite(&options, cli.format).map(|()| return ExitCode::SUCCESS);
    });

    return match result {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            // Check mode reserves 1 for "stale".
            if cli.check { ExitCode::from(2) } else { ExitCode::FAILURE }
        },
    };
}
