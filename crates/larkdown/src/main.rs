//! larkdown CLI - convert Lark/Feishu documents to Markdown.
//!
//! Provides commands for:
//! - `convert`: Fetch a document from the open platform and convert it
//! - `render`: Convert a saved JSON block dump offline

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConvertArgs, RenderArgs};
use output::Output;

/// larkdown - Lark/Feishu docx to Markdown converter.
#[derive(Parser)]
#[command(name = "larkdown", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a document and convert it to Markdown.
    Convert(ConvertArgs),
    /// Convert a JSON dump of document blocks without network access.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Convert(args) => args.flags.verbose,
        Commands::Render(args) => args.flags.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
