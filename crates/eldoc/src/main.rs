//! eldoc CLI - documentation site shell for a UI component library.
//!
//! Provides commands for:
//! - `route`: Resolve a URL fragment into a route
//! - `pages`: Print the navigation tree
//! - `render`: Mount the site on a fragment and print the frame
//! - `check`: Report missing translations and page sources

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, CommonArgs, PagesArgs, RenderArgs, RouteArgs};
use output::Output;

/// eldoc - documentation site shell.
#[derive(Parser)]
#[command(name = "eldoc", version, about)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a URL fragment and print the route as JSON.
    Route(RouteArgs),
    /// Print the navigation tree.
    Pages(PagesArgs),
    /// Mount the site on a fragment and print the rendered frame.
    Render(RenderArgs),
    /// Report missing translations and page sources.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.common.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Route(args) => args.execute(&cli.common),
        Commands::Pages(args) => args.execute(&cli.common),
        Commands::Render(args) => args.execute(&cli.common),
        Commands::Check(args) => args.execute(&cli.common),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
