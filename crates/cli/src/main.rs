//! Facade Shop CLI - Catalog and pricing tools.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog, optionally one category
//! fs-cli catalog list
//! fs-cli catalog list --category kitchen
//!
//! # Export the catalog for a price list or a spreadsheet import
//! fs-cli catalog export --format yaml > catalog.yaml
//!
//! # Price two 400×600 mm doors of facade #1
//! fs-cli quote --facade 1 --width 400 --height 600 --quantity 2
//!
//! # Show the standard size presets
//! fs-cli presets
//! ```
//!
//! Command output goes to stdout; diagnostics go to stderr through `tracing`
//! (`RUST_LOG=debug` for more detail).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use clap::{Parser, Subcommand};

use facade_shop_core::Catalog;

mod commands;

use commands::{CliError, ExportFormat};

#[derive(Parser)]
#[command(name = "fs-cli")]
#[command(author, version, about = "Facade Shop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and export the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Price a facade cut to size
    Quote {
        /// Facade ID
        #[arg(short, long)]
        facade: i32,

        /// Width in millimetres
        #[arg(short, long)]
        width: u32,

        /// Height in millimetres
        #[arg(short = 'H', long)]
        height: u32,

        /// Number of facades
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// List the standard size presets
    Presets,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Print a table of facades
    List {
        /// Only facades in this category (slug)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Dump categories and facades
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "facade_shop_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let catalog = Catalog::seed();

    let output = match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { category } => {
                commands::catalog::list(&catalog, category.as_deref())?
            }
            CatalogAction::Export { format } => commands::catalog::export(&catalog, format)?,
        },
        Commands::Quote {
            facade,
            width,
            height,
            quantity,
        } => commands::quote::quote(&catalog, facade, width, height, quantity)?.to_string(),
        Commands::Presets => commands::presets::list(),
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end())?;
    Ok(())
}
