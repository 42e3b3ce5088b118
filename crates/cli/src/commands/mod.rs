//! Command implementations.
//!
//! Each command builds its output as a `String` so it can be tested without
//! capturing stdout.

pub mod catalog;
pub mod presets;
pub mod quote;

use thiserror::Error;

use facade_shop_core::{FacadeId, PricingError};

/// Errors surfaced to the command line.
#[derive(Debug, Error)]
pub enum CliError {
    /// No category with this slug.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// No facade with this ID.
    #[error("Facade {0} not found")]
    FacadeNotFound(FacadeId),

    /// Size or quantity rejected by the price calculation.
    #[error("Cannot price this order: {0}")]
    Pricing(#[from] PricingError),

    /// JSON serialization failed.
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization failed.
    #[error("YAML export failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Writing to stdout failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Catalog export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Json,
    Yaml,
}
