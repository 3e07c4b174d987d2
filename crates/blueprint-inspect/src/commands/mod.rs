//! Subcommand implementations
//!
//! Each command reads its inputs, runs the analysis and writes JSON to
//! stdout. Logs go to stderr.

use std::path::Path;

use anyhow::{Context, Result};
use blueprint_lsp_core::{AnalysisConfig, Document};
use serde::Serialize;

pub mod context;
pub mod outline;

pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = AnalysisConfig::from_json(&text)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    tracing::debug!(config = ?config, "loaded analysis config");
    Ok(config)
}

/// The document at `path`, with its format taken from the extension.
pub fn read_document(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Document::new(path.to_string_lossy(), content))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
