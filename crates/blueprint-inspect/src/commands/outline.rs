//! Outline command

use std::path::Path;

use anyhow::{Context, Result};
use blueprint_lsp_core::{AnalysisConfig, DocumentSnapshot, get_symbols};

use super::{print_json, read_document};

pub fn execute(file: &Path, config: &AnalysisConfig) -> Result<()> {
    let document = read_document(file)?;
    let snapshot = DocumentSnapshot::parse(&document)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    if snapshot.has_errors() {
        tracing::warn!(file = %file.display(), "document has syntax errors; outline is partial");
    }
    print_json(&get_symbols(&snapshot, config))
}
