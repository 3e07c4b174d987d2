//! Context command

use std::path::Path;

use anyhow::{Context, Result};
use blueprint_lsp_core::{
    AnalysisConfig, CompletionPayload, DocumentSnapshot, SyntacticPosition, SyntacticStyle,
    TextContext, determine_completion_context,
};
use blueprint_schema::{ReferenceTarget, SchemaElementKind, TreeNode};
use blueprint_source_map::Position;
use serde::Serialize;

use super::{print_json, read_document};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContextReport<'a> {
    path: String,
    node_kind: Option<String>,
    style: SyntacticStyle,
    position: SyntacticPosition,
    typed_prefix: String,
    text: &'a TextContext,
    completion: CompletionPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    hover: Option<HoverReport>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HoverReport {
    kind: SchemaElementKind,
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<ReferenceTarget>,
}

fn load_semantic_tree(path: &Path) -> Result<TreeNode> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read semantic tree {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid semantic tree {}", path.display()))
}

pub fn execute(
    file: &Path,
    line: u32,
    column: u32,
    semantic_tree: Option<&Path>,
    config: &AnalysisConfig,
) -> Result<()> {
    anyhow::ensure!(line >= 1 && column >= 1, "line and column are 1-based");

    let document = read_document(file)?;
    let snapshot = DocumentSnapshot::parse(&document)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    let semantic = semantic_tree.map(load_semantic_tree).transpose()?;

    let ctx = snapshot.node_context(Position::new(line, column), semantic.as_ref(), config);
    tracing::info!(path = %ctx.path, "resolved cursor");

    let hover = ctx.hover_context().map(|hover| HoverReport {
        kind: hover.kind,
        label: hover.tree_node.label.clone(),
        reference: hover.reference_target(),
    });

    let report = ContextReport {
        path: ctx.path.to_string(),
        node_kind: ctx.node.map(|node| format!("{:?}", node.kind())),
        style: ctx.syntactic_style(),
        position: ctx.syntactic_position(),
        typed_prefix: ctx.typed_prefix(),
        text: &ctx.text,
        completion: determine_completion_context(&ctx).payload(),
        hover,
    };
    print_json(&report)
}
