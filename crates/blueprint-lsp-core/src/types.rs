//! Outline types.
//!
//! Symbols are transport-agnostic: they serialize to JSON as-is and carry
//! the LSP numbering in [`SymbolKind`] so a server can convert them without
//! a lookup table. Positions are 1-based, like everything else in this
//! workspace.

use blueprint_ast::ScalarType;
use blueprint_source_map::Range;
use serde::{Deserialize, Serialize};

/// Symbol kinds used by blueprint outlines, numbered as LSP `SymbolKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    File = 1,
    String = 15,
    Number = 16,
    Boolean = 17,
    Array = 18,
    Object = 19,
    Key = 20,
    Null = 21,
}

impl SymbolKind {
    pub fn for_scalar(scalar_type: Option<ScalarType>) -> Self {
        match scalar_type {
            Some(ScalarType::Integer | ScalarType::Float) => Self::Number,
            Some(ScalarType::Boolean) => Self::Boolean,
            Some(ScalarType::Null) => Self::Null,
            Some(ScalarType::String) | None => Self::String,
        }
    }

    /// The LSP wire value.
    pub fn lsp_value(self) -> u32 {
        self as u32
    }
}

/// One entry of the document outline.
///
/// `selection_range` always lies within `range`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub name: String,
    /// Scalar value, when enabled in the analysis settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub kind: SymbolKind,
    pub range: Range,
    pub selection_range: Range,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<Symbol>,
}

impl Symbol {
    pub fn new(
        name: impl Into<String>,
        kind: SymbolKind,
        range: Range,
        selection_range: Range,
    ) -> Self {
        Self {
            name: name.into(),
            detail: None,
            kind,
            range,
            selection_range,
            children: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_child(mut self, child: Symbol) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Symbol>) -> Self {
        self.children.extend(children);
        self
    }

    /// Depth-first walk over this symbol and its descendants.
    pub fn walk(&self) -> Vec<&Symbol> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(symbol) = stack.pop() {
            out.push(symbol);
            stack.extend(symbol.children.iter().rev());
        }
        out
    }
}
