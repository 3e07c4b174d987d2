//! Documents, parsed snapshots and the open-document store.

use std::collections::HashMap;
use std::sync::Arc;

use blueprint_ast::{DocumentFormat, PositionIndex, UnifiedTree, parse_document};
use blueprint_schema::TreeNode;
use blueprint_source_map::{Position, line_count};

use crate::config::AnalysisConfig;
use crate::context::NodeContext;
use crate::error::{CoreError, CoreResult};

/// A blueprint document as the editor sees it.
#[derive(Debug, Clone)]
pub struct Document {
    uri: String,
    content: String,
    version: Option<i32>,
    format: DocumentFormat,
}

impl Document {
    /// The format is picked from the URI's extension.
    pub fn new(uri: impl Into<String>, content: impl Into<String>) -> Self {
        let uri = uri.into();
        Self {
            format: DocumentFormat::from_uri(&uri),
            uri,
            content: content.into(),
            version: None,
        }
    }

    pub fn with_version(uri: impl Into<String>, content: impl Into<String>, version: i32) -> Self {
        let mut document = Self::new(uri, content);
        document.version = Some(version);
        document
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn version(&self) -> Option<i32> {
        self.version
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    /// Last component of the URI, for display.
    pub fn filename(&self) -> &str {
        self.uri.rsplit(['/', '\\']).next().unwrap_or(&self.uri)
    }

    pub fn set_content_with_version(&mut self, content: impl Into<String>, version: i32) {
        self.content = content.into();
        self.version = Some(version);
    }
}

/// One parse of a document, immutable once built.
#[derive(Debug)]
pub struct DocumentSnapshot {
    uri: String,
    version: Option<i32>,
    format: DocumentFormat,
    content: String,
    total_lines: u32,
    index: PositionIndex,
}

impl DocumentSnapshot {
    pub fn parse(document: &Document) -> CoreResult<Self> {
        let tree = parse_document(document.content(), document.format())?;
        tracing::debug!(
            uri = document.uri(),
            version = ?document.version(),
            error_regions = tree.error_count(),
            "parsed document snapshot"
        );
        Ok(Self {
            uri: document.uri().to_string(),
            version: document.version(),
            format: document.format(),
            content: document.content().to_string(),
            total_lines: line_count(document.content()),
            index: PositionIndex::build(Arc::new(tree)),
        })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn version(&self) -> Option<i32> {
        self.version
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn total_lines(&self) -> u32 {
        self.total_lines
    }

    pub fn index(&self) -> &PositionIndex {
        &self.index
    }

    pub fn tree(&self) -> &UnifiedTree {
        self.index.tree()
    }

    pub fn has_errors(&self) -> bool {
        self.tree().has_errors()
    }

    /// Whether `position` lands on a node below the document root.
    pub fn resolves(&self, position: Position, config: &AnalysisConfig) -> bool {
        self.node_context(position, None, config)
            .node
            .is_some_and(|node| !node.is_root())
    }

    /// Context for `position` against this snapshot's own content.
    pub fn node_context<'a>(
        &'a self,
        position: Position,
        semantic: Option<&'a TreeNode>,
        config: &AnalysisConfig,
    ) -> NodeContext<'a> {
        NodeContext::build(
            &self.index,
            &self.content,
            position,
            self.format,
            semantic,
            config,
        )
    }
}

/// The snapshot to answer a query with.
#[derive(Debug, Clone)]
pub struct QuerySnapshot {
    pub snapshot: Arc<DocumentSnapshot>,
    /// The document's current text, which may be newer than the snapshot.
    pub content: String,
    /// Set when `snapshot` is an older, error-free parse.
    pub stale: bool,
}

impl QuerySnapshot {
    /// Context whose tree fields come from the snapshot and whose text
    /// fields come from the current content.
    pub fn node_context<'a>(
        &'a self,
        position: Position,
        semantic: Option<&'a TreeNode>,
        config: &AnalysisConfig,
    ) -> NodeContext<'a> {
        NodeContext::build(
            self.snapshot.index(),
            &self.content,
            position,
            self.snapshot.format(),
            semantic,
            config,
        )
        .with_stale(self.stale)
    }
}

#[derive(Debug)]
struct StoredDocument {
    document: Document,
    current: Option<Arc<DocumentSnapshot>>,
    last_good: Option<Arc<DocumentSnapshot>>,
}

impl StoredDocument {
    fn refresh(&mut self) {
        match DocumentSnapshot::parse(&self.document) {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                if !snapshot.has_errors() {
                    self.last_good = Some(Arc::clone(&snapshot));
                }
                self.current = Some(snapshot);
            }
            Err(err) => {
                tracing::warn!(uri = self.document.uri(), error = %err, "failed to parse document");
                self.current = None;
            }
        }
    }
}

/// Open documents keyed by URI.
///
/// Every open or change reparses the document. The last parse without
/// error regions is kept so queries can fall back to it.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: HashMap<String, StoredDocument>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open or replace a document.
    pub fn open(&mut self, uri: impl Into<String>, content: impl Into<String>, version: i32) {
        let uri = uri.into();
        let mut stored = StoredDocument {
            document: Document::with_version(uri.clone(), content, version),
            current: None,
            last_good: None,
        };
        stored.refresh();
        self.documents.insert(uri, stored);
    }

    pub fn change(
        &mut self,
        uri: &str,
        content: impl Into<String>,
        version: i32,
    ) -> CoreResult<()> {
        let stored = self
            .documents
            .get_mut(uri)
            .ok_or_else(|| CoreError::UnknownDocument {
                uri: uri.to_string(),
            })?;
        stored.document.set_content_with_version(content, version);
        stored.refresh();
        Ok(())
    }

    pub fn close(&mut self, uri: &str) {
        self.documents.remove(uri);
    }

    pub fn get(&self, uri: &str) -> Option<&Document> {
        self.documents.get(uri).map(|stored| &stored.document)
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.documents.contains_key(uri)
    }

    pub fn uris(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The snapshot of the current content, errors or not.
    pub fn snapshot(&self, uri: &str) -> Option<Arc<DocumentSnapshot>> {
        self.documents.get(uri)?.current.clone()
    }

    /// The snapshot a query at `position` should use.
    ///
    /// The current parse answers whenever it is error-free or, despite its
    /// error regions, places `position` on a node below the root. Otherwise
    /// the last good parse is returned marked stale, or the current parse
    /// when there has never been a good one.
    pub fn query(
        &self,
        uri: &str,
        position: Position,
        config: &AnalysisConfig,
    ) -> Option<QuerySnapshot> {
        let stored = self.documents.get(uri)?;
        let content = stored.document.content().to_string();
        let (snapshot, stale) = match (&stored.current, &stored.last_good) {
            (Some(current), _)
                if !current.has_errors() || current.resolves(position, config) =>
            {
                (Arc::clone(current), false)
            }
            (_, Some(good)) => {
                tracing::debug!(
                    uri,
                    line = position.line,
                    column = position.column,
                    current_version = ?stored.document.version(),
                    stale_version = ?good.version(),
                    "falling back to last good snapshot"
                );
                (Arc::clone(good), true)
            }
            (Some(current), None) => (Arc::clone(current), false),
            (None, None) => return None,
        };
        Some(QuerySnapshot {
            snapshot,
            content,
            stale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::{CompletionContextKind, determine_completion_context};

    #[test]
    fn test_document_format_from_uri() {
        assert_eq!(
            Document::new("file:///a/app.blueprint.yaml", "").format(),
            DocumentFormat::Yaml
        );
        assert_eq!(Document::new("file:///a/app.jsonc", "{}").format(), DocumentFormat::Jsonc);
        assert_eq!(Document::new("file:///a/app.jsonc", "{}").filename(), "app.jsonc");
    }

    #[test]
    fn test_store_lifecycle() {
        let mut store = DocumentStore::new();
        store.open("a.yaml", "version: 1\n", 1);
        assert!(store.contains("a.yaml"));
        assert_eq!(store.len(), 1);

        store.change("a.yaml", "version: 2\n", 2).unwrap();
        assert_eq!(store.get("a.yaml").map(Document::version), Some(Some(2)));

        assert!(matches!(
            store.change("missing.yaml", "", 1),
            Err(CoreError::UnknownDocument { .. })
        ));

        store.close("a.yaml");
        assert!(store.is_empty());
        assert!(
            store
                .query("a.yaml", Position::new(1, 1), &AnalysisConfig::default())
                .is_none()
        );
    }

    const ORDERS_JSONC: &str = "{\n  \"resources\": {\n    \"orders\": {\n      \"type\": \"aws/table\"\n    }\n  }\n}\n";

    #[test]
    fn test_half_typed_jsonc_answers_from_current_parse() {
        let config = AnalysisConfig::default();
        let mut store = DocumentStore::new();
        store.open("a.jsonc", ORDERS_JSONC, 1);

        let edited = "{\n  \"resources\": {\n    \"orders\": {\n      \"type\": \"aws/table\"\n    },\n    \"queue\": {\n      \"type\": \n    }\n  }\n}\n";
        store.change("a.jsonc", edited, 2).unwrap();
        assert!(store.snapshot("a.jsonc").unwrap().has_errors());

        let position = Position::new(7, 15);
        let query = store.query("a.jsonc", position, &config).unwrap();
        assert!(!query.stale);
        assert_eq!(query.snapshot.version(), Some(2));

        let ctx = query.node_context(position, None, &config);
        assert_eq!(ctx.path.to_string(), "/resources/queue/type");
        assert_eq!(
            determine_completion_context(&ctx).kind,
            CompletionContextKind::ResourceType
        );
    }

    #[test]
    fn test_query_falls_back_when_current_parse_has_no_node() {
        let config = AnalysisConfig::default();
        let mut store = DocumentStore::new();
        store.open("a.yaml", "resources:\n  orders:\n    type: aws/table\n\n", 1);
        let fresh = store
            .query("a.yaml", Position::new(3, 12), &config)
            .unwrap();
        assert!(!fresh.stale);

        store
            .change("a.yaml", "resources:\n  orders:\n    type: [aws\n\n", 2)
            .unwrap();
        assert!(store.snapshot("a.yaml").unwrap().has_errors());

        // column 1 of a blank line: only the root covers it
        let position = Position::new(4, 1);
        let query = store.query("a.yaml", position, &config).unwrap();
        assert!(query.stale);
        assert_eq!(query.snapshot.version(), Some(1));
        assert!(query.content.contains("[aws"));
        assert!(query.node_context(position, None, &config).stale);
    }

    #[test]
    fn test_broken_document_without_history_is_not_stale() {
        let mut store = DocumentStore::new();
        store.open("b.yaml", "a: [\n", 1);
        let query = store
            .query("b.yaml", Position::new(2, 1), &AnalysisConfig::default())
            .unwrap();
        assert!(!query.stale);
        assert!(query.snapshot.has_errors());
    }
}
