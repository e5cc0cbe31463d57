//! Tree documents.
//!
//! A tree document describes one history snapshot in TOML so it can be fed to
//! the pipeline from a file:
//!
//! ```toml
//! current = "s2"
//!
//! [[node]]
//! id = "root"
//! label = "Start"
//!
//! [[node]]
//! id = "s1"
//! parent = "root"
//! label = "add 5"
//! intent = "edit"
//!
//! [[node]]
//! id = "s2"
//! parent = "s1"
//! label = "add 3"
//! intent = "edit"
//! ```
//!
//! The first node is the root and is the only one without a `parent`. Every
//! parent must be declared before its children, which keeps the document a
//! finite rooted tree without a separate cycle check. `current` names the
//! active node and defaults to the last declared node; `label` defaults to
//! the node id.

use std::{fmt, ops::Range};

use log::{debug, warn};
use serde::Deserialize;
use toml::Spanned;

use provtree_core::{
    identifier::Id,
    tree::{HistoryTree, NodeIndex, TreeError},
};

/// An error found while reading a tree document.
///
/// Carries the byte range of the offending value when one is known, so front
/// ends can point at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentError {
    message: String,
    span: Option<Range<usize>>,
    label: Option<String>,
    help: Option<String>,
}

impl DocumentError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
            label: None,
            help: None,
        }
    }

    /// Attaches the source range the error refers to, with a short label.
    pub fn with_span(mut self, span: Range<usize>, label: impl Into<String>) -> Self {
        self.span = Some(span);
        self.label = Some(label.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte range of the offending value in the document source.
    pub fn span(&self) -> Option<Range<usize>> {
        self.span.clone()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    fn from_toml(err: toml::de::Error) -> Self {
        let message = err.message().trim_end().to_string();
        match err.span() {
            Some(span) => Self::new(message).with_span(span, "invalid document"),
            None => Self::new(message),
        }
    }
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DocumentError {}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    current: Option<Spanned<String>>,
    #[serde(default, rename = "node")]
    nodes: Vec<RawNode>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNode {
    id: Spanned<String>,
    parent: Option<Spanned<String>>,
    label: Option<String>,
    intent: Option<Spanned<String>>,
}

impl RawNode {
    fn id(&self) -> Result<Id, DocumentError> {
        if self.id.get_ref().is_empty() {
            return Err(DocumentError::new("node id must not be empty")
                .with_span(self.id.span(), "empty id"));
        }
        Ok(Id::new(self.id.get_ref()))
    }

    fn label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.id.get_ref().clone())
    }
}

/// A history tree read from a document, with its active node.
#[derive(Debug, Clone)]
pub struct TreeDocument {
    tree: HistoryTree<String>,
    current: NodeIndex,
}

impl TreeDocument {
    /// Reads a tree document.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] if the source is not valid TOML, declares
    /// no nodes, has a root with a parent or a later node without one, names
    /// an undeclared parent or current node, or repeats an id.
    pub fn parse(source: &str) -> Result<Self, DocumentError> {
        let raw: RawDocument = toml::from_str(source).map_err(DocumentError::from_toml)?;

        let mut nodes = raw.nodes.into_iter();
        let Some(root) = nodes.next() else {
            return Err(DocumentError::new("document declares no nodes")
                .with_help("add a `[[node]]` table for the root state"));
        };
        if let Some(parent) = &root.parent {
            return Err(DocumentError::new("the first node must be the root")
                .with_span(parent.span(), "the root has no parent")
                .with_help("move the root node to the top of the document"));
        }
        if root.intent.is_some() {
            warn!(id = root.id.get_ref().as_str(); "Ignoring intent on the root node");
        }

        let mut tree = HistoryTree::new(root.id()?, root.label());
        let mut last = tree.root();

        for node in nodes {
            let id = node.id()?;
            let Some(parent) = &node.parent else {
                return Err(
                    DocumentError::new(format!("node `{id}` has no parent"))
                        .with_span(node.id.span(), "only the first node may omit `parent`"),
                );
            };
            let Some(parent_index) = tree.find(Id::new(parent.get_ref())) else {
                return Err(
                    DocumentError::new(format!("unknown parent `{}`", parent.get_ref()))
                        .with_span(parent.span(), "not declared before this node")
                        .with_help("declare parent nodes before their children"),
                );
            };

            let intent = node.intent.as_ref().map(|intent| intent.get_ref().as_str());
            last = tree
                .add_state(parent_index, id, intent, node.label())
                .map_err(|err| match err {
                    TreeError::DuplicateId(id) => {
                        DocumentError::new(format!("duplicate node id `{id}`"))
                            .with_span(node.id.span(), "already declared")
                    }
                    other => DocumentError::new(other.to_string()),
                })?;
        }

        let current = match raw.current {
            Some(current) => tree.find(Id::new(current.get_ref())).ok_or_else(|| {
                DocumentError::new(format!("unknown current node `{}`", current.get_ref()))
                    .with_span(current.span(), "not a declared node")
            })?,
            None => last,
        };

        debug!(nodes = tree.node_count(), current:% = current; "Tree document read");
        Ok(Self { tree, current })
    }

    pub fn tree(&self) -> &HistoryTree<String> {
        &self.tree
    }

    /// The active node.
    pub fn current(&self) -> NodeIndex {
        self.current
    }

    pub fn into_parts(self) -> (HistoryTree<String>, NodeIndex) {
        (self.tree, self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALCULATOR: &str = r#"
current = "s2"

[[node]]
id = "root"
label = "Start"

[[node]]
id = "s1"
parent = "root"
label = "add 5"
intent = "edit"

[[node]]
id = "s2"
parent = "s1"
label = "add 3"
intent = "edit"

[[node]]
id = "s3"
parent = "root"
intent = "explore"
"#;

    fn parse_err(source: &str) -> DocumentError {
        TreeDocument::parse(source).unwrap_err()
    }

    /// The text the error points at, without surrounding quotes.
    fn spanned_text<'a>(source: &'a str, err: &DocumentError) -> &'a str {
        source[err.span().unwrap()].trim_matches('"')
    }

    #[test]
    fn test_parse_document() {
        let document = TreeDocument::parse(CALCULATOR).unwrap();
        let tree = document.tree();

        assert_eq!(tree.node_count(), 4);
        let s2 = tree.find(Id::new("s2")).unwrap();
        assert_eq!(document.current(), s2);
        assert_eq!(tree[s2].data(), "add 3");
        assert_eq!(tree[s2].intent(), Some("edit"));
        assert_eq!(tree.parent_of(s2).map(|n| n.id()), Some(Id::new("s1")));
    }

    #[test]
    fn test_label_defaults_to_id() {
        let document = TreeDocument::parse(CALCULATOR).unwrap();
        let s3 = document.tree().find(Id::new("s3")).unwrap();

        assert_eq!(document.tree()[s3].data(), "s3");
    }

    #[test]
    fn test_current_defaults_to_last_node() {
        let source = CALCULATOR.replace("current = \"s2\"", "");
        let document = TreeDocument::parse(&source).unwrap();
        let (tree, current) = document.into_parts();

        assert_eq!(tree[current].id(), "s3");
    }

    #[test]
    fn test_single_root_document() {
        let document = TreeDocument::parse("[[node]]\nid = \"only\"\n").unwrap();

        assert_eq!(document.tree().node_count(), 1);
        assert_eq!(document.current(), document.tree().root());
    }

    #[test]
    fn test_empty_document() {
        let err = parse_err("");

        assert_eq!(err.message(), "document declares no nodes");
        assert!(err.span().is_none());
        assert!(err.help().is_some());
    }

    #[test]
    fn test_invalid_toml() {
        let source = "[[node]\nid = 1";
        let err = parse_err(source);

        assert!(err.span().is_some());
    }

    #[test]
    fn test_unknown_field() {
        let err = parse_err("[[node]]\nid = \"root\"\ncolor = \"red\"\n");

        assert!(err.message().contains("color"));
    }

    #[test]
    fn test_root_with_parent() {
        let source = "[[node]]\nid = \"a\"\nparent = \"b\"\n";
        let err = parse_err(source);

        assert_eq!(err.message(), "the first node must be the root");
        assert_eq!(spanned_text(source, &err), "b");
    }

    #[test]
    fn test_second_root() {
        let source = "[[node]]\nid = \"a\"\n\n[[node]]\nid = \"b\"\n";
        let err = parse_err(source);

        assert_eq!(err.message(), "node `b` has no parent");
        assert_eq!(spanned_text(source, &err), "b");
    }

    #[test]
    fn test_parent_declared_later() {
        let source = "[[node]]\nid = \"a\"\n\n[[node]]\nid = \"c\"\nparent = \"b\"\n\n[[node]]\nid = \"b\"\nparent = \"a\"\n";
        let err = parse_err(source);

        assert_eq!(err.message(), "unknown parent `b`");
        assert_eq!(err.help(), Some("declare parent nodes before their children"));
        assert_eq!(spanned_text(source, &err), "b");
    }

    #[test]
    fn test_duplicate_id() {
        let source = "[[node]]\nid = \"a\"\n\n[[node]]\nid = \"a2\"\nparent = \"a\"\n\n[[node]]\nid = \"a2\"\nparent = \"a\"\n";
        let err = parse_err(source);

        assert_eq!(err.message(), "duplicate node id `a2`");
        assert_eq!(err.label(), Some("already declared"));
        assert_eq!(spanned_text(source, &err), "a2");
        let span = err.span().unwrap();
        assert!(span.start >= source.rfind("id = \"a2\"").unwrap());
    }

    #[test]
    fn test_unknown_current() {
        let source = "current = \"zzz\"\n\n[[node]]\nid = \"a\"\n";
        let err = parse_err(source);

        assert_eq!(err.message(), "unknown current node `zzz`");
        assert_eq!(spanned_text(source, &err), "zzz");
    }

    #[test]
    fn test_empty_id() {
        let err = parse_err("[[node]]\nid = \"\"\n");

        assert_eq!(err.message(), "node id must not be empty");
    }
}
