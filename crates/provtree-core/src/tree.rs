//! The source history tree.
//!
//! A provenance history is a rooted tree: the root is the initial state and
//! every other record is a state reached by applying an action to its parent.
//! [`HistoryTree`] stores those records in an arena and hands out
//! [`NodeIndex`] handles; parent links are plain indices, so walking upward
//! never requires shared ownership.
//!
//! # Invariants
//!
//! - Index 0 is the root; it is the only record without a parent.
//! - Records can only be attached to an existing parent, so the tree is
//!   always finite and acyclic.
//! - Identifiers are unique within one tree.
//!
//! These hold by construction; the layout and grouping algorithms rely on
//! them and do not re-validate.

use std::{collections::HashMap, fmt, ops::Index};

use log::trace;
use thiserror::Error;

use crate::identifier::Id;

/// Handle of a record inside a [`HistoryTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Returns the arena position of the record.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors raised while building a [`HistoryTree`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("duplicate node identifier `{0}`")]
    DuplicateId(Id),

    #[error("node {0} does not belong to this tree")]
    UnknownNode(NodeIndex),
}

/// What a record represents in the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The initial state, not produced by any action.
    Root,
    /// A state produced by applying an action to the parent state.
    State {
        /// User intent of the action that produced this state, if recorded.
        intent: Option<String>,
    },
}

/// A single record of the history.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<T> {
    index: NodeIndex,
    id: Id,
    kind: NodeKind,
    data: T,
    parent: Option<NodeIndex>,
    children: Vec<NodeIndex>,
}

impl<T> TreeNode<T> {
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns the caller payload attached to this record.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Returns `true` for records produced by an action.
    pub fn is_state(&self) -> bool {
        matches!(self.kind, NodeKind::State { .. })
    }

    /// Returns the intent label of the action that produced this record.
    pub fn intent(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::State { intent } => intent.as_deref(),
            NodeKind::Root => None,
        }
    }

    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Child records in insertion order.
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena holding every record of one history snapshot.
///
/// # Examples
///
/// ```
/// use provtree_core::{identifier::Id, tree::HistoryTree};
///
/// let mut tree = HistoryTree::new(Id::new("root"), "Root");
/// let added = tree
///     .add_state(tree.root(), Id::new("s1"), Some("edit"), "add 5")
///     .unwrap();
///
/// assert_eq!(tree.node_count(), 2);
/// assert_eq!(tree[added].intent(), Some("edit"));
/// assert_eq!(tree.find(Id::new("s1")), Some(added));
/// ```
#[derive(Debug, Clone)]
pub struct HistoryTree<T> {
    nodes: Vec<TreeNode<T>>,
    ids: HashMap<Id, NodeIndex>,
}

impl<T> HistoryTree<T> {
    /// Creates a tree holding only the root record.
    pub fn new(root_id: Id, data: T) -> Self {
        let root = NodeIndex(0);
        Self {
            nodes: vec![TreeNode {
                index: root,
                id: root_id,
                kind: NodeKind::Root,
                data,
                parent: None,
                children: Vec::new(),
            }],
            ids: HashMap::from([(root_id, root)]),
        }
    }

    /// Appends a state record below `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] if `parent` is not part of this tree
    /// and [`TreeError::DuplicateId`] if `id` is already used.
    pub fn add_state(
        &mut self,
        parent: NodeIndex,
        id: Id,
        intent: Option<&str>,
        data: T,
    ) -> Result<NodeIndex, TreeError> {
        if !self.contains(parent) {
            return Err(TreeError::UnknownNode(parent));
        }
        if self.ids.contains_key(&id) {
            return Err(TreeError::DuplicateId(id));
        }

        let index = NodeIndex(self.nodes.len());
        self.nodes.push(TreeNode {
            index,
            id,
            kind: NodeKind::State {
                intent: intent.map(str::to_string),
            },
            data,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(index);
        self.ids.insert(id, index);

        trace!(id:% = id, parent:% = parent, intent:?; "Added history state");
        Ok(index)
    }

    /// Returns the root record's index.
    pub fn root(&self) -> NodeIndex {
        NodeIndex(0)
    }

    /// Returns the record at `index`, or `None` if it belongs to another tree.
    pub fn get(&self, index: NodeIndex) -> Option<&TreeNode<T>> {
        self.nodes.get(index.0)
    }

    pub fn contains(&self, index: NodeIndex) -> bool {
        index.0 < self.nodes.len()
    }

    /// Looks a record up by identifier.
    pub fn find(&self, id: Id) -> Option<NodeIndex> {
        self.ids.get(&id).copied()
    }

    /// Returns the total number of records, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates over all records in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode<T>> {
        self.nodes.iter()
    }

    /// Returns the parent record of `index`, if any.
    pub fn parent_of(&self, index: NodeIndex) -> Option<&TreeNode<T>> {
        self.get(index)
            .and_then(TreeNode::parent)
            .map(|parent| &self.nodes[parent.0])
    }

    /// Iterates over the child records of `index`.
    pub fn children_of(&self, index: NodeIndex) -> impl Iterator<Item = &TreeNode<T>> {
        self.get(index)
            .map(TreeNode::children)
            .unwrap_or_default()
            .iter()
            .map(|child| &self.nodes[child.0])
    }

    /// Number of edges between `index` and the root.
    pub fn depth(&self, index: NodeIndex) -> usize {
        let mut depth = 0;
        let mut current = self.get(index).and_then(TreeNode::parent);
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes[parent.0].parent;
        }
        depth
    }
}

impl<T> Index<NodeIndex> for HistoryTree<T> {
    type Output = TreeNode<T>;

    /// # Panics
    ///
    /// Panics if `index` does not belong to this tree.
    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index.0]
    }
}
