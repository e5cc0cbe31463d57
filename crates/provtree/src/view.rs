//! Laid-out views of a history tree.
//!
//! A [`TreeView`] is the result of the full pipeline for one snapshot:
//!
//! ```text
//! HistoryTree ── wrap ──▶ GroupedNode tree ── group ──▶ grouped tree
//!      ── Hierarchy::build ──▶ Hierarchy ── GratzlLayout ──▶ TreeLayout
//! ```
//!
//! Each node of the view's layout is one group: the records of the collapsed
//! chain, root-most first. The view borrows the source tree and never
//! modifies it.

use std::slice;

use log::{debug, trace};

use provtree_core::tree::{HistoryTree, NodeIndex, TreeNode};

use crate::{
    error::ProvtreeError,
    group::{GroupedNode, GroupingEngine},
    hierarchy::{Hierarchy, HierarchyIndex},
    layout::{GratzlLayout, PositionedNode, TreeLayout},
};

/// The records of one group.
pub type Group<'t, P> = Vec<&'t TreeNode<P>>;

fn grouped_children<'a, T>(group: &&'a GroupedNode<T>) -> slice::Iter<'a, GroupedNode<T>> {
    group.children().iter()
}

/// A grouped and laid-out history tree with its active group.
#[derive(Debug)]
pub struct TreeView<'t, P> {
    tree: &'t HistoryTree<P>,
    layout: TreeLayout<Group<'t, P>>,
    active: HierarchyIndex,
    current: NodeIndex,
}

impl<'t, P> TreeView<'t, P> {
    /// Groups `tree` with `grouping` and lays the groups out around the group
    /// holding `current`.
    ///
    /// # Errors
    ///
    /// Returns [`ProvtreeError::Layout`] if `current` is not a node of `tree`.
    pub fn build(
        tree: &'t HistoryTree<P>,
        current: NodeIndex,
        grouping: &GroupingEngine<'_, &'t TreeNode<P>>,
        layout: &GratzlLayout,
    ) -> Result<Self, ProvtreeError> {
        if !tree.contains(current) {
            return Err(ProvtreeError::Layout(format!(
                "current node {current} is not part of the history tree"
            )));
        }

        let mut grouped = GroupedNode::wrap(tree);
        grouping.group_in_place(&mut grouped);
        debug!(
            records = tree.node_count(),
            groups = grouped.group_count();
            "History tree grouped"
        );

        let hierarchy = Hierarchy::build(&grouped, grouped_children)
            .map(|group| group.wrapped().to_vec());

        let active = hierarchy
            .find(|records| records.iter().any(|record| record.index() == current))
            .ok_or_else(|| {
                ProvtreeError::Layout(format!("no group holds the current node {current}"))
            })?;
        trace!(current:% = current, active:% = active; "Active group located");

        Ok(Self {
            tree,
            layout: layout.layout(&hierarchy, active),
            active,
            current,
        })
    }

    /// The source tree.
    pub fn tree(&self) -> &'t HistoryTree<P> {
        self.tree
    }

    /// Positions of the groups.
    pub fn layout(&self) -> &TreeLayout<Group<'t, P>> {
        &self.layout
    }

    /// Index of the group holding the current record.
    pub fn active(&self) -> HierarchyIndex {
        self.active
    }

    pub fn active_group(&self) -> &PositionedNode<Group<'t, P>> {
        self.layout.node(self.active)
    }

    /// The current record of the source tree.
    pub fn current(&self) -> NodeIndex {
        self.current
    }
}
