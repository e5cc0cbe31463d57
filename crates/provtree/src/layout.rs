//! Positioned output of the tree layout.
//!
//! The layout engine ([`GratzlLayout`]) turns a [`Hierarchy`] into a
//! [`TreeLayout`]: one [`PositionedNode`] per hierarchy node plus the
//! parent→child [`PositionedLink`]s between them. Renderers treat the result
//! as read-only; a new layout is computed on every tree change.
//!
//! [`Hierarchy`]: crate::hierarchy::Hierarchy

mod gratzl;

pub use gratzl::GratzlLayout;

use provtree_core::geometry::{Bounds, Point, Size};

use crate::hierarchy::HierarchyIndex;

/// A hierarchy node decorated with its layout annotations.
#[derive(Debug, Clone)]
pub struct PositionedNode<T> {
    index: HierarchyIndex,
    data: T,
    depth: usize,
    max_descendant_depth: usize,
    column: usize,
    position: Point,
    parent: Option<HierarchyIndex>,
    children: Vec<HierarchyIndex>,
}

impl<T> PositionedNode<T> {
    pub fn index(&self) -> HierarchyIndex {
        self.index
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    /// Number of edges between this node and the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Depth of the deepest leaf in this node's subtree.
    ///
    /// Equals [`depth`](Self::depth) exactly when the node is a leaf.
    pub fn max_descendant_depth(&self) -> usize {
        self.max_descendant_depth
    }

    /// Lateral lane of the node. Column 0 holds the active path.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns `true` if the node lies on the straight active path.
    pub fn is_on_active_path(&self) -> bool {
        self.column == 0
    }

    /// Final coordinates: `x` on the lateral axis, `y` on the depth axis.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn parent(&self) -> Option<HierarchyIndex> {
        self.parent
    }

    pub fn children(&self) -> &[HierarchyIndex] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A parent→child edge between two positioned nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedLink {
    source: HierarchyIndex,
    target: HierarchyIndex,
    source_point: Point,
    target_point: Point,
    target_column: usize,
}

impl PositionedLink {
    pub fn source(&self) -> HierarchyIndex {
        self.source
    }

    pub fn target(&self) -> HierarchyIndex {
        self.target
    }

    pub fn source_point(&self) -> Point {
        self.source_point
    }

    pub fn target_point(&self) -> Point {
        self.target_point
    }

    /// Returns `true` if the edge leads into the active column.
    pub fn is_active(&self) -> bool {
        self.target_column == 0
    }
}

/// Result of one layout pass.
#[derive(Debug, Clone)]
pub struct TreeLayout<T> {
    nodes: Vec<PositionedNode<T>>,
    size: Size,
    max_column: usize,
    max_depth: usize,
}

impl<T> TreeLayout<T> {
    /// All nodes, breadth-first from the root.
    pub fn nodes(&self) -> &[PositionedNode<T>] {
        &self.nodes
    }

    /// Returns a node by its hierarchy index.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not belong to the laid-out hierarchy.
    pub fn node(&self, index: HierarchyIndex) -> &PositionedNode<T> {
        &self.nodes[index.index()]
    }

    pub fn root(&self) -> &PositionedNode<T> {
        &self.nodes[0]
    }

    /// One link per parent→child edge, ordered breadth-first by target.
    pub fn links(&self) -> Vec<PositionedLink> {
        self.nodes
            .iter()
            .filter_map(|target| {
                let source = &self.nodes[target.parent?.index()];
                Some(PositionedLink {
                    source: source.index,
                    target: target.index,
                    source_point: source.position,
                    target_point: target.position,
                    target_column: target.column,
                })
            })
            .collect()
    }

    /// Nodes in column 0, from the root down to the deepest active leaf.
    pub fn active_path(&self) -> impl Iterator<Item = &PositionedNode<T>> {
        self.nodes.iter().filter(|node| node.column == 0)
    }

    /// Highest column assigned to any node.
    pub fn max_column(&self) -> usize {
        self.max_column
    }

    /// Depth of the deepest leaf.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Lateral and depth extents the coordinates were scaled to.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Smallest bounds containing every node position.
    pub fn bounds(&self) -> Bounds {
        self.nodes
            .iter()
            .skip(1)
            .fold(self.root().position.to_bounds(), |acc, node| {
                acc.merge(&node.position.to_bounds())
            })
    }
}
