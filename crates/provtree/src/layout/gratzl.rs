//! Active-path tree layout.
//!
//! Places a rooted tree so the path from the root to the deepest leaf below
//! the *active* node is one straight line spanning the whole depth axis,
//! with every other branch packed beside it in its own lateral column.
//!
//! # Algorithm
//!
//! 1. **Depth annotation:** every node learns the depth of the deepest leaf
//!    in its subtree (`max_descendant_depth`).
//! 2. **Column assignment:** starting from the deepest leaf under the active
//!    node with column 0, walk outward. Each visited node takes the current
//!    column and records it as the latest width at its depth. The leaves of a
//!    visited node are handled deepest-subtree first; an unplaced leaf gets
//!    one column past the widest column recorded between the node's depth and
//!    its own, then is walked from in turn. Finally an unplaced parent
//!    inherits the node's column, which pulls the whole root path into
//!    column 0.
//! 3. **Coordinate mapping:** columns and depths are scaled into the
//!    configured extents. Column 0 lands on the far lateral edge.
//!
//! All annotations live in side tables indexed by [`HierarchyIndex`]; the
//! hierarchy itself is never modified.

use log::{debug, trace, warn};

use provtree_core::geometry::{Point, Size};

use super::{PositionedNode, TreeLayout};
use crate::hierarchy::{Hierarchy, HierarchyIndex};

/// The active-path ("Gratzl") layout engine.
///
/// # Examples
///
/// ```
/// use provtree::{hierarchy::Hierarchy, layout::GratzlLayout};
/// use provtree_core::geometry::Size;
///
/// // root ── a ── b
/// //   └──── c
/// let hierarchy = Hierarchy::build("root", |n: &&'static str| match *n {
///     "root" => vec!["a", "c"],
///     "a" => vec!["b"],
///     _ => vec![],
/// });
/// let active = hierarchy.find(|n| *n == "c").unwrap();
///
/// let layout = GratzlLayout::new()
///     .with_size(Size::new(10.0, 100.0))
///     .layout(&hierarchy, active);
///
/// let c = layout.node(active);
/// assert_eq!(c.column(), 0);
/// assert_eq!(c.position().x(), 10.0);
/// assert_eq!(layout.max_column(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GratzlLayout {
    size: Size,
}

impl Default for GratzlLayout {
    fn default() -> Self {
        Self {
            size: Size::new(5.0, 50.0),
        }
    }
}

impl GratzlLayout {
    /// Creates a layout engine with the default extents (5 lateral, 50 depth).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the extents: `width` along the lateral axis, `height` along the
    /// depth axis.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Lays out `hierarchy` around `active`.
    ///
    /// `active` must belong to `hierarchy`. A foreign index is a caller bug;
    /// it is reported and the root is used instead so the result stays
    /// deterministic.
    pub fn layout<T: Clone>(
        &self,
        hierarchy: &Hierarchy<T>,
        active: HierarchyIndex,
    ) -> TreeLayout<T> {
        let active = if hierarchy.contains(active) {
            active
        } else {
            warn!(active:% = active; "Active node is not part of the hierarchy, using the root");
            hierarchy.root()
        };

        let max_descendant_depth = annotate_max_descendant_depth(hierarchy);
        let start = deepest_leaf(hierarchy, active);
        trace!(active:% = active, deepest_leaf:% = start; "Starting column assignment");

        let columns = ColumnAssigner::new(hierarchy, &max_descendant_depth).run(start);

        let max_column = columns.iter().copied().max().unwrap_or(0);
        let max_depth = max_descendant_depth[hierarchy.root().index()];

        let nodes: Vec<PositionedNode<T>> = hierarchy
            .indices()
            .map(|index| {
                let depth = hierarchy.depth(index);
                let column = columns[index.index()];
                PositionedNode {
                    index,
                    data: hierarchy.data(index).clone(),
                    depth,
                    max_descendant_depth: max_descendant_depth[index.index()],
                    column,
                    position: self.position(column, max_column, depth, max_depth),
                    parent: hierarchy.parent(index),
                    children: hierarchy.children(index).to_vec(),
                }
            })
            .collect();

        debug!(
            nodes = nodes.len(),
            max_column = max_column,
            max_depth = max_depth;
            "Tree layout calculated"
        );

        TreeLayout {
            nodes,
            size: self.size,
            max_column,
            max_depth,
        }
    }

    /// Scales a column and depth into plane coordinates.
    fn position(&self, column: usize, max_column: usize, depth: usize, max_depth: usize) -> Point {
        let dx = self.size.width();
        let dy = self.size.height();

        let x = if max_column == 0 {
            dx
        } else {
            dx - (dx / max_column as f32) * column as f32
        };
        let y = if max_depth == 0 {
            0.0
        } else {
            (dy / max_depth as f32) * depth as f32
        };

        Point::new(x, y)
    }
}

/// Computes, for every node, the depth of the deepest leaf in its subtree.
fn annotate_max_descendant_depth<T>(hierarchy: &Hierarchy<T>) -> Vec<usize> {
    let mut max_depth: Vec<usize> = hierarchy
        .indices()
        .map(|index| hierarchy.depth(index))
        .collect();

    // Children always follow their parent in breadth-first order.
    for index in hierarchy.indices().skip(1).rev() {
        if let Some(parent) = hierarchy.parent(index) {
            max_depth[parent.index()] = max_depth[parent.index()].max(max_depth[index.index()]);
        }
    }

    max_depth
}

/// The deepest leaf below `active`; the first one in pre-order on ties.
fn deepest_leaf<T>(hierarchy: &Hierarchy<T>, active: HierarchyIndex) -> HierarchyIndex {
    hierarchy
        .leaves(active)
        .into_iter()
        .fold(active, |deepest, leaf| {
            if hierarchy.depth(leaf) > hierarchy.depth(deepest) {
                leaf
            } else {
                deepest
            }
        })
}

/// One pending visit of the column walk.
struct Frame {
    node: HierarchyIndex,
    column: usize,
    /// Leaves of `node` still to be considered, deepest subtree first.
    pending: std::vec::IntoIter<HierarchyIndex>,
}

/// Walks the hierarchy outward from the deepest active leaf, assigning columns.
///
/// The walk is naturally recursive (leaf → its chain up → the next leaf); it
/// runs on an explicit frame stack that visits nodes in the same order.
///
/// Every entered node collects the leaves of its own subtree, so an ungrouped
/// chain of `n` nodes costs `O(n²)`. Chains are usually collapsed by grouping
/// before layout.
struct ColumnAssigner<'h, T> {
    hierarchy: &'h Hierarchy<T>,
    max_descendant_depth: &'h [usize],
    columns: Vec<Option<usize>>,
    /// Latest column recorded at each depth.
    widths: Vec<Option<usize>>,
}

impl<'h, T> ColumnAssigner<'h, T> {
    fn new(hierarchy: &'h Hierarchy<T>, max_descendant_depth: &'h [usize]) -> Self {
        let depth_count = max_descendant_depth
            .get(hierarchy.root().index())
            .map_or(1, |max_depth| max_depth + 1);
        Self {
            hierarchy,
            max_descendant_depth,
            columns: vec![None; hierarchy.node_count()],
            widths: vec![None; depth_count],
        }
    }

    fn run(mut self, start: HierarchyIndex) -> Vec<usize> {
        let mut stack = vec![self.enter(start, 0)];

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            let column = frame.column;
            let columns = &self.columns;
            let next_leaf = frame
                .pending
                .find(|leaf| columns[leaf.index()].is_none());

            match next_leaf {
                Some(leaf) => {
                    let width = self.widest(
                        self.hierarchy.depth(node),
                        self.hierarchy.depth(leaf),
                    );
                    let leaf_column = column.max(width + 1);
                    stack.push(self.enter(leaf, leaf_column));
                }
                None => {
                    stack.pop();
                    if let Some(parent) = self.hierarchy.parent(node) {
                        if self.columns[parent.index()].is_none() {
                            stack.push(self.enter(parent, column));
                        }
                    }
                }
            }
        }

        // Every node lies on the path from some leaf to the root, and the walk
        // reaches the root and then every leaf, so no column stays unset.
        self.columns
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect()
    }

    /// Places `node` in `column` and prepares the visit of its leaves.
    fn enter(&mut self, node: HierarchyIndex, column: usize) -> Frame {
        self.columns[node.index()] = Some(column);
        self.widths[self.hierarchy.depth(node)] = Some(column);

        let pending = if self.hierarchy.is_leaf(node) {
            Vec::new()
        } else {
            let mut leaves = self.hierarchy.leaves(node);
            // Stable: equally deep leaves keep their pre-order position.
            leaves.sort_by(|a, b| {
                self.max_descendant_depth[b.index()].cmp(&self.max_descendant_depth[a.index()])
            });
            leaves
        };

        Frame {
            node,
            column,
            pending: pending.into_iter(),
        }
    }

    /// Widest column recorded at any depth in `from..=to`.
    fn widest(&self, from: usize, to: usize) -> usize {
        self.widths[from..=to]
            .iter()
            .flatten()
            .copied()
            .max()
            .unwrap_or(0)
    }
}
