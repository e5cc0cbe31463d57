//! Rooted hierarchies over arbitrary payloads.
//!
//! [`Hierarchy`] is the input of the layout engine. It flattens any rooted
//! tree (the raw [`HistoryTree`](provtree_core::tree::HistoryTree), a grouped
//! tree, or anything else with a children accessor) into an arena of
//! payloads with depth, parent and child links.
//!
//! # Architecture
//!
//! - Nodes are stored breadth-first; index 0 is the root and every child has
//!   a larger index than its parent.
//! - Children keep the order reported by the accessor, which is the order the
//!   layout considers them in.
//! - Construction and traversals use explicit work-lists, so very deep
//!   histories do not grow the call stack.

use std::fmt;

/// Handle of a node inside a [`Hierarchy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HierarchyIndex(usize);

impl HierarchyIndex {
    /// Returns the breadth-first position of the node.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for HierarchyIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct HierarchyNode<T> {
    data: T,
    depth: usize,
    parent: Option<HierarchyIndex>,
    children: Vec<HierarchyIndex>,
}

/// A rooted tree of `T` payloads stored in breadth-first order.
///
/// # Examples
///
/// ```
/// use provtree::hierarchy::Hierarchy;
///
/// // 1 ── 2 ── 4
/// //  └── 3
/// let hierarchy = Hierarchy::build(1u32, |n: &u32| match n {
///     1 => vec![2, 3],
///     2 => vec![4],
///     _ => vec![],
/// });
///
/// assert_eq!(hierarchy.node_count(), 4);
/// let leaves: Vec<u32> = hierarchy
///     .leaves(hierarchy.root())
///     .into_iter()
///     .map(|leaf| *hierarchy.data(leaf))
///     .collect();
/// assert_eq!(leaves, vec![4, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct Hierarchy<T> {
    nodes: Vec<HierarchyNode<T>>,
}

impl<T> Hierarchy<T> {
    /// Builds a hierarchy from `root`, asking `children` for the ordered
    /// children of every payload.
    ///
    /// The accessor must describe a finite tree; it is called exactly once per
    /// node.
    pub fn build<F, I>(root: T, mut children: F) -> Self
    where
        F: FnMut(&T) -> I,
        I: IntoIterator<Item = T>,
    {
        let mut nodes = vec![HierarchyNode {
            data: root,
            depth: 0,
            parent: None,
            children: Vec::new(),
        }];

        let mut cursor = 0;
        while cursor < nodes.len() {
            let depth = nodes[cursor].depth + 1;
            let kids: Vec<T> = children(&nodes[cursor].data).into_iter().collect();
            for data in kids {
                let index = HierarchyIndex(nodes.len());
                nodes.push(HierarchyNode {
                    data,
                    depth,
                    parent: Some(HierarchyIndex(cursor)),
                    children: Vec::new(),
                });
                nodes[cursor].children.push(index);
            }
            cursor += 1;
        }

        Self { nodes }
    }

    /// Returns a hierarchy of the same shape with every payload mapped by `f`.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Hierarchy<U> {
        Hierarchy {
            nodes: self
                .nodes
                .iter()
                .map(|node| HierarchyNode {
                    data: f(&node.data),
                    depth: node.depth,
                    parent: node.parent,
                    children: node.children.clone(),
                })
                .collect(),
        }
    }

    pub fn root(&self) -> HierarchyIndex {
        HierarchyIndex(0)
    }

    /// Returns the total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Checks whether `index` refers to a node of this hierarchy.
    pub fn contains(&self, index: HierarchyIndex) -> bool {
        index.0 < self.nodes.len()
    }

    /// Returns the payload of a node.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not belong to this hierarchy. The same holds
    /// for every other per-node accessor.
    pub fn data(&self, index: HierarchyIndex) -> &T {
        &self.nodes[index.0].data
    }

    /// Number of edges between the node and the root.
    pub fn depth(&self, index: HierarchyIndex) -> usize {
        self.nodes[index.0].depth
    }

    pub fn parent(&self, index: HierarchyIndex) -> Option<HierarchyIndex> {
        self.nodes[index.0].parent
    }

    pub fn children(&self, index: HierarchyIndex) -> &[HierarchyIndex] {
        &self.nodes[index.0].children
    }

    pub fn is_leaf(&self, index: HierarchyIndex) -> bool {
        self.nodes[index.0].children.is_empty()
    }

    /// Iterates over all node indices breadth-first, starting at the root.
    pub fn indices(&self) -> impl DoubleEndedIterator<Item = HierarchyIndex> + ExactSizeIterator {
        (0..self.nodes.len()).map(HierarchyIndex)
    }

    /// Returns the leaves of the subtree rooted at `index` in pre-order.
    ///
    /// A leaf is its own single leaf.
    pub fn leaves(&self, index: HierarchyIndex) -> Vec<HierarchyIndex> {
        let mut leaves = Vec::new();
        let mut pending = vec![index];
        while let Some(current) = pending.pop() {
            let children = self.children(current);
            if children.is_empty() {
                leaves.push(current);
            } else {
                pending.extend(children.iter().rev());
            }
        }
        leaves
    }

    /// Returns `index` followed by its ancestors up to the root.
    pub fn ancestors(&self, index: HierarchyIndex) -> Vec<HierarchyIndex> {
        let mut chain = vec![index];
        let mut current = self.parent(index);
        while let Some(parent) = current {
            chain.push(parent);
            current = self.parent(parent);
        }
        chain
    }

    /// Returns the first node, breadth-first, whose payload satisfies `predicate`.
    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<HierarchyIndex> {
        self.nodes
            .iter()
            .position(|node| predicate(&node.data))
            .map(HierarchyIndex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Children accessor for a small fixed tree:
    ///
    /// ```text
    /// a ── b ── d
    /// │    └─── e ── g
    /// └─── c ── f
    /// ```
    fn sample_children(node: &char) -> Vec<char> {
        match node {
            'a' => vec!['b', 'c'],
            'b' => vec!['d', 'e'],
            'c' => vec!['f'],
            'e' => vec!['g'],
            _ => vec![],
        }
    }

    fn sample() -> Hierarchy<char> {
        Hierarchy::build('a', sample_children)
    }

    fn index_of(hierarchy: &Hierarchy<char>, name: char) -> HierarchyIndex {
        hierarchy.find(|data| *data == name).unwrap()
    }

    fn names(hierarchy: &Hierarchy<char>, indices: &[HierarchyIndex]) -> String {
        indices.iter().map(|i| *hierarchy.data(*i)).collect()
    }

    #[test]
    fn test_single_node() {
        let hierarchy = Hierarchy::build((), |_| Vec::new());

        assert_eq!(hierarchy.node_count(), 1);
        assert!(hierarchy.is_leaf(hierarchy.root()));
        assert_eq!(hierarchy.depth(hierarchy.root()), 0);
        assert_eq!(hierarchy.leaves(hierarchy.root()), vec![hierarchy.root()]);
    }

    #[test]
    fn test_breadth_first_order() {
        let hierarchy = sample();
        let order: Vec<HierarchyIndex> = hierarchy.indices().collect();

        assert_eq!(names(&hierarchy, &order), "abcdefg");
    }

    #[test]
    fn test_indices_reverse_from_deepest() {
        let hierarchy = sample();
        let reversed: Vec<HierarchyIndex> = hierarchy.indices().rev().collect();

        assert_eq!(hierarchy.indices().len(), 7);
        assert_eq!(names(&hierarchy, &reversed), "gfedcba");
    }

    #[test]
    fn test_depth_and_parent() {
        let hierarchy = sample();
        let g = index_of(&hierarchy, 'g');
        let e = index_of(&hierarchy, 'e');

        assert_eq!(hierarchy.depth(g), 3);
        assert_eq!(hierarchy.parent(g), Some(e));
        assert_eq!(hierarchy.parent(hierarchy.root()), None);
    }

    #[test]
    fn test_children_keep_accessor_order() {
        let hierarchy = sample();
        let b = index_of(&hierarchy, 'b');

        assert_eq!(names(&hierarchy, hierarchy.children(b)), "de");
    }

    #[test]
    fn test_leaves_pre_order() {
        let hierarchy = sample();

        assert_eq!(names(&hierarchy, &hierarchy.leaves(hierarchy.root())), "dgf");

        let b = index_of(&hierarchy, 'b');
        assert_eq!(names(&hierarchy, &hierarchy.leaves(b)), "dg");

        let f = index_of(&hierarchy, 'f');
        assert_eq!(hierarchy.leaves(f), vec![f]);
    }

    #[test]
    fn test_ancestors() {
        let hierarchy = sample();
        let g = index_of(&hierarchy, 'g');

        assert_eq!(names(&hierarchy, &hierarchy.ancestors(g)), "geba");
        assert_eq!(
            hierarchy.ancestors(hierarchy.root()),
            vec![hierarchy.root()]
        );
    }

    #[test]
    fn test_map_keeps_shape() {
        let hierarchy = sample();
        let upper = hierarchy.map(|c| c.to_ascii_uppercase());

        assert_eq!(upper.node_count(), hierarchy.node_count());
        for index in hierarchy.indices() {
            assert_eq!(*upper.data(index), hierarchy.data(index).to_ascii_uppercase());
            assert_eq!(upper.children(index), hierarchy.children(index));
            assert_eq!(upper.depth(index), hierarchy.depth(index));
        }
    }

    #[test]
    fn test_contains() {
        let hierarchy = sample();

        assert!(hierarchy.contains(HierarchyIndex(6)));
        assert!(!hierarchy.contains(HierarchyIndex(7)));
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let hierarchy = Hierarchy::build(0usize, |n| {
            if *n < 100_000 { vec![n + 1] } else { vec![] }
        });

        assert_eq!(hierarchy.node_count(), 100_001);
        let leaves = hierarchy.leaves(hierarchy.root());
        assert_eq!(leaves.len(), 1);
        assert_eq!(hierarchy.depth(leaves[0]), 100_000);
    }
}
