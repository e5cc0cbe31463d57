//! Chain grouping.
//!
//! Long runs of single-child records that "belong together" (by default: the
//! same user intent) make a history tree tall and hard to read. Grouping
//! collapses each such run into one [`GroupedNode`] that wraps the records of
//! the chain in root-to-leaf order.
//!
//! Grouping works on a [`GroupedNode`] tree, never on the source
//! [`HistoryTree`]: [`GroupedNode::wrap`] builds a one-record-per-group copy
//! that the [`GroupingEngine`] then rewrites.

use log::debug;
use serde::Deserialize;

use provtree_core::tree::{HistoryTree, TreeNode};

/// A group of chained records and its child groups.
///
/// The wrapped records are never empty and always form a contiguous
/// parent→child chain of the source tree.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedNode<T> {
    wrapped: Vec<T>,
    children: Vec<GroupedNode<T>>,
}

impl<T> GroupedNode<T> {
    /// Creates a childless group wrapping a single record.
    pub fn new(record: T) -> Self {
        Self {
            wrapped: vec![record],
            children: Vec::new(),
        }
    }

    /// Appends a child group and returns `self` for chaining.
    pub fn add_child(mut self, child: GroupedNode<T>) -> Self {
        self.children.push(child);
        self
    }

    /// Records of this group, root-most first.
    pub fn wrapped(&self) -> &[T] {
        &self.wrapped
    }

    pub fn children(&self) -> &[GroupedNode<T>] {
        &self.children
    }

    /// The root-most record of the chain.
    pub fn first(&self) -> &T {
        &self.wrapped[0]
    }

    /// The leaf-most record of the chain.
    pub fn last(&self) -> &T {
        &self.wrapped[self.wrapped.len() - 1]
    }

    /// Returns `true` if any record of this group satisfies `predicate`.
    pub fn contains(&self, predicate: impl FnMut(&T) -> bool) -> bool {
        self.wrapped.iter().any(predicate)
    }

    /// Number of groups in this subtree, this one included.
    pub fn group_count(&self) -> usize {
        self.pre_order().len()
    }

    /// Number of records wrapped by all groups of this subtree.
    pub fn wrapped_count(&self) -> usize {
        self.pre_order()
            .iter()
            .map(|group| group.wrapped.len())
            .sum()
    }

    /// Groups of this subtree in pre-order.
    pub fn pre_order(&self) -> Vec<&GroupedNode<T>> {
        let mut order = Vec::new();
        let mut pending = vec![self];
        while let Some(group) = pending.pop() {
            order.push(group);
            pending.extend(group.children.iter().rev());
        }
        order
    }
}

impl<'t, P> GroupedNode<&'t TreeNode<P>> {
    /// Wraps every record of `tree` into its own group, mirroring the tree's
    /// shape and child order.
    pub fn wrap(tree: &'t HistoryTree<P>) -> Self {
        let mut root = GroupedNode::new(&tree[tree.root()]);

        let mut pending = vec![&mut root];
        while let Some(group) = pending.pop() {
            let record = group.wrapped[0];
            group.children = tree
                .children_of(record.index())
                .map(GroupedNode::new)
                .collect();
            pending.extend(group.children.iter_mut());
        }

        root
    }
}

/// Records that carry the intent label of the action that produced them.
pub trait HasIntent {
    fn intent(&self) -> Option<&str>;
}

impl<P> HasIntent for &TreeNode<P> {
    fn intent(&self) -> Option<&str> {
        TreeNode::intent(self)
    }
}

/// The built-in merge test: `child` is absorbed when it is the only child of
/// `parent` and both chains meet on the same intent (or both lack one).
pub fn same_intent<T: HasIntent>(parent: &GroupedNode<T>, child: &GroupedNode<T>) -> bool {
    parent.children.len() == 1 && parent.last().intent() == child.first().intent()
}

/// Grouping strategies selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupMode {
    /// Keep one group per record.
    None,
    /// Collapse single-child chains of the same intent.
    #[default]
    Intent,
}

type GroupTest<'f, T> = dyn Fn(&GroupedNode<T>, &GroupedNode<T>) -> bool + 'f;

/// Collapses chains of a grouped tree according to a merge test.
///
/// # Examples
///
/// ```
/// use provtree::group::{GroupedNode, GroupingEngine};
///
/// // 1 ── 2 ── 3 ── 4
/// let chain = GroupedNode::new(1).add_child(
///     GroupedNode::new(2).add_child(GroupedNode::new(3).add_child(GroupedNode::new(4))),
/// );
///
/// // Merge consecutive numbers below 4.
/// let engine = GroupingEngine::new(|parent: &GroupedNode<u32>, child: &GroupedNode<u32>| {
///     *child.first() < 4 && *parent.last() + 1 == *child.first()
/// });
/// let grouped = engine.group(&chain);
///
/// assert_eq!(grouped.wrapped(), &[1, 2, 3]);
/// assert_eq!(grouped.children()[0].wrapped(), &[4]);
/// ```
pub struct GroupingEngine<'f, T> {
    test: Box<GroupTest<'f, T>>,
}

impl<T> std::fmt::Debug for GroupingEngine<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupingEngine").finish_non_exhaustive()
    }
}

impl<'f, T> GroupingEngine<'f, T> {
    /// Creates an engine with a custom merge test.
    ///
    /// The test receives the candidate parent group and one of its children
    /// and returns `true` if the child should be absorbed into the parent.
    pub fn new(test: impl Fn(&GroupedNode<T>, &GroupedNode<T>) -> bool + 'f) -> Self {
        Self {
            test: Box::new(test),
        }
    }

    /// An engine that never merges.
    pub fn never() -> Self {
        Self::new(|_, _| false)
    }

    /// Groups `root` in place.
    ///
    /// At every group, the first child passing the test is absorbed: it is
    /// removed, its records are appended to the group's records and its
    /// children are appended to the end of the group's children. This repeats
    /// until no child passes, then the remaining children are processed the
    /// same way.
    pub fn group_in_place(&self, root: &mut GroupedNode<T>) {
        let mut absorbed = 0;
        let mut pending = vec![root];
        while let Some(group) = pending.pop() {
            absorbed += self.absorb_chain(group);
            pending.extend(group.children.iter_mut());
        }
        debug!(absorbed = absorbed; "Grouping finished");
    }

    /// Returns a grouped copy of `root`, leaving `root` untouched.
    pub fn group(&self, root: &GroupedNode<T>) -> GroupedNode<T>
    where
        T: Clone,
    {
        let mut grouped = root.clone();
        self.group_in_place(&mut grouped);
        grouped
    }

    /// Absorbs qualifying children into `group` until none is left, returning
    /// how many were absorbed.
    fn absorb_chain(&self, group: &mut GroupedNode<T>) -> usize {
        let mut absorbed = 0;
        loop {
            let parent: &GroupedNode<T> = group;
            let Some(position) = parent
                .children
                .iter()
                .position(|child| (self.test)(parent, child))
            else {
                return absorbed;
            };

            let child = group.children.remove(position);
            group.wrapped.extend(child.wrapped);
            group.children.extend(child.children);
            absorbed += 1;
        }
    }
}

impl<'f, T: HasIntent + 'f> GroupingEngine<'f, T> {
    /// An engine using [`same_intent`].
    pub fn same_intent() -> Self {
        Self::new(same_intent)
    }

    /// The built-in engine selected by `mode`.
    pub fn from_mode(mode: GroupMode) -> Self {
        match mode {
            GroupMode::None => Self::never(),
            GroupMode::Intent => Self::same_intent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use provtree_core::identifier::Id;

    use super::*;

    /// A → B → C → D with intents edit, edit, edit, run.
    fn chain() -> HistoryTree<&'static str> {
        let mut tree = HistoryTree::new(Id::new("R"), "root");
        let a = tree
            .add_state(tree.root(), Id::new("A"), Some("edit"), "a")
            .unwrap();
        let b = tree.add_state(a, Id::new("B"), Some("edit"), "b").unwrap();
        let c = tree.add_state(b, Id::new("C"), Some("edit"), "c").unwrap();
        tree.add_state(c, Id::new("D"), Some("run"), "d").unwrap();
        tree
    }

    fn ids<P>(group: &GroupedNode<&TreeNode<P>>) -> Vec<String> {
        group.wrapped().iter().map(|n| n.id().to_string()).collect()
    }

    #[test]
    fn test_wrap_mirrors_tree() {
        let tree = chain();
        let root = GroupedNode::wrap(&tree);

        assert_eq!(root.group_count(), tree.node_count());
        assert_eq!(root.wrapped_count(), tree.node_count());
        for group in root.pre_order() {
            assert_eq!(group.wrapped().len(), 1);
            let record = group.first();
            assert_eq!(group.children().len(), record.children().len());
        }
    }

    #[test]
    fn test_wrap_keeps_child_order() {
        let mut tree = HistoryTree::new(Id::new("R"), ());
        for name in ["x", "y", "z"] {
            tree.add_state(tree.root(), Id::new(name), None, ()).unwrap();
        }
        let root = GroupedNode::wrap(&tree);

        let names: Vec<String> = root.children().iter().flat_map(ids).collect();
        assert_eq!(names, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_same_intent_collapses_chain() {
        let tree = chain();
        let wrapped = GroupedNode::wrap(&tree);
        let grouped = GroupingEngine::same_intent().group(&wrapped);

        // The root has no intent while A does, so the root stays alone.
        assert_eq!(ids(&grouped), vec!["R"]);
        let abc = &grouped.children()[0];
        assert_eq!(ids(abc), vec!["A", "B", "C"]);
        assert_eq!(abc.children().len(), 1);
        assert_eq!(ids(&abc.children()[0]), vec!["D"]);
    }

    #[test]
    fn test_group_leaves_input_untouched() {
        let tree = chain();
        let wrapped = GroupedNode::wrap(&tree);
        let before = wrapped.clone();

        let _ = GroupingEngine::same_intent().group(&wrapped);
        assert_eq!(wrapped, before);
    }

    #[test]
    fn test_never_keeps_structure() {
        let tree = chain();
        let wrapped = GroupedNode::wrap(&tree);
        let grouped = GroupingEngine::never().group(&wrapped);

        assert_eq!(grouped, wrapped);
    }

    #[test]
    fn test_from_mode() {
        let tree = chain();
        let wrapped = GroupedNode::wrap(&tree);

        let none = GroupingEngine::from_mode(GroupMode::None).group(&wrapped);
        assert_eq!(none.group_count(), 5);

        let intent = GroupingEngine::from_mode(GroupMode::default()).group(&wrapped);
        assert_eq!(intent.group_count(), 3);
    }

    #[test]
    fn test_same_intent_over_borrowed_records() {
        struct Step<'a> {
            intent: Option<&'a str>,
        }

        impl HasIntent for Step<'_> {
            fn intent(&self) -> Option<&str> {
                self.intent
            }
        }

        let intents = vec!["edit".to_string(), "edit".to_string(), "run".to_string()];
        let step = |i: usize| Step {
            intent: Some(intents[i].as_str()),
        };
        let mut chain = GroupedNode::new(step(0))
            .add_child(GroupedNode::new(step(1)).add_child(GroupedNode::new(step(2))));

        GroupingEngine::from_mode(GroupMode::Intent).group_in_place(&mut chain);

        assert_eq!(chain.wrapped().len(), 2);
        assert_eq!(chain.children().len(), 1);
        assert_eq!(chain.children()[0].first().intent, Some("run"));
    }

    #[test]
    fn test_branching_blocks_default_merge() {
        //   R
        //   └── A (edit)
        //       ├── B (edit)
        //       └── C (edit)
        let mut tree = HistoryTree::new(Id::new("R"), ());
        let a = tree
            .add_state(tree.root(), Id::new("A"), Some("edit"), ())
            .unwrap();
        tree.add_state(a, Id::new("B"), Some("edit"), ()).unwrap();
        tree.add_state(a, Id::new("C"), Some("edit"), ()).unwrap();

        let grouped = GroupingEngine::same_intent().group(&GroupedNode::wrap(&tree));
        assert_eq!(grouped.group_count(), 4);
    }

    #[test]
    fn test_absorbed_grandchildren_are_appended() {
        // 1 ── 2 ── 4
        // │    └─── 5
        // └─── 3
        let tree = GroupedNode::new(1)
            .add_child(
                GroupedNode::new(2)
                    .add_child(GroupedNode::new(4))
                    .add_child(GroupedNode::new(5)),
            )
            .add_child(GroupedNode::new(3));

        let engine = GroupingEngine::new(|_: &GroupedNode<i32>, child: &GroupedNode<i32>| {
            *child.first() == 2
        });
        let grouped = engine.group(&tree);

        assert_eq!(grouped.wrapped(), &[1, 2]);
        let children: Vec<i32> = grouped.children().iter().map(|c| *c.first()).collect();
        assert_eq!(children, vec![3, 4, 5]);
    }

    #[test]
    fn test_branching_parent_can_absorb_with_custom_test() {
        // 1 ── 2 ── 3
        // └─── 9
        let tree = GroupedNode::new(1)
            .add_child(GroupedNode::new(2).add_child(GroupedNode::new(3)))
            .add_child(GroupedNode::new(9));

        let engine = GroupingEngine::new(|parent: &GroupedNode<i32>, child: &GroupedNode<i32>| {
            *parent.last() + 1 == *child.first()
        });
        let grouped = engine.group(&tree);

        assert_eq!(grouped.wrapped(), &[1, 2, 3]);
        assert_eq!(grouped.children().len(), 1);
        assert_eq!(grouped.children()[0].wrapped(), &[9]);
    }

    #[test]
    fn test_contains_and_ends() {
        let group = {
            let mut g = GroupedNode::new(10).add_child(GroupedNode::new(11));
            GroupingEngine::new(|_: &GroupedNode<i32>, _: &GroupedNode<i32>| true)
                .group_in_place(&mut g);
            g
        };

        assert_eq!(*group.first(), 10);
        assert_eq!(*group.last(), 11);
        assert!(group.contains(|n| *n == 11));
        assert!(!group.contains(|n| *n == 12));
    }

    #[test]
    fn test_group_mode_deserialize() {
        #[derive(Deserialize)]
        struct Holder {
            mode: GroupMode,
        }

        let holder: Holder = toml::from_str(r#"mode = "none""#).unwrap();
        assert_eq!(holder.mode, GroupMode::None);
        let holder: Holder = toml::from_str(r#"mode = "intent""#).unwrap();
        assert_eq!(holder.mode, GroupMode::Intent);
        assert!(toml::from_str::<Holder>(r#"mode = "other""#).is_err());
    }

    #[test]
    fn test_long_chain_collapses() {
        let mut tree = HistoryTree::new(Id::new("root"), ());
        let mut parent = tree.root();
        for i in 0..1_000 {
            parent = tree
                .add_state(parent, Id::from_sequence("s", i), Some("edit"), ())
                .unwrap();
        }

        let mut grouped = GroupedNode::wrap(&tree);
        GroupingEngine::same_intent().group_in_place(&mut grouped);

        assert_eq!(grouped.group_count(), 2);
        assert_eq!(grouped.children()[0].wrapped().len(), 1_000);
        assert_eq!(grouped.wrapped_count(), 1_001);
    }
}
