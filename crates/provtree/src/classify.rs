//! Key-node and intent classification.
//!
//! Small predicates renderers use to style records: a *key node* is a record
//! where the history does something interesting (it branches, ends, or
//! changes intent).

use provtree_core::tree::{HistoryTree, NodeIndex, TreeNode};

/// Intent reported for records without one.
pub const NO_INTENT: &str = "none";

/// Returns the intent label of `node`, or [`NO_INTENT`].
pub fn intent_of<P>(node: &TreeNode<P>) -> &str {
    node.intent().unwrap_or(NO_INTENT)
}

/// Returns `true` if the record at `index` is a key node.
///
/// A record is a key node when any of these holds:
///
/// - it is not a state record (the root);
/// - it has no children, or more than one;
/// - its parent has more than one child;
/// - its only child was produced with a different intent.
///
/// Indices that do not belong to `tree` are never key nodes.
pub fn is_key_node<P>(tree: &HistoryTree<P>, index: NodeIndex) -> bool {
    let Some(node) = tree.get(index) else {
        return false;
    };
    if !node.is_state() {
        return true;
    }

    let children = node.children();
    if children.len() != 1 {
        return true;
    }
    if tree
        .parent_of(index)
        .is_some_and(|parent| parent.children().len() > 1)
    {
        return true;
    }

    intent_of(node) != intent_of(&tree[children[0]])
}

/// CSS classes for the record at `index`: `keynode` when it is a key node,
/// followed by `intent_<intent>`.
///
/// Characters of the intent that are not valid in a class name are replaced
/// with `_`.
pub fn css_classes<P>(tree: &HistoryTree<P>, index: NodeIndex) -> String {
    let mut classes = String::new();
    if is_key_node(tree, index) {
        classes.push_str("keynode ");
    }

    let intent = tree.get(index).map_or(NO_INTENT, intent_of);
    classes.push_str("intent_");
    classes.extend(intent.chars().map(|c| {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            c
        } else {
            '_'
        }
    }));
    classes
}

#[cfg(test)]
mod tests {
    use provtree_core::identifier::Id;

    use super::*;

    /// ```text
    /// root
    /// └── a (edit)
    ///     └── b (edit)
    ///         └── c (run)
    ///             ├── d
    ///             └── e (edit)
    /// ```
    fn sample() -> (HistoryTree<()>, Vec<NodeIndex>) {
        let mut tree = HistoryTree::new(Id::new("root"), ());
        let root = tree.root();
        let a = tree
            .add_state(root, Id::new("a"), Some("edit"), ())
            .unwrap();
        let b = tree.add_state(a, Id::new("b"), Some("edit"), ()).unwrap();
        let c = tree.add_state(b, Id::new("c"), Some("run"), ()).unwrap();
        let d = tree.add_state(c, Id::new("d"), None, ()).unwrap();
        let e = tree.add_state(c, Id::new("e"), Some("edit"), ()).unwrap();
        (tree, vec![root, a, b, c, d, e])
    }

    #[test]
    fn test_intent_of() {
        let (tree, nodes) = sample();

        assert_eq!(intent_of(&tree[nodes[0]]), NO_INTENT);
        assert_eq!(intent_of(&tree[nodes[1]]), "edit");
        assert_eq!(intent_of(&tree[nodes[4]]), NO_INTENT);
    }

    #[test]
    fn test_key_nodes() {
        let (tree, nodes) = sample();
        let keys: Vec<bool> = nodes.iter().map(|n| is_key_node(&tree, *n)).collect();

        // root: not a state; a: same intent as b; b: next intent differs;
        // c: branches; d, e: leaves.
        assert_eq!(keys, vec![true, false, true, true, true, true]);
    }

    #[test]
    fn test_parent_branching_makes_key_node() {
        let mut tree = HistoryTree::new(Id::new("root"), ());
        let a = tree
            .add_state(tree.root(), Id::new("a"), Some("edit"), ())
            .unwrap();
        let b = tree.add_state(a, Id::new("b"), Some("edit"), ()).unwrap();
        tree.add_state(b, Id::new("b1"), Some("edit"), ()).unwrap();
        tree.add_state(a, Id::new("c"), Some("edit"), ()).unwrap();

        assert!(is_key_node(&tree, b));
    }

    #[test]
    fn test_unknown_index_is_not_key() {
        let (tree, _) = sample();
        let mut other = HistoryTree::new(Id::new("x"), ());
        let mut last = other.root();
        for i in 0..10 {
            last = other
                .add_state(last, Id::from_sequence("x", i), None, ())
                .unwrap();
        }

        assert!(!is_key_node(&tree, last));
    }

    #[test]
    fn test_css_classes() {
        let (tree, nodes) = sample();

        assert_eq!(css_classes(&tree, nodes[0]), "keynode intent_none");
        assert_eq!(css_classes(&tree, nodes[1]), "intent_edit");
        assert_eq!(css_classes(&tree, nodes[3]), "keynode intent_run");
    }

    #[test]
    fn test_css_classes_sanitizes_intent() {
        let mut tree = HistoryTree::new(Id::new("root"), ());
        let s = tree
            .add_state(tree.root(), Id::new("s"), Some("Because I want to"), ())
            .unwrap();

        assert_eq!(css_classes(&tree, s), "keynode intent_Because_I_want_to");
    }
}
