use doo::{Error, Evaluation, NodeValue};

use crate::unit_tree;

#[test]
fn test_pending_leaf_is_skipped_in_bound_comparison() {
    let mut tree = unit_tree(1, 0.0, 12);
    let root = tree.select_next().unwrap();
    tree.expand(root, 1.0.into()).unwrap();
    let (left, right) = tree.node(root).unwrap().children().unwrap();

    assert_eq!(tree.select_next().unwrap(), left);
    tree.expand(left, Evaluation::Pending).unwrap();
    assert_eq!(tree.pending(), Some(left));

    assert_eq!(tree.select_next().unwrap(), right);
    tree.expand(right, (-5.0).into()).unwrap();
    assert_eq!(tree.leaves(), &[left, right], "pending sibling still counts as valued");

    // The pending leaf would win any comparison if it were scored; it must not be.
    let (right_left, right_right) = tree.node(right).unwrap().children().unwrap();
    assert_eq!(tree.select_next().unwrap(), right_left);
    tree.expand(right_left, (-6.0).into()).unwrap();
    assert_eq!(tree.select_next().unwrap(), right_right);
}

#[test]
fn test_correcting_pending_leaf_makes_it_selectable() {
    let mut tree = unit_tree(1, 0.0, 12);
    let root = tree.select_next().unwrap();
    tree.expand(root, 1.0.into()).unwrap();
    let (left, right) = tree.node(root).unwrap().children().unwrap();
    tree.expand(left, Evaluation::Pending).unwrap();
    tree.expand(right, 0.1.into()).unwrap();

    let x = tree.node(left).unwrap().midpoint().to_vec();
    tree.apply_corrections(&[x], &[0.9], &[true]).unwrap();
    assert_eq!(tree.node(left).unwrap().value(), NodeValue::Evaluated(0.9));
    assert_eq!(tree.pending(), None);

    let (left_left, _) = tree.node(left).unwrap().children().unwrap();
    assert_eq!(tree.select_next().unwrap(), left_left);
}

#[test]
fn test_only_last_pending_node_is_tracked() {
    let mut tree = unit_tree(2, 0.01, 4);
    let root = tree.select_next().unwrap();
    tree.expand(root, 0.0.into()).unwrap();
    let (left, right) = tree.node(root).unwrap().children().unwrap();
    tree.expand(left, Evaluation::Pending).unwrap();
    tree.expand(right, Evaluation::Pending).unwrap();

    assert_eq!(tree.pending(), Some(right));
    // Both are still pending in the tree even though only one is tracked.
    assert!(tree.node(left).unwrap().value().is_pending());
    assert!(tree.node(right).unwrap().value().is_pending());
    assert!(matches!(tree.select_next(), Err(Error::NoSelectableLeaf)));
}

#[test]
fn test_pending_node_is_still_expanded() {
    let mut tree = unit_tree(1, 0.01, 30);
    let root = tree.select_next().unwrap();
    tree.expand(root, Evaluation::Pending).unwrap();
    assert_eq!(tree.expanded(), &[root]);
    assert!(tree.node(root).unwrap().is_expanded());
    assert_eq!(tree.len(), 3);
}
