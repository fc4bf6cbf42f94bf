use doo::{DooTree, Domain, NodeId, NodeValue};

use crate::{grow, unit_tree};

/// Recomputes the selection rule from the public view of the tree.
fn expected_selection(tree: &DooTree) -> NodeId {
    let mut best: Option<NodeId> = None;
    let mut max_bound = f64::NEG_INFINITY;
    for &leaf in tree.leaves() {
        let node = tree.node(leaf).unwrap();
        match node.value() {
            NodeValue::Unevaluated => return leaf,
            NodeValue::Pending => {}
            NodeValue::Evaluated(v) => {
                let bound = v + tree.exploration_constant() * node.delta_h();
                if best.is_none() || bound > max_bound {
                    max_bound = bound;
                    best = Some(leaf);
                }
            }
        }
    }
    let best = best.unwrap();
    match tree.node(best).unwrap().children() {
        Some((left, right)) => {
            if tree.node(left).unwrap().value().is_assigned() {
                right
            } else {
                left
            }
        }
        None => best,
    }
}

fn bumpy(x: &[f64]) -> f64 {
    x.iter()
        .enumerate()
        .map(|(i, &xi)| ((i + 2) as f64 * 3.1 * xi).sin() * (1.0 - xi))
        .sum()
}

#[test]
fn test_first_selection_is_inside_domain() {
    let domain = Domain::new(vec![-4.0, 10.0, 0.0], vec![-3.5, 30.0, 1e-3]).unwrap();
    for seed in 0..50 {
        let mut tree = DooTree::builder(domain.clone()).seed(seed).build().unwrap();
        let root = tree.select_next().unwrap();
        let node = tree.node(root).unwrap();
        assert!(domain.contains(node.midpoint()), "seed {seed}: {:?}", node.midpoint());
        assert_eq!(node.cell_min(), domain.lower());
        assert_eq!(node.cell_max(), domain.upper());
        assert_eq!(node.parent(), None);
    }
}

#[test]
fn test_unseeded_first_selection_is_inside_domain() {
    let domain = Domain::uniform(2, -1.0, 1.0).unwrap();
    let mut tree = DooTree::new(domain.clone(), 0.01).unwrap();
    let root = tree.select_next().unwrap();
    assert!(domain.contains(tree.node(root).unwrap().midpoint()));
}

#[test]
fn test_selection_follows_optimistic_bound() {
    for exploration in [0.0, 0.01, 0.5, 10.0] {
        let mut tree = unit_tree(2, exploration, 17);
        grow(&mut tree, 1, bumpy);
        for _ in 0..150 {
            let expected = expected_selection(&tree);
            let id = tree.select_next().unwrap();
            assert_eq!(id, expected, "exploration {exploration}");
            let value = bumpy(tree.node(id).unwrap().midpoint());
            tree.expand(id, value.into()).unwrap();
        }
    }
}

#[test]
fn test_pure_exploitation_picks_child_of_best_leaf() {
    let mut tree = unit_tree(1, 0.0, 8);
    grow(&mut tree, 3, |x| -(x[0] - 0.2).abs());

    for _ in 0..30 {
        let best_leaf = tree
            .leaves()
            .iter()
            .copied()
            .fold(None, |best: Option<NodeId>, leaf| {
                let v = tree.node(leaf).unwrap().value().value();
                match best {
                    Some(b) if tree.node(b).unwrap().value().value() >= v => Some(b),
                    _ => Some(leaf),
                }
            })
            .unwrap();
        let id = tree.select_next().unwrap();
        let node = tree.node(id).unwrap();
        assert_eq!(node.parent(), Some(best_leaf));
        assert_eq!(node.value(), NodeValue::Unevaluated);

        let value = -(node.midpoint()[0] - 0.2).abs();
        tree.expand(id, value.into()).unwrap();
    }
}

#[test]
fn test_ties_go_to_first_leaf() {
    let mut tree = unit_tree(1, 0.0, 5);
    let root = tree.select_next().unwrap();
    tree.expand(root, 1.0.into()).unwrap();
    let (left, right) = tree.node(root).unwrap().children().unwrap();
    tree.expand(left, 0.5.into()).unwrap();
    tree.expand(right, 0.5.into()).unwrap();
    assert_eq!(tree.leaves(), &[left, right]);

    let next = tree.select_next().unwrap();
    let (left_left, _) = tree.node(left).unwrap().children().unwrap();
    assert_eq!(next, left_left);
}

#[test]
fn test_selected_node_is_never_expanded() {
    let mut tree = unit_tree(3, 0.05, 99);
    for _ in 0..200 {
        let id = tree.select_next().unwrap();
        let node = tree.node(id).unwrap();
        assert!(!node.is_expanded());
        assert_eq!(node.value(), NodeValue::Unevaluated);
        let value = bumpy(node.midpoint());
        tree.expand(id, value.into()).unwrap();
    }
}

#[test]
fn test_same_seed_same_sequence() {
    let mut a = unit_tree(2, 0.01, 1234);
    let mut b = unit_tree(2, 0.01, 1234);
    grow(&mut a, 60, bumpy);
    grow(&mut b, 60, bumpy);
    let ma: Vec<Vec<f64>> = a.nodes().map(|n| n.midpoint().to_vec()).collect();
    let mb: Vec<Vec<f64>> = b.nodes().map(|n| n.midpoint().to_vec()).collect();
    assert_eq!(ma, mb);
    assert_eq!(a.leaves(), b.leaves());
}
