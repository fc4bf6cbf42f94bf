use doo::{DooTree, Domain, Evaluation};

use crate::{grow, unit_tree};

/// Number of leaves whose half-open cell `[min, max)` holds `point`.
fn covering_leaves(tree: &DooTree, point: &[f64]) -> usize {
    tree.leaves()
        .iter()
        .filter(|&&leaf| {
            let node = tree.node(leaf).unwrap();
            point
                .iter()
                .zip(node.cell_min().iter().zip(node.cell_max()))
                .all(|(&x, (&lo, &hi))| lo <= x && x < hi)
        })
        .count()
}

fn leaf_volume(tree: &DooTree) -> f64 {
    tree.leaves()
        .iter()
        .map(|&leaf| {
            let node = tree.node(leaf).unwrap();
            node.cell_min()
                .iter()
                .zip(node.cell_max())
                .map(|(lo, hi)| hi - lo)
                .product::<f64>()
        })
        .sum()
}

#[test]
fn test_leaves_tile_the_domain() {
    let mut tree = unit_tree(2, 0.05, 2024);
    let mut rng = fastrand::Rng::with_seed(1);

    for round in 0..120 {
        let id = tree.select_next().unwrap();
        let x = tree.node(id).unwrap().midpoint().to_vec();
        tree.expand(id, (x[0] - x[1]).sin().into()).unwrap();

        for _ in 0..50 {
            let p = [rng.f64(), rng.f64()];
            assert_eq!(
                covering_leaves(&tree, &p),
                1,
                "round {round}: point {p:?} not covered exactly once"
            );
        }
        assert!((leaf_volume(&tree) - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_tiling_survives_pending_nodes() {
    let domain = Domain::new(vec![-2.0, 0.0, 5.0], vec![2.0, 1.0, 6.0]).unwrap();
    let mut tree = DooTree::builder(domain).seed(8).build().unwrap();
    let mut rng = fastrand::Rng::with_seed(2);

    for round in 0..90 {
        let Ok(id) = tree.select_next() else {
            break;
        };
        let evaluation = if round % 7 == 3 {
            Evaluation::Pending
        } else {
            Evaluation::Value(rng.f64())
        };
        tree.expand(id, evaluation).unwrap();

        for _ in 0..30 {
            let p = [-2.0 + 4.0 * rng.f64(), rng.f64(), 5.0 + rng.f64()];
            assert_eq!(covering_leaves(&tree, &p), 1, "round {round}: {p:?}");
        }
    }
    assert!((leaf_volume(&tree) - 4.0).abs() < 1e-9);
}

#[test]
fn test_leaf_containing_finds_owner() {
    let mut tree = unit_tree(2, 0.01, 15);
    grow(&mut tree, 60, |x| x[0] * x[1]);
    let mut rng = fastrand::Rng::with_seed(3);
    for _ in 0..100 {
        let p = [rng.f64(), rng.f64()];
        let leaf = tree.leaf_containing(&p).unwrap();
        assert!(tree.node(leaf).unwrap().contains(&p));
    }
    assert_eq!(tree.leaf_containing(&[2.0, 0.5]), None);
}
