#![allow(clippy::cast_precision_loss)]

mod pending;
mod selection;
mod tiling;

use doo::{DooTree, Domain};

/// A seeded tree over `[0, 1]^dims`.
pub fn unit_tree(dims: usize, exploration: f64, seed: u64) -> DooTree {
    DooTree::builder(Domain::uniform(dims, 0.0, 1.0).unwrap())
        .exploration_constant(exploration)
        .seed(seed)
        .build()
        .unwrap()
}

/// Runs `rounds` select/expand rounds, scoring each midpoint with `f`.
pub fn grow(tree: &mut DooTree, rounds: usize, f: impl Fn(&[f64]) -> f64) {
    for _ in 0..rounds {
        let id = tree.select_next().unwrap();
        let value = f(tree.node(id).unwrap().midpoint());
        tree.expand(id, value.into()).unwrap();
    }
}
