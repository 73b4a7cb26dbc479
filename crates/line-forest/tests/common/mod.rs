#![allow(dead_code)]

use line_forest::{PositionTree, Weighted};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Payload with an identity, so tests can tell equal-length nodes apart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub id: u32,
    pub len: usize,
}

impl Weighted for Item {
    fn length(&self) -> usize {
        self.len
    }
}

/// Seeded random operation source for ladder tests.
pub struct Fuzzer {
    pub seed: u64,
    rng: Xoshiro256StarStar,
    next_id: u32,
}

impl Fuzzer {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            next_id: 0,
        }
    }

    pub fn random_int(&mut self, min: usize, max: usize) -> usize {
        self.rng.gen_range(min..=max)
    }

    pub fn random_bool(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }

    pub fn item(&mut self) -> Item {
        self.next_id += 1;
        Item {
            id: self.next_id,
            len: self.rng.gen_range(0..=80),
        }
    }
}

/// Checks the tree against a plain vector holding the same sequence.
pub fn assert_matches(tree: &PositionTree<Item>, model: &[Item]) {
    tree.assert_valid().unwrap();
    assert_eq!(tree.count(), model.len());
    let items: Vec<&Item> = tree.iter().collect();
    assert_eq!(items, model.iter().collect::<Vec<_>>());
    let total: usize = model.iter().map(|i| i.len + 1).sum();
    assert_eq!(tree.total_weighted_length(), total);
    let max = model.iter().map(|i| i.len).max().unwrap_or(0);
    assert_eq!(tree.max_weighted_length(), max);
}
