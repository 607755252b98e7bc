//! Permutation genome over node identities
//!
//! A tour is an ordering of node ids for routing-style problems. The fixed
//! start node is NOT part of the genome; callers hand in the set of nodes to
//! visit, which need not be contiguous. Ids must be distinct — reordering
//! operators preserve that, and SCX relies on it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::genome::traits::Genome;
use crate::sampling;

/// Ordering of distinct node ids. Decodes to itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tour {
    nodes: Vec<usize>,
}

impl Tour {
    pub fn new(nodes: Vec<usize>) -> Self {
        Self { nodes }
    }

    /// Uniform random ordering of `elements`.
    pub fn random<R: Rng>(rng: &mut R, elements: &[usize]) -> Self {
        let mut nodes = elements.to_vec();
        sampling::shuffle(rng, &mut nodes);
        Self { nodes }
    }

    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// True when every node appears exactly once.
    pub fn is_valid(&self) -> bool {
        let mut seen = self.nodes.clone();
        seen.sort_unstable();
        seen.windows(2).all(|w| w[0] != w[1])
    }
}

impl Genome for Tour {
    type Gene = usize;
    type Decoded = Vec<usize>;

    fn decode(&self) -> Vec<usize> {
        self.nodes.clone()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn genes(&self) -> &[usize] {
        &self.nodes
    }

    fn genes_mut(&mut self) -> &mut [usize] {
        &mut self.nodes
    }

    fn replace_genes(&mut self, genes: Vec<usize>) {
        self.nodes = genes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_tours_permute_the_given_nodes() {
        let mut rng = StdRng::seed_from_u64(6);
        let elements = [3, 7, 11, 19, 23];
        let tour = Tour::random(&mut rng, &elements);
        assert!(tour.is_valid());
        let mut sorted = tour.nodes().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![3, 7, 11, 19, 23]);
    }

    #[test]
    fn validity_detects_repeats() {
        assert!(Tour::new(vec![1, 2, 3]).is_valid());
        assert!(!Tour::new(vec![1, 2, 2]).is_valid());
    }
}
