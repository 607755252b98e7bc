//! Population initializers
//!
//! Free functions building starting populations. They take the RNG by
//! reference so callers can thread the task's own stream through
//! (`task.rng_mut()`) and keep the whole run on one seed. Selection schemes
//! need at least a pair to work with, so every initializer enforces a
//! minimum population of two.

use std::sync::Arc;

use rand::Rng;

use crate::genome::bit_vector::BitVector;
use crate::genome::encoding::BinaryLayout;
use crate::genome::float_vector::FloatVector;
use crate::genome::tour::Tour;
use crate::individual::Individual;

/// Random orderings of `elements` (the fixed start node stays out).
pub fn permutation_population<R: Rng>(
    rng: &mut R,
    n: usize,
    elements: &[usize],
) -> Vec<Individual<Tour>> {
    let n = n.max(2);
    (0..n)
        .map(|_| Individual::new(Tour::random(rng, elements)))
        .collect()
}

/// Real-valued genomes with genes uniform in `[min, max)`.
pub fn float_population<R: Rng>(
    rng: &mut R,
    n: usize,
    genes: usize,
    min: f64,
    max: f64,
) -> Vec<Individual<FloatVector>> {
    let n = n.max(2);
    (0..n)
        .map(|_| Individual::new(FloatVector::random(rng, genes, min, max)))
        .collect()
}

/// Uniform random bit genomes; all individuals share one layout handle.
pub fn binary_population<R: Rng>(
    rng: &mut R,
    n: usize,
    layout: BinaryLayout,
) -> Vec<Individual<BitVector>> {
    let n = n.max(2);
    let layout = Arc::new(layout);
    (0..n)
        .map(|_| Individual::new(BitVector::random(rng, Arc::clone(&layout))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::encoding::FieldSpec;
    use crate::genome::traits::Genome;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn populations_are_never_smaller_than_two() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(permutation_population(&mut rng, 0, &[1, 2, 3]).len(), 2);
        assert_eq!(float_population(&mut rng, 1, 4, 0.0, 1.0).len(), 2);
        let layout = BinaryLayout::new(vec![FieldSpec::new(false, 2, 2)]);
        assert_eq!(binary_population(&mut rng, 0, layout).len(), 2);
    }

    #[test]
    fn permutation_individuals_shuffle_the_same_elements() {
        let mut rng = StdRng::seed_from_u64(2);
        let population = permutation_population(&mut rng, 10, &[2, 4, 8, 16, 32]);
        for individual in &population {
            assert!(individual.genome().is_valid());
            let mut nodes = individual.genome().genes().to_vec();
            nodes.sort_unstable();
            assert_eq!(nodes, vec![2, 4, 8, 16, 32]);
        }
    }

    #[test]
    fn float_genes_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let population = float_population(&mut rng, 20, 6, -2.0, 3.0);
        for individual in &population {
            assert_eq!(individual.genome().len(), 6);
            assert!(individual
                .genome()
                .genes()
                .iter()
                .all(|&g| (-2.0..3.0).contains(&g)));
        }
    }

    #[test]
    fn binary_individuals_match_the_layout_width() {
        let mut rng = StdRng::seed_from_u64(4);
        let layout = BinaryLayout::new(vec![
            FieldSpec::new(true, 5, 5),
            FieldSpec::new(false, 3, 0),
        ]);
        let population = binary_population(&mut rng, 8, layout);
        for individual in &population {
            assert_eq!(individual.genome().len(), 11 + 3);
            assert_eq!(individual.genome().decode().len(), 2);
            assert!(!individual.is_evaluated());
        }
    }
}
