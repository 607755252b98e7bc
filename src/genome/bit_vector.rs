//! Binary genome with a fixed-point layout
//!
//! All individuals in a binary population share one [`BinaryLayout`] through
//! an `Arc`; the genome itself is just the flat bit vector. Decoding runs the
//! bits through the layout's fixed-point codec.

use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::genome::encoding::BinaryLayout;
use crate::genome::traits::Genome;

/// Flat bit vector decoded through a shared fixed-point layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BitVector {
    bits: Vec<bool>,
    layout: Arc<BinaryLayout>,
}

impl BitVector {
    /// Build from explicit bits. Panics when the width does not match the
    /// layout.
    pub fn new(bits: Vec<bool>, layout: Arc<BinaryLayout>) -> Self {
        assert_eq!(bits.len(), layout.total_bits(), "bit count does not match layout width");
        Self { bits, layout }
    }

    /// Uniform random bits over the layout width.
    pub fn random<R: Rng>(rng: &mut R, layout: Arc<BinaryLayout>) -> Self {
        let bits = (0..layout.total_bits()).map(|_| rng.gen()).collect();
        Self { bits, layout }
    }

    /// Encode phenotype values into a genome (saturating, truncating).
    pub fn from_values(values: &[f64], layout: Arc<BinaryLayout>) -> Self {
        let bits = layout.encode(values);
        Self { bits, layout }
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn layout(&self) -> &BinaryLayout {
        &self.layout
    }
}

impl Genome for BitVector {
    type Gene = bool;
    type Decoded = Vec<f64>;

    fn decode(&self) -> Vec<f64> {
        self.layout.decode(&self.bits)
    }

    fn len(&self) -> usize {
        self.bits.len()
    }

    fn genes(&self) -> &[bool] {
        &self.bits
    }

    fn genes_mut(&mut self) -> &mut [bool] {
        &mut self.bits
    }

    fn replace_genes(&mut self, genes: Vec<bool>) {
        self.bits = genes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::encoding::FieldSpec;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn layout() -> Arc<BinaryLayout> {
        Arc::new(BinaryLayout::new(vec![
            FieldSpec::new(true, 5, 5),
            FieldSpec::new(true, 5, 5),
        ]))
    }

    #[test]
    fn random_genomes_match_the_layout_width() {
        let mut rng = StdRng::seed_from_u64(8);
        let genome = BitVector::random(&mut rng, layout());
        assert_eq!(genome.len(), 22);
    }

    #[test]
    fn encode_decode_through_the_layout() {
        let genome = BitVector::from_values(&[3.0, -0.5], layout());
        let decoded = genome.decode();
        assert_relative_eq!(decoded[0], 3.0);
        assert_relative_eq!(decoded[1], -0.5);
    }

    #[test]
    fn replacing_genes_keeps_the_layout() {
        let mut genome = BitVector::from_values(&[1.0, 1.0], layout());
        let flipped: Vec<bool> = genome.bits().iter().map(|b| !b).collect();
        genome.replace_genes(flipped);
        assert_eq!(genome.len(), 22);
        assert_eq!(genome.decode().len(), 2);
    }
}
