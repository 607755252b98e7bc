//! Real-valued genome

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::genome::traits::Genome;

/// Fixed-length vector of `f64` genes. Decodes to itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloatVector {
    genes: Vec<f64>,
}

impl FloatVector {
    pub fn new(genes: Vec<f64>) -> Self {
        Self { genes }
    }

    /// Uniform random genes in `[min, max)`.
    pub fn random<R: Rng>(rng: &mut R, length: usize, min: f64, max: f64) -> Self {
        let genes = (0..length).map(|_| rng.gen_range(min..max)).collect();
        Self { genes }
    }
}

impl Genome for FloatVector {
    type Gene = f64;
    type Decoded = Vec<f64>;

    fn decode(&self) -> Vec<f64> {
        self.genes.clone()
    }

    fn len(&self) -> usize {
        self.genes.len()
    }

    fn genes(&self) -> &[f64] {
        &self.genes
    }

    fn genes_mut(&mut self) -> &mut [f64] {
        &mut self.genes
    }

    fn replace_genes(&mut self, genes: Vec<f64>) {
        self.genes = genes;
    }
}
