//! Core genome abstraction
//!
//! A genome is a flat sequence of raw genes plus a decoding into the
//! phenotype objectives and constraints actually see. Operators manipulate
//! the raw gene slice; decoding happens once per evaluation.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A flat, cloneable genome with a decoded phenotype.
pub trait Genome: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Raw gene type operators act on.
    type Gene: Clone + PartialEq + Send + Sync;

    /// Decoded representation passed to objectives and constraints.
    type Decoded;

    /// Decode the raw genes into the phenotype.
    fn decode(&self) -> Self::Decoded;

    /// Number of raw genes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw gene slice.
    fn genes(&self) -> &[Self::Gene];

    /// Mutable raw gene slice for in-place operators.
    fn genes_mut(&mut self) -> &mut [Self::Gene];

    /// Replace the raw genes wholesale, keeping any non-gene state (such as
    /// a binary layout handle). Used by crossovers to build children.
    fn replace_genes(&mut self, genes: Vec<Self::Gene>);
}
