//! Individuals: a genome plus its evaluation state
//!
//! Fitness is a vector (one entry per objective) and is absent until the
//! task evaluates the individual. Any genome change clears it; the engine
//! never carries a fitness that does not belong to the current genome.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::genome::traits::Genome;

/// A candidate solution with optional fitness and an opaque caller payload.
#[derive(Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Individual<G: Genome> {
    genome: G,
    fitness: Option<Vec<f64>>,
    /// Caller-attached payload; never interpreted by the engine, shared by
    /// handle between an individual and its clones.
    #[serde(skip)]
    data: Option<Arc<dyn Any + Send + Sync>>,
}

impl<G: Genome> Individual<G> {
    /// Fresh, unevaluated individual.
    pub fn new(genome: G) -> Self {
        Self {
            genome,
            fitness: None,
            data: None,
        }
    }

    /// Build an offspring: the parent's non-genome state with new raw genes
    /// and fitness absent.
    pub fn child_of(parent: &Self, genes: Vec<G::Gene>) -> Self {
        let mut child = parent.clone();
        child.genome.replace_genes(genes);
        child.fitness = None;
        child
    }

    pub fn genome(&self) -> &G {
        &self.genome
    }

    /// Mutable genome access for operator write-backs. The caller is
    /// responsible for clearing fitness afterwards; [`Task::mutate`] and
    /// friends always do.
    ///
    /// [`Task::mutate`]: crate::task::Task::mutate
    pub fn genome_mut(&mut self) -> &mut G {
        &mut self.genome
    }

    /// Replace the genome and clear fitness in one step.
    pub fn set_genome(&mut self, genome: G) {
        self.genome = genome;
        self.fitness = None;
    }

    pub fn fitness(&self) -> Option<&[f64]> {
        self.fitness.as_deref()
    }

    /// Fitness on a single objective, if evaluated.
    pub fn fitness_at(&self, objective: usize) -> Option<f64> {
        self.fitness.as_ref().map(|f| f[objective])
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    pub fn set_fitness(&mut self, fitness: Vec<f64>) {
        self.fitness = Some(fitness);
    }

    pub fn clear_fitness(&mut self) {
        self.fitness = None;
    }

    /// Attach an opaque payload.
    pub fn set_data<T: Any + Send + Sync>(&mut self, data: T) {
        self.data = Some(Arc::new(data));
    }

    /// Downcast the payload, if one of the requested type is attached.
    pub fn data<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.data.as_deref().and_then(|d| d.downcast_ref())
    }
}

impl<G: Genome + fmt::Debug> fmt::Debug for Individual<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Individual")
            .field("genome", &self.genome)
            .field("fitness", &self.fitness)
            .field("data", &self.data.as_ref().map(|_| "<opaque>"))
            .finish()
    }
}

impl<G: Genome + PartialEq> PartialEq for Individual<G> {
    fn eq(&self, other: &Self) -> bool {
        self.genome == other.genome && self.fitness == other.fitness
    }
}
