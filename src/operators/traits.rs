//! Operator traits
//!
//! Operators are small config structs bound to a task as trait objects.
//! Mutation and crossover see a read-only [`TaskView`] of the task (problem
//! data, objective directions, current generation) plus the task's RNG;
//! selection drives the whole task through its population primitives. The
//! task performs every population write-back, so operators never touch
//! fitness bookkeeping directly.

use rand::rngs::StdRng;

use crate::error::EvoResult;
use crate::genome::traits::Genome;
use crate::individual::Individual;
use crate::operators::Params;
use crate::task::Task;

/// Read-only slice of task state handed to mutation and crossover.
pub struct TaskView<'a, D> {
    /// Shared problem data.
    pub data: &'a D,
    /// Per-objective direction weights (positive = maximize).
    pub obj_factors: &'a [f64],
    /// Generation counter, absent outside a driver run.
    pub generation: Option<u64>,
}

/// Rewrites a genome in place. The task clears fitness after the call.
pub trait Mutator<G: Genome, D>: Send + Sync {
    fn mutate(&self, ctx: &TaskView<'_, D>, genome: &mut G, params: &Params, rng: &mut StdRng);
}

/// Builds two children from two parents. Children must come back with
/// fitness absent; [`Individual::child_of`] takes care of that.
pub trait Crossover<G: Genome, D>: Send + Sync {
    fn cross(
        &self,
        ctx: &TaskView<'_, D>,
        parent_a: &Individual<G>,
        parent_b: &Individual<G>,
        params: &Params,
        rng: &mut StdRng,
    ) -> (Individual<G>, Individual<G>);
}

/// Replaces (part of) the population with crossover offspring.
pub trait Selector<G: Genome, D>: Send + Sync {
    fn select(&self, task: &mut Task<G, D>, params: &Params) -> EvoResult<()>;
}
