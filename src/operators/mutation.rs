//! Mutation operators
//!
//! Mutators rewrite raw genes in place; the task clears fitness after every
//! call. The swap and normal mutators walk the genome with geometric strides
//! so the `mp` knob sets the per-gene mutation probability without drawing
//! one uniform per gene.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::Rng;

use crate::genome::traits::Genome;
use crate::operators::traits::{Mutator, TaskView};
use crate::operators::Params;
use crate::sampling;

/// Swap each geometrically visited position with a uniformly chosen one.
///
/// Params: `mp` — per-gene mutation probability (default 1.0).
#[derive(Clone, Copy, Debug, Default)]
pub struct SwapMutation;

impl<G: Genome, D> Mutator<G, D> for SwapMutation {
    fn mutate(&self, _ctx: &TaskView<'_, D>, genome: &mut G, params: &Params, rng: &mut StdRng) {
        let len = genome.len();
        if len == 0 {
            return;
        }
        let mp = params.get_or("mp", 1.0);
        let max_i = len - 1;
        // geometric() is always >= 1, so the first position is >= 0.
        let mut position = sampling::geometric(rng, mp) - 1;
        while position <= max_i {
            let other = rng.gen_range(0..=max_i);
            genome.genes_mut().swap(position, other);
            position = position.saturating_add(sampling::geometric(rng, mp));
        }
    }
}

/// Move the segment `[a, b)` behind the tail: the genome becomes
/// `[0, a) + [b, end) + [a, b)` for two uniformly chosen ordered positions.
///
/// Params: none.
#[derive(Clone, Copy, Debug, Default)]
pub struct InsertMutation;

impl<G: Genome, D> Mutator<G, D> for InsertMutation {
    fn mutate(&self, _ctx: &TaskView<'_, D>, genome: &mut G, _params: &Params, rng: &mut StdRng) {
        let len = genome.len();
        if len < 2 {
            return;
        }
        let mut lo = rng.gen_range(0..len);
        let mut hi = rng.gen_range(0..len);
        if lo > hi {
            std::mem::swap(&mut lo, &mut hi);
        }
        genome.genes_mut()[lo..].rotate_left(hi - lo);
    }
}

/// Replace each geometrically visited float gene with a Gaussian draw
/// centered on its current value.
///
/// Params: `mp` — per-gene mutation probability (default 1.0); `sd` —
/// standard deviation (default 1.0); `integer` — round draws to the nearest
/// integer when set.
#[derive(Clone, Copy, Debug, Default)]
pub struct NormalMutation;

impl<G: Genome<Gene = f64>, D> Mutator<G, D> for NormalMutation {
    fn mutate(&self, _ctx: &TaskView<'_, D>, genome: &mut G, params: &Params, rng: &mut StdRng) {
        let len = genome.len();
        if len == 0 {
            return;
        }
        let mp = params.get_or("mp", 1.0);
        let sd = params.get_or("sd", 1.0);
        let integer = params.get_bool("integer");
        let max_i = len - 1;
        let mut position = sampling::geometric(rng, mp) - 1;
        while position <= max_i {
            let genes = genome.genes_mut();
            let drawn = sampling::gaussian(rng, genes[position], sd);
            genes[position] = if integer { drawn.round() } else { drawn };
            position = position.saturating_add(sampling::geometric(rng, mp));
        }
    }
}

/// Delegate each call to one uniformly chosen member operator, passing the
/// shared params through.
pub struct MultipleMutation<G: Genome, D> {
    operators: Vec<Arc<dyn Mutator<G, D>>>,
}

impl<G: Genome, D> MultipleMutation<G, D> {
    pub fn new(operators: Vec<Arc<dyn Mutator<G, D>>>) -> Self {
        Self { operators }
    }
}

impl<G: Genome, D> Clone for MultipleMutation<G, D> {
    fn clone(&self) -> Self {
        Self {
            operators: self.operators.clone(),
        }
    }
}

impl<G: Genome, D> Mutator<G, D> for MultipleMutation<G, D> {
    fn mutate(&self, ctx: &TaskView<'_, D>, genome: &mut G, params: &Params, rng: &mut StdRng) {
        if self.operators.is_empty() {
            return;
        }
        let pick = rng.gen_range(0..self.operators.len());
        self.operators[pick].mutate(ctx, genome, params, rng);
    }
}
