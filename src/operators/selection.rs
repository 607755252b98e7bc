//! Selection operators
//!
//! Selectors replace population slots with crossover offspring through the
//! task's primitives. Both schemes write children back where the parents
//! stood, so population size never changes during selection.

use rand::Rng;

use crate::error::EvoResult;
use crate::genome::traits::Genome;
use crate::individual::Individual;
use crate::operators::traits::Selector;
use crate::operators::Params;
use crate::sampling;
use crate::task::Task;

/// Best-worst pairing over a population ordered best-first: rank `minor`
/// meets rank `size - 1 - minor` for `minor = 0 ..= size/2`, crossing over
/// with probability `cp`. Exactly one uniform is drawn per pair, in rank
/// order.
///
/// Params: `cp` — per-pair crossover probability (default 1.0).
#[derive(Clone, Copy, Debug, Default)]
pub struct VasconcelosSelection;

impl<G: Genome, D> Selector<G, D> for VasconcelosSelection {
    fn select(&self, task: &mut Task<G, D>, params: &Params) -> EvoResult<()> {
        let cp = params.get_or("cp", 1.0);
        let size = task.size();
        if size < 2 {
            return Ok(());
        }
        for minor in 0..=size / 2 {
            let mayor = size - 1 - minor;
            let draw: f64 = task.rng_mut().gen();
            if draw < cp {
                task.crossover_into(minor, mayor)?;
            }
        }
        Ok(())
    }
}

/// K-way tournaments on a single objective. Each match samples `k` distinct
/// entrants per parent, keeps the best on objective `obj_index` under its
/// direction weight (unevaluated individuals lose), crosses the two winners
/// over, and writes the children back at the winners' slots.
///
/// Params: `k` — entrants per tournament (default 2); `matches` — number of
/// matches (default: population size); `obj_index` — objective judged
/// (default 0).
#[derive(Clone, Copy, Debug, Default)]
pub struct TournamentSelection;

fn beats<G: Genome>(a: &Individual<G>, b: &Individual<G>, objective: usize, maximize: bool) -> bool {
    match (a.fitness_at(objective), b.fitness_at(objective)) {
        (Some(x), Some(y)) => {
            if maximize {
                x > y
            } else {
                x < y
            }
        }
        (Some(_), None) => true,
        _ => false,
    }
}

impl<G: Genome, D> Selector<G, D> for TournamentSelection {
    fn select(&self, task: &mut Task<G, D>, params: &Params) -> EvoResult<()> {
        let size = task.size();
        if size < 2 {
            return Ok(());
        }
        let k = params.get_usize_or("k", 2).max(1);
        let matches = params.get_usize_or("matches", size);
        let objective = params.get_usize_or("obj_index", 0);
        let maximize = task
            .obj_factors()
            .get(objective)
            .map(|&w| w > 0.0)
            .unwrap_or(true);

        for _ in 0..matches {
            let mut winners = [0usize; 2];
            for slot in &mut winners {
                let entrants = sampling::distinct_indices(task.rng_mut(), size, k);
                let mut best = entrants[0];
                for &i in &entrants[1..] {
                    if beats(task.individual(i), task.individual(best), objective, maximize) {
                        best = i;
                    }
                }
                *slot = best;
            }
            task.crossover_into(winners[0], winners[1])?;
        }
        Ok(())
    }
}
