//! Crossover operators
//!
//! All crossovers take two parents and return exactly two children with
//! fresh raw genomes and absent fitness. Parents are never mutated.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::Rng;

use crate::genome::tour::Tour;
use crate::genome::traits::Genome;
use crate::individual::Individual;
use crate::operators::traits::{Crossover, TaskView};
use crate::operators::Params;
use crate::route::TourContext;

/// Single-cut recombination. The cut falls in `[1, len - 1]`, so each child
/// always takes genes from both parents. Genomes shorter than two genes (or
/// mismatched lengths) yield parent clones with fitness cleared.
#[derive(Clone, Copy, Debug, Default)]
pub struct OnePoint;

impl<G: Genome, D> Crossover<G, D> for OnePoint {
    fn cross(
        &self,
        _ctx: &TaskView<'_, D>,
        parent_a: &Individual<G>,
        parent_b: &Individual<G>,
        _params: &Params,
        rng: &mut StdRng,
    ) -> (Individual<G>, Individual<G>) {
        let genes_a = parent_a.genome().genes();
        let genes_b = parent_b.genome().genes();
        let len = genes_a.len();
        if len < 2 || genes_b.len() != len {
            return (
                Individual::child_of(parent_a, genes_a.to_vec()),
                Individual::child_of(parent_b, genes_b.to_vec()),
            );
        }

        let cut = rng.gen_range(1..len);
        let child_a = [&genes_a[..cut], &genes_b[cut..]].concat();
        let child_b = [&genes_b[..cut], &genes_a[cut..]].concat();
        (
            Individual::child_of(parent_a, child_a),
            Individual::child_of(parent_b, child_b),
        )
    }
}

/// Two-cut recombination. Both cuts fall in `[0, len - 1]` and are ordered;
/// the children exchange the middle segment `[a, b)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TwoPoint;

impl<G: Genome, D> Crossover<G, D> for TwoPoint {
    fn cross(
        &self,
        _ctx: &TaskView<'_, D>,
        parent_a: &Individual<G>,
        parent_b: &Individual<G>,
        _params: &Params,
        rng: &mut StdRng,
    ) -> (Individual<G>, Individual<G>) {
        let genes_a = parent_a.genome().genes();
        let genes_b = parent_b.genome().genes();
        let len = genes_a.len();
        if len == 0 || genes_b.len() != len {
            return (
                Individual::child_of(parent_a, genes_a.to_vec()),
                Individual::child_of(parent_b, genes_b.to_vec()),
            );
        }

        let mut lo = rng.gen_range(0..len);
        let mut hi = rng.gen_range(0..len);
        if lo > hi {
            std::mem::swap(&mut lo, &mut hi);
        }
        let child_a = [&genes_a[..lo], &genes_b[lo..hi], &genes_a[hi..]].concat();
        let child_b = [&genes_b[..lo], &genes_a[lo..hi], &genes_b[hi..]].concat();
        (
            Individual::child_of(parent_a, child_a),
            Individual::child_of(parent_b, child_b),
        )
    }
}

/// Position index of every node in a tour.
fn position_map(nodes: &[usize]) -> HashMap<usize, usize> {
    nodes.iter().enumerate().map(|(i, &n)| (n, i)).collect()
}

/// First node at or after `from` (in parent order) still legal for a child,
/// wrapping to a scan from the front. Parents permute the same node set, so
/// a legal node always exists while the legal set is non-empty.
fn next_forward(nodes: &[usize], from: usize, legal: &HashSet<usize>) -> usize {
    nodes[from.min(nodes.len())..]
        .iter()
        .chain(nodes.iter())
        .copied()
        .find(|n| legal.contains(n))
        .unwrap_or(nodes[0])
}

/// First legal node scanning backwards from `from` (exclusive), wrapping to
/// a forward scan from the front.
fn next_backward(nodes: &[usize], from: usize, legal: &HashSet<usize>) -> usize {
    nodes[..from.min(nodes.len())]
        .iter()
        .rev()
        .chain(nodes.iter())
        .copied()
        .find(|n| legal.contains(n))
        .unwrap_or(nodes[0])
}

/// Sequential constructive crossover for tours (Ahmed, 2010 family).
///
/// Two children grow at once: the left child forward from the start node,
/// the right child backward from the route's far end. Each step takes one
/// candidate per parent (the next still-unused node in that parent's order)
/// and keeps the one whose connecting edge wins under the task's direction:
/// the first objective weight decides whether cheaper or costlier edges win.
/// Requires task data implementing [`TourContext`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Scx;

impl<D: TourContext> Crossover<Tour, D> for Scx {
    fn cross(
        &self,
        ctx: &TaskView<'_, D>,
        parent_a: &Individual<Tour>,
        parent_b: &Individual<Tour>,
        _params: &Params,
        _rng: &mut StdRng,
    ) -> (Individual<Tour>, Individual<Tour>) {
        let genes_a = parent_a.genome().genes();
        let genes_b = parent_b.genome().genes();
        let size = genes_a.len();
        if size == 0 || genes_b.len() != size {
            return (
                Individual::child_of(parent_a, genes_a.to_vec()),
                Individual::child_of(parent_b, genes_b.to_vec()),
            );
        }

        let data = ctx.data;
        let minimize = !ctx.obj_factors.first().map(|&w| w > 0.0).unwrap_or(false);
        let start = data.start();
        let map_a = position_map(genes_a);
        let map_b = position_map(genes_b);
        let mut legal_left: HashSet<usize> = genes_a.iter().copied().collect();
        let mut legal_right = legal_left.clone();

        // Left child seed: whichever parent's first node has the winning
        // edge out of the start node. Ties keep parent B's node.
        let cost_a = data.edge_cost(start, genes_a[0]);
        let cost_b = data.edge_cost(start, genes_b[0]);
        let mut last_left = if (cost_a < cost_b) != minimize {
            genes_b[0]
        } else {
            genes_a[0]
        };
        let mut left = Vec::with_capacity(size);
        left.push(last_left);
        legal_left.remove(&last_left);

        // Right child seed from the parents' final nodes. Circuits judge the
        // closing edge like any other; open routes invert the comparison so
        // the node left farthest from the start wins under minimization.
        let cost_a = data.edge_cost(genes_a[size - 1], start);
        let cost_b = data.edge_cost(genes_b[size - 1], start);
        let take_b = if data.circuit() {
            (cost_a < cost_b) != minimize
        } else {
            (cost_a > cost_b) != minimize
        };
        let mut last_right = if take_b { genes_b[size - 1] } else { genes_a[size - 1] };
        let mut right = vec![0usize; size];
        right[size - 1] = last_right;
        legal_right.remove(&last_right);

        for slot in (0..size - 1).rev() {
            // Left child extends forward.
            let from_a = map_a.get(&last_left).map_or(0, |&p| p + 1);
            let from_b = map_b.get(&last_left).map_or(0, |&p| p + 1);
            let cand_a = next_forward(genes_a, from_a, &legal_left);
            let cand_b = next_forward(genes_b, from_b, &legal_left);
            let cost_a = data.edge_cost(last_left, cand_a);
            let cost_b = data.edge_cost(last_left, cand_b);
            last_left = if (cost_a < cost_b) != minimize { cand_b } else { cand_a };
            left.push(last_left);
            legal_left.remove(&last_left);

            // Right child extends backward; edges point INTO the last-placed
            // node.
            let upto_a = map_a.get(&last_right).copied().unwrap_or(0);
            let upto_b = map_b.get(&last_right).copied().unwrap_or(0);
            let cand_a = next_backward(genes_a, upto_a, &legal_right);
            let cand_b = next_backward(genes_b, upto_b, &legal_right);
            let cost_a = data.edge_cost(cand_a, last_right);
            let cost_b = data.edge_cost(cand_b, last_right);
            last_right = if (cost_a < cost_b) != minimize { cand_b } else { cand_a };
            right[slot] = last_right;
            legal_right.remove(&last_right);
        }

        (
            Individual::child_of(parent_a, left),
            Individual::child_of(parent_b, right),
        )
    }
}

/// Cost-free variant of [`Scx`]: both seeds come from parent A and the
/// source parent alternates every step starting with parent B, both children
/// reading the same source each step. Fully deterministic.
#[derive(Clone, Copy, Debug, Default)]
pub struct PseudoScx;

impl<D> Crossover<Tour, D> for PseudoScx {
    fn cross(
        &self,
        _ctx: &TaskView<'_, D>,
        parent_a: &Individual<Tour>,
        parent_b: &Individual<Tour>,
        _params: &Params,
        _rng: &mut StdRng,
    ) -> (Individual<Tour>, Individual<Tour>) {
        let genes_a = parent_a.genome().genes();
        let genes_b = parent_b.genome().genes();
        let size = genes_a.len();
        if size == 0 || genes_b.len() != size {
            return (
                Individual::child_of(parent_a, genes_a.to_vec()),
                Individual::child_of(parent_b, genes_b.to_vec()),
            );
        }

        let map_a = position_map(genes_a);
        let map_b = position_map(genes_b);
        let mut legal_left: HashSet<usize> = genes_a.iter().copied().collect();
        let mut legal_right = legal_left.clone();

        let mut last_left = genes_a[0];
        let mut left = Vec::with_capacity(size);
        left.push(last_left);
        legal_left.remove(&last_left);

        let mut last_right = genes_a[size - 1];
        let mut right = vec![0usize; size];
        right[size - 1] = last_right;
        legal_right.remove(&last_right);

        let mut take_from_b = true;
        for slot in (0..size - 1).rev() {
            let (nodes, map) = if take_from_b {
                (genes_b, &map_b)
            } else {
                (genes_a, &map_a)
            };

            let from = map.get(&last_left).map_or(0, |&p| p + 1);
            last_left = next_forward(nodes, from, &legal_left);
            left.push(last_left);
            legal_left.remove(&last_left);

            let upto = map.get(&last_right).copied().unwrap_or(0);
            last_right = next_backward(nodes, upto, &legal_right);
            right[slot] = last_right;
            legal_right.remove(&last_right);

            take_from_b = !take_from_b;
        }

        (
            Individual::child_of(parent_a, left),
            Individual::child_of(parent_b, right),
        )
    }
}
