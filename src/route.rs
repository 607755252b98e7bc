//! Routing-task data
//!
//! SCX and route-length objectives only need edge costs, a fixed start node,
//! and whether the route closes back on itself. [`TourContext`] is that
//! capability; task data types implement it. [`CostMatrix`] is the obvious
//! dense implementation. Building cost matrices from coordinates is the
//! caller's business.

use serde::{Deserialize, Serialize};

/// Edge-cost view a routing task's data must provide.
pub trait TourContext: Send + Sync {
    /// Cost of travelling `from -> to`.
    fn edge_cost(&self, from: usize, to: usize) -> f64;

    /// The fixed start node, excluded from genomes.
    fn start(&self) -> usize;

    /// Whether routes return to the start node.
    fn circuit(&self) -> bool;
}

/// Dense edge-cost matrix indexed by node id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostMatrix {
    costs: Vec<Vec<f64>>,
    start: usize,
    circuit: bool,
}

impl CostMatrix {
    pub fn new(costs: Vec<Vec<f64>>, start: usize, circuit: bool) -> Self {
        Self {
            costs,
            start,
            circuit,
        }
    }

    /// Number of nodes the matrix covers.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

impl TourContext for CostMatrix {
    fn edge_cost(&self, from: usize, to: usize) -> f64 {
        self.costs[from][to]
    }

    fn start(&self) -> usize {
        self.start
    }

    fn circuit(&self) -> bool {
        self.circuit
    }
}

/// Total cost of a tour: start to first node, each consecutive edge, and the
/// closing edge when the context is a circuit. Usable directly as a
/// route-length objective.
pub fn route_cost<D: TourContext>(tour: &[usize], data: &D) -> f64 {
    let Some((&first, rest)) = tour.split_first() else {
        return 0.0;
    };
    let mut total = data.edge_cost(data.start(), first);
    let mut prev = first;
    for &node in rest {
        total += data.edge_cost(prev, node);
        prev = node;
    }
    if data.circuit() {
        total += data.edge_cost(prev, data.start());
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn matrix(circuit: bool) -> CostMatrix {
        CostMatrix::new(
            vec![
                vec![0.0, 1.0, 4.0, 3.0],
                vec![1.0, 0.0, 1.0, 5.0],
                vec![4.0, 1.0, 0.0, 1.0],
                vec![3.0, 5.0, 1.0, 0.0],
            ],
            0,
            circuit,
        )
    }

    #[test]
    fn open_route_cost_skips_the_closing_edge() {
        assert_relative_eq!(route_cost(&[1, 2, 3], &matrix(false)), 1.0 + 1.0 + 1.0);
    }

    #[test]
    fn circuit_cost_returns_to_the_start() {
        assert_relative_eq!(route_cost(&[1, 2, 3], &matrix(true)), 1.0 + 1.0 + 1.0 + 3.0);
    }

    #[test]
    fn empty_tour_costs_nothing() {
        assert_relative_eq!(route_cost(&[], &matrix(true)), 0.0);
    }
}
