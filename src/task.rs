//! Task orchestration
//!
//! A [`Task`] owns the population, the objectives and constraints, the bound
//! operators with their parameter maps, the shared problem data, and the one
//! RNG every stochastic draw flows through. Drivers and selectors move the
//! population exclusively through the primitives here, which keeps the
//! fitness bookkeeping in a single place: any genome rewrite clears fitness,
//! and evaluation only touches individuals whose fitness is absent.

use std::cmp::Ordering;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{ConfigError, EvoResult, EvolutionError};
use crate::genome::traits::Genome;
use crate::individual::Individual;
use crate::operators::traits::{Crossover, Mutator, Selector, TaskView};
use crate::operators::Params;

/// Scores a decoded genome against the shared problem data. Called only when
/// every constraint passes.
pub trait Objective<G: Genome, D>: Send + Sync {
    fn value(&self, decoded: &G::Decoded, data: &D) -> f64;
}

impl<G, D, F> Objective<G, D> for F
where
    G: Genome,
    F: Fn(&G::Decoded, &D) -> f64 + Send + Sync,
{
    fn value(&self, decoded: &G::Decoded, data: &D) -> f64 {
        self(decoded, data)
    }
}

/// Counts constraint violations for a decoded genome; zero means feasible.
pub trait Constraint<G: Genome, D>: Send + Sync {
    fn violations(&self, decoded: &G::Decoded, data: &D) -> u32;
}

impl<G, D, F> Constraint<G, D> for F
where
    G: Genome,
    F: Fn(&G::Decoded, &D) -> u32 + Send + Sync,
{
    fn violations(&self, decoded: &G::Decoded, data: &D) -> u32 {
        self(decoded, data)
    }
}

/// Orchestrates one optimization problem over one population.
pub struct Task<G: Genome, D> {
    population: Vec<Individual<G>>,
    desired_size: usize,
    current_generation: Option<u64>,
    objectives: Vec<Arc<dyn Objective<G, D>>>,
    obj_factors: Vec<f64>,
    constraints: Vec<Arc<dyn Constraint<G, D>>>,
    penalties: Vec<f64>,
    mutation: Option<(Arc<dyn Mutator<G, D>>, Params)>,
    crossover: Option<(Arc<dyn Crossover<G, D>>, Params)>,
    selection: Option<(Arc<dyn Selector<G, D>>, Params)>,
    data: D,
    rng: StdRng,
}

impl<G: Genome, D> Task<G, D> {
    /// Empty task with entropy-seeded randomness.
    pub fn new(data: D) -> Self {
        Self::with_rng(data, StdRng::from_entropy())
    }

    /// Empty task with a fixed seed; runs bounded by generations (not wall
    /// time) are then bit-reproducible.
    pub fn from_seed(data: D, seed: u64) -> Self {
        Self::with_rng(data, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(data: D, rng: StdRng) -> Self {
        Self {
            population: Vec::new(),
            desired_size: 0,
            current_generation: None,
            objectives: Vec::new(),
            obj_factors: Vec::new(),
            constraints: Vec::new(),
            penalties: Vec::new(),
            mutation: None,
            crossover: None,
            selection: None,
            data,
            rng,
        }
    }

    // Population primitives.

    /// Install a population and fix the desired size to its length.
    pub fn set_population(&mut self, population: Vec<Individual<G>>) {
        self.desired_size = population.len();
        self.population = population;
    }

    /// Swap in a new population without touching the desired size.
    pub fn replace_population(&mut self, population: Vec<Individual<G>>) {
        self.population = population;
    }

    /// Append individuals, or prepend them when `front` is set (elites go to
    /// the front so ordering keeps them on top before truncation).
    pub fn append_population(&mut self, individuals: Vec<Individual<G>>, front: bool) {
        if front {
            self.population.splice(0..0, individuals);
        } else {
            self.population.extend(individuals);
        }
    }

    /// Cloned slice of the population. Panics when the range is out of
    /// bounds, like any slice.
    pub fn subpopulation_copy(&self, offset: usize, n: usize) -> Vec<Individual<G>> {
        self.population[offset..offset + n].to_vec()
    }

    pub fn population(&self) -> &[Individual<G>] {
        &self.population
    }

    pub fn individual(&self, index: usize) -> &Individual<G> {
        &self.population[index]
    }

    pub fn size(&self) -> usize {
        self.population.len()
    }

    pub fn desired_size(&self) -> usize {
        self.desired_size
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn generation(&self) -> Option<u64> {
        self.current_generation
    }

    /// Drivers set this per generation and clear it after the run.
    pub fn set_generation(&mut self, generation: Option<u64>) {
        self.current_generation = generation;
    }

    /// The shared random stream. Operators and initializers draw from here
    /// so a fixed seed fixes the whole run.
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    // Problem wiring.

    /// Register objectives with their direction weights (positive =
    /// maximize, negative = minimize; zero is rejected).
    pub fn set_objectives(
        &mut self,
        objectives: Vec<Arc<dyn Objective<G, D>>>,
        weights: Vec<f64>,
    ) -> Result<(), ConfigError> {
        if objectives.len() != weights.len() {
            return Err(ConfigError::WeightCountMismatch {
                objectives: objectives.len(),
                weights: weights.len(),
            });
        }
        if let Some(index) = weights.iter().position(|&w| w == 0.0) {
            return Err(ConfigError::ZeroWeight { index });
        }
        self.objectives = objectives;
        self.obj_factors = weights;
        Ok(())
    }

    pub fn obj_factors(&self) -> &[f64] {
        &self.obj_factors
    }

    /// Register constraints with one maximum penalty per objective; each
    /// stored penalty is `max_penalty / constraint_count`, so an individual
    /// failing every constraint scores the full maximum.
    pub fn set_constraints(
        &mut self,
        constraints: Vec<Arc<dyn Constraint<G, D>>>,
        max_penalties: Vec<f64>,
    ) -> Result<(), ConfigError> {
        if constraints.is_empty() {
            return Err(ConfigError::NoConstraints);
        }
        if max_penalties.len() != self.objectives.len() {
            return Err(ConfigError::PenaltyCountMismatch {
                penalties: max_penalties.len(),
                objectives: self.objectives.len(),
            });
        }
        let n = constraints.len() as f64;
        self.penalties = max_penalties.iter().map(|p| p / n).collect();
        self.constraints = constraints;
        Ok(())
    }

    // Operator bindings.

    pub fn bind_mutation(&mut self, operator: Arc<dyn Mutator<G, D>>, params: Params) {
        self.mutation = Some((operator, params));
    }

    pub fn bind_crossover(&mut self, operator: Arc<dyn Crossover<G, D>>, params: Params) {
        self.crossover = Some((operator, params));
    }

    pub fn bind_selection(&mut self, operator: Arc<dyn Selector<G, D>>, params: Params) {
        self.selection = Some((operator, params));
    }

    /// Hot-patch one mutation knob; the cosine-schedule driver rewrites
    /// `"mp"` here every generation.
    pub fn set_mutation_param(&mut self, key: &str, value: f64) {
        if let Some((_, params)) = &mut self.mutation {
            params.set(key, value);
        }
    }

    pub fn set_crossover_param(&mut self, key: &str, value: f64) {
        if let Some((_, params)) = &mut self.crossover {
            params.set(key, value);
        }
    }

    pub fn set_selection_param(&mut self, key: &str, value: f64) {
        if let Some((_, params)) = &mut self.selection {
            params.set(key, value);
        }
    }

    pub fn mutation_param(&self, key: &str) -> Option<f64> {
        self.mutation.as_ref().and_then(|(_, p)| p.get(key))
    }

    // Evaluation and ordering.

    /// Evaluate every individual with absent fitness: decode once, count
    /// constraint violations, then either score the objectives or charge
    /// `penalty * violations` per objective.
    pub fn evaluate(&mut self) -> EvoResult<()> {
        if self.objectives.is_empty() {
            return Err(EvolutionError::NoObjectives);
        }
        let objectives = &self.objectives;
        let constraints = &self.constraints;
        let penalties = &self.penalties;
        let data = &self.data;
        for individual in &mut self.population {
            if individual.is_evaluated() {
                continue;
            }
            individual.set_fitness(score(individual.genome(), objectives, constraints, penalties, data));
        }
        Ok(())
    }

    /// Parallel evaluation with the same contract as [`Task::evaluate`]:
    /// only absent-fitness individuals are touched, the RNG is not, and
    /// write-back is per-individual.
    #[cfg(feature = "parallel")]
    pub fn evaluate_parallel(&mut self) -> EvoResult<()>
    where
        D: Sync,
    {
        use rayon::prelude::*;

        if self.objectives.is_empty() {
            return Err(EvolutionError::NoObjectives);
        }
        let objectives = &self.objectives;
        let constraints = &self.constraints;
        let penalties = &self.penalties;
        let data = &self.data;
        self.population
            .par_iter_mut()
            .filter(|individual| !individual.is_evaluated())
            .for_each(|individual| {
                individual.set_fitness(score(
                    individual.genome(),
                    objectives,
                    constraints,
                    penalties,
                    data,
                ));
            });
        Ok(())
    }

    /// Stable multi-key sort, best first. `targets` selects and orders the
    /// objectives considered (default: all, in registration order). Absent
    /// fitness loses on every key regardless of direction.
    pub fn order_population(&mut self, targets: Option<&[usize]>) {
        let all: Vec<usize>;
        let targets = match targets {
            Some(t) => t,
            None => {
                all = (0..self.obj_factors.len()).collect();
                &all
            }
        };
        let factors = &self.obj_factors;
        self.population.sort_by(|a, b| rank(factors, targets, a, b));
    }

    /// Sort by all objectives, then drop adjacent individuals whose full
    /// fitness vectors are equal (absent equals absent). Not a global
    /// distinct-set.
    pub fn remove_duplicate_fitness(&mut self) {
        self.order_population(None);
        self.population.dedup_by(|a, b| a.fitness() == b.fitness());
    }

    /// Resize towards the desired size (optionally updating it first).
    /// Shrinking keeps the leading individuals, so order first. Growing
    /// clones uniformly chosen members of the ORIGINAL population, mutates
    /// the clones, and appends them unevaluated; returns whether growth
    /// happened (the caller must then re-evaluate and re-order).
    pub fn adjust_population_size(&mut self, target: Option<usize>) -> EvoResult<bool> {
        if let Some(n) = target {
            self.desired_size = n;
        }
        let current = self.population.len();
        if current >= self.desired_size {
            self.population.truncate(self.desired_size);
            return Ok(false);
        }
        if current == 0 {
            return Err(EvolutionError::EmptyPopulation);
        }

        let (operator, params) = self
            .mutation
            .as_ref()
            .map(|(op, p)| (Arc::clone(op), p.clone()))
            .ok_or(EvolutionError::OperatorMissing("mutation"))?;
        let view = TaskView {
            data: &self.data,
            obj_factors: &self.obj_factors,
            generation: self.current_generation,
        };
        let max_index = current - 1;
        while self.population.len() < self.desired_size {
            let pick = self.rng.gen_range(0..=max_index);
            let mut born = self.population[pick].clone();
            operator.mutate(&view, born.genome_mut(), &params, &mut self.rng);
            born.clear_fitness();
            self.population.push(born);
        }
        Ok(true)
    }

    // Operator delegation.

    /// Mutate every individual with the bound operator, clearing fitness.
    pub fn mutate(&mut self) -> EvoResult<()> {
        let (operator, params) = self
            .mutation
            .as_ref()
            .map(|(op, p)| (Arc::clone(op), p.clone()))
            .ok_or(EvolutionError::OperatorMissing("mutation"))?;
        let view = TaskView {
            data: &self.data,
            obj_factors: &self.obj_factors,
            generation: self.current_generation,
        };
        for individual in &mut self.population {
            operator.mutate(&view, individual.genome_mut(), &params, &mut self.rng);
            individual.clear_fitness();
        }
        Ok(())
    }

    /// Run the bound selector over the population.
    pub fn apply_selection(&mut self) -> EvoResult<()> {
        let (operator, params) = self
            .selection
            .as_ref()
            .map(|(op, p)| (Arc::clone(op), p.clone()))
            .ok_or(EvolutionError::OperatorMissing("selection"))?;
        operator.select(self, &params)
    }

    /// Cross two parents with the bound operator; parents are untouched and
    /// the children come back unevaluated.
    pub fn apply_crossover(
        &mut self,
        parent_a: &Individual<G>,
        parent_b: &Individual<G>,
    ) -> EvoResult<(Individual<G>, Individual<G>)> {
        let (operator, params) = self
            .crossover
            .as_ref()
            .map(|(op, p)| (Arc::clone(op), p.clone()))
            .ok_or(EvolutionError::OperatorMissing("crossover"))?;
        let view = TaskView {
            data: &self.data,
            obj_factors: &self.obj_factors,
            generation: self.current_generation,
        };
        Ok(operator.cross(&view, parent_a, parent_b, &params, &mut self.rng))
    }

    /// Cross the individuals at two slots and write the children back into
    /// those slots. When both slots coincide the second child stays.
    pub fn crossover_into(&mut self, slot_a: usize, slot_b: usize) -> EvoResult<()> {
        let parent_a = self.population[slot_a].clone();
        let parent_b = self.population[slot_b].clone();
        let (child_a, child_b) = self.apply_crossover(&parent_a, &parent_b)?;
        self.population[slot_a] = child_a;
        self.population[slot_b] = child_b;
        Ok(())
    }
}

fn score<G: Genome, D>(
    genome: &G,
    objectives: &[Arc<dyn Objective<G, D>>],
    constraints: &[Arc<dyn Constraint<G, D>>],
    penalties: &[f64],
    data: &D,
) -> Vec<f64> {
    let decoded = genome.decode();
    let violations: u32 = constraints.iter().map(|c| c.violations(&decoded, data)).sum();
    if violations == 0 {
        objectives.iter().map(|o| o.value(&decoded, data)).collect()
    } else {
        penalties.iter().map(|p| p * violations as f64).collect()
    }
}

fn rank<G: Genome>(
    factors: &[f64],
    targets: &[usize],
    a: &Individual<G>,
    b: &Individual<G>,
) -> Ordering {
    for &t in targets {
        let ordering = match (a.fitness_at(t), b.fitness_at(t)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => {
                if x == y {
                    Ordering::Equal
                } else if factors[t] > 0.0 {
                    // Maximize: higher first.
                    y.partial_cmp(&x).unwrap_or(Ordering::Equal)
                } else {
                    x.partial_cmp(&y).unwrap_or(Ordering::Equal)
                }
            }
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}
