//! Generational GA drivers
//!
//! Both drivers run the same elitist loop over a fully wired task: snapshot
//! the elite prefix, select, mutate, evaluate, fold the elite back in, drop
//! duplicate fitness, and resize back to the desired population. The cosine
//! variant additionally rewrites the mutation probability every generation
//! so exploration breathes over the run.

use std::time::{Duration, Instant};

use crate::error::{EvoResult, EvolutionError};
use crate::genome::traits::Genome;
use crate::individual::Individual;
use crate::task::Task;

/// Driver settings shared by both loops.
#[derive(Clone, Debug)]
pub struct GaConfig {
    /// Fraction of the population copied to the next generation unchanged.
    pub elitism: f64,
    /// Hard generation bound.
    pub max_generations: u64,
    /// Wall-clock budget, checked after each generation body.
    pub time_budget: Option<Duration>,
    /// Invoke the report callback every this many generations.
    pub report_every: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            elitism: 0.1,
            max_generations: 100,
            time_budget: None,
            report_every: None,
        }
    }
}

/// Cosine mutation schedule on top of [`GaConfig`]: `mp` swings between 0
/// and `max_mp` with a period of `cycle` generations.
#[derive(Clone, Debug)]
pub struct CosConfig {
    pub max_mp: f64,
    pub cycle: f64,
    pub ga: GaConfig,
}

/// Periodic observer: generation, best fitness vector, best decoded genome.
pub type Report<'a, G> = &'a mut dyn FnMut(u64, &[f64], &<G as Genome>::Decoded);

/// Elitist generational GA. Returns a clone of the best individual.
pub fn general_ga<G: Genome, D>(
    task: &mut Task<G, D>,
    config: &GaConfig,
    report: Option<Report<'_, G>>,
) -> EvoResult<Individual<G>> {
    run(task, config, None, report)
}

/// Generational GA with the cosine mutation-probability schedule.
pub fn cos_mutation_ga<G: Genome, D>(
    task: &mut Task<G, D>,
    config: &CosConfig,
    report: Option<Report<'_, G>>,
) -> EvoResult<Individual<G>> {
    let half = config.max_mp / 2.0;
    let omega = std::f64::consts::TAU / config.cycle;
    task.set_mutation_param("mp", config.max_mp);
    run(task, &config.ga, Some((half, omega)), report)
}

fn run<G: Genome, D>(
    task: &mut Task<G, D>,
    config: &GaConfig,
    mp_schedule: Option<(f64, f64)>,
    mut report: Option<Report<'_, G>>,
) -> EvoResult<Individual<G>> {
    if task.size() == 0 {
        return Err(EvolutionError::EmptyPopulation);
    }
    let started = Instant::now();
    let n_elite = (task.size() as f64 * config.elitism).floor() as usize;

    task.evaluate()?;
    task.order_population(None);

    for generation in 0..config.max_generations {
        task.set_generation(Some(generation));
        if let Some((half, omega)) = mp_schedule {
            task.set_mutation_param("mp", (generation as f64 * omega).cos() * half + half);
        }

        let elite = task.subpopulation_copy(0, n_elite.min(task.size()));
        task.apply_selection()?;
        task.mutate()?;
        task.evaluate()?;
        task.append_population(elite, true);
        task.remove_duplicate_fitness();
        if task.adjust_population_size(None)? {
            task.evaluate()?;
            task.order_population(None);
        }

        if let (Some(every), Some(callback)) = (config.report_every, report.as_mut()) {
            if every > 0 && generation % every == 0 {
                let best = task.individual(0);
                let fitness = best.fitness().unwrap_or(&[]);
                let decoded = best.genome().decode();
                callback(generation, fitness, &decoded);
            }
        }

        if let Some(budget) = config.time_budget {
            if started.elapsed() >= budget {
                break;
            }
        }
    }

    task.set_generation(None);
    Ok(task.individual(0).clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::float_vector::FloatVector;
    use crate::init;
    use crate::operators::crossover::TwoPoint;
    use crate::operators::mutation::NormalMutation;
    use crate::operators::selection::VasconcelosSelection;
    use crate::operators::Params;
    use crate::task::Objective;
    use std::sync::Arc;

    fn quadratic_task(seed: u64) -> Task<FloatVector, ()> {
        let mut task = Task::from_seed((), seed);
        let objective: Arc<dyn Objective<FloatVector, ()>> =
            Arc::new(|g: &Vec<f64>, _: &()| -(g[0] - 3.0).powi(2));
        task.set_objectives(vec![objective], vec![1.0]).unwrap();
        task.bind_mutation(
            Arc::new(NormalMutation),
            Params::new().with("mp", 1.0).with("sd", 0.3),
        );
        task.bind_crossover(Arc::new(TwoPoint), Params::new());
        task.bind_selection(Arc::new(VasconcelosSelection), Params::new().with("cp", 0.8));
        let population = init::float_population(task.rng_mut(), 4, 1, -10.0, 10.0);
        task.set_population(population);
        task
    }

    #[test]
    fn general_ga_converges_on_the_quadratic() {
        let mut task = quadratic_task(42);
        let config = GaConfig {
            elitism: 0.5,
            max_generations: 50,
            ..GaConfig::default()
        };
        let best = general_ga(&mut task, &config, None).unwrap();
        let x = best.genome().genes()[0];
        assert!((x - 3.0).abs() < 0.5, "best gene was {x}");
        assert!(task.generation().is_none());
        assert_eq!(task.size(), 4);
    }

    #[test]
    fn empty_populations_are_rejected() {
        let mut task: Task<FloatVector, ()> = Task::from_seed((), 1);
        let err = general_ga(&mut task, &GaConfig::default(), None);
        assert!(matches!(err, Err(EvolutionError::EmptyPopulation)));
    }

    #[test]
    fn report_fires_on_the_configured_cadence() {
        let mut task = quadratic_task(7);
        let config = GaConfig {
            elitism: 0.5,
            max_generations: 10,
            report_every: Some(3),
            ..GaConfig::default()
        };
        let mut seen = Vec::new();
        let mut callback = |generation: u64, fitness: &[f64], _decoded: &Vec<f64>| {
            assert_eq!(fitness.len(), 1);
            seen.push(generation);
        };
        general_ga(&mut task, &config, Some(&mut callback)).unwrap();
        assert_eq!(seen, vec![0, 3, 6, 9]);
    }

    #[test]
    fn cosine_schedule_rewrites_the_mutation_probability() {
        let mut task = quadratic_task(11);
        let config = CosConfig {
            max_mp: 0.8,
            cycle: 8.0,
            ga: GaConfig {
                elitism: 0.5,
                max_generations: 13,
                ..GaConfig::default()
            },
        };
        cos_mutation_ga(&mut task, &config, None).unwrap();
        // Last generation is g = 12: mp = cos(12 * tau / 8) * 0.4 + 0.4.
        let expected = (12.0 * std::f64::consts::TAU / 8.0).cos() * 0.4 + 0.4;
        let mp = task.mutation_param("mp").unwrap();
        assert!((mp - expected).abs() < 1e-12, "mp was {mp}");
    }

    #[test]
    fn time_budget_stops_the_loop_early() {
        let mut task = quadratic_task(5);
        let config = GaConfig {
            elitism: 0.5,
            max_generations: u64::MAX,
            time_budget: Some(Duration::from_millis(50)),
            ..GaConfig::default()
        };
        let started = Instant::now();
        general_ga(&mut task, &config, None).unwrap();
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
