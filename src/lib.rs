//! # genetask
//!
//! An operator-pluggable genetic algorithm engine.
//!
//! A [`Task`](task::Task) owns a population, the objectives and constraints
//! that score it, the shared problem data, and the crossover, mutation, and
//! selection operators bound to it with their parameter maps. Generational
//! drivers in [`algorithms`] run the elitist loop; everything stochastic
//! flows through the task's single seedable RNG, so bounded runs are
//! reproducible.
//!
//! ## Quick start
//!
//! ```rust
//! use genetask::prelude::*;
//! use std::sync::Arc;
//!
//! let mut task: Task<FloatVector, ()> = Task::from_seed((), 42);
//! let objective: Arc<dyn Objective<FloatVector, ()>> =
//!     Arc::new(|g: &Vec<f64>, _: &()| -(g[0] - 3.0).powi(2));
//! task.set_objectives(vec![objective], vec![1.0])?;
//! task.bind_mutation(
//!     Arc::new(NormalMutation),
//!     Params::new().with("mp", 1.0).with("sd", 0.3),
//! );
//! task.bind_crossover(Arc::new(TwoPoint), Params::new());
//! task.bind_selection(Arc::new(VasconcelosSelection), Params::new().with("cp", 0.8));
//! let population = init::float_population(task.rng_mut(), 8, 1, -10.0, 10.0);
//! task.set_population(population);
//!
//! let config = GaConfig { elitism: 0.25, max_generations: 60, ..GaConfig::default() };
//! let best = general_ga(&mut task, &config, None)?;
//! # let _ = best;
//! # Ok::<(), genetask::error::EvolutionError>(())
//! ```

pub mod algorithms;
pub mod error;
pub mod genome;
pub mod individual;
pub mod init;
pub mod operators;
pub mod route;
pub mod sampling;
pub mod task;

pub mod prelude {
    pub use crate::algorithms::{cos_mutation_ga, general_ga, CosConfig, GaConfig, Report};
    pub use crate::error::{ConfigError, EvoResult, EvolutionError};
    pub use crate::genome::prelude::*;
    pub use crate::individual::Individual;
    pub use crate::init;
    pub use crate::operators::prelude::*;
    pub use crate::route::{route_cost, CostMatrix, TourContext};
    pub use crate::task::{Constraint, Objective, Task};
}
