//! Error types for the engine
//!
//! Setup mistakes surface as [`ConfigError`]; anything that can stop a run
//! surfaces as [`EvolutionError`]. Slice misuse (out-of-range subpopulation
//! copies, layout width mismatches) panics like any other slice misuse.

use thiserror::Error;

/// Errors raised while wiring objectives, constraints, or operators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Objectives and direction weights must pair up one-to-one.
    #[error("expected one weight per objective, got {objectives} objectives and {weights} weights")]
    WeightCountMismatch { objectives: usize, weights: usize },

    /// A direction weight of zero gives no ordering for that objective.
    #[error("objective weight at index {index} is zero")]
    ZeroWeight { index: usize },

    /// Constraint penalties must pair up with the registered objectives.
    #[error("expected one max penalty per objective, got {penalties} penalties for {objectives} objectives")]
    PenaltyCountMismatch {
        penalties: usize,
        objectives: usize,
    },

    /// At least one constraint is required when installing penalties.
    #[error("constraint list is empty")]
    NoConstraints,
}

/// Errors raised while running a task or a driver.
#[derive(Debug, Error)]
pub enum EvolutionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An operation needed an operator binding that was never installed.
    #[error("no {0} operator bound to the task")]
    OperatorMissing(&'static str),

    /// Evaluation was requested before any objective was registered.
    #[error("no objectives registered")]
    NoObjectives,

    /// Drivers cannot evolve a population with no individuals.
    #[error("population is empty")]
    EmptyPopulation,
}

/// Convenience alias used throughout the crate.
pub type EvoResult<T> = Result<T, EvolutionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_convert_into_evolution_errors() {
        let config = ConfigError::WeightCountMismatch {
            objectives: 2,
            weights: 3,
        };
        let evolution: EvolutionError = config.clone().into();
        match evolution {
            EvolutionError::Config(inner) => assert_eq!(inner, config),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn errors_render_their_context() {
        let message = ConfigError::PenaltyCountMismatch {
            penalties: 1,
            objectives: 2,
        }
        .to_string();
        assert!(message.contains("1 penalties"));
        assert!(message.contains("2 objectives"));

        let message = EvolutionError::OperatorMissing("mutation").to_string();
        assert!(message.contains("mutation"));
    }
}
