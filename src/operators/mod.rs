//! Genetic operators
//!
//! This module provides the operator traits, the crossover, mutation, and
//! selection implementations, and the [`Params`] maps their knobs live in.

pub mod crossover;
pub mod mutation;
pub mod selection;
pub mod traits;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Named numeric knobs for one operator binding.
///
/// Each binding on a task owns one map; drivers hot-patch entries between
/// generations (the cosine schedule rewrites `"mp"` every generation).
/// Recognized keys are documented on each operator; unknown keys are ignored.
/// Boolean knobs store 0.0/1.0, index knobs store the index as a float.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Params {
    values: HashMap<String, f64>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: f64) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    pub fn set(&mut self, key: &str, value: f64) {
        self.values.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn get_or(&self, key: &str, default: f64) -> f64 {
        self.get(key).unwrap_or(default)
    }

    pub fn get_usize_or(&self, key: &str, default: usize) -> usize {
        self.get(key).map(|v| v as usize).unwrap_or(default)
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).map(|v| v >= 0.5).unwrap_or(false)
    }
}

pub mod prelude {
    pub use super::crossover::*;
    pub use super::mutation::*;
    pub use super::selection::*;
    pub use super::traits::*;
    pub use super::Params;
}
