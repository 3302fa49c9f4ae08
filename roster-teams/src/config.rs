//! Configuration types for team generation
//!
//! Level 4 - Utilities and configuration

use serde::{Deserialize, Serialize};

/// Partition strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Shuffle and deal round-robin
    Random,
    /// Sort by skill, deal in alternating direction
    SnakeDraft,
    /// Weighted constrained clustering, best of several runs
    Balanced,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::SnakeDraft
    }
}

/// Team generation configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionConfig {
    /// Strategy used to partition the pool
    pub strategy: Strategy,
    /// Balanced partitioner runs to choose from
    pub runs: usize,
    /// Whether balanced runs execute in parallel
    pub parallel: bool,
    /// Iteration cap for swap refinement (None = no refinement)
    pub refine_iterations: Option<usize>,
}

/// Default number of balanced runs
pub const DEFAULT_RUNS: usize = 5;

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::SnakeDraft,
            runs: DEFAULT_RUNS,
            parallel: true,
            refine_iterations: None,
        }
    }
}

impl PartitionConfig {
    /// Uniform random dealing
    pub fn random() -> Self {
        Self {
            strategy: Strategy::Random,
            ..Default::default()
        }
    }

    /// Skill-ranked snake draft
    pub fn snake_draft() -> Self {
        Self {
            strategy: Strategy::SnakeDraft,
            ..Default::default()
        }
    }

    /// Best of `runs` balanced partitions
    pub fn balanced(runs: usize) -> Self {
        Self {
            strategy: Strategy::Balanced,
            runs,
            ..Default::default()
        }
    }

    /// Enable swap refinement with an iteration cap
    pub fn with_refinement(mut self, max_iterations: usize) -> Self {
        self.refine_iterations = Some(max_iterations);
        self
    }

    /// Run balanced attempts on the calling thread
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
