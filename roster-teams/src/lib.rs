//! Roster Teams - Partitioning a player pool into balanced teams
//!
//! This crate provides team generation:
//! - Player vectorization under weighted criteria
//! - Three partition strategies (random, snake draft, weighted-balanced)
//! - Bounded swap refinement
//! - Best-of-N selection by partition cost
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: generate_teams (orchestration)
//! - Level 2: best_of_runs (phases)
//! - Level 3: balanced_groups, snake_draft_groups, random_groups, refine_by_swaps (steps)
//! - Level 4: vectorization, configuration

mod balanced;
mod config;
mod partition;
mod refine;
mod selection;
mod vector;

pub use balanced::{balance_sizes, balanced_groups};
pub use config::{PartitionConfig, Strategy, DEFAULT_RUNS};
pub use partition::{
    balanced_teams, generate_teams, is_size_balanced, random_groups, snake_draft_groups, snake_slot,
};
pub use refine::{refine_by_swaps, RefineOutcome};
pub use selection::{best_of_runs, partition_cost, skill_variance, teammate_satisfaction};
pub use vector::{mean_vector, squared_distance, vectorize, PlayerVector, DIMENSIONS};
