//! Roster Core - Data model for grouping players
//!
//! This crate provides the records shared by the grouping and bracket engines:
//! - Players with skill ratings and grouping preferences
//! - Teams and the color palette used to name them
//! - Weight settings for balanced grouping
//! - Roster files (JSON load/save)

pub mod error;
pub mod player;
pub mod roster;
pub mod team;
pub mod weights;

// Re-exports for convenient access
pub use error::RosterError;
pub use player::{Player, PlayerId, SkillLevel, TeamSizePreference};
pub use roster::Roster;
pub use team::{color_names, validate_partition, Team, TeamId, COLOR_NAMES};
pub use weights::WeightSettings;
