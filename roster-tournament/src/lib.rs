//! Roster Tournament - Elimination brackets for teams
//!
//! This crate runs single and double elimination brackets:
//! - Bracket generation from a shuffled field
//! - Match progression with configurable win thresholds
//! - Lazily built loser bracket and a finals reset
//! - Standings derived from any snapshot
//!
//! Every transition returns a new `Tournament`; callers keep whichever
//! snapshot they need.
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: Tournament::new, progress, reset, end (orchestration)
//! - Level 2: record_win, compute_standings (phases)
//! - Level 3: generate_brackets, loser-bracket placement, finals (steps)
//! - Level 4: utilities, configuration

mod bracket;
mod config;
mod error;
mod progression;
mod standings;
mod tournament;

pub use bracket::{generate_brackets, match_id, Bracket, Match, MatchState, Round};
pub use config::TournamentSettings;
pub use error::{ProgressError, TournamentError};
pub use standings::{compute_standings, Standing, StandingStatus};
pub use tournament::{Tournament, TournamentTeam, DEFAULT_TOURNAMENT_NAME};
