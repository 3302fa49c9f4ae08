//! Configuration types for tournament play
//!
//! Level 4 - Utilities and configuration

use serde::{Deserialize, Serialize};

use crate::bracket::Bracket;
use crate::error::TournamentError;

/// Tournament format and win thresholds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSettings {
    /// Two losses to eliminate instead of one
    pub double_elimination: bool,
    /// Game wins needed to take a winner/loser bracket match
    pub preliminary_matches_per_round: u32,
    /// Game wins needed to take a finals match
    pub championship_matches_per_round: u32,
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            double_elimination: true,
            preliminary_matches_per_round: 1,
            championship_matches_per_round: 1,
        }
    }
}

impl TournamentSettings {
    /// Single elimination, `matches_to_win` wins per match
    pub fn single_elimination(matches_to_win: u32) -> Self {
        Self {
            double_elimination: false,
            preliminary_matches_per_round: matches_to_win,
            championship_matches_per_round: matches_to_win,
        }
    }

    /// Double elimination, `matches_to_win` wins per match
    pub fn double_elimination(matches_to_win: u32) -> Self {
        Self {
            double_elimination: true,
            preliminary_matches_per_round: matches_to_win,
            championship_matches_per_round: matches_to_win,
        }
    }

    /// Set the finals threshold
    pub fn with_championship_matches(mut self, matches_to_win: u32) -> Self {
        self.championship_matches_per_round = matches_to_win;
        self
    }

    /// Both thresholds must be at least one
    pub fn validate(&self) -> Result<(), TournamentError> {
        if self.preliminary_matches_per_round == 0 {
            return Err(TournamentError::ZeroWinThreshold("preliminary"));
        }
        if self.championship_matches_per_round == 0 {
            return Err(TournamentError::ZeroWinThreshold("championship"));
        }
        Ok(())
    }

    /// Wins needed to decide a match in `bracket`
    pub fn wins_required(&self, bracket: Bracket) -> u32 {
        match bracket {
            Bracket::Final => self.championship_matches_per_round,
            Bracket::Winner | Bracket::Loser => self.preliminary_matches_per_round,
        }
    }

    /// Losses at which a team is out
    pub fn elimination_losses(&self) -> u32 {
        if self.double_elimination {
            2
        } else {
            1
        }
    }
}
