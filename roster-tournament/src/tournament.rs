//! Tournament snapshots and the operations that produce new ones
//!
//! Level 1 - Orchestration

use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use roster_core::{Team, TeamId};

use crate::bracket::{generate_brackets, Bracket, Match, Round};
use crate::config::TournamentSettings;
use crate::error::{ProgressError, TournamentError};
use crate::progression::record_win;

/// Name used when a caller supplies none
pub const DEFAULT_TOURNAMENT_NAME: &str = "BYOT Tournament";

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 8;

/// A team entered in a tournament, with its running loss count
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentTeam {
    #[serde(flatten)]
    pub team: Team,
    pub losses: u32,
}

impl TournamentTeam {
    pub fn new(team: Team) -> Self {
        Self { team, losses: 0 }
    }

    pub fn id(&self) -> &str {
        self.team.id()
    }

    pub fn name(&self) -> &str {
        self.team.name()
    }
}

/// Immutable snapshot of a bracket tournament
///
/// Every operation takes `&self` and returns a fresh snapshot, so earlier
/// snapshots stay valid for undo or history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: String,
    pub name: String,
    pub teams: Vec<TournamentTeam>,
    pub settings: TournamentSettings,
    pub rounds: Vec<Round>,
    pub is_complete: bool,
    pub winner: Option<TeamId>,
    pub runner_up: Option<TeamId>,
}

impl Tournament {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Seed a new tournament from existing teams
    pub fn new<R: Rng>(
        name: &str,
        teams: &[Team],
        settings: TournamentSettings,
        rng: &mut R,
    ) -> Result<Self, TournamentError> {
        settings.validate()?;
        if teams.len() < 2 {
            return Err(TournamentError::TooFewTeams(teams.len()));
        }
        if !teams.len().is_power_of_two() {
            return Err(TournamentError::UnsupportedTeamCount(teams.len()));
        }
        let mut seen = FxHashSet::default();
        for team in teams {
            if !seen.insert(team.id()) {
                return Err(TournamentError::DuplicateTeam(team.id().to_string()));
            }
        }

        let name = if name.trim().is_empty() {
            DEFAULT_TOURNAMENT_NAME
        } else {
            name
        };
        let id = random_id(rng);
        let teams: Vec<TournamentTeam> = teams.iter().cloned().map(TournamentTeam::new).collect();
        let rounds = generate_brackets(&team_ids(&teams), &settings, rng);

        tracing::info!(
            id = %id,
            teams = teams.len(),
            double_elimination = settings.double_elimination,
            "Tournament created"
        );

        Ok(Self {
            id,
            name: name.to_string(),
            teams,
            settings,
            rounds,
            is_complete: false,
            winner: None,
            runner_up: None,
        })
    }

    /// Bring-your-own-team tournament from bare team names
    ///
    /// Blank names are skipped. Teams get ids `byot-<index>` by position
    /// in the surviving list.
    pub fn from_team_names<R: Rng, S: AsRef<str>>(
        name: &str,
        team_names: &[S],
        settings: TournamentSettings,
        rng: &mut R,
    ) -> Result<Self, TournamentError> {
        let teams: Vec<Team> = team_names
            .iter()
            .map(|n| n.as_ref().trim())
            .filter(|n| !n.is_empty())
            .enumerate()
            .map(|(i, n)| Team::new(format!("byot-{}", i), n, Vec::new()))
            .collect();
        Self::new(name, &teams, settings, rng)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Record one game win, or explain why it was rejected
    pub fn try_progress(
        &self,
        match_id: &str,
        winning_team_id: &str,
    ) -> Result<Tournament, ProgressError> {
        let mut next = self.clone();
        record_win(&mut next, match_id, winning_team_id)?;
        Ok(next)
    }

    /// Record one game win; invalid reports leave the snapshot unchanged
    pub fn progress(&self, match_id: &str, winning_team_id: &str) -> Tournament {
        match self.try_progress(match_id, winning_team_id) {
            Ok(next) => next,
            Err(e) => {
                tracing::warn!(match_id, team_id = winning_team_id, "Ignoring result: {}", e);
                self.clone()
            }
        }
    }

    /// Same teams and settings, fresh draw, no results
    pub fn reset<R: Rng>(&self, rng: &mut R) -> Tournament {
        let teams: Vec<TournamentTeam> = self
            .teams
            .iter()
            .map(|t| TournamentTeam::new(t.team.clone()))
            .collect();
        let rounds = generate_brackets(&team_ids(&teams), &self.settings, rng);
        tracing::info!(id = %self.id, "Tournament reset");
        Tournament {
            id: self.id.clone(),
            name: self.name.clone(),
            teams,
            settings: self.settings,
            rounds,
            is_complete: false,
            winner: None,
            runner_up: None,
        }
    }

    /// Stop early; no winner is declared
    pub fn end(&self) -> Tournament {
        let mut next = self.clone();
        next.is_complete = true;
        next
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Completed with a champion, as opposed to ended early
    pub fn is_finished(&self) -> bool {
        self.is_complete && self.winner.is_some()
    }

    pub fn team(&self, team_id: &str) -> Option<&TournamentTeam> {
        self.teams.iter().find(|t| t.id() == team_id)
    }

    pub fn find_match(&self, match_id: &str) -> Option<&Match> {
        self.matches().find(|m| m.id == match_id)
    }

    /// All matches, rounds in creation order
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.rounds.iter().flat_map(|r| r.matches.iter())
    }

    /// Matches ready to be played
    pub fn active_matches(&self) -> Vec<&Match> {
        if self.is_complete {
            return Vec::new();
        }
        self.matches().filter(|m| m.is_active()).collect()
    }

    pub fn rounds_in(&self, bracket: Bracket) -> impl Iterator<Item = &Round> {
        self.rounds.iter().filter(move |r| r.bracket == bracket)
    }

    /// Teams not yet eliminated
    pub fn alive_teams(&self) -> impl Iterator<Item = &TournamentTeam> {
        let limit = self.settings.elimination_losses();
        self.teams.iter().filter(move |t| t.losses < limit)
    }
}

fn team_ids(teams: &[TournamentTeam]) -> Vec<TeamId> {
    teams.iter().map(|t| t.id().to_string()).collect()
}

fn random_id<R: Rng>(rng: &mut R) -> String {
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}
