//! Bracket data and initial bracket generation
//!
//! Level 3 - Bracket structure and Level 4 - Utilities

use rand::seq::SliceRandom;
use rand::Rng;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use roster_core::TeamId;

use crate::config::TournamentSettings;

/// Which bracket a round belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bracket {
    Winner,
    Loser,
    Final,
}

impl Bracket {
    fn id_prefix(self) -> &'static str {
        match self {
            Bracket::Winner => "winner",
            Bracket::Loser => "loser",
            Bracket::Final => "final",
        }
    }
}

/// Where a match sits in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchState {
    /// At least one slot is still empty
    Pending,
    /// Both teams known, winner not yet decided
    Active,
    Complete,
}

/// One pairing of two team slots
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub team1_id: Option<TeamId>,
    pub team2_id: Option<TeamId>,
    pub team1_wins: u32,
    pub team2_wins: u32,
    pub is_complete: bool,
    pub winner_id: Option<TeamId>,
    pub round: u32,
    pub bracket: Bracket,
    /// 1-based position within the round
    pub match_number: u32,
}

impl Match {
    /// Create an undecided match
    pub fn new(
        bracket: Bracket,
        round: u32,
        match_number: u32,
        team1_id: Option<TeamId>,
        team2_id: Option<TeamId>,
    ) -> Self {
        Self {
            id: match_id(bracket, round, match_number),
            team1_id,
            team2_id,
            team1_wins: 0,
            team2_wins: 0,
            is_complete: false,
            winner_id: None,
            round,
            bracket,
            match_number,
        }
    }

    pub fn state(&self) -> MatchState {
        if self.is_complete {
            MatchState::Complete
        } else if self.team1_id.is_some() && self.team2_id.is_some() {
            MatchState::Active
        } else {
            MatchState::Pending
        }
    }

    pub fn is_active(&self) -> bool {
        self.state() == MatchState::Active
    }

    pub fn has_team(&self, team_id: &str) -> bool {
        self.team1_id.as_deref() == Some(team_id) || self.team2_id.as_deref() == Some(team_id)
    }

    /// The other team once the match is decided
    pub fn loser_id(&self) -> Option<&str> {
        let winner = self.winner_id.as_deref()?;
        if self.team1_id.as_deref() == Some(winner) {
            self.team2_id.as_deref()
        } else {
            self.team1_id.as_deref()
        }
    }

    /// Exactly one slot filled and still undecided
    pub fn is_half_filled(&self) -> bool {
        !self.is_complete && (self.team1_id.is_some() != self.team2_id.is_some())
    }

    /// Put `team_id` in the first empty slot; false if both are taken
    pub fn fill_open_slot(&mut self, team_id: TeamId) -> bool {
        if self.team1_id.is_none() {
            self.team1_id = Some(team_id);
            true
        } else if self.team2_id.is_none() {
            self.team2_id = Some(team_id);
            true
        } else {
            false
        }
    }
}

/// Matches sharing a bracket and round number
///
/// Serializes with a derived `is_complete` field; it is ignored on input.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Round {
    pub round_number: u32,
    pub bracket: Bracket,
    pub matches: Vec<Match>,
}

impl Round {
    pub fn new(round_number: u32, bracket: Bracket) -> Self {
        Self {
            round_number,
            bracket,
            matches: Vec::new(),
        }
    }

    /// True once every match in the round has a winner
    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(|m| m.is_complete)
    }

    /// Append an undecided match numbered after the existing ones
    pub fn push_match(&mut self, team1_id: Option<TeamId>, team2_id: Option<TeamId>) {
        let number = self.matches.len() as u32 + 1;
        self.matches.push(Match::new(
            self.bracket,
            self.round_number,
            number,
            team1_id,
            team2_id,
        ));
    }
}

impl Serialize for Round {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Round", 4)?;
        state.serialize_field("round_number", &self.round_number)?;
        state.serialize_field("bracket", &self.bracket)?;
        state.serialize_field("matches", &self.matches)?;
        state.serialize_field("is_complete", &self.is_complete())?;
        state.end()
    }
}

/// Match ids: `winner_r1_m1`, `loser_r2_m1`, `final_1`
pub fn match_id(bracket: Bracket, round: u32, match_number: u32) -> String {
    match bracket {
        Bracket::Final => format!("final_{}", match_number),
        _ => format!("{}_r{}_m{}", bracket.id_prefix(), round, match_number),
    }
}

/// Shuffle the field and lay out the whole winner bracket
///
/// Round 1 pairs teams in shuffled order. Later rounds hold empty slots,
/// half as many matches each, down to a single final winner-bracket match.
/// Loser-bracket rounds are created during play. Fewer than two teams
/// yields no rounds.
pub fn generate_brackets<R: Rng>(
    team_ids: &[TeamId],
    settings: &TournamentSettings,
    rng: &mut R,
) -> Vec<Round> {
    if team_ids.len() < 2 {
        return Vec::new();
    }

    let mut order = team_ids.to_vec();
    order.shuffle(rng);

    let mut first = Round::new(1, Bracket::Winner);
    for pair in order.chunks(2) {
        first.push_match(Some(pair[0].clone()), pair.get(1).cloned());
    }

    let mut match_count = first.matches.len();
    let mut rounds = vec![first];
    while match_count > 1 {
        match_count = match_count.div_ceil(2);
        let mut round = Round::new(rounds.len() as u32 + 1, Bracket::Winner);
        for _ in 0..match_count {
            round.push_match(None, None);
        }
        rounds.push(round);
    }

    tracing::debug!(
        teams = team_ids.len(),
        winner_rounds = rounds.len(),
        double_elimination = settings.double_elimination,
        "Generated bracket"
    );

    rounds
}
