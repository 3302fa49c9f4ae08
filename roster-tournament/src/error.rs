//! Error types for tournament construction and progression

/// Tournament cannot be built
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TournamentError {
    #[error("A tournament needs at least 2 teams, got {0}")]
    TooFewTeams(usize),

    #[error("Team count must be a power of two, got {0}")]
    UnsupportedTeamCount(usize),

    #[error("Duplicate team id: {0}")]
    DuplicateTeam(String),

    #[error("The {0} win threshold must be at least 1")]
    ZeroWinThreshold(&'static str),
}

/// Reason a reported win was not applied
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    #[error("Tournament is already complete")]
    TournamentComplete,

    #[error("Unknown match: {0}")]
    UnknownMatch(String),

    #[error("Match {0} is already complete")]
    MatchComplete(String),

    #[error("Match {0} is still waiting for a team")]
    MatchPending(String),

    #[error("Team {team_id} is not playing in match {match_id}")]
    TeamNotInMatch { match_id: String, team_id: String },
}
