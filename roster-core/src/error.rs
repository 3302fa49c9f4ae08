//! Error types for roster data

/// Invalid roster or partition data
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("Duplicate player id: {0}")]
    DuplicatePlayer(String),

    #[error("Duplicate team id: {0}")]
    DuplicateTeam(String),

    #[error("Player {0} appears on more than one team")]
    PlayerOnMultipleTeams(String),
}
