//! Teams produced by a partition, plus the color palette used to name them

use std::path::Path;

use anyhow::Context;
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::RosterError;
use crate::player::Player;

/// Opaque team identifier
pub type TeamId = String;

/// Color names handed out to generated teams
pub const COLOR_NAMES: [&str; 10] = [
    "Teal", "Navy", "Coral", "Crimson", "Olive", "Amber", "Slate", "Indigo", "Sunset", "Butter",
];

/// A team of players.
///
/// Membership is fixed at construction; regrouping means partitioning again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: String,
    #[serde(default)]
    players: Vec<Player>,
}

impl Team {
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>, players: Vec<Player>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            players,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Mean skill rating (0.0 for an empty team)
    pub fn average_rating(&self) -> f64 {
        if self.players.is_empty() {
            0.0
        } else {
            let total: u32 = self.players.iter().map(|p| p.rating() as u32).sum();
            total as f64 / self.players.len() as f64
        }
    }

    /// Build `count` numbered teams ("1".."count") from member lists,
    /// named from a shuffled color palette
    pub fn numbered<R: Rng>(members: Vec<Vec<Player>>, rng: &mut R) -> Vec<Team> {
        let names = color_names(members.len(), rng);
        members
            .into_iter()
            .zip(names)
            .enumerate()
            .map(|(i, (players, name))| Team::new((i + 1).to_string(), name, players))
            .collect()
    }

    /// Build `count` empty numbered teams, for manual assignment
    pub fn empty_set<R: Rng>(count: usize, rng: &mut R) -> Vec<Team> {
        Self::numbered(vec![Vec::new(); count], rng)
    }

    /// Load a team list from a JSON file
    pub fn load_all(path: &Path) -> anyhow::Result<Vec<Team>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read teams file: {}", path.display()))?;
        let teams: Vec<Team> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse teams file: {}", path.display()))?;
        validate_partition(&teams)?;
        Ok(teams)
    }

    /// Save a team list as pretty JSON
    pub fn save_all(teams: &[Team], path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(teams)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl AsRef<[Player]> for Team {
    fn as_ref(&self) -> &[Player] {
        &self.players
    }
}

/// Pick `count` color names from a shuffled palette, repeating cyclically
/// when there are more teams than colors
pub fn color_names<R: Rng>(count: usize, rng: &mut R) -> Vec<String> {
    let mut palette = COLOR_NAMES.to_vec();
    palette.shuffle(rng);
    (0..count)
        .map(|i| palette[i % palette.len()].to_string())
        .collect()
}

/// Check that team ids are unique and no player is on two teams
pub fn validate_partition(teams: &[Team]) -> Result<(), RosterError> {
    let mut team_ids = FxHashSet::default();
    let mut player_ids = FxHashSet::default();

    for team in teams {
        if !team_ids.insert(team.id()) {
            return Err(RosterError::DuplicateTeam(team.id().to_string()));
        }
        for player in team.players() {
            if !player_ids.insert(player.id.as_str()) {
                return Err(RosterError::PlayerOnMultipleTeams(player.id.clone()));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::SkillLevel;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_average_rating() {
        let team = Team::new(
            "1",
            "Teal",
            vec![
                Player::new("a", SkillLevel::Expert),
                Player::new("b", SkillLevel::Intermediate),
            ],
        );
        assert_eq!(team.average_rating(), 5.5);
        assert_eq!(Team::new("2", "Navy", vec![]).average_rating(), 0.0);
    }

    #[test]
    fn test_color_names_unique_within_palette() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let names = color_names(COLOR_NAMES.len(), &mut rng);
        let unique: FxHashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), COLOR_NAMES.len());
    }

    #[test]
    fn test_color_names_repeat_past_palette() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let names = color_names(COLOR_NAMES.len() + 3, &mut rng);
        assert_eq!(names.len(), 13);
        assert_eq!(names[0], names[10]);
        assert_eq!(names[2], names[12]);
    }

    #[test]
    fn test_empty_set_numbering() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let teams = Team::empty_set(4, &mut rng);
        let ids: Vec<&str> = teams.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
        assert!(teams.iter().all(|t| t.is_empty()));
    }

    #[test]
    fn test_validate_partition_rejects_shared_player() {
        let p = Player::new("a", SkillLevel::New);
        let teams = vec![
            Team::new("1", "Teal", vec![p.clone()]),
            Team::new("2", "Navy", vec![p]),
        ];
        assert!(matches!(
            validate_partition(&teams),
            Err(RosterError::PlayerOnMultipleTeams(id)) if id == "a"
        ));
    }

    #[test]
    fn test_validate_partition_rejects_duplicate_team() {
        let teams = vec![Team::new("1", "Teal", vec![]), Team::new("1", "Navy", vec![])];
        assert!(matches!(validate_partition(&teams), Err(RosterError::DuplicateTeam(_))));
    }
}
