//! Roster - a player pool plus the weights used to group it

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::RosterError;
use crate::player::Player;
use crate::weights::WeightSettings;

/// Player pool for one grouping session
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub players: Vec<Player>,
    #[serde(default)]
    pub weights: WeightSettings,
}

impl Roster {
    pub fn new(players: Vec<Player>, weights: WeightSettings) -> Self {
        Self { players, weights }
    }

    /// Reject duplicate player ids
    pub fn validate(&self) -> Result<(), RosterError> {
        let mut seen = FxHashSet::default();
        for player in &self.players {
            if !seen.insert(player.id.as_str()) {
                return Err(RosterError::DuplicatePlayer(player.id.clone()));
            }
        }
        Ok(())
    }

    /// Look up a player by id
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Load from JSON file (accepts a full roster or a bare player array)
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let roster = match serde_json::from_str::<Roster>(&content) {
            Ok(roster) => roster,
            Err(_) => {
                let players: Vec<Player> = serde_json::from_str(&content)?;
                Roster::new(players, WeightSettings::default())
            }
        };

        roster.validate()?;
        Ok(roster)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
