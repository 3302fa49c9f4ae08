//! Player records and their rating/preference attributes

use serde::{Deserialize, Serialize};

/// Opaque player identifier
pub type PlayerId = String;

/// Ordinal skill level, mapped to an integer rating
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillLevel {
    New,
    Novice,
    Beginner,
    Developing,
    Intermediate,
    Skilled,
    Advanced,
    Expert,
}

impl SkillLevel {
    /// All levels, weakest first
    pub const ALL: [SkillLevel; 8] = [
        SkillLevel::New,
        SkillLevel::Novice,
        SkillLevel::Beginner,
        SkillLevel::Developing,
        SkillLevel::Intermediate,
        SkillLevel::Skilled,
        SkillLevel::Advanced,
        SkillLevel::Expert,
    ];

    /// Highest rating on the scale
    pub const MAX_RATING: u8 = 7;

    /// Integer rating (New = 0 .. Expert = 7)
    pub fn rating(self) -> u8 {
        match self {
            SkillLevel::New => 0,
            SkillLevel::Novice => 1,
            SkillLevel::Beginner => 2,
            SkillLevel::Developing => 3,
            SkillLevel::Intermediate => 4,
            SkillLevel::Skilled => 5,
            SkillLevel::Advanced => 6,
            SkillLevel::Expert => 7,
        }
    }

    /// Rating normalized to [0, 1]
    pub fn normalized(self) -> f64 {
        self.rating() as f64 / Self::MAX_RATING as f64
    }

    /// Level for a rating, clamping anything above the scale to Expert
    pub fn from_rating(rating: u8) -> Self {
        Self::ALL[(rating as usize).min(Self::ALL.len() - 1)]
    }
}

impl Default for SkillLevel {
    fn default() -> Self {
        SkillLevel::New
    }
}

/// Preferred team size
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamSizePreference {
    Small,
    Large,
    Any,
}

impl Default for TeamSizePreference {
    fn default() -> Self {
        TeamSizePreference::Any
    }
}

/// A rated player in the pool
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub skill_level: SkillLevel,
    /// None behaves as `Any`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_size_preference: Option<TeamSizePreference>,
    /// Id of a wished-for teammate; need not be mutual or present in the pool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teammate_preference: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl Player {
    /// Create a player with no preferences
    pub fn new(id: impl Into<PlayerId>, skill_level: SkillLevel) -> Self {
        Self {
            id: id.into(),
            first_name: String::new(),
            last_name: String::new(),
            skill_level,
            team_size_preference: None,
            teammate_preference: None,
            emoji: None,
        }
    }

    /// Set display names
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    /// Set team size preference
    pub fn with_size_preference(mut self, pref: TeamSizePreference) -> Self {
        self.team_size_preference = Some(pref);
        self
    }

    /// Set teammate preference
    pub fn with_teammate(mut self, teammate: impl Into<PlayerId>) -> Self {
        self.teammate_preference = Some(teammate.into());
        self
    }

    /// Integer skill rating
    pub fn rating(&self) -> u8 {
        self.skill_level.rating()
    }

    /// Effective size preference (missing = Any)
    pub fn size_preference(&self) -> TeamSizePreference {
        self.team_size_preference.unwrap_or_default()
    }

    /// Stated teammate id, ignoring blank strings
    pub fn preferred_teammate(&self) -> Option<&str> {
        self.teammate_preference
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }

    /// "First Last", falling back to the id when both names are blank
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            self.id.clone()
        } else {
            name.to_string()
        }
    }
}
