//! Criterion weights for balanced team generation

use serde::{Deserialize, Serialize};

/// Relative importance of each grouping criterion.
///
/// Weights are independent and need not sum to anything; zero disables a criterion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightSettings {
    /// Weight for balancing skill
    pub skill_level: u32,
    /// Weight for honoring teammate wishes
    pub teammate_preference: u32,
    /// Weight for honoring team size wishes
    pub team_size_preference: u32,
}

impl Default for WeightSettings {
    fn default() -> Self {
        Self {
            skill_level: 3,
            teammate_preference: 2,
            team_size_preference: 1,
        }
    }
}

impl WeightSettings {
    pub fn new(skill_level: u32, teammate_preference: u32, team_size_preference: u32) -> Self {
        Self {
            skill_level,
            teammate_preference,
            team_size_preference,
        }
    }

    /// Only skill matters
    pub fn skill_only() -> Self {
        Self::new(1, 0, 0)
    }

    /// True when every criterion is disabled
    pub fn is_zero(&self) -> bool {
        self.skill_level == 0 && self.teammate_preference == 0 && self.team_size_preference == 0
    }
}
