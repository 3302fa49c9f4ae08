//! Player vectorization for distance-based grouping
//!
//! Level 4 - Utilities

use roster_core::{Player, TeamSizePreference, WeightSettings};

/// Number of grouping criteria (skill, teammate, size)
pub const DIMENSIONS: usize = 3;

/// One weighted value per criterion
pub type PlayerVector = [f64; DIMENSIONS];

/// Convert a player into a comparable vector.
///
/// * skill: rating / max rating
/// * teammate: 1 when there is no resolvable wish (never penalized), else 0
///   until the pair is actually co-assigned
/// * size: 1 for no wish or `Any`, else preferred size / (2 * average size)
///
/// Each dimension is scaled by its weight.
pub fn vectorize(
    player: &Player,
    avg_team_size: f64,
    pool: &[Player],
    weights: &WeightSettings,
) -> PlayerVector {
    let skill = player.skill_level.normalized();

    let teammate = match player.preferred_teammate() {
        Some(id) if pool.iter().any(|p| p.id == id) => 0.0,
        _ => 1.0,
    };

    let size = match player.size_preference() {
        TeamSizePreference::Any => 1.0,
        pref if avg_team_size > 0.0 => preferred_size(pref, avg_team_size) / (2.0 * avg_team_size),
        _ => 1.0,
    };

    [
        skill * weights.skill_level as f64,
        teammate * weights.teammate_preference as f64,
        size * weights.team_size_preference as f64,
    ]
}

/// Team size a player with this preference is aiming for
fn preferred_size(pref: TeamSizePreference, avg_team_size: f64) -> f64 {
    match pref {
        TeamSizePreference::Small => avg_team_size.floor().max(2.0),
        TeamSizePreference::Large | TeamSizePreference::Any => avg_team_size.ceil(),
    }
}

/// Squared Euclidean distance
pub fn squared_distance(a: &PlayerVector, b: &PlayerVector) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Component-wise mean (zero vector for no input)
pub fn mean_vector<'a, I>(vectors: I) -> PlayerVector
where
    I: IntoIterator<Item = &'a PlayerVector>,
{
    let mut sum = [0.0; DIMENSIONS];
    let mut count = 0usize;
    for v in vectors {
        for (s, x) in sum.iter_mut().zip(v.iter()) {
            *s += x;
        }
        count += 1;
    }
    if count > 0 {
        for s in sum.iter_mut() {
            *s /= count as f64;
        }
    }
    sum
}
