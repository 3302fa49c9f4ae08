//! Weighted-balanced partitioning (constrained online clustering)
//!
//! Level 3 - Steps

use rand::seq::SliceRandom;
use rand::Rng;
use roster_core::{Player, WeightSettings};

use crate::vector::{mean_vector, squared_distance, vectorize, PlayerVector, DIMENSIONS};

/// Assign players to `team_count` groups by nearest running centroid.
///
/// Players are visited in shuffled order; each goes to the closest team that
/// is not yet at `ceil(total / team_count)`, ties broken at random. A final
/// pass evens out sizes so no two teams differ by more than one.
pub fn balanced_groups<R: Rng>(
    players: &[Player],
    team_count: usize,
    weights: &WeightSettings,
    rng: &mut R,
) -> Vec<Vec<Player>> {
    if players.is_empty() || team_count == 0 {
        return Vec::new();
    }

    if weights.is_zero() {
        tracing::debug!("All weights are zero, balanced assignment is uniform random");
    }

    let avg_size = players.len() as f64 / team_count as f64;
    let max_size = players.len().div_ceil(team_count);

    let mut order: Vec<&Player> = players.iter().collect();
    order.shuffle(rng);

    let vectors: Vec<PlayerVector> = order
        .iter()
        .map(|p| vectorize(p, avg_size, players, weights))
        .collect();

    let mut centers: Vec<PlayerVector> = (0..team_count)
        .map(|_| random_center(weights, rng))
        .collect();
    let mut members: Vec<Vec<usize>> = vec![Vec::new(); team_count];

    for (i, vector) in vectors.iter().enumerate() {
        let team = nearest_open_team(vector, &centers, &members, max_size, rng);
        members[team].push(i);
        centers[team] = mean_vector(members[team].iter().map(|&m| &vectors[m]));
    }

    let mut groups: Vec<Vec<Player>> = members
        .into_iter()
        .map(|idxs| idxs.into_iter().map(|i| order[i].clone()).collect())
        .collect();

    balance_sizes(&mut groups, rng);
    groups
}

/// Move random players from the largest to the smallest group until
/// sizes differ by at most one
pub fn balance_sizes<R: Rng>(groups: &mut [Vec<Player>], rng: &mut R) {
    loop {
        let Some((largest, smallest)) = size_extremes(groups) else {
            return;
        };
        if groups[largest].len() - groups[smallest].len() <= 1 {
            return;
        }
        let idx = rng.gen_range(0..groups[largest].len());
        let moved = groups[largest].remove(idx);
        groups[smallest].push(moved);
    }
}

/// Indices of the first largest and first smallest group
fn size_extremes(groups: &[Vec<Player>]) -> Option<(usize, usize)> {
    let max = groups.iter().map(Vec::len).max()?;
    let min = groups.iter().map(Vec::len).min()?;
    let largest = groups.iter().position(|g| g.len() == max)?;
    let smallest = groups.iter().position(|g| g.len() == min)?;
    Some((largest, smallest))
}

/// Uniform random starting centroid inside the weighted space
fn random_center<R: Rng>(weights: &WeightSettings, rng: &mut R) -> PlayerVector {
    let scale = [
        weights.skill_level as f64,
        weights.teammate_preference as f64,
        weights.team_size_preference as f64,
    ];
    let mut center = [0.0; DIMENSIONS];
    for (c, s) in center.iter_mut().zip(scale) {
        *c = rng.gen::<f64>() * s;
    }
    center
}

/// Closest team with room left, uniform random among exact ties
fn nearest_open_team<R: Rng>(
    vector: &PlayerVector,
    centers: &[PlayerVector],
    members: &[Vec<usize>],
    max_size: usize,
    rng: &mut R,
) -> usize {
    let mut best_dist = f64::INFINITY;
    let mut best: Vec<usize> = Vec::new();

    for (team, center) in centers.iter().enumerate() {
        if members[team].len() >= max_size {
            continue;
        }
        let dist = squared_distance(vector, center);
        if dist < best_dist {
            best_dist = dist;
            best.clear();
            best.push(team);
        } else if dist == best_dist {
            best.push(team);
        }
    }

    // max_size * team_count >= players, so some team always has room
    match best.len() {
        0 => 0,
        1 => best[0],
        n => best[rng.gen_range(0..n)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use roster_core::SkillLevel;

    fn make_pool(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(format!("p{}", i), SkillLevel::from_rating((i % 8) as u8)))
            .collect()
    }

    fn sizes(groups: &[Vec<Player>]) -> Vec<usize> {
        groups.iter().map(Vec::len).collect()
    }

    #[test]
    fn test_balanced_groups_sizes() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for n in [1, 5, 7, 12, 23] {
            for teams in 1..=6 {
                let groups = balanced_groups(&make_pool(n), teams, &WeightSettings::default(), &mut rng);
                let s = sizes(&groups);
                assert_eq!(s.len(), teams);
                assert_eq!(s.iter().sum::<usize>(), n);
                assert!(s.iter().max().unwrap() - s.iter().min().unwrap() <= 1, "{:?}", s);
            }
        }
    }

    #[test]
    fn test_balanced_groups_empty_input() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert!(balanced_groups(&[], 3, &WeightSettings::default(), &mut rng).is_empty());
        assert!(balanced_groups(&make_pool(4), 0, &WeightSettings::default(), &mut rng).is_empty());
    }

    #[test]
    fn test_balanced_groups_deterministic_with_seed() {
        let pool = make_pool(10);
        let a = balanced_groups(&pool, 3, &WeightSettings::default(), &mut ChaCha8Rng::seed_from_u64(3));
        let b = balanced_groups(&pool, 3, &WeightSettings::default(), &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_weights_still_balanced() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let groups = balanced_groups(&make_pool(9), 4, &WeightSettings::new(0, 0, 0), &mut rng);
        let s = sizes(&groups);
        assert!(s.iter().max().unwrap() - s.iter().min().unwrap() <= 1);
    }

    #[test]
    fn test_exact_ties_break_at_random() {
        let origin = [0.0; DIMENSIONS];
        let centers = vec![origin; 4];
        let members: Vec<Vec<usize>> = vec![Vec::new(); 4];

        let mut picked = [false; 4];
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            picked[nearest_open_team(&origin, &centers, &members, 2, &mut rng)] = true;
        }
        assert_eq!(picked, [true; 4]);
    }

    #[test]
    fn test_single_open_team_always_chosen() {
        let origin = [0.0; DIMENSIONS];
        let centers = vec![origin; 3];
        let members = vec![vec![0, 1], Vec::new(), vec![2, 3]];

        for seed in 0..16 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            assert_eq!(nearest_open_team(&origin, &centers, &members, 2, &mut rng), 1);
        }
    }

    #[test]
    fn test_zero_weights_first_player_lands_anywhere() {
        let pool = make_pool(8);
        let weights = WeightSettings::new(0, 0, 0);
        let mut seen = [false; 4];
        for seed in 0..64 {
            let groups = balanced_groups(&pool, 4, &weights, &mut ChaCha8Rng::seed_from_u64(seed));
            for (team, group) in groups.iter().enumerate() {
                if group.iter().any(|p| p.id == "p0") {
                    seen[team] = true;
                }
            }
        }
        assert!(seen.iter().filter(|&&s| s).count() > 1, "{:?}", seen);
    }

    #[test]
    fn test_balance_sizes_evens_out() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut groups = vec![make_pool(6), Vec::new(), Vec::new()];
        balance_sizes(&mut groups, &mut rng);
        assert_eq!(sizes(&groups), vec![2, 2, 2]);
    }
}
