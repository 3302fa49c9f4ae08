//! Multi-run selection - keep the cheapest of several balanced partitions
//!
//! Level 2 - Phases

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use roster_core::{Player, WeightSettings};

use crate::balanced::balanced_groups;
use crate::refine::refine_by_swaps;

/// Population variance of the per-team average skill rating.
///
/// Empty teams count with an average of 0.
pub fn skill_variance<G: AsRef<[Player]>>(groups: &[G]) -> f64 {
    if groups.is_empty() {
        return 0.0;
    }

    let means: Vec<f64> = groups
        .iter()
        .map(|g| {
            let players = g.as_ref();
            if players.is_empty() {
                0.0
            } else {
                players.iter().map(|p| p.rating() as f64).sum::<f64>() / players.len() as f64
            }
        })
        .collect();

    let overall = means.iter().sum::<f64>() / means.len() as f64;
    means.iter().map(|m| (m - overall) * (m - overall)).sum::<f64>() / means.len() as f64
}

/// Fraction of stated teammate wishes that ended up on the same team.
///
/// Returns None when nobody stated a wish.
pub fn teammate_satisfaction<G: AsRef<[Player]>>(groups: &[G]) -> Option<f64> {
    let mut stated = 0u32;
    let mut satisfied = 0u32;

    for group in groups {
        let players = group.as_ref();
        for player in players {
            if let Some(wanted) = player.preferred_teammate() {
                stated += 1;
                if players.iter().any(|p| p.id == wanted) {
                    satisfied += 1;
                }
            }
        }
    }

    if stated == 0 {
        None
    } else {
        Some(satisfied as f64 / stated as f64)
    }
}

/// Partition cost: skill variance plus the teammate miss ratio.
///
/// A pool with no teammate wishes adds no penalty.
pub fn partition_cost<G: AsRef<[Player]>>(groups: &[G]) -> f64 {
    let miss = teammate_satisfaction(groups).map_or(0.0, |ratio| 1.0 - ratio);
    skill_variance(groups) + miss
}

/// Run the balanced partitioner `runs` times and keep the lowest cost.
///
/// Each run gets its own RNG seeded from `rng`, so the result is the same
/// whether runs execute in parallel or not. Ties keep the earliest run.
pub fn best_of_runs<R: Rng>(
    players: &[Player],
    team_count: usize,
    weights: &WeightSettings,
    runs: usize,
    parallel: bool,
    refine_iterations: Option<usize>,
    rng: &mut R,
) -> Vec<Vec<Player>> {
    if players.is_empty() || team_count == 0 {
        return Vec::new();
    }

    let runs = if runs == 0 {
        tracing::warn!("Best-of selection asked for 0 runs, running once");
        1
    } else {
        runs
    };

    let seeds: Vec<u64> = (0..runs).map(|_| rng.gen()).collect();

    let run_once = |seed: u64| {
        let mut run_rng = ChaCha8Rng::seed_from_u64(seed);
        let groups = balanced_groups(players, team_count, weights, &mut run_rng);
        let groups = match refine_iterations {
            Some(cap) => refine_by_swaps(groups, cap).groups,
            None => groups,
        };
        let cost = partition_cost(&groups);
        (cost, groups)
    };

    let candidates: Vec<(f64, Vec<Vec<Player>>)> = if parallel {
        seeds.par_iter().map(|&s| run_once(s)).collect()
    } else {
        seeds.iter().map(|&s| run_once(s)).collect()
    };

    let mut best: Option<(f64, Vec<Vec<Player>>)> = None;
    for (run, (cost, groups)) in candidates.into_iter().enumerate() {
        tracing::debug!("Balanced run {}: cost={:.4}", run + 1, cost);
        let better = match &best {
            Some((best_cost, _)) => cost < *best_cost,
            None => true,
        };
        if better {
            best = Some((cost, groups));
        }
    }

    match best {
        Some((cost, groups)) => {
            tracing::debug!("Best of {} balanced runs: cost={:.4}", runs, cost);
            groups
        }
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::balanced_teams;
    use roster_core::SkillLevel;

    fn p(id: &str, rating: u8) -> Player {
        Player::new(id, SkillLevel::from_rating(rating))
    }

    #[test]
    fn test_skill_variance() {
        let groups = vec![vec![p("a", 6), p("b", 2)], vec![p("c", 4), p("d", 4)]];
        assert_eq!(skill_variance(&groups), 0.0);

        let groups = vec![vec![p("a", 6)], vec![p("b", 2)]];
        assert_eq!(skill_variance(&groups), 4.0);
    }

    #[test]
    fn test_no_preferences_no_penalty() {
        let groups = vec![vec![p("a", 3)], vec![p("b", 3)]];
        assert_eq!(teammate_satisfaction(&groups), None);
        assert_eq!(partition_cost(&groups), 0.0);
    }

    #[test]
    fn test_players_without_preference_do_not_count() {
        // "a" wants "b" and gets it; "c" has no wish and sits alone
        let groups = vec![
            vec![p("a", 3).with_teammate("b"), p("b", 3)],
            vec![p("c", 3), p("d", 3)],
        ];
        assert_eq!(teammate_satisfaction(&groups), Some(1.0));
        assert_eq!(partition_cost(&groups), 0.0);
    }

    #[test]
    fn test_unmet_preference_is_penalized() {
        let groups = vec![
            vec![p("a", 3).with_teammate("c"), p("b", 3)],
            vec![p("c", 3).with_teammate("a"), p("d", 3)],
        ];
        assert_eq!(teammate_satisfaction(&groups), Some(0.0));
        assert_eq!(partition_cost(&groups), 1.0);
    }

    #[test]
    fn test_best_of_runs_parallel_matches_sequential() {
        let pool: Vec<Player> = (0..12).map(|i| p(&format!("p{}", i), (i % 8) as u8)).collect();
        let w = WeightSettings::default();

        let seq = best_of_runs(&pool, 3, &w, 5, false, None, &mut ChaCha8Rng::seed_from_u64(11));
        let par = best_of_runs(&pool, 3, &w, 5, true, None, &mut ChaCha8Rng::seed_from_u64(11));
        assert_eq!(seq, par);
    }

    #[test]
    fn test_best_of_runs_not_worse_than_single_run() {
        let pool: Vec<Player> = (0..16).map(|i| p(&format!("p{}", i), (i * 3 % 8) as u8)).collect();
        let w = WeightSettings::skill_only();

        // The first derived seed reproduces run 1 exactly
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let first_seed: u64 = rng.gen();
        let single = balanced_teams(&pool, 4, &w, &mut ChaCha8Rng::seed_from_u64(first_seed));
        assert_eq!(single.len(), 4);

        let best = best_of_runs(&pool, 4, &w, 6, false, None, &mut ChaCha8Rng::seed_from_u64(5));
        assert!(partition_cost(&best) <= partition_cost(&single));
    }

    #[test]
    fn test_best_of_zero_runs_still_partitions() {
        let pool: Vec<Player> = (0..4).map(|i| p(&format!("p{}", i), 1)).collect();
        let groups = best_of_runs(&pool, 2, &WeightSettings::default(), 0, false, None, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(groups.len(), 2);
    }
}
