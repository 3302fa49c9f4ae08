//! Swap refinement - bounded hill climbing over cross-team swaps
//!
//! Level 3 - Steps

use roster_core::Player;

use crate::selection::partition_cost;

/// Smallest cost drop that counts as an improvement
const IMPROVEMENT_EPSILON: f64 = 1e-12;

/// Result of a refinement pass
#[derive(Clone, Debug)]
pub struct RefineOutcome {
    /// Best partition found
    pub groups: Vec<Vec<Player>>,
    /// Cost of `groups`
    pub cost: f64,
    /// Swaps applied
    pub iterations: usize,
    /// False when the iteration cap ran out first
    pub converged: bool,
}

/// Apply improving player swaps until none is left or the cap is hit.
///
/// Each iteration applies the first swap that strictly lowers
/// [`partition_cost`]. Swaps keep team sizes unchanged. Running out of
/// iterations is not an error: a warning is logged and the best partition
/// so far is returned.
pub fn refine_by_swaps(mut groups: Vec<Vec<Player>>, max_iterations: usize) -> RefineOutcome {
    let mut cost = partition_cost(&groups);
    let mut iterations = 0;

    loop {
        let Some((swap, new_cost)) = first_improving_swap(&mut groups, cost) else {
            tracing::debug!("Swap refinement converged after {} swaps, cost={:.4}", iterations, cost);
            return RefineOutcome {
                groups,
                cost,
                iterations,
                converged: true,
            };
        };

        if iterations == max_iterations {
            break;
        }

        let (i, a, j, b) = swap;
        swap_between(&mut groups, i, a, j, b);
        cost = new_cost;
        iterations += 1;
    }

    tracing::warn!(
        "Swap refinement stopped at iteration cap ({}), returning best partition so far (cost={:.4})",
        max_iterations,
        cost
    );

    RefineOutcome {
        groups,
        cost,
        iterations,
        converged: false,
    }
}

/// First swap `(i, a, j, b)` that lowers the cost, with the cost it reaches.
/// `groups` is left as it was.
fn first_improving_swap(
    groups: &mut [Vec<Player>],
    current: f64,
) -> Option<((usize, usize, usize, usize), f64)> {
    let team_count = groups.len();

    for i in 0..team_count {
        for j in (i + 1)..team_count {
            for a in 0..groups[i].len() {
                for b in 0..groups[j].len() {
                    swap_between(groups, i, a, j, b);
                    let cost = partition_cost(&*groups);
                    swap_between(groups, i, a, j, b);
                    if cost < current - IMPROVEMENT_EPSILON {
                        return Some(((i, a, j, b), cost));
                    }
                }
            }
        }
    }

    None
}

/// Swap player `a` of group `i` with player `b` of group `j` (i < j)
fn swap_between(groups: &mut [Vec<Player>], i: usize, a: usize, j: usize, b: usize) {
    let (left, right) = groups.split_at_mut(j);
    std::mem::swap(&mut left[i][a], &mut right[0][b]);
}
