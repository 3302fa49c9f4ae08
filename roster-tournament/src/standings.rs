//! Per-team standings derived from a tournament snapshot
//!
//! Level 2 - Reporting

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use roster_core::TeamId;

use crate::tournament::Tournament;

/// Where a team stands right now
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StandingStatus {
    Winner,
    RunnerUp,
    InPlay,
    Eliminated,
}

impl fmt::Display for StandingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StandingStatus::Winner => "Winner",
            StandingStatus::RunnerUp => "Runner-up",
            StandingStatus::InPlay => "In Play",
            StandingStatus::Eliminated => "Eliminated",
        };
        f.write_str(label)
    }
}

/// Standing of one team
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub team_id: TeamId,
    pub name: String,
    /// Matches won, across all brackets
    pub wins: u32,
    pub losses: u32,
    pub status: StandingStatus,
}

impl Tournament {
    /// Standings sorted by status, then wins (descending), then losses
    pub fn standings(&self) -> Vec<Standing> {
        compute_standings(self)
    }
}

/// Derive standings from match winners and loss counts
pub fn compute_standings(tournament: &Tournament) -> Vec<Standing> {
    let mut wins: FxHashMap<&str, u32> = FxHashMap::default();
    for m in tournament.matches().filter(|m| m.is_complete) {
        if let Some(winner) = m.winner_id.as_deref() {
            *wins.entry(winner).or_insert(0) += 1;
        }
    }

    let limit = tournament.settings.elimination_losses();
    let mut standings: Vec<Standing> = tournament
        .teams
        .iter()
        .map(|team| {
            let id = team.id();
            let status = if tournament.is_complete && tournament.winner.as_deref() == Some(id) {
                StandingStatus::Winner
            } else if tournament.is_complete && tournament.runner_up.as_deref() == Some(id) {
                StandingStatus::RunnerUp
            } else if team.losses >= limit {
                StandingStatus::Eliminated
            } else {
                StandingStatus::InPlay
            };
            Standing {
                team_id: id.to_string(),
                name: team.name().to_string(),
                wins: wins.get(id).copied().unwrap_or(0),
                losses: team.losses,
                status,
            }
        })
        .collect();

    standings.sort_by(|a, b| {
        a.status
            .cmp(&b.status)
            .then(b.wins.cmp(&a.wins))
            .then(a.losses.cmp(&b.losses))
    });
    standings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TournamentSettings;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use roster_core::Team;

    fn tournament(count: usize, settings: TournamentSettings) -> Tournament {
        let teams: Vec<Team> = (1..=count)
            .map(|i| Team::new(i.to_string(), format!("Team {}", i), Vec::new()))
            .collect();
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        Tournament::new("League Night", &teams, settings, &mut rng).unwrap()
    }

    fn play_first_active(t: &Tournament) -> Option<Tournament> {
        let m = t.active_matches().first().map(|m| (*m).clone())?;
        let team = m.team1_id.clone()?;
        Some(t.progress(&m.id, &team))
    }

    fn total_wins(standings: &[Standing]) -> u32 {
        standings.iter().map(|s| s.wins).sum()
    }

    #[test]
    fn test_fresh_standings() {
        let t = tournament(4, TournamentSettings::default());
        let standings = t.standings();
        assert_eq!(standings.len(), 4);
        assert!(standings
            .iter()
            .all(|s| s.status == StandingStatus::InPlay && s.wins == 0 && s.losses == 0));
    }

    #[test]
    fn test_wins_match_completed_matches() {
        let mut t = tournament(8, TournamentSettings::default());
        while let Some(next) = play_first_active(&t) {
            t = next;
            let completed = t.matches().filter(|m| m.is_complete).count() as u32;
            assert_eq!(total_wins(&t.standings()), completed);
        }
        assert!(t.is_complete);
    }

    #[test]
    fn test_completed_statuses_and_order() {
        let mut t = tournament(4, TournamentSettings::single_elimination(1));
        while let Some(next) = play_first_active(&t) {
            t = next;
        }
        let standings = t.standings();
        assert_eq!(standings[0].status, StandingStatus::Winner);
        assert_eq!(Some(&standings[0].team_id), t.winner.as_ref());
        assert_eq!(standings[0].wins, 2);
        assert_eq!(standings[1].status, StandingStatus::RunnerUp);
        assert_eq!(Some(&standings[1].team_id), t.runner_up.as_ref());
        assert!(standings[2..]
            .iter()
            .all(|s| s.status == StandingStatus::Eliminated));
    }

    #[test]
    fn test_ended_early_has_no_winner() {
        let t = tournament(4, TournamentSettings::single_elimination(1));
        let t = play_first_active(&t).unwrap().end();
        let standings = t.standings();
        assert!(standings.iter().all(|s| s.status != StandingStatus::Winner));
        assert_eq!(
            standings
                .iter()
                .filter(|s| s.status == StandingStatus::Eliminated)
                .count(),
            1
        );
        assert_eq!(standings[0].wins, 1);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(StandingStatus::RunnerUp.to_string(), "Runner-up");
        assert_eq!(StandingStatus::InPlay.to_string(), "In Play");
    }
}
