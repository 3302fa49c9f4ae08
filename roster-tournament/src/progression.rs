//! Applying game results to a working copy of a tournament
//!
//! Level 2 - Match resolution and Level 3 - Bracket placement

use roster_core::TeamId;

use crate::bracket::{Bracket, MatchState, Round};
use crate::error::ProgressError;
use crate::tournament::Tournament;

// ============================================================================
// Level 2 - Match resolution
// ============================================================================

/// Record one game win for `winning_team_id` in `match_id`
///
/// Mutates `tournament`, which must be a private copy. On error the copy
/// may be left partially updated and should be discarded.
pub(crate) fn record_win(
    tournament: &mut Tournament,
    match_id: &str,
    winning_team_id: &str,
) -> Result<(), ProgressError> {
    if tournament.is_complete {
        return Err(ProgressError::TournamentComplete);
    }

    let (round_idx, match_idx) = locate_match(&tournament.rounds, match_id)
        .ok_or_else(|| ProgressError::UnknownMatch(match_id.to_string()))?;
    let required = {
        let m = &tournament.rounds[round_idx].matches[match_idx];
        tournament.settings.wins_required(m.bracket)
    };

    let m = &mut tournament.rounds[round_idx].matches[match_idx];
    match m.state() {
        MatchState::Complete => return Err(ProgressError::MatchComplete(m.id.clone())),
        MatchState::Pending => return Err(ProgressError::MatchPending(m.id.clone())),
        MatchState::Active => {}
    }

    let wins = if m.team1_id.as_deref() == Some(winning_team_id) {
        m.team1_wins += 1;
        m.team1_wins
    } else if m.team2_id.as_deref() == Some(winning_team_id) {
        m.team2_wins += 1;
        m.team2_wins
    } else {
        return Err(ProgressError::TeamNotInMatch {
            match_id: m.id.clone(),
            team_id: winning_team_id.to_string(),
        });
    };

    if wins < required {
        return Ok(());
    }

    m.is_complete = true;
    m.winner_id = Some(winning_team_id.to_string());
    let loser = m.loser_id().map(str::to_string);
    let bracket = m.bracket;
    let round = m.round;
    let match_number = m.match_number;

    if let Some(loser) = &loser {
        if let Some(team) = tournament.teams.iter_mut().find(|t| t.id() == loser) {
            team.losses += 1;
        }
    }

    tracing::debug!(
        match_id,
        winner = winning_team_id,
        loser = loser.as_deref().unwrap_or(""),
        "Match decided"
    );

    let winner = winning_team_id.to_string();
    if tournament.settings.double_elimination {
        resolve_double(tournament, bracket, round, match_number, winner, loser);
    } else {
        resolve_single(tournament, round, match_number, winner, loser);
    }
    Ok(())
}

fn resolve_single(
    tournament: &mut Tournament,
    round: u32,
    match_number: u32,
    winner: TeamId,
    loser: Option<TeamId>,
) {
    if advance_in_winner_bracket(&mut tournament.rounds, round + 1, match_number, winner.clone()) {
        return;
    }

    let champion = tournament
        .teams
        .iter()
        .find(|t| t.losses == 0)
        .map(|t| t.id().to_string())
        .unwrap_or(winner);
    complete(tournament, champion, loser);
}

fn resolve_double(
    tournament: &mut Tournament,
    bracket: Bracket,
    round: u32,
    match_number: u32,
    winner: TeamId,
    loser: Option<TeamId>,
) {
    match bracket {
        Bracket::Winner => {
            let advanced =
                advance_in_winner_bracket(&mut tournament.rounds, round + 1, match_number, winner);
            if open_finals_if_ready(tournament) {
                return;
            }
            if let Some(loser) = loser {
                drop_to_loser_bracket(&mut tournament.rounds, loser, round, !advanced);
            }
        }
        Bracket::Loser => {
            if open_finals_if_ready(tournament) {
                return;
            }
            advance_in_loser_bracket(&mut tournament.rounds, winner, round + 1);
        }
        Bracket::Final => resolve_final(tournament, winner, loser),
    }
}

/// First finals match won by the once-beaten team forces a second
fn resolve_final(tournament: &mut Tournament, winner: TeamId, loser: Option<TeamId>) {
    let both_once_beaten =
        tournament.teams.iter().filter(|t| t.losses == 1).count() == 2
            && !tournament.teams.iter().any(|t| t.losses == 0);

    let Some(final_round) = tournament
        .rounds
        .iter_mut()
        .find(|r| r.bracket == Bracket::Final)
    else {
        return;
    };

    if final_round.matches.len() == 1 && both_once_beaten {
        let (team1, team2) = {
            let first = &final_round.matches[0];
            (first.team1_id.clone(), first.team2_id.clone())
        };
        final_round.push_match(team1, team2);
        tracing::debug!("Finals reset");
        return;
    }

    complete(tournament, winner, loser);
}

fn complete(tournament: &mut Tournament, winner: TeamId, runner_up: Option<TeamId>) {
    tracing::debug!(winner = %winner, "Tournament complete");
    tournament.is_complete = true;
    tournament.winner = Some(winner);
    tournament.runner_up = runner_up;
}

// ============================================================================
// Level 3 - Bracket placement
// ============================================================================

fn locate_match(rounds: &[Round], match_id: &str) -> Option<(usize, usize)> {
    rounds.iter().enumerate().find_map(|(ri, round)| {
        round
            .matches
            .iter()
            .position(|m| m.id == match_id)
            .map(|mi| (ri, mi))
    })
}

/// Winner of match `k` feeds match `ceil(k / 2)` of the next round
fn advance_in_winner_bracket(
    rounds: &mut [Round],
    next_round: u32,
    match_number: u32,
    team_id: TeamId,
) -> bool {
    let Some(round) = rounds
        .iter_mut()
        .find(|r| r.bracket == Bracket::Winner && r.round_number == next_round)
    else {
        return false;
    };
    let slot = ((match_number - 1) / 2) as usize;
    match round.matches.get_mut(slot) {
        Some(m) => m.fill_open_slot(team_id),
        None => false,
    }
}

/// Seat a team that just lost in winner-bracket round `round`
///
/// It takes the first open slot in loser round `round`, opening a match
/// (and the round) when there is none. The loser of the last winner-bracket
/// match is the final arrival from that side, so when its round has no open
/// slot it joins whichever loser match is waiting for a team.
fn drop_to_loser_bracket(
    rounds: &mut Vec<Round>,
    team_id: TeamId,
    round: u32,
    winner_bracket_done: bool,
) {
    let open = rounds
        .iter_mut()
        .filter(|r| r.bracket == Bracket::Loser && r.round_number == round)
        .flat_map(|r| r.matches.iter_mut())
        .find(|m| m.is_half_filled());
    if let Some(m) = open {
        m.fill_open_slot(team_id);
        return;
    }

    if winner_bracket_done && join_waiting_match(rounds, &team_id) {
        return;
    }

    open_loser_match(rounds, team_id, round);
}

/// Seat a loser-bracket winner: the earliest waiting loser match takes it,
/// otherwise it opens a match in `target_round`
fn advance_in_loser_bracket(rounds: &mut Vec<Round>, team_id: TeamId, target_round: u32) {
    if join_waiting_match(rounds, &team_id) {
        return;
    }
    open_loser_match(rounds, team_id, target_round);
}

/// Fill the earliest half-filled loser match, if any
fn join_waiting_match(rounds: &mut [Round], team_id: &str) -> bool {
    let waiting = rounds
        .iter_mut()
        .filter(|r| r.bracket == Bracket::Loser)
        .flat_map(|r| r.matches.iter_mut())
        .filter(|m| m.is_half_filled())
        .min_by_key(|m| (m.round, m.match_number));
    match waiting {
        Some(m) => m.fill_open_slot(team_id.to_string()),
        None => false,
    }
}

fn open_loser_match(rounds: &mut Vec<Round>, team_id: TeamId, round: u32) {
    let idx = match rounds
        .iter()
        .position(|r| r.bracket == Bracket::Loser && r.round_number == round)
    {
        Some(idx) => idx,
        None => {
            tracing::debug!(round, "Opening loser bracket round");
            rounds.push(Round::new(round, Bracket::Loser));
            rounds.len() - 1
        }
    };
    rounds[idx].push_match(Some(team_id), None);
}

/// Open the finals once one unbeaten and one once-beaten team remain
fn open_finals_if_ready(tournament: &mut Tournament) -> bool {
    if tournament.rounds.iter().any(|r| r.bracket == Bracket::Final) {
        return false;
    }

    let limit = tournament.settings.elimination_losses();
    let alive: Vec<_> = tournament.teams.iter().filter(|t| t.losses < limit).collect();
    if alive.len() != 2 {
        return false;
    }
    let (unbeaten, once_beaten) = match (alive[0].losses, alive[1].losses) {
        (0, 1) => (alive[0].id().to_string(), alive[1].id().to_string()),
        (1, 0) => (alive[1].id().to_string(), alive[0].id().to_string()),
        _ => return false,
    };

    let round_number = tournament
        .rounds
        .iter()
        .map(|r| r.round_number)
        .max()
        .unwrap_or(0)
        + 1;
    let mut finals = Round::new(round_number, Bracket::Final);
    finals.push_match(Some(unbeaten), Some(once_beaten));
    tournament.rounds.push(finals);
    tracing::debug!(round = round_number, "Finals opened");
    true
}
