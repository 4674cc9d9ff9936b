//! Tie-break: derive golden goal deciders for tied standings rows.

use crate::logic::standings::standings;
use crate::models::{pair_key, Match, PlayerId, StandingsRow, Tournament, TournamentError};
use std::collections::{BTreeMap, HashSet};

/// Pairs of players that still owe each other a golden goal decider.
///
/// Groups the tied rows by points and goals-for across the whole table (goal
/// difference sorts first, so tied rows need not be adjacent) and emits every
/// 2-combination whose pair key is not in `existing` (nor emitted earlier in
/// this call). Groups come out in table order.
pub fn find_tied_pairs(
    standings: &[StandingsRow],
    existing: &HashSet<String>,
) -> Vec<(PlayerId, PlayerId)> {
    let mut groups: BTreeMap<(u32, u32), Vec<&StandingsRow>> = BTreeMap::new();
    for row in standings.iter().filter(|row| row.is_tied) {
        groups.entry(row.tie_key()).or_default().push(row);
    }

    let mut seen = existing.clone();
    let mut pairs = Vec::new();
    for group in groups.values().rev() {
        for (a_idx, a) in group.iter().enumerate() {
            for b in &group[a_idx + 1..] {
                if seen.insert(pair_key(&a.player_id, &b.player_id)) {
                    pairs.push((a.player_id.clone(), b.player_id.clone()));
                }
            }
        }
    }
    pairs
}

/// Pair keys of every golden goal match already in the tournament.
pub fn existing_golden_goal_pairs(tournament: &Tournament) -> HashSet<String> {
    tournament.golden_goal_matches().map(Match::pair_key).collect()
}

/// Append one golden goal match per newly tied pair.
///
/// Requires the group stage to be fully played; calling it again without new
/// ties returns an unchanged copy.
pub fn add_golden_goal_matches_for_ties(tournament: &Tournament) -> Result<Tournament, TournamentError> {
    if tournament.group_matches().next().is_none()
        || tournament.group_matches().any(|m| !m.is_played())
    {
        return Err(TournamentError::GroupStageIncomplete);
    }

    let rows = standings(tournament);
    let existing = existing_golden_goal_pairs(tournament);
    let pairs = find_tied_pairs(&rows, &existing);

    let mut next = tournament.clone();
    if !pairs.is_empty() {
        log::info!("Adding {} golden goal match(es) for tied players", pairs.len());
    }
    next.matches.extend(pairs.into_iter().map(|(a, b)| Match::golden_goal(a, b)));
    Ok(next)
}
