//! Standings: aggregate played matches into ranked rows.

use crate::models::{pair_key, Match, MatchKind, Player, StandingsRow, Tournament};
use std::collections::{HashMap, HashSet};

/// Compute the standings table from scratch.
///
/// Every scored match except golden goals counts: 3 points for a win, 1 each
/// for a draw. Golden goals only add to `golden_goal_wins` and settle the tie
/// between their two players. Rows are sorted by points, goal difference,
/// goals for, golden goal wins (all descending), then roster order.
pub fn compute_standings(players: &[Player], matches: &[Match]) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = players
        .iter()
        .map(|p| StandingsRow::new(p.id.clone(), p.name.clone()))
        .collect();
    let index: HashMap<&str, usize> = players
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.as_str(), i))
        .collect();
    let mut settled: HashSet<String> = HashSet::new();

    for m in matches {
        let Some(score) = m.score else { continue };
        let (Some(&ia), Some(&ib)) = (index.get(m.player_a.as_str()), index.get(m.player_b.as_str()))
        else {
            log::debug!("Match {} references a player not on the roster", m.id);
            continue;
        };

        if m.kind == MatchKind::GoldenGoal {
            if let Some(winner) = m.winner() {
                let iw = if *winner == m.player_a { ia } else { ib };
                rows[iw].golden_goal_wins += 1;
                settled.insert(m.pair_key());
            }
            continue;
        }

        apply_result(&mut rows[ia], score.a, score.b);
        apply_result(&mut rows[ib], score.b, score.a);
    }

    for row in &mut rows {
        row.goal_difference = i64::from(row.goals_for) - i64::from(row.goals_against);
    }

    // Stable sort keeps roster order as the last resort.
    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
            .then(b.golden_goal_wins.cmp(&a.golden_goal_wins))
    });

    let tied: Vec<bool> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            rows.iter().enumerate().any(|(j, other)| {
                i != j
                    && row.tie_key() == other.tie_key()
                    && !settled.contains(&pair_key(&row.player_id, &other.player_id))
            })
        })
        .collect();

    for (i, (row, is_tied)) in rows.iter_mut().zip(tied).enumerate() {
        row.rank = i + 1;
        row.is_tied = is_tied;
    }
    rows
}

/// Standings over the whole tournament (group, knockout; golden goals only as deciders).
pub fn standings(tournament: &Tournament) -> Vec<StandingsRow> {
    compute_standings(&tournament.players, &tournament.matches)
}

/// Standings from group and golden goal matches only (used for the knockout draw).
pub fn group_standings(tournament: &Tournament) -> Vec<StandingsRow> {
    let matches: Vec<Match> = tournament
        .matches
        .iter()
        .filter(|m| m.stage().is_none())
        .cloned()
        .collect();
    compute_standings(&tournament.players, &matches)
}

fn apply_result(row: &mut StandingsRow, scored: u32, conceded: u32) {
    row.played += 1;
    row.goals_for = row.goals_for.saturating_add(scored);
    row.goals_against = row.goals_against.saturating_add(conceded);
    match scored.cmp(&conceded) {
        std::cmp::Ordering::Greater => {
            row.wins += 1;
            row.points += 3;
        }
        std::cmp::Ordering::Equal => {
            row.draws += 1;
            row.points += 1;
        }
        std::cmp::Ordering::Less => row.losses += 1,
    }
}
