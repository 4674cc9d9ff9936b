//! Score entry: validate and apply a submitted score, then advance the bracket.

use crate::logic::knockout::{advance_bracket, has_successors};
use crate::models::{MatchKind, Score, Tournament, TournamentError};

/// Set (or edit) the score of a match.
///
/// - Golden goal: only 1-0 or 0-1.
/// - Group: any non-negative scores.
/// - Knockout: non-negative and not a draw. Once the next round exists the
///   edit must keep the same winner.
///
/// A knockout score may create the next round (see `advance_bracket`).
pub fn set_match_score(
    tournament: &Tournament,
    match_id: &str,
    score_a: i64,
    score_b: i64,
) -> Result<Tournament, TournamentError> {
    let current = tournament
        .match_by_id(match_id)
        .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;

    let score = match current.kind {
        MatchKind::GoldenGoal => {
            if !matches!((score_a, score_b), (1, 0) | (0, 1)) {
                return Err(TournamentError::InvalidGoldenGoalScore { score_a, score_b });
            }
            Score::new(score_a as u32, score_b as u32)
        }
        MatchKind::Group { .. } | MatchKind::Knockout(_) => {
            let (Ok(a), Ok(b)) = (u32::try_from(score_a), u32::try_from(score_b)) else {
                return Err(TournamentError::InvalidScore { score_a, score_b });
            };
            Score::new(a, b)
        }
    };

    if let MatchKind::Knockout(stage) = current.kind {
        if score.winner().is_none() {
            return Err(TournamentError::DrawNotAllowed(current.id.clone()));
        }
        let previous_winner = current.score.and_then(|s| s.winner());
        if has_successors(tournament, stage) && previous_winner != score.winner() {
            return Err(TournamentError::KnockoutOutcomeLocked(current.id.clone()));
        }
    }

    let mut next = tournament.clone();
    let is_knockout = next
        .match_mut(match_id)
        .map(|m| {
            m.score = Some(score);
            m.stage().is_some()
        })
        .unwrap_or(false);
    log::debug!("Match {} scored {}-{}", match_id, score.a, score.b);

    if is_knockout {
        advance_bracket(&mut next);
    }
    Ok(next)
}
