//! Knockout stage: top five, random draw, play-in → semis → final and third place.

use crate::logic::standings::{group_standings, standings};
use crate::models::{
    BracketStage, KnockoutResults, KnockoutStage, Match, PlayerId, Tournament, TournamentError,
    KNOCKOUT_SIZE,
};
use rand::seq::SliceRandom;
use rand::Rng;

pub const PLAY_IN_ID: &str = "ko-playin";
pub const SEMI_1_ID: &str = "ko-semi1";
pub const SEMI_2_ID: &str = "ko-semi2";
pub const FINAL_ID: &str = "ko-final";
pub const THIRD_PLACE_ID: &str = "ko-third";

/// Derive the bracket stage from the seeds and knockout matches present.
pub fn bracket_stage(tournament: &Tournament) -> BracketStage {
    if tournament.knockout_seeds.is_none() {
        return BracketStage::NotStarted;
    }
    if tournament.knockout_match(KnockoutStage::Semi).is_none() {
        return BracketStage::PlayIn;
    }
    if tournament.knockout_match(KnockoutStage::Final).is_none() {
        return BracketStage::Semis;
    }
    if knockout_results(tournament).is_some() {
        BracketStage::Complete
    } else {
        BracketStage::FinalAndThird
    }
}

/// Podium once both the final and the third place match are scored.
pub fn knockout_results(tournament: &Tournament) -> Option<KnockoutResults> {
    let final_match = tournament.knockout_match(KnockoutStage::Final)?;
    let third_match = tournament.knockout_match(KnockoutStage::ThirdPlace)?;
    Some(KnockoutResults {
        first_id: final_match.winner()?.clone(),
        second_id: final_match.loser()?.clone(),
        third_id: third_match.winner()?.clone(),
    })
}

/// Check whether the knockout stage may start.
///
/// No seeds yet, every group and golden goal match played, no tied rows,
/// at least five rows.
pub fn can_start_knockout(tournament: &Tournament) -> Result<(), TournamentError> {
    if tournament.knockout_seeds.is_some() {
        return Err(TournamentError::KnockoutAlreadyStarted);
    }
    let mut group = tournament.group_matches().peekable();
    if group.peek().is_none() {
        return Err(TournamentError::GroupStageIncomplete);
    }
    if group.any(|m| !m.is_played()) || tournament.golden_goal_matches().any(|m| !m.is_played()) {
        return Err(TournamentError::GroupStageIncomplete);
    }
    let rows = standings(tournament);
    if rows.iter().any(|r| r.is_tied) {
        return Err(TournamentError::UnresolvedTies);
    }
    if rows.len() < KNOCKOUT_SIZE {
        return Err(TournamentError::NotEnoughPlayers {
            required: KNOCKOUT_SIZE,
            available: rows.len(),
        });
    }
    Ok(())
}

/// Start the knockout: shuffle the top five into seeds, create play-in seed 3 vs seed 4.
pub fn start_knockout_stage<R: Rng + ?Sized>(
    tournament: &Tournament,
    rng: &mut R,
) -> Result<Tournament, TournamentError> {
    can_start_knockout(tournament)?;

    let mut seeds: Vec<PlayerId> = group_standings(tournament)
        .into_iter()
        .take(KNOCKOUT_SIZE)
        .map(|r| r.player_id)
        .collect();
    seeds.shuffle(rng);

    let mut next = tournament.clone();
    next.matches.push(Match::knockout(
        PLAY_IN_ID,
        KnockoutStage::PlayIn,
        seeds[3].clone(),
        seeds[4].clone(),
    ));
    log::info!("Knockout stage started, play-in {} vs {}", seeds[3], seeds[4]);
    next.knockout_seeds = Some(seeds);
    Ok(next)
}

/// Whether matches that depend on this stage were already drawn.
pub(crate) fn has_successors(tournament: &Tournament, stage: KnockoutStage) -> bool {
    match stage {
        KnockoutStage::PlayIn => tournament.knockout_match(KnockoutStage::Semi).is_some(),
        KnockoutStage::Semi => tournament.knockout_match(KnockoutStage::Final).is_some(),
        KnockoutStage::Final | KnockoutStage::ThirdPlace => false,
    }
}

/// Create the next knockout round if the current one is fully decided.
///
/// Each stage only creates its successors when they do not exist yet, so
/// re-scoring a match never duplicates downstream matches.
pub(crate) fn advance_bracket(tournament: &mut Tournament) {
    let Some(seeds) = tournament.knockout_seeds.clone() else {
        return;
    };

    match bracket_stage(tournament) {
        BracketStage::PlayIn => {
            let Some(winner) = tournament
                .knockout_match(KnockoutStage::PlayIn)
                .and_then(Match::winner)
                .cloned()
            else {
                return;
            };
            log::info!("Play-in decided, drawing semi-finals");
            tournament.matches.push(Match::knockout(
                SEMI_1_ID,
                KnockoutStage::Semi,
                seeds[0].clone(),
                winner,
            ));
            tournament.matches.push(Match::knockout(
                SEMI_2_ID,
                KnockoutStage::Semi,
                seeds[1].clone(),
                seeds[2].clone(),
            ));
        }
        BracketStage::Semis => {
            let semis: Vec<&Match> = tournament.knockout_matches(KnockoutStage::Semi).collect();
            let [semi_1, semi_2] = semis.as_slice() else {
                return;
            };
            let (Some(w1), Some(l1), Some(w2), Some(l2)) =
                (semi_1.winner(), semi_1.loser(), semi_2.winner(), semi_2.loser())
            else {
                return;
            };
            let final_match =
                Match::knockout(FINAL_ID, KnockoutStage::Final, w1.clone(), w2.clone());
            let third_match = Match::knockout(
                THIRD_PLACE_ID,
                KnockoutStage::ThirdPlace,
                l1.clone(),
                l2.clone(),
            );
            log::info!("Semi-finals decided, drawing final and third place");
            tournament.matches.push(final_match);
            tournament.matches.push(third_match);
        }
        BracketStage::Complete => {
            if let Some(results) = knockout_results(tournament) {
                log::info!(
                    "Knockout complete: 1st {}, 2nd {}, 3rd {}",
                    results.first_id,
                    results.second_id,
                    results.third_id
                );
            }
        }
        BracketStage::NotStarted | BracketStage::FinalAndThird => {}
    }
}
