//! Integration tests for the knockout stage: entry guard, draw and bracket progression.

use rand::rngs::StdRng;
use rand::SeedableRng;
use round_robin_tournament::logic::{FINAL_ID, PLAY_IN_ID, SEMI_1_ID, SEMI_2_ID, THIRD_PLACE_ID};
use round_robin_tournament::{
    add_golden_goal_matches_for_ties, bracket_stage, can_start_knockout, knockout_results,
    set_match_score, start_knockout_stage, start_tournament, BracketStage, KnockoutStage, Player,
    Tournament, TournamentError,
};
use std::collections::HashSet;

fn roster(n: usize) -> Vec<Player> {
    (1..=n)
        .map(|i| Player {
            id: format!("p{i}"),
            name: format!("P{i}"),
        })
        .collect()
}

/// Lower roster index always wins 1-0, except pairs listed in `draws` (0-0).
fn play_group(n: usize, draws: &[(&str, &str)]) -> Tournament {
    let mut t = start_tournament(&Tournament::with_players(roster(n))).unwrap();
    let order: Vec<String> = t.players.iter().map(|p| p.id.clone()).collect();
    let fixtures: Vec<(String, String, String)> = t
        .matches
        .iter()
        .map(|m| (m.id.clone(), m.player_a.clone(), m.player_b.clone()))
        .collect();
    for (id, a, b) in fixtures {
        let is_draw = draws
            .iter()
            .any(|(x, y)| (a == *x && b == *y) || (a == *y && b == *x));
        let ia = order.iter().position(|p| *p == a).unwrap();
        let ib = order.iter().position(|p| *p == b).unwrap();
        let (sa, sb) = if is_draw {
            (0, 0)
        } else if ia < ib {
            (1, 0)
        } else {
            (0, 1)
        };
        t = set_match_score(&t, &id, sa, sb).unwrap();
    }
    t
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn stage_count(t: &Tournament, stage: KnockoutStage) -> usize {
    t.knockout_matches(stage).count()
}

#[test]
fn full_knockout_run() {
    let t = play_group(5, &[]);
    assert_eq!(bracket_stage(&t), BracketStage::NotStarted);

    // Play-in: seeds 3 and 4 of the shuffled top five.
    let t = start_knockout_stage(&t, &mut rng()).unwrap();
    let seeds = t.knockout_seeds.clone().unwrap();
    assert_eq!(seeds.len(), 5);
    let seed_set: HashSet<&str> = seeds.iter().map(String::as_str).collect();
    assert_eq!(seed_set.len(), 5);
    assert_eq!(bracket_stage(&t), BracketStage::PlayIn);
    assert_eq!(stage_count(&t, KnockoutStage::PlayIn), 1);
    let play_in = t.match_by_id(PLAY_IN_ID).unwrap();
    assert_eq!(play_in.player_a, seeds[3]);
    assert_eq!(play_in.player_b, seeds[4]);
    assert_eq!(play_in.round_index(), -10);

    // Semis: seed 0 vs play-in winner, seed 1 vs seed 2.
    let t = set_match_score(&t, PLAY_IN_ID, 2, 1).unwrap();
    assert_eq!(bracket_stage(&t), BracketStage::Semis);
    assert_eq!(stage_count(&t, KnockoutStage::Semi), 2);
    let semi_1 = t.match_by_id(SEMI_1_ID).unwrap();
    let semi_2 = t.match_by_id(SEMI_2_ID).unwrap();
    assert_eq!((&semi_1.player_a, &semi_1.player_b), (&seeds[0], &seeds[3]));
    assert_eq!((&semi_2.player_a, &semi_2.player_b), (&seeds[1], &seeds[2]));

    // Final and third place after both semis.
    let t = set_match_score(&t, SEMI_1_ID, 3, 0).unwrap();
    assert_eq!(bracket_stage(&t), BracketStage::Semis);
    assert_eq!(stage_count(&t, KnockoutStage::Final), 0);
    let t = set_match_score(&t, SEMI_2_ID, 0, 2).unwrap();
    assert_eq!(bracket_stage(&t), BracketStage::FinalAndThird);
    assert_eq!(stage_count(&t, KnockoutStage::Final), 1);
    assert_eq!(stage_count(&t, KnockoutStage::ThirdPlace), 1);
    let final_match = t.match_by_id(FINAL_ID).unwrap();
    let third_match = t.match_by_id(THIRD_PLACE_ID).unwrap();
    assert_eq!((&final_match.player_a, &final_match.player_b), (&seeds[0], &seeds[2]));
    assert_eq!((&third_match.player_a, &third_match.player_b), (&seeds[3], &seeds[1]));
    assert!(knockout_results(&t).is_none());

    // Results once both are scored.
    let t = set_match_score(&t, FINAL_ID, 1, 2).unwrap();
    assert!(knockout_results(&t).is_none());
    let t = set_match_score(&t, THIRD_PLACE_ID, 4, 3).unwrap();
    assert_eq!(bracket_stage(&t), BracketStage::Complete);
    let results = knockout_results(&t).unwrap();
    assert_eq!(results.first_id, seeds[2]);
    assert_eq!(results.second_id, seeds[0]);
    assert_eq!(results.third_id, seeds[3]);
}

#[test]
fn rescoring_never_duplicates_downstream_matches() {
    let t = play_group(5, &[]);
    let t = start_knockout_stage(&t, &mut rng()).unwrap();
    let t = set_match_score(&t, PLAY_IN_ID, 2, 1).unwrap();
    let t = set_match_score(&t, PLAY_IN_ID, 5, 1).unwrap();
    assert_eq!(stage_count(&t, KnockoutStage::Semi), 2);

    let t = set_match_score(&t, SEMI_1_ID, 1, 0).unwrap();
    let t = set_match_score(&t, SEMI_2_ID, 1, 0).unwrap();
    let t = set_match_score(&t, SEMI_2_ID, 2, 0).unwrap();
    assert_eq!(stage_count(&t, KnockoutStage::Final), 1);
    assert_eq!(stage_count(&t, KnockoutStage::ThirdPlace), 1);
}

#[test]
fn winner_is_locked_once_next_round_exists() {
    let t = play_group(5, &[]);
    let t = start_knockout_stage(&t, &mut rng()).unwrap();
    let t = set_match_score(&t, PLAY_IN_ID, 2, 1).unwrap();
    assert_eq!(
        set_match_score(&t, PLAY_IN_ID, 0, 1),
        Err(TournamentError::KnockoutOutcomeLocked(PLAY_IN_ID.to_string()))
    );

    // Before the semis are both decided, a semi can still flip.
    let t = set_match_score(&t, SEMI_1_ID, 1, 0).unwrap();
    let t = set_match_score(&t, SEMI_1_ID, 0, 1).unwrap();
    let t = set_match_score(&t, SEMI_2_ID, 1, 0).unwrap();
    assert!(set_match_score(&t, SEMI_1_ID, 1, 0).is_err());
}

#[test]
fn knockout_draws_are_rejected() {
    let t = play_group(5, &[]);
    let t = start_knockout_stage(&t, &mut rng()).unwrap();
    assert_eq!(
        set_match_score(&t, PLAY_IN_ID, 1, 1),
        Err(TournamentError::DrawNotAllowed(PLAY_IN_ID.to_string()))
    );
    assert_eq!(bracket_stage(&t), BracketStage::PlayIn);
}

#[test]
fn draw_uses_the_group_top_five() {
    let t = play_group(7, &[]);
    let t = start_knockout_stage(&t, &mut rng()).unwrap();
    let seeds: HashSet<String> = t.knockout_seeds.clone().unwrap().into_iter().collect();
    let expected: HashSet<String> = ["p1", "p2", "p3", "p4", "p5"].iter().map(|s| s.to_string()).collect();
    assert_eq!(seeds, expected);
}

#[test]
fn guard_requires_finished_group_stage() {
    let t = start_tournament(&Tournament::with_players(roster(5))).unwrap();
    assert_eq!(can_start_knockout(&t), Err(TournamentError::GroupStageIncomplete));
    assert_eq!(
        can_start_knockout(&Tournament::with_players(roster(5))),
        Err(TournamentError::GroupStageIncomplete)
    );
}

#[test]
fn guard_requires_five_players() {
    let t = play_group(4, &[]);
    assert_eq!(
        start_knockout_stage(&t, &mut rng()),
        Err(TournamentError::NotEnoughPlayers { required: 5, available: 4 })
    );
}

#[test]
fn guard_rejects_a_second_start() {
    let t = play_group(5, &[]);
    let t = start_knockout_stage(&t, &mut rng()).unwrap();
    assert_eq!(
        start_knockout_stage(&t, &mut rng()),
        Err(TournamentError::KnockoutAlreadyStarted)
    );
}

#[test]
fn ties_must_be_settled_before_the_knockout() {
    // p1 and p2 draw each other and otherwise win everything: level on 10 points, 3 goals.
    let t = play_group(5, &[("p1", "p2")]);
    assert_eq!(can_start_knockout(&t), Err(TournamentError::UnresolvedTies));

    let t = add_golden_goal_matches_for_ties(&t).unwrap();
    let golden_id = t.golden_goal_matches().next().unwrap().id.clone();
    assert_eq!(can_start_knockout(&t), Err(TournamentError::GroupStageIncomplete));

    let t = set_match_score(&t, &golden_id, 0, 1).unwrap();
    assert_eq!(can_start_knockout(&t), Ok(()));
    let t = start_knockout_stage(&t, &mut rng()).unwrap();
    assert_eq!(bracket_stage(&t), BracketStage::PlayIn);
}
