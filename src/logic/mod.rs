//! Tournament business logic: schedule, standings, tie-breaks, knockout, scoring, setup.
//!
//! Every operation takes the current tournament and returns a complete
//! replacement; an `Err` means the input was ignored.

mod knockout;
mod schedule;
mod scoring;
mod setup;
mod standings;
mod tie_break;

pub use knockout::{
    bracket_stage, can_start_knockout, knockout_results, start_knockout_stage, FINAL_ID,
    PLAY_IN_ID, SEMI_1_ID, SEMI_2_ID, THIRD_PLACE_ID,
};
pub use schedule::{generate_round_robin_schedule, Fixture};
pub use scoring::set_match_score;
pub use setup::{
    add_player, fill_sample_scores, load_sample_players, remove_player, reset_tournament,
    shuffle_players, start_tournament, MIN_PLAYERS, SAMPLE_PLAYER_NAMES, SAMPLE_SCORES,
};
pub use standings::{compute_standings, group_standings, standings};
pub use tie_break::{add_golden_goal_matches_for_ties, existing_golden_goal_pairs, find_tied_pairs};
