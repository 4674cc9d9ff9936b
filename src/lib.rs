//! Round-robin tournament tracker: library with models, business logic and the persisted store.

pub mod logic;
pub mod models;
pub mod storage;
pub mod store;

pub use logic::{
    add_golden_goal_matches_for_ties, add_player, bracket_stage, can_start_knockout,
    compute_standings, fill_sample_scores, find_tied_pairs, generate_round_robin_schedule,
    group_standings, knockout_results, load_sample_players, remove_player, reset_tournament,
    set_match_score, shuffle_players, standings, start_knockout_stage, start_tournament, Fixture,
};
pub use models::{
    pair_key, BracketStage, KnockoutResults, KnockoutStage, Match, MatchId, MatchKind, MatchStatus,
    Player, PlayerId, Score, Side, StandingsRow, Tournament, TournamentError,
};
pub use storage::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use store::{TournamentStore, STORAGE_KEY};
