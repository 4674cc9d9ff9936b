//! Data structures for the tournament: players, matches, standings, tournament state.

mod game;
mod player;
mod standings;
mod tournament;

pub use game::{
    pair_key, KnockoutStage, Match, MatchId, MatchKind, MatchStatus, Score, Side, GOLDEN_GOAL_ROUND,
};
pub use player::{Player, PlayerId};
pub use standings::StandingsRow;
pub use tournament::{BracketStage, KnockoutResults, Tournament, TournamentError, KNOCKOUT_SIZE};
