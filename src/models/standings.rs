//! StandingsRow: derived per-player table row.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// One row of the standings table. Recomputed from scratch on every query.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRow {
    pub player_id: PlayerId,
    pub player_name: String,
    /// 1-based position after sorting.
    pub rank: usize,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
    /// Golden goal deciders won (only used to order otherwise equal rows).
    pub golden_goal_wins: u32,
    /// Shares points and goals-for with another row and no decider settled it.
    pub is_tied: bool,
}

impl StandingsRow {
    pub fn new(player_id: PlayerId, player_name: String) -> Self {
        Self {
            player_id,
            player_name,
            ..Self::default()
        }
    }

    /// The pair of values that defines a tie.
    pub fn tie_key(&self) -> (u32, u32) {
        (self.points, self.goals_for)
    }
}
