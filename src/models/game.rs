//! Match, MatchKind, KnockoutStage and Score for 1v1 games.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a match.
pub type MatchId = String;

/// Round index stored for golden goal matches.
pub const GOLDEN_GOAL_ROUND: i32 = -1;

/// Which side of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

/// Knockout round a match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnockoutStage {
    PlayIn,
    Semi,
    Final,
    ThirdPlace,
}

impl KnockoutStage {
    /// Negative round index stored for this stage (-10 play-in/semis, -11 final/third).
    pub fn round_index(self) -> i32 {
        match self {
            KnockoutStage::PlayIn | KnockoutStage::Semi => -10,
            KnockoutStage::Final | KnockoutStage::ThirdPlace => -11,
        }
    }
}

/// What part of the tournament a match belongs to. Exactly one of the three.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MatchKind {
    /// Round-robin fixture; `round` is the 0-based round.
    Group { round: u32 },
    /// Sudden-death decider between two tied players.
    GoldenGoal,
    Knockout(KnockoutStage),
}

/// Status as stored in the persisted blob.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    Played,
    GoldenGoal,
}

/// Final score of a played match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub a: u32,
    pub b: u32,
}

impl Score {
    pub fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    /// Strictly higher scorer, `None` on a draw.
    pub fn winner(&self) -> Option<Side> {
        match self.a.cmp(&self.b) {
            std::cmp::Ordering::Greater => Some(Side::A),
            std::cmp::Ordering::Less => Some(Side::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Canonical key for an unordered player pair: the two ids sorted and joined.
pub fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{a}-{b}")
    } else {
        format!("{b}-{a}")
    }
}

/// A single 1v1 match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatchRecord", into = "MatchRecord")]
pub struct Match {
    pub id: MatchId,
    pub player_a: PlayerId,
    pub player_b: PlayerId,
    pub kind: MatchKind,
    /// None if not yet played.
    pub score: Option<Score>,
}

impl Match {
    pub fn group(id: impl Into<MatchId>, player_a: PlayerId, player_b: PlayerId, round: u32) -> Self {
        Self {
            id: id.into(),
            player_a,
            player_b,
            kind: MatchKind::Group { round },
            score: None,
        }
    }

    /// Golden goal decider for a tied pair; id is derived from the pair key.
    pub fn golden_goal(player_a: PlayerId, player_b: PlayerId) -> Self {
        Self {
            id: format!("golden-{}", pair_key(&player_a, &player_b)),
            player_a,
            player_b,
            kind: MatchKind::GoldenGoal,
            score: None,
        }
    }

    pub fn knockout(
        id: impl Into<MatchId>,
        stage: KnockoutStage,
        player_a: PlayerId,
        player_b: PlayerId,
    ) -> Self {
        Self {
            id: id.into(),
            player_a,
            player_b,
            kind: MatchKind::Knockout(stage),
            score: None,
        }
    }

    pub fn is_played(&self) -> bool {
        self.score.is_some()
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, MatchKind::Group { .. })
    }

    pub fn is_golden_goal(&self) -> bool {
        self.kind == MatchKind::GoldenGoal
    }

    pub fn stage(&self) -> Option<KnockoutStage> {
        match self.kind {
            MatchKind::Knockout(stage) => Some(stage),
            _ => None,
        }
    }

    /// `>= 0` for group matches; -1 golden goal; -10/-11 knockout.
    pub fn round_index(&self) -> i32 {
        match self.kind {
            MatchKind::Group { round } => i32::try_from(round).unwrap_or(i32::MAX),
            MatchKind::GoldenGoal => GOLDEN_GOAL_ROUND,
            MatchKind::Knockout(stage) => stage.round_index(),
        }
    }

    pub fn status(&self) -> MatchStatus {
        match (self.kind, self.score) {
            (MatchKind::GoldenGoal, _) => MatchStatus::GoldenGoal,
            (_, Some(_)) => MatchStatus::Played,
            (_, None) => MatchStatus::Pending,
        }
    }

    pub fn player(&self, side: Side) -> &PlayerId {
        match side {
            Side::A => &self.player_a,
            Side::B => &self.player_b,
        }
    }

    /// Winner of a played, decisive match.
    pub fn winner(&self) -> Option<&PlayerId> {
        let side = self.score?.winner()?;
        Some(self.player(side))
    }

    /// Loser of a played, decisive match.
    pub fn loser(&self) -> Option<&PlayerId> {
        let side = match self.score?.winner()? {
            Side::A => Side::B,
            Side::B => Side::A,
        };
        Some(self.player(side))
    }

    pub fn involves(&self, player_id: &str) -> bool {
        self.player_a == player_id || self.player_b == player_id
    }

    pub fn pair_key(&self) -> String {
        pair_key(&self.player_a, &self.player_b)
    }
}

/// Persisted shape of a match (flat record with optional flags).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchRecord {
    id: MatchId,
    player_a_id: PlayerId,
    player_b_id: PlayerId,
    round_index: i32,
    score_a: Option<u32>,
    score_b: Option<u32>,
    status: MatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_golden_goal: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stage: Option<KnockoutStage>,
}

impl TryFrom<MatchRecord> for Match {
    type Error = String;

    fn try_from(r: MatchRecord) -> Result<Self, Self::Error> {
        let kind = match (r.is_golden_goal.unwrap_or(false), r.stage) {
            (true, Some(_)) => {
                return Err(format!("match {} is both golden goal and knockout", r.id));
            }
            (true, None) => MatchKind::GoldenGoal,
            (false, Some(stage)) => MatchKind::Knockout(stage),
            (false, None) => {
                let round = u32::try_from(r.round_index)
                    .map_err(|_| format!("group match {} has negative round index", r.id))?;
                MatchKind::Group { round }
            }
        };
        let score = match (r.score_a, r.score_b) {
            (Some(a), Some(b)) => Some(Score { a, b }),
            (None, None) => None,
            _ => return Err(format!("match {} has a half-recorded score", r.id)),
        };
        Ok(Self {
            id: r.id,
            player_a: r.player_a_id,
            player_b: r.player_b_id,
            kind,
            score,
        })
    }
}

impl From<Match> for MatchRecord {
    fn from(m: Match) -> Self {
        let status = m.status();
        let round_index = m.round_index();
        Self {
            round_index,
            status,
            score_a: m.score.map(|s| s.a),
            score_b: m.score.map(|s| s.b),
            is_golden_goal: m.is_golden_goal().then_some(true),
            stage: m.stage(),
            id: m.id,
            player_a_id: m.player_a,
            player_b_id: m.player_b,
        }
    }
}
