//! Tournament state, bracket stage and errors.

use crate::models::game::{KnockoutStage, Match, MatchId};
use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};

/// Number of players drawn into the knockout stage.
pub const KNOCKOUT_SIZE: usize = 5;

/// Reasons an operation left the tournament unchanged.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// No match with this id.
    MatchNotFound(MatchId),
    /// No player with this id on the roster.
    PlayerNotFound(PlayerId),
    /// Regular scores must both be non-negative.
    InvalidScore { score_a: i64, score_b: i64 },
    /// Golden goal scores must be 1-0 or 0-1.
    InvalidGoldenGoalScore { score_a: i64, score_b: i64 },
    /// Knockout matches need a winner.
    DrawNotAllowed(MatchId),
    /// The edit would change a knockout winner after the next round was drawn.
    KnockoutOutcomeLocked(MatchId),
    /// Not enough players for the operation.
    NotEnoughPlayers { required: usize, available: usize },
    /// Knockout seeds are already fixed.
    KnockoutAlreadyStarted,
    /// Group or golden goal matches still unplayed.
    GroupStageIncomplete,
    /// Standings still contain tied rows.
    UnresolvedTies,
    /// Player names must not be blank.
    EmptyPlayerName,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            TournamentError::PlayerNotFound(id) => write!(f, "Player {} not found", id),
            TournamentError::InvalidScore { score_a, score_b } => {
                write!(f, "Scores must not be negative (got {}-{})", score_a, score_b)
            }
            TournamentError::InvalidGoldenGoalScore { score_a, score_b } => {
                write!(f, "Golden goal must end 1-0 or 0-1 (got {}-{})", score_a, score_b)
            }
            TournamentError::DrawNotAllowed(_) => write!(f, "Knockout matches cannot end in a draw"),
            TournamentError::KnockoutOutcomeLocked(_) => {
                write!(f, "Winner cannot change once the next knockout round exists")
            }
            TournamentError::NotEnoughPlayers { required, available } => {
                write!(f, "Need at least {} players (have {})", required, available)
            }
            TournamentError::KnockoutAlreadyStarted => write!(f, "Knockout stage already started"),
            TournamentError::GroupStageIncomplete => {
                write!(f, "All group and golden goal matches must be played first")
            }
            TournamentError::UnresolvedTies => write!(f, "Ties must be settled by golden goal first"),
            TournamentError::EmptyPlayerName => write!(f, "Player name must not be empty"),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Where the knockout bracket currently stands, derived from the match list.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketStage {
    /// No seeds drawn yet.
    #[default]
    NotStarted,
    /// Play-in created, semis not yet.
    PlayIn,
    /// Semis created, final not yet.
    Semis,
    /// Final and third place created, not both scored.
    FinalAndThird,
    /// Final and third place scored.
    Complete,
}

/// Podium, available once final and third place are scored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnockoutResults {
    pub first_id: PlayerId,
    pub second_id: PlayerId,
    pub third_id: PlayerId,
}

/// Full tournament state: roster, every match, and the knockout draw.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    /// Roster in seeding order.
    pub players: Vec<Player>,
    /// Group, golden goal and knockout matches.
    pub matches: Vec<Match>,
    /// Shuffled top five once the knockout stage has started.
    pub knockout_seeds: Option<Vec<PlayerId>>,
}

impl Tournament {
    /// Empty tournament: no players, no matches, no seeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tournament with a roster and no schedule yet.
    pub fn with_players(players: Vec<Player>) -> Self {
        Self {
            players,
            ..Self::new()
        }
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn match_by_id(&self, id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn match_mut(&mut self, id: &str) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// True once a group schedule has been generated.
    pub fn has_schedule(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn group_matches(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(|m| m.is_group())
    }

    pub fn golden_goal_matches(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(|m| m.is_golden_goal())
    }

    /// Knockout matches of one stage, in creation order.
    pub fn knockout_matches(&self, stage: KnockoutStage) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(move |m| m.stage() == Some(stage))
    }

    pub fn knockout_match(&self, stage: KnockoutStage) -> Option<&Match> {
        self.knockout_matches(stage).next()
    }

    /// Parse a persisted blob, degrading field by field instead of failing.
    ///
    /// A blob that is not a JSON object yields the empty tournament. Unreadable
    /// `players`/`matches` become empty lists, unreadable or wrong-length seeds
    /// become `None`.
    pub fn from_blob(raw: &str) -> Self {
        let value: serde_json::Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Stored tournament is not valid JSON, starting empty: {}", e);
                return Self::new();
            }
        };
        let Some(obj) = value.as_object() else {
            log::warn!("Stored tournament is not an object, starting empty");
            return Self::new();
        };
        let players: Vec<Player> = obj
            .get("players")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default();
        let matches: Vec<Match> = obj
            .get("matches")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default();
        let knockout_seeds = obj
            .get("knockoutSeeds")
            .and_then(|v| serde_json::from_value::<Vec<PlayerId>>(v.clone()).ok())
            .filter(|seeds| seeds.len() == KNOCKOUT_SIZE);
        Self {
            players,
            matches,
            knockout_seeds,
        }
        .normalized()
    }

    /// Serialized blob for the store.
    pub fn to_blob(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore "seeds exist iff the play-in exists" after loading foreign data.
    fn normalized(mut self) -> Self {
        let has_play_in = self.knockout_match(KnockoutStage::PlayIn).is_some();
        let has_seeds = self.knockout_seeds.is_some();
        match (has_seeds, has_play_in) {
            (true, false) => {
                log::warn!("Dropping knockout seeds without a play-in match");
                self.knockout_seeds = None;
                self.matches.retain(|m| m.stage().is_none());
            }
            (false, _) if self.matches.iter().any(|m| m.stage().is_some()) => {
                log::warn!("Dropping knockout matches without seeds");
                self.matches.retain(|m| m.stage().is_none());
            }
            _ => {}
        }
        self
    }
}
