//! TournamentStore: owns the current tournament and persists it after every change.

use crate::logic;
use crate::models::{BracketStage, KnockoutResults, StandingsRow, Tournament, TournamentError};
use crate::storage::BlobStore;
use rand::Rng;

/// Fixed key the tournament blob is stored under.
pub const STORAGE_KEY: &str = "fc26-tournament";

/// Single tournament plus the blob store it is saved to.
///
/// Every mutating call replaces the whole tournament at once or leaves it
/// untouched (`Err`). Save failures are logged and never undo the change.
pub struct TournamentStore<S: BlobStore> {
    storage: S,
    tournament: Tournament,
}

impl<S: BlobStore> TournamentStore<S> {
    /// Load the stored tournament; anything missing or unreadable starts empty.
    pub fn load(storage: S) -> Self {
        let tournament = match storage.read(STORAGE_KEY) {
            Ok(Some(raw)) => Tournament::from_blob(&raw),
            Ok(None) => Tournament::new(),
            Err(e) => {
                log::warn!("Could not read stored tournament, starting empty: {}", e);
                Tournament::new()
            }
        };
        log::info!(
            "Loaded tournament: {} players, {} matches",
            tournament.players.len(),
            tournament.matches.len()
        );
        Self {
            storage,
            tournament,
        }
    }

    pub fn tournament(&self) -> &Tournament {
        &self.tournament
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn standings(&self) -> Vec<StandingsRow> {
        logic::standings(&self.tournament)
    }

    pub fn bracket_stage(&self) -> BracketStage {
        logic::bracket_stage(&self.tournament)
    }

    pub fn knockout_results(&self) -> Option<KnockoutResults> {
        logic::knockout_results(&self.tournament)
    }

    pub fn add_player(&mut self, name: &str) -> Result<(), TournamentError> {
        self.apply(|t| logic::add_player(t, name))
    }

    pub fn remove_player(&mut self, player_id: &str) -> Result<(), TournamentError> {
        self.apply(|t| logic::remove_player(t, player_id))
    }

    pub fn shuffle_players(&mut self) {
        self.shuffle_players_with_rng(&mut rand::thread_rng());
    }

    pub fn shuffle_players_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.replace(logic::shuffle_players(&self.tournament, rng));
    }

    pub fn load_sample_players(&mut self) {
        self.replace(logic::load_sample_players(&self.tournament));
    }

    pub fn start_tournament(&mut self) -> Result<(), TournamentError> {
        self.apply(logic::start_tournament)
    }

    pub fn reset_tournament(&mut self) {
        self.replace(logic::reset_tournament(&self.tournament));
    }

    pub fn set_match_score(
        &mut self,
        match_id: &str,
        score_a: i64,
        score_b: i64,
    ) -> Result<(), TournamentError> {
        self.apply(|t| logic::set_match_score(t, match_id, score_a, score_b))
    }

    pub fn add_golden_goal_matches_for_ties(&mut self) -> Result<(), TournamentError> {
        self.apply(logic::add_golden_goal_matches_for_ties)
    }

    pub fn start_knockout_stage(&mut self) -> Result<(), TournamentError> {
        self.start_knockout_stage_with_rng(&mut rand::thread_rng())
    }

    pub fn start_knockout_stage_with_rng<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<(), TournamentError> {
        self.apply(|t| logic::start_knockout_stage(t, rng))
    }

    pub fn fill_sample_scores(&mut self, max_round: u32) {
        self.replace(logic::fill_sample_scores(&self.tournament, max_round));
    }

    fn apply<F>(&mut self, op: F) -> Result<(), TournamentError>
    where
        F: FnOnce(&Tournament) -> Result<Tournament, TournamentError>,
    {
        match op(&self.tournament) {
            Ok(next) => {
                self.replace(next);
                Ok(())
            }
            Err(e) => {
                log::debug!("Ignored: {}", e);
                Err(e)
            }
        }
    }

    fn replace(&mut self, next: Tournament) {
        self.tournament = next;
        self.persist();
    }

    fn persist(&self) {
        let blob = match self.tournament.to_blob() {
            Ok(blob) => blob,
            Err(e) => {
                log::warn!("Could not serialize tournament: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.write(STORAGE_KEY, &blob) {
            log::warn!("Could not save tournament: {}", e);
        }
    }
}
