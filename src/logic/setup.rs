//! Setup phase: roster edits, schedule generation, reset, sample data.

use crate::logic::schedule::generate_round_robin_schedule;
use crate::models::{Match, MatchKind, Player, Score, Tournament, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;

/// Roster loaded by `load_sample_players`.
pub const SAMPLE_PLAYER_NAMES: [&str; 8] =
    ["abel", "sime", "teda", "gedi", "alazar", "beki", "haftish", "minalu"];

/// Scores cycled through by `fill_sample_scores`.
pub const SAMPLE_SCORES: [(u32, u32); 14] = [
    (2, 1),
    (0, 0),
    (3, 1),
    (1, 2),
    (2, 2),
    (1, 0),
    (3, 0),
    (0, 1),
    (2, 0),
    (1, 3),
    (0, 2),
    (1, 1),
    (3, 2),
    (2, 3),
];

/// Minimum roster size for a group schedule.
pub const MIN_PLAYERS: usize = 2;

/// Add a player by name (trimmed). An existing schedule is discarded, since
/// the roster cannot change under a generated schedule.
pub fn add_player(tournament: &Tournament, name: &str) -> Result<Tournament, TournamentError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TournamentError::EmptyPlayerName);
    }
    let mut next = tournament.clone();
    if next.has_schedule() {
        log::info!("Roster changed, discarding the generated schedule");
        clear_schedule(&mut next);
    }
    next.players.push(Player::new(name));
    Ok(next)
}

/// Remove a player by id; matches and seeds are cleared.
pub fn remove_player(tournament: &Tournament, player_id: &str) -> Result<Tournament, TournamentError> {
    let idx = tournament
        .players
        .iter()
        .position(|p| p.id == player_id)
        .ok_or_else(|| TournamentError::PlayerNotFound(player_id.to_string()))?;
    let mut next = tournament.clone();
    next.players.remove(idx);
    clear_schedule(&mut next);
    Ok(next)
}

/// Shuffle the roster order (the seeding order used by the schedule).
pub fn shuffle_players<R: Rng + ?Sized>(tournament: &Tournament, rng: &mut R) -> Tournament {
    let mut next = tournament.clone();
    next.players.shuffle(rng);
    next
}

/// Replace the roster with the sample players and clear the schedule.
pub fn load_sample_players(tournament: &Tournament) -> Tournament {
    let mut next = tournament.clone();
    next.players = SAMPLE_PLAYER_NAMES.iter().map(|name| Player::new(*name)).collect();
    clear_schedule(&mut next);
    next
}

/// Generate the group schedule for the current roster (replaces all matches).
pub fn start_tournament(tournament: &Tournament) -> Result<Tournament, TournamentError> {
    if tournament.players.len() < MIN_PLAYERS {
        return Err(TournamentError::NotEnoughPlayers {
            required: MIN_PLAYERS,
            available: tournament.players.len(),
        });
    }
    let matches: Vec<Match> = generate_round_robin_schedule(&tournament.players)
        .into_iter()
        .enumerate()
        .map(|(i, f)| {
            let id = format!("m-{}-{}-{}", i, f.player_a, f.player_b);
            Match::group(id, f.player_a, f.player_b, f.round)
        })
        .collect();
    log::info!(
        "Group stage scheduled: {} players, {} matches",
        tournament.players.len(),
        matches.len()
    );
    Ok(Tournament {
        players: tournament.players.clone(),
        matches,
        knockout_seeds: None,
    })
}

/// Back to setup: keep the roster, drop every match and the knockout draw.
pub fn reset_tournament(tournament: &Tournament) -> Tournament {
    let mut next = tournament.clone();
    clear_schedule(&mut next);
    next
}

/// Score every group match up to and including `max_round` with sample scores.
///
/// Matches are taken in (round, id) order and cycle through `SAMPLE_SCORES`.
pub fn fill_sample_scores(tournament: &Tournament, max_round: u32) -> Tournament {
    let mut targets: Vec<(u32, String)> = tournament
        .matches
        .iter()
        .filter_map(|m| match m.kind {
            MatchKind::Group { round } if round <= max_round => {
                Some((round, m.id.clone()))
            }
            _ => None,
        })
        .collect();
    targets.sort();

    let mut next = tournament.clone();
    for (i, (_, id)) in targets.iter().enumerate() {
        let (a, b) = SAMPLE_SCORES[i % SAMPLE_SCORES.len()];
        if let Some(m) = next.match_mut(id) {
            m.score = Some(Score::new(a, b));
        }
    }
    next
}

fn clear_schedule(tournament: &mut Tournament) {
    tournament.matches.clear();
    tournament.knockout_seeds = None;
}
