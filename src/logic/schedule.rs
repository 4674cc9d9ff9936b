//! Group stage schedule: round-robin fixtures via the circle method.

use crate::models::{Player, PlayerId};

/// One generated group fixture.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fixture {
    pub player_a: PlayerId,
    pub player_b: PlayerId,
    pub round: u32,
}

/// Generate a round-robin schedule where every pair meets exactly once.
///
/// 1. Odd rosters get an empty "bye" slot so the slot count is even.
/// 2. Each round pairs slot `i` with slot `len - 1 - i`; pairs with the bye are dropped.
/// 3. Slot 0 stays fixed, the rest rotate one step (last slot moves to position 1).
///
/// Order of `players` is the seeding order; the result is deterministic for it.
pub fn generate_round_robin_schedule(players: &[Player]) -> Vec<Fixture> {
    if players.len() < 2 {
        return Vec::new();
    }

    let mut slots: Vec<Option<&PlayerId>> = players.iter().map(|p| Some(&p.id)).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let count = slots.len();
    let rounds = count - 1;

    let mut fixtures = Vec::with_capacity(players.len() * (players.len() - 1) / 2);
    for round in 0..rounds {
        for i in 0..count / 2 {
            if let (Some(a), Some(b)) = (slots[i], slots[count - 1 - i]) {
                fixtures.push(Fixture {
                    player_a: a.clone(),
                    player_b: b.clone(),
                    round: round as u32,
                });
            }
        }
        slots[1..].rotate_right(1);
    }
    fixtures
}
