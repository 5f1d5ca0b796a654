//! Game schedule: fixed pairing templates for chaves of four.

use crate::models::{Chave, GameType, JogosError, Pairing, ScheduleTemplate};
use std::collections::BTreeMap;

/// The only chave size the templates cover.
pub const SCHEDULED_CHAVE_SIZE: usize = 4;

/// Eight-game sheet: the six distinct pairs of four slots, then the first two
/// again so the closing games mirror the opening ones.
const STANDARD_PAIRS: [(usize, usize); 8] = [
    (0, 1),
    (2, 3),
    (0, 2),
    (1, 3),
    (0, 3),
    (1, 2),
    (0, 1),
    (2, 3),
];

/// Six-game sheet: each pair of slots meets exactly once.
const SHORT_PAIRS: [(usize, usize); 6] = [(0, 1), (2, 3), (0, 2), (1, 3), (0, 3), (1, 2)];

fn template_pairs(template: ScheduleTemplate) -> &'static [(usize, usize)] {
    match template {
        ScheduleTemplate::Standard => &STANDARD_PAIRS,
        ScheduleTemplate::Short => &SHORT_PAIRS,
    }
}

/// Build the games of one chave.
///
/// The template is consumed sequentially: `games_per_type` pairings per game
/// type, types in the given order, wrapping around to the top of the template
/// when the games outnumber its slots.
pub fn generate_pairings(
    chave: &Chave,
    game_types: &[GameType],
    games_per_type: usize,
    template: ScheduleTemplate,
) -> Result<BTreeMap<GameType, Vec<Pairing>>, JogosError> {
    if chave.slots.len() != SCHEDULED_CHAVE_SIZE {
        return Err(JogosError::WrongChaveSize {
            expected: SCHEDULED_CHAVE_SIZE,
            got: chave.slots.len(),
        });
    }

    let pairs = template_pairs(template);
    let mut schedule: BTreeMap<GameType, Vec<Pairing>> = BTreeMap::new();
    let mut cursor = 0usize;

    for &game_type in game_types {
        let games = schedule.entry(game_type).or_default();
        for sequence in 1..=games_per_type {
            let (a, b) = pairs[cursor % pairs.len()];
            cursor += 1;
            games.push(Pairing::new(
                chave.id,
                game_type,
                sequence as u32,
                chave.slots[a].clone(),
                chave.slots[b].clone(),
            ));
        }
    }

    Ok(schedule)
}
