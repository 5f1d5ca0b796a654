//! Chave draw: seeded shuffle, bye padding, fixed-size chunks.

use crate::models::{Apelido, Chave, ChaveId, ChaveSlot, JogosError};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Partition players into chaves of `chave_size`.
///
/// 1. Shuffle with a ChaCha8 rng seeded from `seed`; the same seed gives the
///    same draw on every run and platform.
/// 2. Pad with placeholder slots up to a multiple of `chave_size`.
/// 3. Chunk in order: ceil(n / chave_size) chaves, numbered from 1.
pub fn partition_players(
    players: &[Apelido],
    chave_size: usize,
    seed: u64,
) -> Result<Vec<Chave>, JogosError> {
    if chave_size == 0 {
        return Err(JogosError::InvalidChaveSize(chave_size));
    }
    if players.is_empty() {
        return Err(JogosError::EmptyRoster);
    }

    let mut slots: Vec<ChaveSlot> = players.iter().cloned().map(ChaveSlot::Player).collect();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    slots.shuffle(&mut rng);

    let remainder = slots.len() % chave_size;
    if remainder != 0 {
        let missing = chave_size - remainder;
        slots.extend(std::iter::repeat(ChaveSlot::Placeholder).take(missing));
    }

    let chaves = slots
        .chunks_exact(chave_size)
        .enumerate()
        .map(|(i, chunk)| Chave::new(ChaveId(i as u32 + 1), chunk.to_vec()))
        .collect();

    Ok(chaves)
}
