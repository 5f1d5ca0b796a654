//! Integration tests for the chave draw: seeded shuffle, byes and chunking.

use capoeira_jogos::{partition_players, Apelido, ChaveId, JogosError};

fn apelidos(n: usize) -> Vec<Apelido> {
    (0..n).map(|i| Apelido::new(format!("P{i}"))).collect()
}

#[test]
fn same_seed_gives_same_draw() {
    let players = apelidos(9);
    let a = partition_players(&players, 4, 7).unwrap();
    let b = partition_players(&players, 4, 7).unwrap();
    assert_eq!(a, b);
}

#[test]
fn different_seed_gives_different_draw() {
    let players = apelidos(12);
    let a = partition_players(&players, 4, 1).unwrap();
    let b = partition_players(&players, 4, 2).unwrap();
    assert_ne!(a, b);
}

#[test]
fn pads_the_last_chave_with_placeholders() {
    let players = apelidos(9); // 9 players -> 3 chaves of 4, 3 byes
    let chaves = partition_players(&players, 4, 42).unwrap();
    assert_eq!(chaves.len(), 3);
    for chave in &chaves {
        assert_eq!(chave.slots.len(), 4);
    }
    let placeholders: usize = chaves
        .iter()
        .map(|c| c.slots.iter().filter(|s| s.is_placeholder()).count())
        .sum();
    assert_eq!(placeholders, 3);
    // Byes are padding, so they always sit at the tail of the draw.
    assert_eq!(
        chaves[2].slots.iter().filter(|s| s.is_placeholder()).count(),
        3
    );
}

#[test]
fn exact_multiple_needs_no_placeholders() {
    let chaves = partition_players(&apelidos(8), 4, 42).unwrap();
    assert_eq!(chaves.len(), 2);
    assert!(chaves
        .iter()
        .all(|c| c.slots.iter().all(|s| !s.is_placeholder())));
}

#[test]
fn every_player_appears_exactly_once() {
    let players = apelidos(9);
    let chaves = partition_players(&players, 4, 3).unwrap();
    let mut drawn: Vec<Apelido> = chaves
        .iter()
        .flat_map(|c| c.players().cloned())
        .collect();
    drawn.sort();
    let mut expected = players;
    expected.sort();
    assert_eq!(drawn, expected);
}

#[test]
fn chaves_are_numbered_from_one() {
    let chaves = partition_players(&apelidos(10), 4, 42).unwrap();
    let ids: Vec<ChaveId> = chaves.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![ChaveId(1), ChaveId(2), ChaveId(3)]);
}

#[test]
fn zero_chave_size_is_refused() {
    assert!(matches!(
        partition_players(&apelidos(4), 0, 42),
        Err(JogosError::InvalidChaveSize(0))
    ));
}

#[test]
fn empty_roster_is_refused() {
    assert!(matches!(
        partition_players(&[], 4, 42),
        Err(JogosError::EmptyRoster)
    ));
}
