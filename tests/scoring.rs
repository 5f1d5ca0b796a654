//! Integration tests for score aggregation: entry parsing and point totals.

use capoeira_jogos::{
    aggregate_round, parse_points, Apelido, ChaveId, ChaveSlot, GameScore, GameType, Pairing,
    Round,
};

fn player(name: &str) -> ChaveSlot {
    ChaveSlot::Player(Apelido::new(name))
}

fn round_with(pairings: Vec<Pairing>, entrants: &[&str]) -> Round {
    let scores = pairings
        .iter()
        .map(|p| (p.id, GameScore::default()))
        .collect();
    Round {
        number: 1,
        entrants: entrants.iter().map(|n| Apelido::new(*n)).collect(),
        chaves: Vec::new(),
        pairings,
        scores,
        closed: false,
    }
}

#[test]
fn parse_points_handles_referee_shorthand() {
    assert_eq!(parse_points("3+4+5"), 12.0); // kick tally, summed as whole numbers
    assert_eq!(parse_points("3+x"), 3.0);
    assert_eq!(parse_points("2+2.5"), 2.0); // fractional parts of a sum count as 0
    assert_eq!(parse_points("4.5"), 4.5);
    assert_eq!(parse_points(" 7 "), 7.0);
    assert_eq!(parse_points("abc"), 0.0);
    assert_eq!(parse_points(""), 0.0);
}

#[test]
fn personal_and_game_points_credit_both_sides() {
    let pairing = Pairing::new(ChaveId(1), GameType::SaoBento, 1, player("A"), player("B"));
    let id = pairing.id;
    let mut round = round_with(vec![pairing], &["A", "B"]);

    let entry = &mut round.scores.get_mut(&id).unwrap().referees[0];
    entry.points_a = "3".to_string();
    entry.points_b = "1".to_string();
    entry.points_game = "10".to_string();

    let totals = aggregate_round(&round);
    let a = &totals[&Apelido::new("A")];
    let b = &totals[&Apelido::new("B")];
    assert_eq!(a.personal, 3.0);
    assert_eq!(b.personal, 1.0);
    // 10 shared points scale to 9 for each player of the pair.
    assert_eq!(a.game, 9.0);
    assert_eq!(b.game, 9.0);
    assert_eq!(a.total, 12.0);
    assert_eq!(b.total, 10.0);
}

#[test]
fn all_three_referees_are_summed() {
    let pairing = Pairing::new(ChaveId(1), GameType::Benguela, 1, player("A"), player("B"));
    let id = pairing.id;
    let mut round = round_with(vec![pairing], &["A", "B"]);

    let score = round.scores.get_mut(&id).unwrap();
    for (referee, value) in ["1", "2", "3"].iter().enumerate() {
        score.referees[referee].points_a = value.to_string();
    }

    let totals = aggregate_round(&round);
    assert_eq!(totals[&Apelido::new("A")].personal, 6.0);
}

#[test]
fn points_accumulate_over_a_players_pairings() {
    let first = Pairing::new(ChaveId(1), GameType::SaoBento, 1, player("A"), player("B"));
    let second = Pairing::new(ChaveId(1), GameType::Iuna, 1, player("C"), player("A"));
    let (first_id, second_id) = (first.id, second.id);
    let mut round = round_with(vec![first, second], &["A", "B", "C"]);

    round.scores.get_mut(&first_id).unwrap().referees[0].points_a = "4".to_string();
    round.scores.get_mut(&second_id).unwrap().referees[0].points_b = "5".to_string();

    let totals = aggregate_round(&round);
    assert_eq!(totals[&Apelido::new("A")].personal, 9.0);
}

#[test]
fn entrants_without_scores_still_appear() {
    let pairing = Pairing::new(ChaveId(1), GameType::Angola, 1, player("A"), player("B"));
    let round = round_with(vec![pairing], &["A", "B", "C"]);

    let totals = aggregate_round(&round);
    assert_eq!(totals.len(), 3);
    assert_eq!(totals[&Apelido::new("C")].total, 0.0);
}

#[test]
fn placeholders_never_earn_points() {
    let pairing = Pairing::new(
        ChaveId(1),
        GameType::SaoBento,
        1,
        player("A"),
        ChaveSlot::Placeholder,
    );
    let id = pairing.id;
    let mut round = round_with(vec![pairing], &["A"]);

    let entry = &mut round.scores.get_mut(&id).unwrap().referees[0];
    entry.points_b = "8".to_string();
    entry.points_game = "10".to_string();

    let totals = aggregate_round(&round);
    assert_eq!(totals.len(), 1);
    // The bye's side points vanish; the game points still reach the real player.
    let a = &totals[&Apelido::new("A")];
    assert_eq!(a.personal, 0.0);
    assert_eq!(a.game, 9.0);
}

#[test]
fn aggregation_is_idempotent() {
    let pairing = Pairing::new(ChaveId(1), GameType::Benguela, 1, player("A"), player("B"));
    let id = pairing.id;
    let mut round = round_with(vec![pairing], &["A", "B"]);
    round.scores.get_mut(&id).unwrap().referees[1].points_game = "3+3".to_string();

    assert_eq!(aggregate_round(&round), aggregate_round(&round));
}

#[test]
fn totals_do_not_depend_on_edit_order() {
    let first = Pairing::new(ChaveId(1), GameType::SaoBento, 1, player("A"), player("B"));
    let second = Pairing::new(ChaveId(1), GameType::Angola, 1, player("B"), player("A"));
    let edits = [(first.id, "4"), (second.id, "7")];
    let base = round_with(vec![first, second], &["A", "B"]);

    let mut forward = base.clone();
    for (id, value) in edits {
        forward.scores.get_mut(&id).unwrap().referees[0].points_a = value.to_string();
    }
    let mut backward = base;
    for (id, value) in edits.iter().rev() {
        backward.scores.get_mut(id).unwrap().referees[0].points_a = value.to_string();
    }

    assert_eq!(aggregate_round(&forward), aggregate_round(&backward));
}
