//! Score aggregation: free-form referee entries to per-player point totals.

use crate::models::{PlayerPoints, Round, RoundTotals};

/// Scale applied to the shared game points before crediting the pair.
pub const GAME_POINTS_SCALE: f64 = 0.9;

/// Numeric value of one raw referee entry.
///
/// Referees write what they like and junk never fails a round:
/// - blank or non-numeric text counts as 0,
/// - a `+`-separated entry is summed as whole numbers with malformed parts
///   counting as 0 ("3+4+5" is 12, "3+x" is 3),
/// - anything else is read as a plain number.
pub fn parse_points(entry: &str) -> f64 {
    let entry = entry.trim();
    if entry.is_empty() {
        return 0.0;
    }
    if entry.contains('+') {
        let sum: i64 = entry
            .split('+')
            .map(|part| part.trim().parse::<i64>().unwrap_or(0))
            .sum();
        return sum as f64;
    }
    entry.parse::<f64>().unwrap_or(0.0)
}

/// Fold a round's raw scores into per-player totals.
///
/// 1. Start every real entrant at zero, so players without a single entry
///    still appear in the totals.
/// 2. Walk the pairings in play order. Per pairing, sum the three referees:
///    own-side entries feed `personal`; the shared game entries, scaled by
///    `GAME_POINTS_SCALE`, feed `game` of each real player in the pairing.
/// 3. `total` is personal + game.
///
/// A pure function of the stored scores: the order edits arrived in cannot
/// change the result, and re-running it is free.
pub fn aggregate_round(round: &Round) -> RoundTotals {
    let mut totals: RoundTotals = round
        .entrants
        .iter()
        .map(|apelido| (apelido.clone(), PlayerPoints::default()))
        .collect();

    for pairing in &round.pairings {
        let score = match round.scores.get(&pairing.id) {
            Some(score) => score,
            None => continue,
        };

        let mut points_a = 0.0;
        let mut points_b = 0.0;
        let mut points_game = 0.0;
        for referee in &score.referees {
            points_a += parse_points(&referee.points_a);
            points_b += parse_points(&referee.points_b);
            points_game += parse_points(&referee.points_game);
        }
        let game_credit = points_game * GAME_POINTS_SCALE;

        if let Some(apelido) = pairing.side_a.apelido() {
            if let Some(points) = totals.get_mut(apelido) {
                points.personal += points_a;
                points.game += game_credit;
            }
        }
        if let Some(apelido) = pairing.side_b.apelido() {
            if let Some(points) = totals.get_mut(apelido) {
                points.personal += points_b;
                points.game += game_credit;
            }
        }
    }

    for points in totals.values_mut() {
        points.total = points.personal + points.game;
    }

    totals
}
