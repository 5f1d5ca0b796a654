//! Advancement: pick who moves on, surface boundary ties.

use crate::models::{AdvancementDecision, Apelido, JogosError, RoundTotals, TieBreak};

/// Totals compare as centipoints: the scaled game points make raw float
/// equality unreliable, so two decimals decide what counts as a tie.
fn centipoints(total: f64) -> i64 {
    (total * 100.0).round() as i64
}

/// Decide who advances out of a round.
///
/// 1. An `advance_count` of 0 is refused.
/// 2. When no more players than slots remain, everyone advances.
/// 3. Otherwise rank by total descending. Whoever sits strictly above the cut
///    score is confirmed; players at the cut score contest the remaining
///    slots. One open slot lets the operator pick a winner, more than one
///    needs the points adjusted before the round can close.
pub fn resolve_advancement(
    totals: &RoundTotals,
    advance_count: usize,
) -> Result<AdvancementDecision, JogosError> {
    if advance_count == 0 {
        return Err(JogosError::InvalidAdvanceCount);
    }

    let mut ranked: Vec<(&Apelido, i64)> = totals
        .iter()
        .map(|(apelido, points)| (apelido, centipoints(points.total)))
        .collect();
    // Stable sort: players on equal points keep apelido order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    if ranked.len() <= advance_count {
        return Ok(AdvancementDecision {
            winners: ranked.into_iter().map(|(apelido, _)| apelido.clone()).collect(),
            pending: None,
        });
    }

    let cut = ranked[advance_count - 1].1;
    let mut winners: Vec<Apelido> = ranked
        .iter()
        .take_while(|(_, points)| *points > cut)
        .map(|(apelido, _)| (*apelido).clone())
        .collect();
    let candidates: Vec<Apelido> = ranked
        .iter()
        .filter(|(_, points)| *points == cut)
        .map(|(apelido, _)| (*apelido).clone())
        .collect();
    let open_slots = advance_count - winners.len();

    if candidates.len() == open_slots {
        // Nobody below the cut shares it: the candidates fill the open slots.
        winners.extend(candidates);
        return Ok(AdvancementDecision {
            winners,
            pending: None,
        });
    }

    Ok(AdvancementDecision {
        winners,
        pending: Some(TieBreak {
            candidates,
            open_slots,
        }),
    })
}
