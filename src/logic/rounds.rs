//! Round lifecycle: draw rounds, take score edits, close on an advancement decision.

use crate::logic::advancement::resolve_advancement;
use crate::logic::pairing::{generate_pairings, SCHEDULED_CHAVE_SIZE};
use crate::logic::partition::partition_players;
use crate::logic::scoring::aggregate_round;
use crate::models::{
    AdvancementDecision, Apelido, Category, CategoryPhase, GameScore, JogosError, PairingId,
    PendingClose, Round, RoundTotals, ScoreField, REFEREE_COUNT,
};

/// Start play: take a category from AwaitingRoster to its first open round.
pub fn start_category(category: &mut Category) -> Result<(), JogosError> {
    if category.phase != CategoryPhase::AwaitingRoster {
        return Err(JogosError::InvalidState);
    }
    if category.config.chave_size == 0 {
        return Err(JogosError::InvalidChaveSize(0));
    }
    if category.config.chave_size != SCHEDULED_CHAVE_SIZE {
        return Err(JogosError::UnsupportedChaveSize(category.config.chave_size));
    }
    if category.roster.is_empty() {
        return Err(JogosError::EmptyRoster);
    }

    let entrants: Vec<Apelido> = category
        .roster
        .iter()
        .map(|player| player.apelido.clone())
        .collect();
    open_round(category, entrants, 1)
}

/// Build round `number` for the given entrants and append it as the open round.
///
/// 1. Draw chaves with the round-derived seed (base seed + round number), so
///    every round reshuffles independently yet reproducibly.
/// 2. Schedule every chave's games in config game-type order.
/// 3. Register a zeroed score record per pairing.
fn open_round(
    category: &mut Category,
    entrants: Vec<Apelido>,
    number: u32,
) -> Result<(), JogosError> {
    let seed = category.config.seed.wrapping_add(number as u64);
    let chaves = partition_players(&entrants, category.config.chave_size, seed)?;

    let mut pairings = Vec::new();
    for chave in &chaves {
        let mut schedule = generate_pairings(
            chave,
            &category.config.game_types,
            category.config.games_per_type,
            category.config.template,
        )?;
        for game_type in &category.config.game_types {
            if let Some(games) = schedule.remove(game_type) {
                pairings.extend(games);
            }
        }
    }

    let scores = pairings
        .iter()
        .map(|pairing| (pairing.id, GameScore::default()))
        .collect();

    category.rounds.push(Round {
        number,
        entrants,
        chaves,
        pairings,
        scores,
        closed: false,
    });
    category.pending_close = None;
    category.phase = CategoryPhase::RoundOpen;
    Ok(())
}

/// Edit one referee field of one pairing in the current round.
///
/// Allowed while the round is open or closing; an edit during a close throws
/// the now-stale decision away and reopens the round.
pub fn record_score(
    category: &mut Category,
    pairing_id: PairingId,
    referee: usize,
    field: ScoreField,
    value: impl Into<String>,
) -> Result<(), JogosError> {
    if !matches!(
        category.phase,
        CategoryPhase::RoundOpen | CategoryPhase::RoundClosing
    ) {
        return Err(JogosError::InvalidState);
    }
    if referee >= REFEREE_COUNT {
        return Err(JogosError::InvalidReferee(referee));
    }

    let round = category
        .current_round_mut()
        .ok_or(JogosError::InvalidState)?;
    if !round.pairings.iter().any(|pairing| pairing.id == pairing_id) {
        return Err(JogosError::PairingNotFound(pairing_id));
    }

    let score = round.scores.entry(pairing_id).or_default();
    let entry = &mut score.referees[referee];
    let value = value.into();
    match field {
        ScoreField::PointsA => entry.points_a = value,
        ScoreField::PointsB => entry.points_b = value,
        ScoreField::PointsGame => entry.points_game = value,
    }

    if category.phase == CategoryPhase::RoundClosing {
        category.pending_close = None;
        category.phase = CategoryPhase::RoundOpen;
    }
    Ok(())
}

/// Totals of the current round, derived fresh from the raw scores.
pub fn current_totals(category: &Category) -> Result<RoundTotals, JogosError> {
    let round = category.current_round().ok_or(JogosError::InvalidState)?;
    Ok(aggregate_round(round))
}

/// Resolve a close without touching anything. Drives the finish-round control.
pub fn advancement_preview(
    category: &Category,
    advance_count: usize,
) -> Result<AdvancementDecision, JogosError> {
    let round = category.current_round().ok_or(JogosError::InvalidState)?;
    resolve_advancement(&aggregate_round(round), advance_count)
}

/// Close the current round with `advance_count` players advancing.
///
/// 1. Aggregate the round and resolve the advancement.
/// 2. A boundary tie parks the close: the partial decision is stored, the
///    phase moves to RoundClosing, and the caller gets `PendingTieBreak`.
/// 3. A clean decision completes the close: totals fold into the running
///    standings and either the next round is drawn from the winners or, when
///    everyone advanced, the category is finished.
pub fn close_round(category: &mut Category, advance_count: usize) -> Result<(), JogosError> {
    if !matches!(
        category.phase,
        CategoryPhase::RoundOpen | CategoryPhase::RoundClosing
    ) {
        return Err(JogosError::InvalidState);
    }

    let round = category.current_round().ok_or(JogosError::InvalidState)?;
    let totals = aggregate_round(round);
    let decision = resolve_advancement(&totals, advance_count)?;

    if let Some(tie) = decision.pending.clone() {
        category.pending_close = Some(PendingClose {
            advance_count,
            decision,
        });
        category.phase = CategoryPhase::RoundClosing;
        return Err(JogosError::PendingTieBreak(tie));
    }

    let winners = decision.winners;
    complete_close(category, totals, winners, advance_count)
}

/// Resolve a one-slot boundary tie by picking `apelido`; the parked close
/// then completes.
pub fn break_tie(category: &mut Category, apelido: &Apelido) -> Result<(), JogosError> {
    if category.phase != CategoryPhase::RoundClosing {
        return Err(JogosError::InvalidState);
    }
    let pending = category
        .pending_close
        .clone()
        .ok_or(JogosError::InvalidState)?;
    let tie = pending
        .decision
        .pending
        .clone()
        .ok_or(JogosError::InvalidState)?;
    if tie.open_slots != 1 {
        // Several slots are contested: a pick cannot settle it, points must change.
        return Err(JogosError::PendingTieBreak(tie));
    }
    if !tie.candidates.contains(apelido) {
        return Err(JogosError::NotATieCandidate(apelido.clone()));
    }

    let round = category.current_round().ok_or(JogosError::InvalidState)?;
    let totals = aggregate_round(round);

    let mut winners = pending.decision.winners;
    winners.push(apelido.clone());
    complete_close(category, totals, winners, pending.advance_count)
}

/// Fold the closing round's totals into the running standings, then move on:
/// draw the next round from the winners, or finish when everyone advanced.
fn complete_close(
    category: &mut Category,
    totals: RoundTotals,
    winners: Vec<Apelido>,
    advance_count: usize,
) -> Result<(), JogosError> {
    let round = category
        .current_round_mut()
        .ok_or(JogosError::InvalidState)?;
    let entrant_count = round.entrants.len();
    let closed_number = round.number;
    round.closed = true;

    for (apelido, points) in &totals {
        *category.total_points.entry(apelido.clone()).or_insert(0.0) += points.total;
    }
    category.pending_close = None;

    if advance_count >= entrant_count {
        category.phase = CategoryPhase::Finished;
        return Ok(());
    }
    open_round(category, winners, closed_number + 1)
}

/// Tournament result once a category is finished: running totals, best first.
pub fn final_standings(category: &Category) -> Result<Vec<(Apelido, f64)>, JogosError> {
    if category.phase != CategoryPhase::Finished {
        return Err(JogosError::InvalidState);
    }
    Ok(category.standings())
}
