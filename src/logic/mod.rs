//! Jogos business logic: chave draws, game schedules, scoring, advancement.

mod advancement;
mod pairing;
mod partition;
mod rounds;
mod scoring;

pub use advancement::resolve_advancement;
pub use pairing::{generate_pairings, SCHEDULED_CHAVE_SIZE};
pub use partition::partition_players;
pub use rounds::{
    advancement_preview, break_tie, close_round, current_totals, final_standings, record_score,
    start_category,
};
pub use scoring::{aggregate_round, parse_points, GAME_POINTS_SCALE};
