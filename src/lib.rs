//! Capoeira jogos web app: library with models and tournament logic.

pub mod export;
pub mod logic;
pub mod models;
pub mod roster;

pub use logic::{
    advancement_preview, aggregate_round, break_tie, close_round, current_totals, final_standings,
    generate_pairings, parse_points, partition_players, record_score, resolve_advancement,
    start_category, GAME_POINTS_SCALE, SCHEDULED_CHAVE_SIZE,
};
pub use models::{
    AdvancementDecision, Apelido, Category, CategoryConfig, CategoryId, CategoryPhase, Chave,
    ChaveId, ChaveSlot, GameScore, GameType, JogosError, Pairing, PairingId, PendingClose, Player,
    PlayerPoints, RefereeEntry, Round, RoundTotals, ScheduleTemplate, ScoreField, TieBreak,
    REFEREE_COUNT,
};
