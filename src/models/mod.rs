//! Data structures for the jogos: players, chaves, games, categories.

mod category;
mod chave;
mod game;
mod player;

pub use category::{
    AdvancementDecision, Category, CategoryConfig, CategoryId, CategoryPhase, JogosError,
    PendingClose, Round, TieBreak,
};
pub use chave::{Chave, ChaveId, ChaveSlot};
pub use game::{
    GameScore, GameType, Pairing, PairingId, PlayerPoints, RefereeEntry, RoundTotals,
    ScheduleTemplate, ScoreField, REFEREE_COUNT,
};
pub use player::{Apelido, Player};
