//! Pairings and scores: game types, schedule templates, referee entries.

use crate::models::chave::{ChaveId, ChaveSlot};
use crate::models::player::Apelido;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Unique identifier for a pairing (one game between two slots).
pub type PairingId = Uuid;

/// Referees scoring each game.
pub const REFEREE_COUNT: usize = 3;

/// The four game styles played in every chave. Declaration order is play order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    SaoBento,
    Benguela,
    Iuna,
    Angola,
}

impl GameType {
    /// All four styles in play order.
    pub const ALL: [GameType; 4] = [
        GameType::SaoBento,
        GameType::Benguela,
        GameType::Iuna,
        GameType::Angola,
    ];
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            GameType::SaoBento => "São Bento",
            GameType::Benguela => "Benguela",
            GameType::Iuna => "Iúna",
            GameType::Angola => "Angola",
        };
        f.write_str(label)
    }
}

/// Which game order a chave is scheduled with. Both orders come from the
/// printed sheets; `Standard` repeats the first two games for an 8-game sheet,
/// `Short` stops after the six distinct pairs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleTemplate {
    /// (A,B)(C,D)(A,C)(B,D)(A,D)(B,C)(A,B)(C,D)
    #[default]
    Standard,
    /// (A,B)(C,D)(A,C)(B,D)(A,D)(B,C)
    Short,
}

/// A single game between two slots of one chave.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub id: PairingId,
    pub chave: ChaveId,
    pub game_type: GameType,
    /// 1-based position within this chave's games of `game_type`.
    pub sequence: u32,
    pub side_a: ChaveSlot,
    pub side_b: ChaveSlot,
}

impl Pairing {
    pub fn new(
        chave: ChaveId,
        game_type: GameType,
        sequence: u32,
        side_a: ChaveSlot,
        side_b: ChaveSlot,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            chave,
            game_type,
            sequence,
            side_a,
            side_b,
        }
    }
}

/// Which referee field a score edit targets.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreField {
    PointsA,
    PointsB,
    PointsGame,
}

/// One referee's raw entries for a pairing. Free-form text; parsing happens at
/// aggregation time, and junk degrades to zero instead of failing the round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RefereeEntry {
    pub points_a: String,
    pub points_b: String,
    pub points_game: String,
}

impl Default for RefereeEntry {
    fn default() -> Self {
        Self {
            points_a: "0".to_string(),
            points_b: "0".to_string(),
            points_game: "0".to_string(),
        }
    }
}

/// Raw score record for one pairing: exactly three referees.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameScore {
    pub referees: [RefereeEntry; REFEREE_COUNT],
}

/// Derived point totals for one player. Never stored; recomputed from the raw
/// scores whenever they are needed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerPoints {
    pub personal: f64,
    pub game: f64,
    pub total: f64,
}

/// Totals per player for one round, in apelido order.
pub type RoundTotals = BTreeMap<Apelido, PlayerPoints>;
