//! Chave (draw group) structures: fixed-size groups with placeholder byes.

use crate::models::player::Apelido;
use serde::{Deserialize, Serialize};

/// Number of a chave within a round (1-based, in draw order).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChaveId(pub u32);

impl std::fmt::Display for ChaveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One slot of a chave: a real player, or a bye filling the group up.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChaveSlot {
    Player(Apelido),
    Placeholder,
}

impl ChaveSlot {
    /// The apelido when this slot holds a real player.
    pub fn apelido(&self) -> Option<&Apelido> {
        match self {
            ChaveSlot::Player(apelido) => Some(apelido),
            ChaveSlot::Placeholder => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ChaveSlot::Placeholder)
    }
}

/// Player apelido, or the bye label used on the printed sheets.
impl std::fmt::Display for ChaveSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChaveSlot::Player(apelido) => write!(f, "{}", apelido),
            ChaveSlot::Placeholder => f.write_str("Platzhalter"),
        }
    }
}

/// A draw group: exactly `chave_size` slots, real players padded with byes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Chave {
    pub id: ChaveId,
    pub slots: Vec<ChaveSlot>,
}

impl Chave {
    pub fn new(id: ChaveId, slots: Vec<ChaveSlot>) -> Self {
        Self { id, slots }
    }

    /// Real players in this chave, in slot order.
    pub fn players(&self) -> impl Iterator<Item = &Apelido> {
        self.slots.iter().filter_map(ChaveSlot::apelido)
    }
}
