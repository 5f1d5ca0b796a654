//! Player and Apelido data structures.

use serde::{Deserialize, Serialize};

/// A player's apelido (capoeira nickname). The canonical identifier within a
/// category: chave slots, pairings, and point totals all key on it.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Apelido(String);

impl Apelido {
    pub fn new(apelido: impl Into<String>) -> Self {
        Self(apelido.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Apelido {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A rostered player in one category. Immutable once loaded.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub apelido: Apelido,
    /// Given name (roster column "Vorname").
    pub first_name: String,
    /// Family name (roster column "Name").
    pub last_name: String,
    /// Graduation cord (roster column "Kordel").
    pub corda: String,
    /// Roster column "Land".
    pub country: String,
    /// Roster column "Stadt".
    pub city: String,
}

impl Player {
    /// Create a player from an apelido alone; the descriptive fields start empty.
    pub fn new(apelido: impl Into<String>) -> Self {
        Self {
            apelido: Apelido::new(apelido),
            first_name: String::new(),
            last_name: String::new(),
            corda: String::new(),
            country: String::new(),
            city: String::new(),
        }
    }
}
