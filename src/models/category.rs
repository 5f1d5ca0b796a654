//! Category, its rounds, and JogosError.

use crate::models::chave::Chave;
use crate::models::game::{GameScore, GameType, Pairing, PairingId, ScheduleTemplate};
use crate::models::player::{Apelido, Player};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Errors that can occur during jogos operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum JogosError {
    /// No players to draw a round from.
    EmptyRoster,
    /// Chave size must be at least 1.
    InvalidChaveSize(usize),
    /// Game schedules exist only for chaves of 4.
    UnsupportedChaveSize(usize),
    /// A chave handed to the schedule builder has the wrong slot count.
    WrongChaveSize { expected: usize, got: usize },
    /// Roster file lacks a required column.
    MissingColumn(String),
    /// A roster row has no apelido and no name to fall back on.
    MissingApelido { row: usize },
    /// Two roster rows share an apelido (case-insensitive).
    DuplicateApelido(Apelido),
    /// Number of advancing players must be at least 1.
    InvalidAdvanceCount,
    /// Category is not in a phase that allows this action.
    InvalidState,
    /// No pairing with this id in the current round.
    PairingNotFound(PairingId),
    /// Referee index out of range (three referees per game).
    InvalidReferee(usize),
    /// The chosen player is not among the tied candidates.
    NotATieCandidate(Apelido),
    /// Closing is blocked until the boundary tie is resolved.
    PendingTieBreak(TieBreak),
    /// Workbook could not be written.
    ExportFailed(String),
    /// Roster artifact could not be read.
    RosterParse(String),
}

impl std::fmt::Display for JogosError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JogosError::EmptyRoster => write!(f, "No players in the roster"),
            JogosError::InvalidChaveSize(size) => write!(f, "Chave size {} is not usable", size),
            JogosError::UnsupportedChaveSize(size) => {
                write!(f, "No game schedule for chaves of {} (only 4)", size)
            }
            JogosError::WrongChaveSize { expected, got } => {
                write!(f, "Chave has {} slots, expected {}", got, expected)
            }
            JogosError::MissingColumn(column) => {
                write!(f, "Roster is missing the '{}' column", column)
            }
            JogosError::MissingApelido { row } => {
                write!(f, "Roster row {} has no apelido and no name to fall back on", row)
            }
            JogosError::DuplicateApelido(apelido) => {
                write!(f, "Duplicate apelido '{}' in the roster", apelido)
            }
            JogosError::InvalidAdvanceCount => {
                write!(f, "Number of advancing players must be at least 1")
            }
            JogosError::InvalidState => write!(f, "Invalid state for this action"),
            JogosError::PairingNotFound(_) => write!(f, "Pairing not found in the current round"),
            JogosError::InvalidReferee(referee) => {
                write!(f, "No referee {} (games have three)", referee)
            }
            JogosError::NotATieCandidate(apelido) => {
                write!(f, "'{}' is not one of the tied players", apelido)
            }
            JogosError::PendingTieBreak(tie) => write!(f, "{}", tie),
            JogosError::ExportFailed(message) => write!(f, "Export failed: {}", message),
            JogosError::RosterParse(message) => write!(f, "Roster could not be read: {}", message),
        }
    }
}

/// Identifier of a category: its roster file stem (e.g. "Adult Male A").
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current phase of a category.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryPhase {
    /// No round drawn yet.
    #[default]
    AwaitingRoster,
    /// A round is open and taking score entries.
    RoundOpen,
    /// A close was requested but a boundary tie needs the operator.
    RoundClosing,
    /// The final round closed; standings are the result.
    Finished,
}

/// Tunables for one category. The defaults match the printed sheets.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Slots per chave (the game schedule needs 4).
    pub chave_size: usize,
    /// Base seed for the draw; round n reshuffles with seed + n.
    pub seed: u64,
    /// Game styles played in every chave, in order.
    pub game_types: Vec<GameType>,
    /// Games of each style per chave.
    pub games_per_type: usize,
    pub template: ScheduleTemplate,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            chave_size: 4,
            seed: 42,
            game_types: GameType::ALL.to_vec(),
            games_per_type: 2,
            template: ScheduleTemplate::default(),
        }
    }
}

/// One round of group play within a category.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based round number.
    pub number: u32,
    /// Real players drawn into this round.
    pub entrants: Vec<Apelido>,
    pub chaves: Vec<Chave>,
    /// Every game of the round, in play order (chave by chave).
    pub pairings: Vec<Pairing>,
    /// Raw referee entries per pairing.
    pub scores: HashMap<PairingId, GameScore>,
    pub closed: bool,
}

/// An unresolved boundary tie blocking a round close.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TieBreak {
    /// Players sharing the cut score, in ranking order.
    pub candidates: Vec<Apelido>,
    /// Advancement slots the tie leaves open.
    pub open_slots: usize,
}

impl std::fmt::Display for TieBreak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.candidates.iter().map(Apelido::as_str).collect();
        if self.open_slots == 1 {
            write!(f, "Tie for the last spot: pick one of {}", names.join(", "))
        } else {
            write!(
                f,
                "{} players tied for {} spots ({}): adjust their points and close again",
                self.candidates.len(),
                self.open_slots,
                names.join(", ")
            )
        }
    }
}

/// Outcome of resolving a round close at a given advance count.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AdvancementDecision {
    /// Confirmed advancing players, best first.
    pub winners: Vec<Apelido>,
    /// Set when a boundary tie leaves slots contested.
    pub pending: Option<TieBreak>,
}

/// A close parked on a tie: what was asked and what resolved so far.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PendingClose {
    pub advance_count: usize,
    pub decision: AdvancementDecision,
}

/// Full category state: roster, configuration, rounds, and running totals.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Everyone from the roster file, in file order.
    pub roster: Vec<Player>,
    pub config: CategoryConfig,
    pub phase: CategoryPhase,
    /// All rounds so far; the last one is the current round while open.
    pub rounds: Vec<Round>,
    /// Running totals folded in from closed rounds.
    pub total_points: BTreeMap<Apelido, f64>,
    /// Stored decision while a close waits on a tie-break.
    pub pending_close: Option<PendingClose>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a category with a loaded roster, no round drawn yet.
    pub fn new(id: CategoryId, roster: Vec<Player>, config: CategoryConfig) -> Self {
        Self {
            id,
            roster,
            config,
            phase: CategoryPhase::AwaitingRoster,
            rounds: Vec::new(),
            total_points: BTreeMap::new(),
            pending_close: None,
            created_at: Utc::now(),
        }
    }

    /// The round currently open or closing, if any.
    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.last().filter(|round| !round.closed)
    }

    pub fn current_round_mut(&mut self) -> Option<&mut Round> {
        self.rounds.last_mut().filter(|round| !round.closed)
    }

    /// Roster lookup by apelido.
    pub fn player(&self, apelido: &Apelido) -> Option<&Player> {
        self.roster.iter().find(|player| &player.apelido == apelido)
    }

    /// Running standings: total points descending. Players on equal points
    /// keep apelido order.
    pub fn standings(&self) -> Vec<(Apelido, f64)> {
        let mut ranked: Vec<(Apelido, f64)> = self
            .total_points
            .iter()
            .map(|(apelido, points)| (apelido.clone(), *points))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }
}
