use crate::models::{PlayerId, SlotId};
use thiserror::Error;

/// Validation failures raised by the composition models.
///
/// Every variant describes malformed caller input. A method that returns one of
/// these has left its model exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompositionError {
    #[error("Index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid duration: {minutes} minutes (allowed 1-{max})")]
    InvalidDuration { minutes: i64, max: u32 },

    #[error("Unknown slot: {0}")]
    UnknownSlot(SlotId),

    #[error("Player {player_id} is already assigned to slot {slot_id}")]
    AlreadyAssigned { player_id: PlayerId, slot_id: SlotId },

    #[error("Duplicate slot: {0}")]
    DuplicateSlot(SlotId),

    #[error("Unknown plan bundle: {0}")]
    UnknownBundle(String),

    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Player {0} appears more than once")]
    DuplicatePlayer(PlayerId),

    #[error("Lineup incomplete: {filled}/{total} positions filled")]
    IncompleteLineup { filled: usize, total: usize },

    #[error("Bench is full ({limit} players)")]
    BenchFull { limit: usize },

    #[error("Session name must not be empty")]
    EmptyName,

    #[error("Cannot save a session without entries")]
    EmptyTimeline,

    #[error("Saved session not found: {0}")]
    SessionNotFound(String),

    #[error("Invalid exercise plan: {0}")]
    InvalidPlan(String),
}

impl CompositionError {
    pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
        CompositionError::IndexOutOfRange { index, len }
    }
}

pub type Result<T> = std::result::Result<T, CompositionError>;
