use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type PlayerId = String;

/// Roster entry as seen by the lineup builder. Identity is `id` only; the other
/// fields are display attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: PlayerId,
    pub name: String,
    pub number: u8,
    #[serde(default)]
    pub position: Option<String>,
}

impl PlayerRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>, number: u8) -> Self {
        Self { id: id.into(), name: name.into(), number, position: None }
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    /// First word of the name, used for the label under a slot marker.
    pub fn short_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

/// Resolves player ids against the external roster.
pub trait RosterLookup {
    fn player(&self, id: &str) -> Option<PlayerRef>;
}

impl RosterLookup for [PlayerRef] {
    fn player(&self, id: &str) -> Option<PlayerRef> {
        self.iter().find(|p| p.id == id).cloned()
    }
}

impl RosterLookup for Vec<PlayerRef> {
    fn player(&self, id: &str) -> Option<PlayerRef> {
        self.as_slice().player(id)
    }
}

impl RosterLookup for HashMap<PlayerId, PlayerRef> {
    fn player(&self, id: &str) -> Option<PlayerRef> {
        self.get(id).cloned()
    }
}
