use serde::{Deserialize, Serialize};

pub type SlotId = String;

/// Marker position on the pitch graphic, in percent of width (`x`) and height
/// (`y`, own goal at the bottom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCoordinates {
    pub x: u8,
    pub y: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSlot {
    pub slot_id: SlotId,
    pub role_label: String,
    pub coordinates: BoardCoordinates,
}

impl PositionSlot {
    pub fn new(slot_id: impl Into<String>, role_label: impl Into<String>, x: u8, y: u8) -> Self {
        Self {
            slot_id: slot_id.into(),
            role_label: role_label.into(),
            coordinates: BoardCoordinates { x, y },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formation {
    #[serde(rename = "4-4-2")]
    F442,
    #[serde(rename = "4-3-3")]
    F433,
    #[serde(rename = "4-2-3-1")]
    F4231,
    #[serde(rename = "3-5-2")]
    F352,
    #[serde(rename = "5-3-2")]
    F532,
}

// (slot id, role, x, y) with the goalkeeper first
type SlotSpec = (&'static str, &'static str, u8, u8);

const F442_SLOTS: [SlotSpec; 11] = [
    ("gk-1", "GK", 50, 90),
    ("lb-1", "LB", 20, 70),
    ("cb-1", "CB", 40, 70),
    ("cb-2", "CB", 60, 70),
    ("rb-1", "RB", 80, 70),
    ("lm-1", "LM", 20, 45),
    ("cm-1", "CM", 40, 45),
    ("cm-2", "CM", 60, 45),
    ("rm-1", "RM", 80, 45),
    ("st-1", "ST", 35, 20),
    ("st-2", "ST", 65, 20),
];

const F433_SLOTS: [SlotSpec; 11] = [
    ("gk-1", "GK", 50, 90),
    ("lb-1", "LB", 15, 70),
    ("cb-1", "CB", 38, 72),
    ("cb-2", "CB", 62, 72),
    ("rb-1", "RB", 85, 70),
    ("cm-1", "CM", 30, 48),
    ("cm-2", "CM", 50, 52),
    ("cm-3", "CM", 70, 48),
    ("lw-1", "LW", 20, 22),
    ("st-1", "ST", 50, 18),
    ("rw-1", "RW", 80, 22),
];

const F4231_SLOTS: [SlotSpec; 11] = [
    ("gk-1", "GK", 50, 90),
    ("lb-1", "LB", 15, 70),
    ("cb-1", "CB", 38, 72),
    ("cb-2", "CB", 62, 72),
    ("rb-1", "RB", 85, 70),
    ("dm-1", "DM", 38, 56),
    ("dm-2", "DM", 62, 56),
    ("lw-1", "LW", 20, 35),
    ("cam-1", "CAM", 50, 35),
    ("rw-1", "RW", 80, 35),
    ("st-1", "ST", 50, 15),
];

const F352_SLOTS: [SlotSpec; 11] = [
    ("gk-1", "GK", 50, 90),
    ("cb-1", "CB", 30, 72),
    ("cb-2", "CB", 50, 74),
    ("cb-3", "CB", 70, 72),
    ("lwb-1", "LWB", 12, 48),
    ("cm-1", "CM", 32, 50),
    ("cm-2", "CM", 50, 55),
    ("cm-3", "CM", 68, 50),
    ("rwb-1", "RWB", 88, 48),
    ("st-1", "ST", 38, 20),
    ("st-2", "ST", 62, 20),
];

const F532_SLOTS: [SlotSpec; 11] = [
    ("gk-1", "GK", 50, 90),
    ("lwb-1", "LWB", 10, 65),
    ("cb-1", "CB", 30, 72),
    ("cb-2", "CB", 50, 74),
    ("cb-3", "CB", 70, 72),
    ("rwb-1", "RWB", 90, 65),
    ("cm-1", "CM", 30, 45),
    ("cm-2", "CM", 50, 48),
    ("cm-3", "CM", 70, 45),
    ("st-1", "ST", 38, 20),
    ("st-2", "ST", 62, 20),
];

impl Formation {
    pub const ALL: [Formation; 5] =
        [Formation::F442, Formation::F433, Formation::F4231, Formation::F352, Formation::F532];

    /// Canonical formation code string (e.g., "4-3-3").
    pub fn code(&self) -> &'static str {
        match self {
            Formation::F442 => "4-4-2",
            Formation::F433 => "4-3-3",
            Formation::F4231 => "4-2-3-1",
            Formation::F352 => "3-5-2",
            Formation::F532 => "5-3-2",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL.into_iter().find(|f| f.code() == code)
    }

    /// Returns (defenders, midfielders, forwards)
    pub fn get_positions(&self) -> (u8, u8, u8) {
        match self {
            Formation::F442 => (4, 4, 2),
            Formation::F433 => (4, 3, 3),
            Formation::F4231 => (4, 5, 1), // 2 DM + 3 AM = 5 midfielders
            Formation::F352 => (3, 5, 2),
            Formation::F532 => (5, 3, 2),
        }
    }

    fn slot_specs(&self) -> &'static [SlotSpec; 11] {
        match self {
            Formation::F442 => &F442_SLOTS,
            Formation::F433 => &F433_SLOTS,
            Formation::F4231 => &F4231_SLOTS,
            Formation::F352 => &F352_SLOTS,
            Formation::F532 => &F532_SLOTS,
        }
    }

    /// The fixed slot layout a lineup board is initialized with.
    pub fn slots(&self) -> Vec<PositionSlot> {
        self.slot_specs()
            .iter()
            .map(|&(id, role, x, y)| PositionSlot::new(id, role, x, y))
            .collect()
    }
}
