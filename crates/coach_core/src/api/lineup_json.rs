// Match lineup JSON API
use serde::{Deserialize, Serialize};

use crate::config::CompositionConfig;
use crate::error::CompositionError;
use crate::lineup::{LineupBoard, LineupSnapshot};
use crate::models::{Formation, PlayerId, PlayerRef, RosterLookup, SlotId};

use super::SCHEMA_VERSION;

/// Lineup request sent by the lineup builder view
#[derive(Debug, Deserialize)]
pub struct LineupRequest {
    pub schema_version: u8,
    pub formation: Formation,
    #[serde(default)]
    pub config: Option<CompositionConfig>,
    pub command: LineupCommand,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum LineupCommand {
    /// Player dropped onto a slot
    Assign { player_id: PlayerId, slot_id: SlotId },

    Unassign { slot_id: SlotId },

    Bench { player_id: PlayerId },

    Unbench { player_id: PlayerId },

    MoveToBench { slot_id: SlotId },

    Summary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LineupResponse {
    pub schema_version: u8,
    pub success: bool,
    pub state: LineupSnapshot,
    pub occupancy: usize,
    pub slot_count: usize,
    pub is_complete: bool,
    /// Occupant pushed to the bench by an Assign
    pub displaced_player_id: Option<PlayerId>,
    /// Roster players neither on the field nor on the bench
    pub available_player_ids: Vec<PlayerId>,
    pub error_message: Option<String>,
}

/// Main entry point: applies one command to the lineup state and returns the new
/// state as JSON.
///
/// `state_json` is a lineup snapshot for the request's formation (an empty string
/// means an empty board) and `roster_json` the squad list.
pub fn lineup_command_json(
    request_json: &str,
    state_json: &str,
    roster_json: &str,
) -> Result<String, String> {
    let request: LineupRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))?;

    if request.schema_version != SCHEMA_VERSION {
        return Err(format!("Unsupported schema version: {}", request.schema_version));
    }

    let config = request.config.unwrap_or_default();
    config.validate().map_err(|e| e.to_string())?;

    let roster: Vec<PlayerRef> =
        serde_json::from_str(roster_json).map_err(|e| format!("Invalid roster JSON: {}", e))?;

    let state: LineupSnapshot = if state_json.trim().is_empty() {
        LineupSnapshot::default()
    } else {
        serde_json::from_str(state_json).map_err(|e| format!("Invalid state JSON: {}", e))?
    };

    let mut board =
        LineupBoard::from_snapshot(request.formation.slots(), &state, &roster, &config)
            .map_err(|e| format!("Invalid lineup state: {}", e))?;

    let (displaced_player_id, error_message) =
        match apply_command(&mut board, request.command, &roster) {
            Ok(displaced) => (displaced, None),
            Err(e) => {
                log::debug!("Lineup command rejected: {}", e);
                (None, Some(e.to_string()))
            }
        };

    let response = LineupResponse {
        schema_version: SCHEMA_VERSION,
        success: error_message.is_none(),
        state: board.snapshot(),
        occupancy: board.occupancy_count(),
        slot_count: board.slot_count(),
        is_complete: board.is_complete(),
        displaced_player_id,
        available_player_ids: board
            .available_players(&roster)
            .into_iter()
            .map(|p| p.id.clone())
            .collect(),
        error_message,
    };

    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize response: {}", e))
}

fn resolve(roster: &[PlayerRef], player_id: PlayerId) -> Result<PlayerRef, CompositionError> {
    roster.player(&player_id).ok_or(CompositionError::UnknownPlayer(player_id))
}

/// Returns the id of a player displaced to the bench, if any.
fn apply_command(
    board: &mut LineupBoard,
    command: LineupCommand,
    roster: &[PlayerRef],
) -> Result<Option<PlayerId>, CompositionError> {
    match command {
        LineupCommand::Assign { player_id, slot_id } => {
            let player = resolve(roster, player_id)?;
            Ok(board.assign(player, &slot_id)?.map(|p| p.id))
        }
        LineupCommand::Unassign { slot_id } => board.unassign(&slot_id).map(|_| None),
        LineupCommand::Bench { player_id } => {
            let player = resolve(roster, player_id)?;
            board.add_to_bench(player).map(|_| None)
        }
        LineupCommand::Unbench { player_id } => {
            board.remove_from_bench(&player_id);
            Ok(None)
        }
        LineupCommand::MoveToBench { slot_id } => board.move_to_bench(&slot_id).map(|_| None),
        LineupCommand::Summary => Ok(None),
    }
}
