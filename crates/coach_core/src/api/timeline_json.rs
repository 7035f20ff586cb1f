// Session timeline JSON API
use serde::{Deserialize, Serialize};

use crate::config::CompositionConfig;
use crate::error::CompositionError;
use crate::models::{BundleLookup, PlanBundle};
use crate::training::{SessionTimeline, TimelineSnapshot};

use super::SCHEMA_VERSION;

/// Timeline request sent by the planner view
#[derive(Debug, Deserialize)]
pub struct TimelineRequest {
    pub schema_version: u8,
    #[serde(default)]
    pub config: Option<CompositionConfig>,
    pub command: TimelineCommand,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum TimelineCommand {
    /// Bundle dropped onto the timeline; omitted duration uses the configured default
    Drop { bundle_id: String, duration_minutes: Option<u32> },

    Remove { index: usize },

    SetDuration { index: usize, minutes: i32 },

    Reorder { from: usize, to: usize },

    /// Echo the current state without changes
    Summary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TimelineResponse {
    pub schema_version: u8,
    pub success: bool,
    pub state: TimelineSnapshot,
    pub entry_count: usize,
    pub total_duration_minutes: u32,
    pub error_message: Option<String>,
}

/// Main entry point: applies one command to the timeline state and returns the
/// new state as JSON.
///
/// `state_json` is a timeline snapshot (an empty string means an empty
/// timeline) and `catalog_json` the list of plan bundles the view can drop.
/// Rejected commands produce `success: false` with the unchanged state;
/// malformed input is an `Err`.
pub fn timeline_command_json(
    request_json: &str,
    state_json: &str,
    catalog_json: &str,
) -> Result<String, String> {
    let request: TimelineRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))?;

    if request.schema_version != SCHEMA_VERSION {
        return Err(format!("Unsupported schema version: {}", request.schema_version));
    }

    let config = request.config.unwrap_or_default();
    config.validate().map_err(|e| e.to_string())?;

    let catalog: Vec<PlanBundle> =
        serde_json::from_str(catalog_json).map_err(|e| format!("Invalid catalog JSON: {}", e))?;

    let state: TimelineSnapshot = if state_json.trim().is_empty() {
        TimelineSnapshot::default()
    } else {
        serde_json::from_str(state_json).map_err(|e| format!("Invalid state JSON: {}", e))?
    };

    let mut timeline = SessionTimeline::from_snapshot(&state, &catalog, config)
        .map_err(|e| format!("Invalid timeline state: {}", e))?;

    let error_message = match apply_command(&mut timeline, request.command, &catalog) {
        Ok(()) => None,
        Err(e) => {
            log::debug!("Timeline command rejected: {}", e);
            Some(e.to_string())
        }
    };

    let response = TimelineResponse {
        schema_version: SCHEMA_VERSION,
        success: error_message.is_none(),
        state: timeline.snapshot(),
        entry_count: timeline.len(),
        total_duration_minutes: timeline.total_duration_minutes(),
        error_message,
    };

    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize response: {}", e))
}

fn apply_command(
    timeline: &mut SessionTimeline,
    command: TimelineCommand,
    catalog: &[PlanBundle],
) -> Result<(), CompositionError> {
    match command {
        TimelineCommand::Drop { bundle_id, duration_minutes } => {
            let bundle =
                catalog.bundle(&bundle_id).ok_or(CompositionError::UnknownBundle(bundle_id))?;
            match duration_minutes {
                Some(minutes) => timeline.append(bundle, minutes),
                None => timeline.append_default(bundle),
            };
            Ok(())
        }
        TimelineCommand::Remove { index } => timeline.remove_at(index).map(|_| ()),
        TimelineCommand::SetDuration { index, minutes } => timeline.set_duration(index, minutes),
        TimelineCommand::Reorder { from, to } => timeline.reorder(from, to),
        TimelineCommand::Summary => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog_json() -> String {
        json!([
            {"id": "a", "name": "Warm-up"},
            {"id": "b", "name": "Pressing triggers"},
            {"id": "c", "name": "Finishing"}
        ])
        .to_string()
    }

    fn run(command: serde_json::Value, state: &str) -> TimelineResponse {
        let request = json!({"schema_version": 1, "command": command}).to_string();
        let out = timeline_command_json(&request, state, &catalog_json()).unwrap();
        serde_json::from_str(&out).unwrap()
    }

    #[test]
    fn test_drop_uses_default_duration() {
        let response = run(json!({"type": "Drop", "bundle_id": "a"}), "");
        assert!(response.success);
        assert_eq!(response.entry_count, 1);
        assert_eq!(response.total_duration_minutes, 30);
    }

    #[test]
    fn test_commands_chain_through_state() {
        let state = serde_json::to_string(
            &run(json!({"type": "Drop", "bundle_id": "a", "duration_minutes": 15}), "").state,
        )
        .unwrap();
        let state = serde_json::to_string(
            &run(json!({"type": "Drop", "bundle_id": "b", "duration_minutes": 45}), &state).state,
        )
        .unwrap();

        let response = run(json!({"type": "Reorder", "from": 1, "to": 0}), &state);
        assert!(response.success);
        assert_eq!(response.state.items[0].bundle_id, "b");
        assert_eq!(response.total_duration_minutes, 60);
    }

    #[test]
    fn test_rejected_command_keeps_state() {
        let state = json!([{"bundle_id": "a", "duration_minutes": 20}]).to_string();

        let response = run(json!({"type": "SetDuration", "index": 0, "minutes": 0}), &state);
        assert!(!response.success);
        assert_eq!(response.state.items[0].duration_minutes, 20);
        assert!(response.error_message.unwrap().contains("Invalid duration"));

        let response = run(json!({"type": "Remove", "index": 3}), &state);
        assert!(!response.success);
        assert_eq!(response.entry_count, 1);

        let response = run(json!({"type": "Drop", "bundle_id": "zzz"}), &state);
        assert!(!response.success);
        assert_eq!(response.error_message.as_deref(), Some("Unknown plan bundle: zzz"));
    }

    #[test]
    fn test_config_limits_apply() {
        let request = json!({
            "schema_version": 1,
            "config": {"max_duration_minutes": 90},
            "command": {"type": "SetDuration", "index": 0, "minutes": 120}
        })
        .to_string();
        let state = json!([{"bundle_id": "c", "duration_minutes": 60}]).to_string();

        let out = timeline_command_json(&request, &state, &catalog_json()).unwrap();
        let response: TimelineResponse = serde_json::from_str(&out).unwrap();
        assert!(!response.success);
    }

    #[test]
    fn test_oversized_duration_limit_is_rejected() {
        let request = json!({
            "schema_version": 1,
            "config": {"max_duration_minutes": 2147483647},
            "command": {"type": "Summary"}
        })
        .to_string();
        let item = json!({"bundle_id": "a", "duration_minutes": 2147483647});
        let state = json!([item, item, item]).to_string();

        let err = timeline_command_json(&request, &state, &catalog_json()).unwrap_err();
        assert!(err.contains("max_duration_minutes"));
    }

    #[test]
    fn test_full_day_of_blocks_totals_without_overflow() {
        let request = json!({
            "schema_version": 1,
            "config": {"max_duration_minutes": 1440},
            "command": {"type": "Summary"}
        })
        .to_string();
        let item = json!({"bundle_id": "a", "duration_minutes": 1440});
        let state = json!([item, item, item]).to_string();

        let out = timeline_command_json(&request, &state, &catalog_json()).unwrap();
        let response: TimelineResponse = serde_json::from_str(&out).unwrap();
        assert!(response.success);
        assert_eq!(response.total_duration_minutes, 4320);
    }

    #[test]
    fn test_malformed_input_is_err() {
        let summary = json!({"schema_version": 1, "command": {"type": "Summary"}}).to_string();

        assert!(timeline_command_json("{", "", &catalog_json()).is_err());
        assert!(timeline_command_json(&summary, "not json", &catalog_json()).is_err());
        assert!(timeline_command_json(&summary, "", "[").is_err());

        let v2 = json!({"schema_version": 2, "command": {"type": "Summary"}}).to_string();
        let err = timeline_command_json(&v2, "", &catalog_json()).unwrap_err();
        assert_eq!(err, "Unsupported schema version: 2");

        // State referencing a bundle missing from the catalog
        let state = json!([{"bundle_id": "gone", "duration_minutes": 10}]).to_string();
        assert!(timeline_command_json(&summary, &state, &catalog_json()).is_err());
    }
}
