// String-in/string-out command API for the dashboard views
pub mod lineup_json;
pub mod timeline_json;

/// Request/response schema version understood by this crate
pub const SCHEMA_VERSION: u8 = 1;

pub use lineup_json::{lineup_command_json, LineupCommand, LineupRequest, LineupResponse};
pub use timeline_json::{
    timeline_command_json, TimelineCommand, TimelineRequest, TimelineResponse,
};
