//! # coach_core - Session timeline and match lineup composition
//!
//! Domain models behind a coaching dashboard's session planner and lineup
//! builder. Views call discrete operations (drop, remove, reorder, assign,
//! bench) and persist through an injected [`save::SnapshotStore`].
//!
//! ## Features
//! - Ordered session timeline of plan bundles with duration validation
//! - Formation board where a player occupies at most one place
//! - Saved sessions, exercise plans and formation presets
//! - Compressed, checksummed snapshot files
//! - JSON command API for view integration
//!
//! ```rust
//! use coach_core::lineup::LineupBoard;
//! use coach_core::models::{Formation, PlayerRef};
//!
//! let mut board = LineupBoard::from_formation(Formation::F442);
//! board.assign(PlayerRef::new("p9", "Striker", 9), "st-1").unwrap();
//! board.assign(PlayerRef::new("p9", "Striker", 9), "st-2").unwrap();
//! assert_eq!(board.occupancy_count(), 1);
//! assert_eq!(board.progress_label(), "1/11");
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod lineup;
pub mod models;
pub mod reorder;
pub mod save;
pub mod training;

pub use config::CompositionConfig;
pub use error::{CompositionError, Result};
pub use lineup::{LineupBoard, LineupSnapshot, Placement};
pub use training::{SessionHistory, SessionTimeline, TimelineSnapshot};
