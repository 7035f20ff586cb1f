// Training session planning: timeline of plan bundles, exercise order, saved sessions

pub mod exercise_plan;
pub mod history;
pub mod timeline;

pub use exercise_plan::{ExercisePlan, Intensity};
pub use history::{SavedSession, SessionHistory};
pub use timeline::{SessionTimeline, TimelineEntry, TimelineSnapshot, TimelineSnapshotItem};
