// Match lineup composition on a formation board

pub mod board;

pub use board::{LineupBoard, LineupSnapshot, Placement, SlotAssignment};
