pub mod bundle;
pub mod formation;
pub mod player;

pub use bundle::{BundleId, BundleLookup, CatalogItem, ItemKind, PlanBundle};
pub use formation::{BoardCoordinates, Formation, PositionSlot, SlotId};
pub use player::{PlayerId, PlayerRef, RosterLookup};
