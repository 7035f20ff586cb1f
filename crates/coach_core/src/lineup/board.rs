// Match lineup builder: players dropped onto fixed formation slots
use crate::config::CompositionConfig;
use crate::error::{CompositionError, Result};
use crate::models::{Formation, PlayerId, PlayerRef, PositionSlot, RosterLookup, SlotId};
use crate::save::{SaveError, SnapshotStore};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Where a player currently is on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    Unplaced,
    OnBench,
    OnField(SlotId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub slot_id: SlotId,
    pub player_id: PlayerId,
}

/// Occupied slots (in formation order) and bench player ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupSnapshot {
    pub assignments: Vec<SlotAssignment>,
    pub bench: Vec<PlayerId>,
}

/// Formation slots, each holding at most one player, plus the bench.
///
/// Invariants:
/// - the slot set is fixed when the board is created
/// - a player id occupies at most one slot
/// - a player id is never on the bench and on the field at once
#[derive(Debug, Clone)]
pub struct LineupBoard {
    slots: Vec<PositionSlot>,
    /// Parallel to `slots`
    occupants: Vec<Option<PlayerRef>>,
    bench: Vec<PlayerRef>,
    max_bench_size: Option<usize>,
}

impl LineupBoard {
    /// Creates an empty board over `slots`. Slot ids must be unique.
    pub fn initialize(slots: Vec<PositionSlot>) -> Result<Self> {
        Self::with_config(slots, &CompositionConfig::default())
    }

    pub fn with_config(slots: Vec<PositionSlot>, config: &CompositionConfig) -> Result<Self> {
        let mut seen = HashSet::new();
        for slot in &slots {
            if !seen.insert(slot.slot_id.as_str()) {
                return Err(CompositionError::DuplicateSlot(slot.slot_id.clone()));
            }
        }

        let occupants = vec![None; slots.len()];
        Ok(Self { slots, occupants, bench: Vec::new(), max_bench_size: config.max_bench_size })
    }

    pub fn from_formation(formation: Formation) -> Self {
        let slots = formation.slots();
        let occupants = vec![None; slots.len()];
        Self { slots, occupants, bench: Vec::new(), max_bench_size: None }
    }

    fn slot_index(&self, slot_id: &str) -> Result<usize> {
        self.slots
            .iter()
            .position(|s| s.slot_id == slot_id)
            .ok_or_else(|| CompositionError::UnknownSlot(slot_id.to_string()))
    }

    fn field_index_of(&self, player_id: &str) -> Option<usize> {
        self.occupants.iter().position(|o| o.as_ref().is_some_and(|p| p.id == player_id))
    }

    fn bench_index_of(&self, player_id: &str) -> Option<usize> {
        self.bench.iter().position(|p| p.id == player_id)
    }

    fn check_bench_room(&self, bench_len: usize) -> Result<()> {
        match self.max_bench_size {
            Some(limit) if bench_len >= limit => Err(CompositionError::BenchFull { limit }),
            _ => Ok(()),
        }
    }

    /// Puts `player` into `slot_id`.
    ///
    /// A player already on the field is moved, never copied: their previous slot
    /// is vacated. A different player already in the target slot is displaced to
    /// the bench and returned. The assigned player leaves the bench.
    pub fn assign(&mut self, player: PlayerRef, slot_id: &str) -> Result<Option<PlayerRef>> {
        let target = self.slot_index(slot_id)?;

        let displaces = self.occupants[target].as_ref().is_some_and(|p| p.id != player.id);
        if displaces {
            // The assigned player's bench seat frees up before the displaced one sits down
            let freed = usize::from(self.bench_index_of(&player.id).is_some());
            self.check_bench_room(self.bench.len() - freed)?;
        }

        if let Some(previous) = self.field_index_of(&player.id) {
            if previous != target {
                self.occupants[previous] = None;
                log::debug!("Lineup move {} from {}", player.id, self.slots[previous].slot_id);
            }
        }
        if let Some(i) = self.bench_index_of(&player.id) {
            self.bench.remove(i);
        }

        log::debug!("Lineup assign {} -> {}", player.id, slot_id);
        let displaced = self.occupants[target].replace(player);
        match displaced {
            Some(d) if !self.occupants[target].as_ref().is_some_and(|p| p.id == d.id) => {
                log::debug!("Lineup displaced {} to bench", d.id);
                self.bench.push(d.clone());
                Ok(Some(d))
            }
            _ => Ok(None),
        }
    }

    /// Empties `slot_id` and returns the player who was there. The player is not
    /// benched; the caller decides where they go.
    pub fn unassign(&mut self, slot_id: &str) -> Result<Option<PlayerRef>> {
        let index = self.slot_index(slot_id)?;
        let removed = self.occupants[index].take();
        if let Some(p) = &removed {
            log::debug!("Lineup unassign {} from {}", p.id, slot_id);
        }
        Ok(removed)
    }

    /// Adds `player` to the bench. Already benched players are left as they are.
    pub fn add_to_bench(&mut self, player: PlayerRef) -> Result<()> {
        if let Some(i) = self.field_index_of(&player.id) {
            return Err(CompositionError::AlreadyAssigned {
                player_id: player.id,
                slot_id: self.slots[i].slot_id.clone(),
            });
        }
        if self.bench_index_of(&player.id).is_some() {
            return Ok(());
        }
        self.check_bench_room(self.bench.len())?;

        log::debug!("Lineup bench {}", player.id);
        self.bench.push(player);
        Ok(())
    }

    pub fn remove_from_bench(&mut self, player_id: &str) -> Option<PlayerRef> {
        let i = self.bench_index_of(player_id)?;
        Some(self.bench.remove(i))
    }

    /// Moves the occupant of `slot_id` to the bench (unassign + add_to_bench as
    /// one step). Returns the moved player, `None` if the slot was empty.
    pub fn move_to_bench(&mut self, slot_id: &str) -> Result<Option<PlayerRef>> {
        let index = self.slot_index(slot_id)?;
        if self.occupants[index].is_none() {
            return Ok(None);
        }
        self.check_bench_room(self.bench.len())?;

        let player = self.occupants[index].take();
        if let Some(p) = &player {
            log::debug!("Lineup {} from {} to bench", p.id, slot_id);
            self.bench.push(p.clone());
        }
        Ok(player)
    }

    pub fn placement_of(&self, player_id: &str) -> Placement {
        if let Some(i) = self.field_index_of(player_id) {
            Placement::OnField(self.slots[i].slot_id.clone())
        } else if self.bench_index_of(player_id).is_some() {
            Placement::OnBench
        } else {
            Placement::Unplaced
        }
    }

    pub fn player_in(&self, slot_id: &str) -> Option<&PlayerRef> {
        let index = self.slot_index(slot_id).ok()?;
        self.occupants[index].as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.occupants.iter().all(Option::is_some)
    }

    pub fn occupancy_count(&self) -> usize {
        self.occupants.iter().filter(|o| o.is_some()).count()
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Progress text for the save button, e.g. "8/11".
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.occupancy_count(), self.slot_count())
    }

    pub fn slots(&self) -> &[PositionSlot] {
        &self.slots
    }

    pub fn bench(&self) -> &[PlayerRef] {
        &self.bench
    }

    /// Slots in formation order with their occupants.
    pub fn assignments(&self) -> impl Iterator<Item = (&PositionSlot, Option<&PlayerRef>)> {
        self.slots.iter().zip(self.occupants.iter().map(Option::as_ref))
    }

    /// Roster players neither on the field nor on the bench.
    pub fn available_players<'a>(&self, roster: &'a [PlayerRef]) -> Vec<&'a PlayerRef> {
        roster
            .iter()
            .filter(|p| self.field_index_of(&p.id).is_none() && self.bench_index_of(&p.id).is_none())
            .collect()
    }

    pub fn snapshot(&self) -> LineupSnapshot {
        LineupSnapshot {
            assignments: self
                .assignments()
                .filter_map(|(slot, player)| {
                    player.map(|p| SlotAssignment {
                        slot_id: slot.slot_id.clone(),
                        player_id: p.id.clone(),
                    })
                })
                .collect(),
            bench: self.bench.iter().map(|p| p.id.clone()).collect(),
        }
    }

    /// Replaces assignments and bench with `snapshot`, resolving players through
    /// `roster`. Nothing changes unless the whole snapshot is valid.
    pub fn restore<L>(&mut self, snapshot: &LineupSnapshot, roster: &L) -> Result<()>
    where
        L: RosterLookup + ?Sized,
    {
        let mut occupants: Vec<Option<PlayerRef>> = vec![None; self.slots.len()];
        let mut placed = HashSet::new();

        for assignment in &snapshot.assignments {
            let index = self.slot_index(&assignment.slot_id)?;
            if occupants[index].is_some() {
                return Err(CompositionError::DuplicateSlot(assignment.slot_id.clone()));
            }
            if !placed.insert(assignment.player_id.as_str()) {
                return Err(CompositionError::DuplicatePlayer(assignment.player_id.clone()));
            }
            let player = roster
                .player(&assignment.player_id)
                .ok_or_else(|| CompositionError::UnknownPlayer(assignment.player_id.clone()))?;
            occupants[index] = Some(player);
        }

        if let Some(limit) = self.max_bench_size {
            if snapshot.bench.len() > limit {
                return Err(CompositionError::BenchFull { limit });
            }
        }

        let mut bench = Vec::with_capacity(snapshot.bench.len());
        for player_id in &snapshot.bench {
            if !placed.insert(player_id.as_str()) {
                return Err(CompositionError::DuplicatePlayer(player_id.clone()));
            }
            let player = roster
                .player(player_id)
                .ok_or_else(|| CompositionError::UnknownPlayer(player_id.clone()))?;
            bench.push(player);
        }

        self.occupants = occupants;
        self.bench = bench;
        log::debug!("Lineup restored: {} placed, {} benched", self.occupancy_count(), self.bench.len());
        Ok(())
    }

    pub fn from_snapshot<L>(
        slots: Vec<PositionSlot>,
        snapshot: &LineupSnapshot,
        roster: &L,
        config: &CompositionConfig,
    ) -> Result<Self>
    where
        L: RosterLookup + ?Sized,
    {
        let mut board = Self::with_config(slots, config)?;
        board.restore(snapshot, roster)?;
        Ok(board)
    }

    pub fn save_to<S>(&self, store: &mut S) -> std::result::Result<(), SaveError>
    where
        S: SnapshotStore<LineupSnapshot> + ?Sized,
    {
        store.save(&self.snapshot())
    }

    /// Saves only a full lineup, as the lineup screen does. A board with empty
    /// slots fails with [`CompositionError::IncompleteLineup`] and nothing is written.
    pub fn save_complete_to<S>(&self, store: &mut S) -> std::result::Result<(), SaveError>
    where
        S: SnapshotStore<LineupSnapshot> + ?Sized,
    {
        if !self.is_complete() {
            return Err(CompositionError::IncompleteLineup {
                filled: self.occupancy_count(),
                total: self.slot_count(),
            }
            .into());
        }
        self.save_to(store)
    }

    /// Restores from `store`. Returns `Ok(false)` when the store holds nothing.
    pub fn load_from<S, L>(&mut self, store: &S, roster: &L) -> std::result::Result<bool, SaveError>
    where
        S: SnapshotStore<LineupSnapshot> + ?Sized,
        L: RosterLookup + ?Sized,
    {
        match store.load()? {
            Some(snapshot) => {
                self.restore(&snapshot, roster)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
