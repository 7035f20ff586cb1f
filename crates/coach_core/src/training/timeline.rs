// Session planner timeline: the running order of a coaching session
use crate::config::CompositionConfig;
use crate::error::{CompositionError, Result};
use crate::models::{BundleLookup, PlanBundle};
use crate::reorder::move_item;
use crate::save::{SaveError, SnapshotStore};
use serde::{Deserialize, Serialize};

/// One plan bundle placed on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Unique per insertion; dropping the same bundle twice yields two ids
    pub entry_id: String,
    pub bundle: PlanBundle,
    /// Always at least 1
    pub duration_minutes: u32,
    /// Display-only flag (details panel open)
    #[serde(default)]
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSnapshotItem {
    pub bundle_id: String,
    pub duration_minutes: u32,
}

/// Ordered `{bundle_id, duration_minutes}` list handed to the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimelineSnapshot {
    pub items: Vec<TimelineSnapshotItem>,
}

impl TimelineSnapshot {
    /// Saturates at `u32::MAX`; decoded snapshots are not range checked.
    pub fn total_duration_minutes(&self) -> u32 {
        self.items.iter().fold(0u32, |total, i| total.saturating_add(i.duration_minutes))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SessionTimeline {
    entries: Vec<TimelineEntry>,
    /// Monotonic suffix for entry ids, never reset within one timeline
    next_seq: u64,
    config: CompositionConfig,
}

impl Default for SessionTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionTimeline {
    pub fn new() -> Self {
        Self::with_config(CompositionConfig::default())
    }

    pub fn with_config(config: CompositionConfig) -> Self {
        Self { entries: Vec::new(), next_seq: 0, config }
    }

    pub fn config(&self) -> &CompositionConfig {
        &self.config
    }

    fn next_entry_id(&mut self, bundle_id: &str) -> String {
        let id = format!("{}-{}", bundle_id, self.next_seq);
        self.next_seq += 1;
        id
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.entries.len() {
            return Err(CompositionError::out_of_range(index, self.entries.len()));
        }
        Ok(())
    }

    fn check_duration(&self, minutes: i64) -> Result<u32> {
        let max = self.config.max_duration_minutes;
        match u32::try_from(minutes) {
            Ok(m) if m >= 1 && m <= max => Ok(m),
            _ => Err(CompositionError::InvalidDuration { minutes, max }),
        }
    }

    /// Appends a bundle at the end of the timeline.
    ///
    /// Never fails. `duration_minutes` is clamped into `[1, max_duration_minutes]`
    /// so the positive-duration invariant holds for every entry.
    pub fn append(&mut self, bundle: PlanBundle, duration_minutes: u32) -> &TimelineEntry {
        let entry_id = self.next_entry_id(&bundle.id);
        let duration_minutes = self.config.clamp_duration(duration_minutes);

        log::debug!("Timeline append {} ({} min)", entry_id, duration_minutes);
        self.entries.push(TimelineEntry { entry_id, bundle, duration_minutes, expanded: false });

        let last = self.entries.len() - 1;
        &self.entries[last]
    }

    /// Appends with the configured default duration (30 minutes unless configured).
    pub fn append_default(&mut self, bundle: PlanBundle) -> &TimelineEntry {
        let duration = self.config.default_duration_minutes;
        self.append(bundle, duration)
    }

    /// Removes the entry at `index`; later entries shift left and keep their ids.
    pub fn remove_at(&mut self, index: usize) -> Result<TimelineEntry> {
        self.check_index(index)?;
        let removed = self.entries.remove(index);
        log::debug!("Timeline remove {} at {}", removed.entry_id, index);
        Ok(removed)
    }

    /// Replaces the duration of the entry at `index`.
    ///
    /// Rejects non-positive values and values above the configured maximum with
    /// [`CompositionError::InvalidDuration`] instead of clamping.
    pub fn set_duration(&mut self, index: usize, minutes: i32) -> Result<()> {
        self.check_index(index)?;
        let minutes = match self.check_duration(i64::from(minutes)) {
            Ok(m) => m,
            Err(e) => {
                log::debug!("Timeline set_duration rejected: {}", e);
                return Err(e);
            }
        };

        self.entries[index].duration_minutes = minutes;
        Ok(())
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        move_item(&mut self.entries, from, to)?;
        log::debug!("Timeline reorder {} -> {}", from, to);
        Ok(())
    }

    /// Flips the details flag and returns its new value.
    pub fn toggle_expanded(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        let entry = &mut self.entries[index];
        entry.expanded = !entry.expanded;
        Ok(entry.expanded)
    }

    /// Sum of all entry durations, recomputed on every call.
    pub fn total_duration_minutes(&self) -> u32 {
        self.entries.iter().fold(0u32, |total, e| total.saturating_add(e.duration_minutes))
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&TimelineEntry> {
        self.entries.get(index)
    }

    pub fn position_of(&self, entry_id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.entry_id == entry_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn snapshot(&self) -> TimelineSnapshot {
        TimelineSnapshot {
            items: self
                .entries
                .iter()
                .map(|e| TimelineSnapshotItem {
                    bundle_id: e.bundle.id.clone(),
                    duration_minutes: e.duration_minutes,
                })
                .collect(),
        }
    }

    /// Replaces the contents with `snapshot`, resolving bundles through `lookup`.
    ///
    /// All items are validated before anything is replaced: an unknown bundle or a
    /// duration outside `[1, max]` rejects the whole snapshot.
    pub fn restore<L>(&mut self, snapshot: &TimelineSnapshot, lookup: &L) -> Result<()>
    where
        L: BundleLookup + ?Sized,
    {
        let mut resolved = Vec::with_capacity(snapshot.items.len());
        for item in &snapshot.items {
            let bundle = lookup
                .bundle(&item.bundle_id)
                .ok_or_else(|| CompositionError::UnknownBundle(item.bundle_id.clone()))?;
            let duration = self.check_duration(i64::from(item.duration_minutes))?;
            resolved.push((bundle, duration));
        }

        let mut entries = Vec::with_capacity(resolved.len());
        for (bundle, duration_minutes) in resolved {
            let entry_id = self.next_entry_id(&bundle.id);
            entries.push(TimelineEntry { entry_id, bundle, duration_minutes, expanded: false });
        }
        self.entries = entries;

        log::debug!("Timeline restored with {} entries", self.entries.len());
        Ok(())
    }

    /// Builds a fresh timeline from a snapshot.
    pub fn from_snapshot<L>(
        snapshot: &TimelineSnapshot,
        lookup: &L,
        config: CompositionConfig,
    ) -> Result<Self>
    where
        L: BundleLookup + ?Sized,
    {
        let mut timeline = Self::with_config(config);
        timeline.restore(snapshot, lookup)?;
        Ok(timeline)
    }

    pub fn save_to<S>(&self, store: &mut S) -> std::result::Result<(), SaveError>
    where
        S: SnapshotStore<TimelineSnapshot> + ?Sized,
    {
        store.save(&self.snapshot())
    }

    /// Restores from `store`. Returns `Ok(false)` and leaves the timeline untouched
    /// when the store holds nothing.
    pub fn load_from<S, L>(&mut self, store: &S, lookup: &L) -> std::result::Result<bool, SaveError>
    where
        S: SnapshotStore<TimelineSnapshot> + ?Sized,
        L: BundleLookup + ?Sized,
    {
        match store.load()? {
            Some(snapshot) => {
                self.restore(&snapshot, lookup)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
