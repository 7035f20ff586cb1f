// Saved sessions ("Past Sessions" list)
use super::timeline::{SessionTimeline, TimelineSnapshot};
use crate::error::{CompositionError, Result};
use crate::models::BundleLookup;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSession {
    pub id: String,
    pub name: String,
    pub items: TimelineSnapshot,
    pub total_duration_minutes: u32,
    pub created_at: DateTime<Utc>,
}

/// Named session snapshots, most recent first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionHistory {
    sessions: Vec<SavedSession>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves the current timeline under `name` and returns the stored record.
    pub fn save(&mut self, name: &str, timeline: &SessionTimeline) -> Result<&SavedSession> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CompositionError::EmptyName);
        }
        if timeline.is_empty() {
            return Err(CompositionError::EmptyTimeline);
        }

        let items = timeline.snapshot();
        let session = SavedSession {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            total_duration_minutes: items.total_duration_minutes(),
            items,
            created_at: Utc::now(),
        };

        log::info!("Saved session '{}' ({} min)", session.name, session.total_duration_minutes);
        self.sessions.insert(0, session);
        Ok(&self.sessions[0])
    }

    pub fn sessions(&self) -> &[SavedSession] {
        &self.sessions
    }

    pub fn get(&self, id: &str) -> Option<&SavedSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Returns whether a session was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        before != self.sessions.len()
    }

    /// Replaces `timeline`'s contents with the saved session `id`.
    pub fn load_into<L>(&self, id: &str, timeline: &mut SessionTimeline, lookup: &L) -> Result<()>
    where
        L: BundleLookup + ?Sized,
    {
        let session =
            self.get(id).ok_or_else(|| CompositionError::SessionNotFound(id.to_string()))?;
        timeline.restore(&session.items, lookup)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlanBundle;

    fn catalog() -> Vec<PlanBundle> {
        vec![PlanBundle::new("a", "Warm-up"), PlanBundle::new("b", "Small-sided game")]
    }

    fn timeline_with(ids: &[(&str, u32)]) -> SessionTimeline {
        let bundles = catalog();
        let mut timeline = SessionTimeline::new();
        for (id, minutes) in ids {
            let bundle = bundles.iter().find(|b| b.id == *id).unwrap().clone();
            timeline.append(bundle, *minutes);
        }
        timeline
    }

    #[test]
    fn test_save_newest_first() {
        let mut history = SessionHistory::new();
        history.save("Monday", &timeline_with(&[("a", 15)])).unwrap();
        history.save("Wednesday", &timeline_with(&[("a", 15), ("b", 45)])).unwrap();

        let names: Vec<_> = history.sessions().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Wednesday", "Monday"]);
        assert_eq!(history.sessions()[0].total_duration_minutes, 60);
    }

    #[test]
    fn test_save_rejects_blank_name_and_empty_timeline() {
        let mut history = SessionHistory::new();
        assert_eq!(
            history.save("   ", &timeline_with(&[("a", 15)])).unwrap_err(),
            CompositionError::EmptyName
        );
        assert_eq!(
            history.save("Friday", &SessionTimeline::new()).unwrap_err(),
            CompositionError::EmptyTimeline
        );
        assert!(history.is_empty());
    }

    #[test]
    fn test_save_trims_name() {
        let mut history = SessionHistory::new();
        let saved = history.save("  Match prep ", &timeline_with(&[("b", 30)])).unwrap();
        assert_eq!(saved.name, "Match prep");
    }

    #[test]
    fn test_load_into_and_delete() {
        let mut history = SessionHistory::new();
        let id = history.save("Tuesday", &timeline_with(&[("b", 40), ("a", 10)])).unwrap().id.clone();

        let mut timeline = timeline_with(&[("a", 90)]);
        history.load_into(&id, &mut timeline, &catalog()).unwrap();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.total_duration_minutes(), 50);
        assert_eq!(timeline.entry(0).unwrap().bundle.id, "b");

        assert!(history.delete(&id));
        assert!(!history.delete(&id));
        assert_eq!(
            history.load_into(&id, &mut timeline, &catalog()),
            Err(CompositionError::SessionNotFound(id))
        );
        // Failed load keeps what was there
        assert_eq!(timeline.total_duration_minutes(), 50);
    }
}
